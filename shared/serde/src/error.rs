use thiserror::Error;

/// Errors produced while reading a bit stream
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SerdeErr {
    /// The reader ran past the end of its buffer
    #[error("bit stream ended after {bits_read} bits")]
    UnexpectedEnd { bits_read: u32 },
}
