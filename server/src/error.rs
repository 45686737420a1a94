use thiserror::Error;

use keel_shared::{AuthorityError, DecodeError};

/// Errors returned by the authoritative publisher
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PublishError {
    /// Authority could not be read, or the publisher was torn down
    #[error(transparent)]
    Authority(#[from] AuthorityError),

    /// A freshly encoded field failed to decode again
    #[error(transparent)]
    Decode(#[from] DecodeError),
}

/// Errors returned by the non-authoritative sink. The offending payload has
/// not been applied.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SinkError {
    #[error(transparent)]
    Authority(#[from] AuthorityError),

    #[error(transparent)]
    Decode(#[from] DecodeError),
}
