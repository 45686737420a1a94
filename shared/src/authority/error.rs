use thiserror::Error;

/// Errors raised by the authority gate around rigid body writes
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthorityError {
    /// A write that needs authority was attempted without it
    #[error("Must have authority over Entity before {operation}")]
    NotAuthoritative { operation: &'static str },

    /// A remote write was attempted while the local solver owns the body
    #[error("Cannot {operation} while Authoritative over Entity")]
    Authoritative { operation: &'static str },

    /// The role was torn down and accepts no more work
    #[error("Cannot {operation} after the role has been torn down")]
    TornDown { operation: &'static str },

    /// The shared authority flag could not be locked
    #[error("Lock on authority status is poisoned")]
    AuthLockPoisoned,
}
