mod channel;
mod error;
mod role;

pub use channel::{AuthorityAccessor, AuthorityChannel, AuthorityMutator, AuthoritySnapshot};
pub use error::AuthorityError;
pub use role::{AuthorityRole, AuthorityTransition};

/// Whether this process currently owns an entity's physics
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Authority {
    Authoritative,
    NotAuthoritative,
}

impl Authority {
    pub fn is_authoritative(self) -> bool {
        self == Authority::Authoritative
    }

    pub fn name(self) -> &'static str {
        match self {
            Authority::Authoritative => "Authoritative",
            Authority::NotAuthoritative => "NotAuthoritative",
        }
    }
}
