use log::{info, warn};

use crate::authority::{
    channel::{AuthorityAccessor, AuthoritySnapshot},
    error::AuthorityError,
    Authority,
};

/// Edge observed by a role when it refreshes its view of the authority flag
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AuthorityTransition {
    Gained,
    Lost,
}

/// Per-role view of the authority flag.
///
/// A role reads the shared flag once per entry point (`refresh`) and works
/// against that value until the next refresh, so a tick never sees a
/// half-applied change. The first refresh always reports an edge for the
/// state the role starts in. Losing and regaining authority between two
/// refreshes is reported as a fresh `Gained`.
pub struct AuthorityRole {
    name: &'static str,
    accessor: AuthorityAccessor,
    current: Authority,
    epoch: Option<u64>,
    torn_down: bool,
}

impl AuthorityRole {
    pub fn new(name: &'static str, accessor: AuthorityAccessor) -> Self {
        Self {
            name,
            accessor,
            current: Authority::NotAuthoritative,
            epoch: None,
            torn_down: false,
        }
    }

    pub fn authority(&self) -> Authority {
        self.current
    }

    pub fn is_authoritative(&self) -> bool {
        self.current.is_authoritative()
    }

    pub fn is_torn_down(&self) -> bool {
        self.torn_down
    }

    /// Reads the shared flag and reports the edge crossed since the last
    /// refresh, if any
    pub fn refresh(&mut self) -> Result<Option<AuthorityTransition>, AuthorityError> {
        if self.torn_down {
            return Err(AuthorityError::TornDown {
                operation: "refresh authority",
            });
        }

        let AuthoritySnapshot { authority, epoch } = self.accessor.try_snapshot()?;
        if self.epoch == Some(epoch) {
            return Ok(None);
        }

        self.current = authority;
        self.epoch = Some(epoch);

        let transition = match authority {
            Authority::Authoritative => AuthorityTransition::Gained,
            Authority::NotAuthoritative => AuthorityTransition::Lost,
        };
        info!("{}: authority {:?} (epoch {})", self.name, transition, epoch);
        Ok(Some(transition))
    }

    /// Gate for writes that only the owner may perform
    pub fn require_authoritative(&self, operation: &'static str) -> Result<(), AuthorityError> {
        self.require_live(operation)?;
        if !self.current.is_authoritative() {
            return Err(AuthorityError::NotAuthoritative { operation });
        }
        Ok(())
    }

    /// Gate for writes that only a non-owner may perform
    pub fn require_not_authoritative(
        &self,
        operation: &'static str,
    ) -> Result<(), AuthorityError> {
        self.require_live(operation)?;
        if self.current.is_authoritative() {
            return Err(AuthorityError::Authoritative { operation });
        }
        Ok(())
    }

    /// Stops the role for good. Every later gate check fails.
    pub fn teardown(&mut self) {
        if !self.torn_down {
            info!("{}: torn down", self.name);
        }
        self.torn_down = true;
        self.current = Authority::NotAuthoritative;
    }

    fn require_live(&self, operation: &'static str) -> Result<(), AuthorityError> {
        if self.torn_down {
            warn!("{}: refused to {} after teardown", self.name, operation);
            return Err(AuthorityError::TornDown { operation });
        }
        Ok(())
    }
}
