use std::sync::{Arc, RwLock};

use crate::authority::{error::AuthorityError, Authority};

/// Authority flag shared between the platform, which flips it, and the
/// local roles, which only read it.
#[derive(Clone)]
pub struct AuthorityChannel {
    data: Arc<RwLock<AuthorityData>>,
}

impl AuthorityChannel {
    pub fn new_channel(initial: Authority) -> (AuthorityMutator, AuthorityAccessor) {
        let channel = Self {
            data: Arc::new(RwLock::new(AuthorityData::new(initial))),
        };

        let sender = AuthorityMutator::new(&channel);
        let receiver = AuthorityAccessor::new(&channel);

        (sender, receiver)
    }

    fn try_snapshot(&self) -> Result<AuthoritySnapshot, AuthorityError> {
        let data = self
            .data
            .as_ref()
            .read()
            .map_err(|_| AuthorityError::AuthLockPoisoned)?;
        Ok(data.snapshot())
    }

    fn try_set_authority(&self, authority: Authority) -> Result<(), AuthorityError> {
        let mut data = self
            .data
            .as_ref()
            .write()
            .map_err(|_| AuthorityError::AuthLockPoisoned)?;
        data.set_authority(authority);
        Ok(())
    }
}

/// Authority value together with the number of changes it has gone through.
/// Two snapshots with equal `epoch` describe the same authority period.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AuthoritySnapshot {
    pub authority: Authority,
    pub epoch: u64,
}

// AuthorityData
struct AuthorityData {
    authority: Authority,
    epoch: u64,
}

impl AuthorityData {
    fn new(authority: Authority) -> Self {
        Self {
            authority,
            epoch: 0,
        }
    }

    fn snapshot(&self) -> AuthoritySnapshot {
        AuthoritySnapshot {
            authority: self.authority,
            epoch: self.epoch,
        }
    }

    fn set_authority(&mut self, authority: Authority) {
        if self.authority != authority {
            self.authority = authority;
            self.epoch += 1;
        }
    }
}

// AuthorityAccessor
#[derive(Clone)]
pub struct AuthorityAccessor {
    channel: AuthorityChannel,
}

impl AuthorityAccessor {
    fn new(channel: &AuthorityChannel) -> Self {
        Self {
            channel: channel.clone(),
        }
    }

    pub fn try_authority(&self) -> Result<Authority, AuthorityError> {
        Ok(self.channel.try_snapshot()?.authority)
    }

    pub fn try_snapshot(&self) -> Result<AuthoritySnapshot, AuthorityError> {
        self.channel.try_snapshot()
    }
}

// AuthorityMutator
// no Clone necessary
pub struct AuthorityMutator {
    channel: AuthorityChannel,
}

impl AuthorityMutator {
    fn new(channel: &AuthorityChannel) -> Self {
        Self {
            channel: channel.clone(),
        }
    }

    /// Delivers an authority change. Setting the current value again is a
    /// no-op and does not start a new epoch.
    pub fn try_set_authority(&self, authority: Authority) -> Result<(), AuthorityError> {
        self.channel.try_set_authority(authority)
    }
}
