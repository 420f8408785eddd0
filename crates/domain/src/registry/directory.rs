//! Registered identities, kept in registration order.

use std::collections::HashMap;

use common::IdentityId;

use crate::error::{DomainError, Result};
use crate::identity::{Account, Administrator, Attendee, Identity, Organizer, Role};

#[derive(Debug, Clone, Default)]
pub(crate) struct Directory {
    entries: Vec<Identity>,
    index: HashMap<IdentityId, usize>,
}

impl Directory {
    /// Adds an identity, rejecting an id that is already taken.
    pub(crate) fn insert(&mut self, identity: Identity) -> Result<()> {
        let id = identity.id();
        if self.index.contains_key(&id) {
            return Err(DomainError::DuplicateIdentity(id));
        }

        self.index.insert(id, self.entries.len());
        self.entries.push(identity);
        Ok(())
    }

    pub(crate) fn as_slice(&self) -> &[Identity] {
        &self.entries
    }

    pub(crate) fn get(&self, id: IdentityId) -> Option<&Identity> {
        self.index.get(&id).map(|&i| &self.entries[i])
    }

    pub(crate) fn require(&self, id: IdentityId) -> Result<&Identity> {
        self.get(id).ok_or(DomainError::UnknownIdentity(id))
    }

    pub(crate) fn administrator(&self, id: IdentityId) -> Result<&Administrator> {
        let identity = self.require(id)?;
        identity
            .as_administrator()
            .ok_or_else(|| mismatch(identity, Role::Administrator))
    }

    pub(crate) fn organizer(&self, id: IdentityId) -> Result<&Organizer> {
        let identity = self.require(id)?;
        identity
            .as_organizer()
            .ok_or_else(|| mismatch(identity, Role::Organizer))
    }

    pub(crate) fn attendee_mut(&mut self, id: IdentityId) -> Result<&mut Attendee> {
        let index = *self.index.get(&id).ok_or(DomainError::UnknownIdentity(id))?;
        let identity = &mut self.entries[index];
        let actual = identity.role();
        identity
            .as_attendee_mut()
            .ok_or(DomainError::RoleMismatch {
                identity: id,
                expected: Role::Attendee,
                actual,
            })
    }
}

fn mismatch(identity: &Identity, expected: Role) -> DomainError {
    DomainError::RoleMismatch {
        identity: identity.id(),
        expected,
        actual: identity.role(),
    }
}
