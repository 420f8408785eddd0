//! Organizer identity.

use common::{EventId, IdentityId, TicketId};

use super::{Account, Profile, Role};
use crate::error::{DomainError, Result};
use crate::event::{Event, NewEvent};

/// An identity that schedules and manages events.
///
/// Only verified organizers can authenticate or manage events.
#[derive(Debug, Clone)]
pub struct Organizer {
    profile: Profile,
    verified: bool,
}

impl Organizer {
    /// Creates a new organizer.
    pub fn new(
        id: IdentityId,
        name: impl Into<String>,
        email: impl Into<String>,
        password: impl Into<String>,
        verified: bool,
    ) -> Self {
        Self {
            profile: Profile::new(id, name, email, password),
            verified,
        }
    }

    pub fn is_verified(&self) -> bool {
        self.verified
    }

    /// Schedules a new event with the given id.
    ///
    /// An unverified organizer gets `NotAuthorized` and no event is built.
    pub fn create_event(&self, id: EventId, details: NewEvent) -> Result<Event> {
        self.ensure_verified("create event")?;

        let event = Event::create(id, details)?;
        tracing::info!(organizer = %self.id(), event = %id, name = event.name(), "event created");
        Ok(event)
    }

    /// Renames an event.
    pub fn edit_event(&self, event: &mut Event, name: impl Into<String>) -> Result<()> {
        self.ensure_verified("edit event")?;
        event.rename(name);
        Ok(())
    }

    /// Cancels an event and every ticket still holding a seat.
    pub fn cancel_event(&self, event: &mut Event) -> Result<Vec<TicketId>> {
        self.ensure_verified("cancel event")?;
        event.cancel()
    }

    fn ensure_verified(&self, action: &'static str) -> Result<()> {
        if self.verified {
            return Ok(());
        }

        tracing::warn!(organizer = %self.id(), action, "organizer is not verified");
        Err(DomainError::NotAuthorized {
            organizer: self.id(),
        })
    }
}

impl Account for Organizer {
    fn profile(&self) -> &Profile {
        &self.profile
    }

    fn role(&self) -> Role {
        Role::Organizer
    }

    /// Fails for an unverified account whatever the password.
    fn authenticate(&self, password: &str) -> bool {
        if !self.verified {
            tracing::warn!(
                identity = %self.id(),
                role = %self.role(),
                reason = "account not verified",
                "authentication rejected"
            );
            return false;
        }

        let success = self.profile.password_matches(password);
        tracing::info!(
            identity = %self.id(),
            role = %self.role(),
            success,
            "authentication attempt"
        );
        success
    }
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, Utc};

    use super::*;
    use crate::event::EventStatus;
    use crate::venue::Venue;

    fn organizer(verified: bool) -> Organizer {
        Organizer::new(IdentityId::new(2), "IFC Events", "contact@ifc.com", "abc", verified)
    }

    fn details() -> NewEvent {
        let start = Utc::now();
        NewEvent::new(
            "OOP Talk",
            start,
            start + Duration::hours(3),
            2,
            Venue::new(101, "Auditorium", "Rod. SC-150", 200),
        )
    }

    #[test]
    fn test_verified_organizer_authenticates() {
        assert!(organizer(true).authenticate("abc"));
        assert!(!organizer(true).authenticate("xyz"));
    }

    #[test]
    fn test_unverified_organizer_never_authenticates() {
        assert!(!organizer(false).authenticate("abc"));
    }

    #[test]
    fn test_verified_organizer_creates_event() {
        let event = organizer(true).create_event(EventId::new(1), details()).unwrap();
        assert_eq!(event.id(), EventId::new(1));
        assert_eq!(event.status(), EventStatus::Planned);
    }

    #[test]
    fn test_unverified_organizer_cannot_create_event() {
        let result = organizer(false).create_event(EventId::new(1), details());
        assert!(matches!(
            result,
            Err(DomainError::NotAuthorized { organizer }) if organizer == IdentityId::new(2)
        ));
    }

    #[test]
    fn test_edit_and_cancel_event() {
        let org = organizer(true);
        let mut event = org.create_event(EventId::new(1), details()).unwrap();

        org.edit_event(&mut event, "Renamed").unwrap();
        assert_eq!(event.name(), "Renamed");

        org.cancel_event(&mut event).unwrap();
        assert_eq!(event.status(), EventStatus::Cancelled);
    }

    #[test]
    fn test_unverified_organizer_cannot_manage_event() {
        let mut event = organizer(true)
            .create_event(EventId::new(1), details())
            .unwrap();
        let unverified = organizer(false);

        assert!(unverified.edit_event(&mut event, "Hijacked").is_err());
        assert!(unverified.cancel_event(&mut event).is_err());
        assert_eq!(event.name(), "OOP Talk");
        assert_eq!(event.status(), EventStatus::Planned);
    }
}
