//! Registry: the coordinator holding every identity and event.

mod directory;
mod ids;

pub use ids::IdAllocator;

use common::{EventId, IdentityId, TicketId};

use crate::error::{DomainError, Result};
use crate::event::{Event, NewEvent, Ticket};
use crate::identity::{Account, Attendee, Identity};
use crate::journal::{Journal, RegistryEvent};
use crate::money::Money;
use crate::report::Report;
use directory::Directory;

/// Top-level service exposing the use cases of the system.
///
/// Identities and events are kept in insertion order. Every successful
/// mutation is recorded in the [`Journal`]; failures change nothing.
#[derive(Debug, Clone, Default)]
pub struct Registry {
    directory: Directory,
    events: Vec<Event>,
    ids: IdAllocator,
    journal: Journal,
}

impl Registry {
    pub fn new() -> Self {
        tracing::info!("registry started");
        Self::default()
    }

    /// Registers an identity under its own id.
    ///
    /// An id that is already registered is rejected with `DuplicateIdentity`.
    #[tracing::instrument(skip_all)]
    pub fn register_identity(&mut self, identity: impl Into<Identity>) -> Result<()> {
        let identity = identity.into();
        let id = identity.id();
        let role = identity.role();

        self.directory.insert(identity).inspect_err(|_| {
            tracing::warn!(identity = %id, "identity id already registered");
        })?;

        self.journal
            .record(RegistryEvent::IdentityRegistered { identity: id, role });
        tracing::info!(identity = %id, %role, "identity registered");
        Ok(())
    }

    /// Checks a password for a registered identity.
    #[tracing::instrument(skip(self, password))]
    pub fn authenticate(&self, identity: IdentityId, password: &str) -> Result<bool> {
        Ok(self.directory.require(identity)?.authenticate(password))
    }

    /// Creates an event on behalf of an organizer.
    ///
    /// The event id is consumed only if the organizer is verified and the
    /// details are valid.
    #[tracing::instrument(skip(self, details))]
    pub fn create_event(&mut self, organizer: IdentityId, details: NewEvent) -> Result<&Event> {
        let creator = self.directory.organizer(organizer)?;
        let event = self
            .ids
            .allocate_event(|id| creator.create_event(id, details))?;

        self.journal.record(RegistryEvent::EventCreated {
            event: event.id(),
            organizer,
            name: event.name().to_string(),
            capacity: event.capacity(),
        });
        metrics::counter!("events_created_total").increment(1);

        self.events.push(event);
        let index = self.events.len() - 1;
        Ok(&self.events[index])
    }

    /// Renames an event on behalf of a verified organizer.
    #[tracing::instrument(skip(self, name))]
    pub fn edit_event(
        &mut self,
        organizer: IdentityId,
        event: EventId,
        name: impl Into<String>,
    ) -> Result<()> {
        let editor = self.directory.organizer(organizer)?;
        let target = find_event_mut(&mut self.events, event)?;
        editor.edit_event(target, name)?;

        self.journal.record(RegistryEvent::EventRenamed {
            event,
            name: target.name().to_string(),
        });
        Ok(())
    }

    /// Cancels an event and its sold tickets on behalf of a verified organizer.
    ///
    /// Returns the ids of the tickets that were cancelled.
    #[tracing::instrument(skip(self))]
    pub fn cancel_event(&mut self, organizer: IdentityId, event: EventId) -> Result<Vec<TicketId>> {
        let canceller = self.directory.organizer(organizer)?;
        let target = find_event_mut(&mut self.events, event)?;
        let cancelled = canceller.cancel_event(target)?;

        metrics::counter!("tickets_cancelled_total").increment(cancelled.len() as u64);
        self.journal.record(RegistryEvent::EventCancelled {
            event,
            cancelled_tickets: cancelled.clone(),
        });
        Ok(cancelled)
    }

    /// Enrolls an attendee in an event, issuing a new ticket.
    ///
    /// A full event yields `CapacityExceeded`; in that case no ticket id is
    /// consumed and neither side records anything.
    #[tracing::instrument(skip(self, ticket_type))]
    pub fn enroll(
        &mut self,
        attendee: IdentityId,
        event: EventId,
        ticket_type: impl Into<String>,
        price: Money,
    ) -> Result<&Ticket> {
        let holder = self.directory.attendee_mut(attendee)?;
        let target = find_event_mut(&mut self.events, event)?;

        let ticket_id = self
            .ids
            .allocate_ticket(|id| {
                holder
                    .enroll(target, id, ticket_type, price)
                    .map(Ticket::id)
            })
            .inspect_err(|err| {
                if matches!(err, DomainError::CapacityExceeded { .. }) {
                    metrics::counter!("enrollments_rejected_total").increment(1);
                }
            })?;

        self.journal.record(RegistryEvent::TicketIssued {
            ticket: ticket_id,
            event,
            attendee,
            price,
        });
        metrics::counter!("tickets_issued_total").increment(1);

        find_event(&self.events, event)?
            .ticket(ticket_id)
            .ok_or(DomainError::UnknownTicket(ticket_id))
    }

    /// Cancels a ticket the attendee holds.
    ///
    /// The ticket leaves the attendee's holdings but stays in the event's
    /// ticket list as `Cancelled`.
    #[tracing::instrument(skip(self))]
    pub fn cancel_enrollment(&mut self, attendee: IdentityId, ticket: TicketId) -> Result<()> {
        let holder = self.directory.attendee_mut(attendee)?;
        let Some(holding) = holder.holding(ticket) else {
            tracing::warn!("attendee does not hold the ticket");
            return Err(DomainError::NotFound { attendee, ticket });
        };

        let target = find_event_mut(&mut self.events, holding.event)?;
        if holder.cancel_enrollment(target, ticket)? {
            metrics::counter!("tickets_cancelled_total").increment(1);
        }

        self.journal.record(RegistryEvent::TicketCancelled {
            ticket,
            event: holding.event,
            attendee,
        });
        Ok(())
    }

    /// Marks a sold ticket as used.
    #[tracing::instrument(skip(self))]
    pub fn validate_ticket(&mut self, ticket: TicketId) -> Result<()> {
        let target = self
            .events
            .iter_mut()
            .find(|e| e.ticket(ticket).is_some())
            .ok_or(DomainError::UnknownTicket(ticket))?;
        target.validate_ticket(ticket)?;

        self.journal.record(RegistryEvent::TicketValidated {
            ticket,
            event: target.id(),
        });
        Ok(())
    }

    /// Generates a report over every identity and event.
    #[tracing::instrument(skip(self))]
    pub fn generate_report(&mut self, admin: IdentityId) -> Result<Report> {
        let author = self.directory.administrator(admin)?;
        let identities = self.directory.as_slice();
        let events = &self.events;
        let report = self
            .ids
            .allocate_report(|id| Ok(author.generate_report(id, identities, events)))?;

        self.journal.record(RegistryEvent::ReportGenerated {
            report: report.id(),
            admin,
        });
        metrics::counter!("reports_generated_total").increment(1);
        Ok(report)
    }

    /// Records an administrative action against an identity.
    #[tracing::instrument(skip(self))]
    pub fn manage_identity(
        &mut self,
        admin: IdentityId,
        target: IdentityId,
        action: &str,
    ) -> Result<()> {
        let author = self.directory.administrator(admin)?;
        author.manage_identity(self.directory.require(target)?, action);

        self.journal.record(RegistryEvent::IdentityManaged {
            admin,
            target,
            action: action.to_string(),
        });
        Ok(())
    }
}

// Query methods
impl Registry {
    /// Returns every identity in registration order.
    pub fn identities(&self) -> &[Identity] {
        self.directory.as_slice()
    }

    pub fn identity(&self, id: IdentityId) -> Option<&Identity> {
        self.directory.get(id)
    }

    pub fn attendee(&self, id: IdentityId) -> Option<&Attendee> {
        self.directory.get(id).and_then(Identity::as_attendee)
    }

    /// Returns every event in creation order.
    pub fn events(&self) -> &[Event] {
        &self.events
    }

    pub fn event(&self, id: EventId) -> Option<&Event> {
        find_event(&self.events, id).ok()
    }

    /// Returns the first event with this name.
    pub fn event_by_name(&self, name: &str) -> Option<&Event> {
        let found = self.events.iter().find(|e| e.name() == name);
        if found.is_none() {
            tracing::debug!(name, "no event with this name");
        }
        found
    }

    /// Looks a ticket up across all events.
    pub fn ticket(&self, id: TicketId) -> Option<&Ticket> {
        self.events.iter().find_map(|e| e.ticket(id))
    }

    pub fn journal(&self) -> &Journal {
        &self.journal
    }

    /// Returns the id the next successful event creation will get.
    pub fn next_event_id(&self) -> EventId {
        self.ids.next_event_id()
    }

    /// Returns the id the next successful enrollment will get.
    pub fn next_ticket_id(&self) -> TicketId {
        self.ids.next_ticket_id()
    }
}

fn find_event(events: &[Event], id: EventId) -> Result<&Event> {
    events
        .iter()
        .find(|e| e.id() == id)
        .ok_or(DomainError::UnknownEvent(id))
}

fn find_event_mut(events: &mut [Event], id: EventId) -> Result<&mut Event> {
    events
        .iter_mut()
        .find(|e| e.id() == id)
        .ok_or(DomainError::UnknownEvent(id))
}
