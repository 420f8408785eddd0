//! Event aggregate implementation.

use chrono::{DateTime, Utc};
use common::{EventId, TicketId};
use serde::{Deserialize, Serialize};

use super::{EventStatus, Ticket, TicketStatus};
use crate::error::{DomainError, Result};
use crate::money::Money;
use crate::venue::Venue;

/// The data an organizer supplies to schedule a new event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewEvent {
    pub name: String,
    pub description: String,
    pub starts_at: DateTime<Utc>,
    pub ends_at: DateTime<Utc>,
    pub capacity: u32,
    pub venue: Venue,
}

impl NewEvent {
    /// Creates event details with an empty description.
    pub fn new(
        name: impl Into<String>,
        starts_at: DateTime<Utc>,
        ends_at: DateTime<Utc>,
        capacity: u32,
        venue: Venue,
    ) -> Self {
        Self {
            name: name.into(),
            description: String::new(),
            starts_at,
            ends_at,
            capacity,
            venue,
        }
    }

    /// Sets the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }
}

/// Event aggregate root.
///
/// Owns its venue and the authoritative, append-only list of every ticket
/// issued against it. The number of `Sold` tickets never exceeds `capacity`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Event {
    id: EventId,
    name: String,
    description: String,
    starts_at: DateTime<Utc>,
    ends_at: DateTime<Utc>,
    capacity: u32,
    status: EventStatus,
    venue: Venue,

    /// Every ticket ever issued, in issue order. Cancelled tickets stay here.
    tickets: Vec<Ticket>,
}

impl Event {
    /// Builds a planned event from validated details.
    pub fn create(id: EventId, details: NewEvent) -> Result<Self> {
        if details.capacity == 0 {
            return Err(DomainError::InvalidCapacity {
                capacity: details.capacity,
            });
        }

        if details.ends_at < details.starts_at {
            return Err(DomainError::InvalidSchedule {
                starts_at: details.starts_at,
                ends_at: details.ends_at,
            });
        }

        Ok(Self {
            id,
            name: details.name,
            description: details.description,
            starts_at: details.starts_at,
            ends_at: details.ends_at,
            capacity: details.capacity,
            status: EventStatus::Planned,
            venue: details.venue,
            tickets: Vec::new(),
        })
    }
}

// Query methods
impl Event {
    pub fn id(&self) -> EventId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn starts_at(&self) -> DateTime<Utc> {
        self.starts_at
    }

    pub fn ends_at(&self) -> DateTime<Utc> {
        self.ends_at
    }

    pub fn capacity(&self) -> u32 {
        self.capacity
    }

    pub fn status(&self) -> EventStatus {
        self.status
    }

    pub fn venue(&self) -> &Venue {
        &self.venue
    }

    /// Returns all tickets in issue order, including cancelled and used ones.
    pub fn tickets(&self) -> &[Ticket] {
        &self.tickets
    }

    /// Returns a ticket by id.
    pub fn ticket(&self, ticket_id: TicketId) -> Option<&Ticket> {
        self.tickets.iter().find(|t| t.id() == ticket_id)
    }

    /// Returns the number of tickets currently holding a seat.
    pub fn sold_count(&self) -> u32 {
        self.tickets
            .iter()
            .filter(|t| t.status().occupies_seat())
            .count() as u32
    }

    /// Returns true if another ticket can be sold.
    pub fn has_capacity(&self) -> bool {
        self.sold_count() < self.capacity
    }

    /// Returns the number of free seats.
    pub fn remaining(&self) -> u32 {
        self.capacity.saturating_sub(self.sold_count())
    }

    /// Returns the sum of prices of tickets that were not cancelled.
    pub fn revenue(&self) -> Money {
        self.tickets
            .iter()
            .filter(|t| t.status() != TicketStatus::Cancelled)
            .map(Ticket::price)
            .sum()
    }
}

// Command methods
impl Event {
    /// Appends a sold ticket after re-checking capacity.
    ///
    /// The ticket must be issued for this event under an id the event has
    /// not seen yet. The check and the append happen under the same
    /// `&mut self`, so these invariants hold even when called directly.
    pub fn add_ticket(&mut self, ticket: Ticket) -> Result<&Ticket> {
        if !self.status.can_issue_tickets() {
            return Err(DomainError::InvalidStateTransition {
                current_state: self.status.as_str(),
                action: "issue ticket",
            });
        }

        if ticket.event() != self.id {
            tracing::warn!(
                event = %self.id,
                ticket = %ticket.id(),
                "ticket issued for another event"
            );
            return Err(DomainError::ForeignTicket {
                ticket: ticket.id(),
                ticket_event: ticket.event(),
                event: self.id,
            });
        }

        if self.ticket(ticket.id()).is_some() {
            tracing::warn!(
                event = %self.id,
                ticket = %ticket.id(),
                "ticket id already issued"
            );
            return Err(DomainError::DuplicateTicket(ticket.id()));
        }

        if !self.has_capacity() {
            return Err(DomainError::CapacityExceeded {
                event: self.id,
                capacity: self.capacity,
            });
        }

        self.tickets.push(ticket);
        tracing::info!(
            event = %self.id,
            remaining = self.remaining(),
            "ticket added to event"
        );

        let index = self.tickets.len() - 1;
        Ok(&self.tickets[index])
    }

    /// Renames the event.
    pub fn rename(&mut self, name: impl Into<String>) {
        let name = name.into();
        tracing::info!(event = %self.id, from = %self.name, to = %name, "event renamed");
        self.name = name;
    }

    /// Cancels the event and every ticket still holding a seat.
    ///
    /// Used tickets are left as they are. Returns the ids of the tickets
    /// that were cancelled.
    pub fn cancel(&mut self) -> Result<Vec<TicketId>> {
        if !self.status.can_cancel() {
            return Err(DomainError::InvalidStateTransition {
                current_state: self.status.as_str(),
                action: "cancel event",
            });
        }

        self.status = EventStatus::Cancelled;

        let mut cancelled = Vec::new();
        for ticket in self.tickets.iter_mut() {
            if ticket.status().can_cancel() && ticket.cancel()? {
                cancelled.push(ticket.id());
            }
        }

        tracing::info!(event = %self.id, tickets = cancelled.len(), "event cancelled");
        Ok(cancelled)
    }

    /// Cancels one ticket of this event.
    ///
    /// Returns `Ok(false)` if the ticket was already cancelled.
    pub fn cancel_ticket(&mut self, ticket_id: TicketId) -> Result<bool> {
        self.ticket_mut(ticket_id)?.cancel()
    }

    /// Validates one ticket of this event at the door.
    pub fn validate_ticket(&mut self, ticket_id: TicketId) -> Result<()> {
        self.ticket_mut(ticket_id)?.validate()
    }

    fn ticket_mut(&mut self, ticket_id: TicketId) -> Result<&mut Ticket> {
        self.tickets
            .iter_mut()
            .find(|t| t.id() == ticket_id)
            .ok_or(DomainError::UnknownTicket(ticket_id))
    }
}

impl std::fmt::Display for Event {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Event: {} (Status: {})", self.name, self.status)?;
        writeln!(f, "   Venue: {}", self.venue.name())?;
        write!(f, "   Seats: {}/{}", self.sold_count(), self.capacity)
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;
    use common::IdentityId;

    use super::*;

    fn details(capacity: u32) -> NewEvent {
        NewEvent::new(
            "OOP Talk",
            Utc.with_ymd_and_hms(2025, 11, 20, 19, 0, 0).unwrap(),
            Utc.with_ymd_and_hms(2025, 11, 20, 22, 0, 0).unwrap(),
            capacity,
            Venue::new(101, "Auditorium", "Rod. SC-150, Km 125", 200),
        )
        .with_description("UML and design")
    }

    fn ticket(id: u64, attendee: u64) -> Ticket {
        Ticket::new(
            TicketId::new(id),
            "General",
            Money::from_units(20),
            IdentityId::new(attendee),
            EventId::new(1),
        )
    }

    fn create_event(capacity: u32) -> Event {
        Event::create(EventId::new(1), details(capacity)).unwrap()
    }

    #[test]
    fn test_create_event() {
        let event = create_event(2);
        assert_eq!(event.status(), EventStatus::Planned);
        assert_eq!(event.description(), "UML and design");
        assert_eq!(event.venue().name(), "Auditorium");
        assert!(event.tickets().is_empty());
        assert!(event.has_capacity());
    }

    #[test]
    fn test_create_with_zero_capacity_fails() {
        let result = Event::create(EventId::new(1), details(0));
        assert!(matches!(result, Err(DomainError::InvalidCapacity { .. })));
    }

    #[test]
    fn test_create_ending_before_start_fails() {
        let mut details = details(2);
        std::mem::swap(&mut details.starts_at, &mut details.ends_at);
        let result = Event::create(EventId::new(1), details);
        assert!(matches!(result, Err(DomainError::InvalidSchedule { .. })));
    }

    #[test]
    fn test_add_ticket_until_full() {
        let mut event = create_event(2);
        event.add_ticket(ticket(100, 4)).unwrap();
        event.add_ticket(ticket(101, 5)).unwrap();

        assert!(!event.has_capacity());
        let result = event.add_ticket(ticket(102, 6));
        assert!(matches!(
            result,
            Err(DomainError::CapacityExceeded { capacity: 2, .. })
        ));
        assert_eq!(event.sold_count(), 2);
        assert_eq!(event.tickets().len(), 2);
    }

    #[test]
    fn test_cancelled_ticket_frees_seat_but_stays_listed() {
        let mut event = create_event(1);
        event.add_ticket(ticket(100, 4)).unwrap();
        assert!(event.cancel_ticket(TicketId::new(100)).unwrap());

        assert!(event.has_capacity());
        assert_eq!(event.tickets().len(), 1);
        assert_eq!(event.tickets()[0].status(), TicketStatus::Cancelled);

        event.add_ticket(ticket(101, 5)).unwrap();
        assert_eq!(event.tickets().len(), 2);
        assert_eq!(event.sold_count(), 1);
    }

    #[test]
    fn test_used_ticket_frees_seat() {
        let mut event = create_event(1);
        event.add_ticket(ticket(100, 4)).unwrap();
        event.validate_ticket(TicketId::new(100)).unwrap();
        assert_eq!(event.sold_count(), 0);
        assert_eq!(event.revenue(), Money::from_units(20));
    }

    #[test]
    fn test_cancel_event_cancels_sold_tickets_only() {
        let mut event = create_event(3);
        event.add_ticket(ticket(100, 4)).unwrap();
        event.add_ticket(ticket(101, 5)).unwrap();
        event.validate_ticket(TicketId::new(101)).unwrap();

        let cancelled = event.cancel().unwrap();

        assert_eq!(cancelled, vec![TicketId::new(100)]);
        assert_eq!(event.status(), EventStatus::Cancelled);
        assert_eq!(
            event.ticket(TicketId::new(101)).unwrap().status(),
            TicketStatus::Used
        );
    }

    #[test]
    fn test_cannot_cancel_event_twice() {
        let mut event = create_event(1);
        event.cancel().unwrap();
        assert!(matches!(
            event.cancel(),
            Err(DomainError::InvalidStateTransition { .. })
        ));
    }

    #[test]
    fn test_cancelled_event_rejects_tickets() {
        let mut event = create_event(5);
        event.cancel().unwrap();
        let result = event.add_ticket(ticket(100, 4));
        assert!(matches!(
            result,
            Err(DomainError::InvalidStateTransition { .. })
        ));
        assert!(event.tickets().is_empty());
    }

    #[test]
    fn test_add_ticket_for_another_event_fails() {
        let mut event = create_event(2);
        let stray = Ticket::new(
            TicketId::new(100),
            "General",
            Money::from_units(20),
            IdentityId::new(4),
            EventId::new(99),
        );

        let result = event.add_ticket(stray);

        assert!(matches!(
            result,
            Err(DomainError::ForeignTicket { ticket_event, .. })
                if ticket_event == EventId::new(99)
        ));
        assert!(event.tickets().is_empty());
    }

    #[test]
    fn test_add_ticket_with_issued_id_fails() {
        let mut event = create_event(3);
        event.add_ticket(ticket(100, 4)).unwrap();
        event.cancel_ticket(TicketId::new(100)).unwrap();

        let result = event.add_ticket(ticket(100, 5));

        assert!(matches!(
            result,
            Err(DomainError::DuplicateTicket(id)) if id == TicketId::new(100)
        ));
        assert_eq!(event.tickets().len(), 1);
        assert_eq!(event.tickets()[0].attendee(), IdentityId::new(4));
    }

    #[test]
    fn test_revenue_saturates_instead_of_overflowing() {
        let mut event = create_event(2);
        let expensive = Ticket::new(
            TicketId::new(100),
            "VIP",
            Money::from_cents(i64::MAX),
            IdentityId::new(4),
            EventId::new(1),
        );
        event.add_ticket(expensive).unwrap();
        event.add_ticket(ticket(101, 5)).unwrap();

        assert_eq!(event.revenue(), Money::from_cents(i64::MAX));
    }

    #[test]
    fn test_unknown_ticket() {
        let mut event = create_event(1);
        let result = event.cancel_ticket(TicketId::new(999));
        assert!(matches!(result, Err(DomainError::UnknownTicket(_))));
    }

    #[test]
    fn test_rename() {
        let mut event = create_event(1);
        event.rename("Advanced OOP Talk");
        assert_eq!(event.name(), "Advanced OOP Talk");
    }

    #[test]
    fn test_display() {
        let mut event = create_event(2);
        event.add_ticket(ticket(100, 4)).unwrap();
        assert_eq!(
            event.to_string(),
            "Event: OOP Talk (Status: Planned)\n   Venue: Auditorium\n   Seats: 1/2"
        );
    }

    #[test]
    fn test_serialization() {
        let mut event = create_event(2);
        event.add_ticket(ticket(100, 4)).unwrap();

        let json = serde_json::to_string(&event).unwrap();
        let deserialized: Event = serde_json::from_str(&json).unwrap();

        assert_eq!(deserialized.id(), EventId::new(1));
        assert_eq!(deserialized.tickets().len(), 1);
        assert_eq!(deserialized.sold_count(), 1);
    }
}
