//! Domain error types.

use chrono::{DateTime, Utc};
use common::{EventId, IdentityId, TicketId};
use thiserror::Error;

use crate::identity::Role;

/// Errors that can occur during domain operations.
///
/// Every variant is a recoverable business-rule rejection. An operation that
/// returns one of these has left the registry untouched.
#[derive(Debug, Error)]
pub enum DomainError {
    /// An unverified organizer tried to manage events.
    #[error("Organizer {organizer} is not verified")]
    NotAuthorized { organizer: IdentityId },

    /// The event has no free seat left.
    #[error("Event {event} is at capacity ({capacity} tickets sold)")]
    CapacityExceeded { event: EventId, capacity: u32 },

    /// The attendee does not hold the ticket.
    #[error("Attendee {attendee} does not hold ticket {ticket}")]
    NotFound {
        attendee: IdentityId,
        ticket: TicketId,
    },

    /// A ticket or event is not in the expected state.
    #[error("Invalid state transition: cannot {action} from {current_state} state")]
    InvalidStateTransition {
        current_state: &'static str,
        action: &'static str,
    },

    /// No identity is registered under this id.
    #[error("Identity not found: {0}")]
    UnknownIdentity(IdentityId),

    /// No event exists with this id.
    #[error("Event not found: {0}")]
    UnknownEvent(EventId),

    /// No event holds a ticket with this id.
    #[error("Ticket not found: {0}")]
    UnknownTicket(TicketId),

    /// The identity exists but has a different role.
    #[error("Identity {identity} is an {actual}, expected an {expected}")]
    RoleMismatch {
        identity: IdentityId,
        expected: Role,
        actual: Role,
    },

    /// An identity with this id is already registered.
    #[error("Identity already registered: {0}")]
    DuplicateIdentity(IdentityId),

    /// Event capacity must be greater than zero.
    #[error("Invalid capacity: {capacity} (must be greater than 0)")]
    InvalidCapacity { capacity: u32 },

    /// Event ends before it starts.
    #[error("Invalid schedule: ends at {ends_at} before it starts at {starts_at}")]
    InvalidSchedule {
        starts_at: DateTime<Utc>,
        ends_at: DateTime<Utc>,
    },

    /// The ticket was issued for a different event.
    #[error("Ticket {ticket} belongs to event {ticket_event}, not {event}")]
    ForeignTicket {
        ticket: TicketId,
        ticket_event: EventId,
        event: EventId,
    },

    /// The event already lists a ticket with this id.
    #[error("Ticket already issued: {0}")]
    DuplicateTicket(TicketId),

    /// Ticket price cannot be negative.
    #[error("Invalid price: {cents} cents (must not be negative)")]
    InvalidPrice { cents: i64 },
}

/// Convenience type alias for domain results.
pub type Result<T> = std::result::Result<T, DomainError>;
