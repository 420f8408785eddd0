//! Ticket entity.

use common::{EventId, IdentityId, TicketId};
use serde::{Deserialize, Serialize};

use super::TicketStatus;
use crate::error::{DomainError, Result};
use crate::money::Money;

/// One attendee's claim on one seat of an event.
///
/// Tickets are owned by the event they were issued for and are never removed
/// from it; only their status changes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ticket {
    id: TicketId,

    /// Free-form label such as "Student" or "General".
    ticket_type: String,

    price: Money,
    status: TicketStatus,

    /// The attendee that holds (or held) the ticket.
    attendee: IdentityId,

    event: EventId,
}

impl Ticket {
    /// Creates a new ticket in the `Sold` state.
    pub fn new(
        id: TicketId,
        ticket_type: impl Into<String>,
        price: Money,
        attendee: IdentityId,
        event: EventId,
    ) -> Self {
        Self {
            id,
            ticket_type: ticket_type.into(),
            price,
            status: TicketStatus::Sold,
            attendee,
            event,
        }
    }

    pub fn id(&self) -> TicketId {
        self.id
    }

    pub fn ticket_type(&self) -> &str {
        &self.ticket_type
    }

    pub fn price(&self) -> Money {
        self.price
    }

    pub fn status(&self) -> TicketStatus {
        self.status
    }

    pub fn attendee(&self) -> IdentityId {
        self.attendee
    }

    pub fn event(&self) -> EventId {
        self.event
    }

    /// Marks the ticket as used.
    ///
    /// Only a sold ticket can be validated; validating twice is rejected.
    pub fn validate(&mut self) -> Result<()> {
        if !self.status.can_validate() {
            return Err(DomainError::InvalidStateTransition {
                current_state: self.status.as_str(),
                action: "validate ticket",
            });
        }

        self.status = TicketStatus::Used;
        tracing::info!(ticket = %self.id, attendee = %self.attendee, "ticket validated");
        Ok(())
    }

    /// Cancels the ticket, releasing its seat.
    ///
    /// Returns `Ok(false)` when the ticket was already cancelled. A used
    /// ticket cannot be cancelled.
    pub fn cancel(&mut self) -> Result<bool> {
        if self.status == TicketStatus::Cancelled {
            return Ok(false);
        }

        if !self.status.can_cancel() {
            return Err(DomainError::InvalidStateTransition {
                current_state: self.status.as_str(),
                action: "cancel ticket",
            });
        }

        self.status = TicketStatus::Cancelled;
        tracing::info!(ticket = %self.id, event = %self.event, "ticket cancelled");
        Ok(true)
    }
}

impl std::fmt::Display for Ticket {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Ticket {} ({}) - {}", self.id, self.ticket_type, self.status)
    }
}
