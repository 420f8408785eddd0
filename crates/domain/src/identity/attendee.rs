//! Attendee identity.

use common::{EventId, IdentityId, TicketId};
use serde::{Deserialize, Serialize};

use super::{Account, Profile, Role};
use crate::error::{DomainError, Result};
use crate::event::{Event, Ticket};
use crate::money::Money;

/// A ticket held by an attendee, pointing at the event that owns it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TicketRef {
    pub ticket: TicketId,
    pub event: EventId,
}

/// An identity that enrolls in events.
#[derive(Debug, Clone)]
pub struct Attendee {
    profile: Profile,

    /// External tax identifier (CPF).
    cpf: String,

    /// Held tickets in acquisition order.
    tickets: Vec<TicketRef>,
}

impl Attendee {
    /// Creates a new attendee holding no tickets.
    pub fn new(
        id: IdentityId,
        name: impl Into<String>,
        email: impl Into<String>,
        password: impl Into<String>,
        cpf: impl Into<String>,
    ) -> Self {
        Self {
            profile: Profile::new(id, name, email, password),
            cpf: cpf.into(),
            tickets: Vec::new(),
        }
    }

    pub fn cpf(&self) -> &str {
        &self.cpf
    }

    /// Returns the held tickets in acquisition order.
    pub fn tickets(&self) -> &[TicketRef] {
        &self.tickets
    }

    /// Returns the holding for a ticket, if this attendee has it.
    pub fn holding(&self, ticket_id: TicketId) -> Option<TicketRef> {
        self.tickets.iter().copied().find(|t| t.ticket == ticket_id)
    }

    /// Buys a ticket for an event.
    ///
    /// Capacity is checked here and again by the event when the ticket is
    /// appended. On any failure nothing is recorded on either side.
    pub fn enroll<'e>(
        &mut self,
        event: &'e mut Event,
        ticket_id: TicketId,
        ticket_type: impl Into<String>,
        price: Money,
    ) -> Result<&'e Ticket> {
        tracing::debug!(attendee = %self.id(), event = %event.id(), "enrollment requested");

        if price.is_negative() {
            return Err(DomainError::InvalidPrice {
                cents: price.cents(),
            });
        }

        if !event.has_capacity() {
            tracing::warn!(
                attendee = %self.id(),
                event = %event.id(),
                capacity = event.capacity(),
                "enrollment rejected: event is full"
            );
            return Err(DomainError::CapacityExceeded {
                event: event.id(),
                capacity: event.capacity(),
            });
        }

        let ticket = Ticket::new(ticket_id, ticket_type, price, self.id(), event.id());
        let ticket = event.add_ticket(ticket)?;

        self.tickets.push(TicketRef {
            ticket: ticket.id(),
            event: ticket.event(),
        });
        tracing::info!(
            attendee = %self.id(),
            ticket = %ticket.id(),
            event = %ticket.event(),
            "enrolled"
        );

        Ok(ticket)
    }

    /// Gives up a held ticket.
    ///
    /// The ticket is cancelled inside the event, where it stays as history,
    /// and dropped from this attendee's holdings. Returns whether the ticket
    /// status changed (it may already have been cancelled with its event).
    pub fn cancel_enrollment(&mut self, event: &mut Event, ticket_id: TicketId) -> Result<bool> {
        let position = self
            .tickets
            .iter()
            .position(|t| t.ticket == ticket_id && t.event == event.id())
            .ok_or_else(|| {
                tracing::warn!(attendee = %self.id(), ticket = %ticket_id, "ticket not held");
                DomainError::NotFound {
                    attendee: self.id(),
                    ticket: ticket_id,
                }
            })?;

        let changed = event.cancel_ticket(ticket_id)?;
        self.tickets.remove(position);
        tracing::info!(attendee = %self.id(), ticket = %ticket_id, "enrollment cancelled");

        Ok(changed)
    }
}

impl Account for Attendee {
    fn profile(&self) -> &Profile {
        &self.profile
    }

    fn role(&self) -> Role {
        Role::Attendee
    }

    fn authenticate(&self, password: &str) -> bool {
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
