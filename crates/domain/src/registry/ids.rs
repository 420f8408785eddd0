//! Identifier allocation.

use common::{EventId, ReportId, TicketId};

use crate::error::Result;

/// Hands out event, ticket and report ids.
///
/// Ids are consumed only when the operation that received them succeeds, so
/// surviving ids are strictly increasing and a rejected request never burns
/// one.
#[derive(Debug, Clone)]
pub struct IdAllocator {
    next_event: EventId,
    next_ticket: TicketId,
    next_report: ReportId,
}

impl IdAllocator {
    /// First event id handed out.
    pub const FIRST_EVENT: EventId = EventId::new(1);

    /// First ticket id handed out.
    pub const FIRST_TICKET: TicketId = TicketId::new(100);

    /// First report id handed out.
    pub const FIRST_REPORT: ReportId = ReportId::new(1);

    pub fn new() -> Self {
        Self {
            next_event: Self::FIRST_EVENT,
            next_ticket: Self::FIRST_TICKET,
            next_report: Self::FIRST_REPORT,
        }
    }

    /// Returns the id the next successful event creation will get.
    pub fn next_event_id(&self) -> EventId {
        self.next_event
    }

    /// Returns the id the next successful enrollment will get.
    pub fn next_ticket_id(&self) -> TicketId {
        self.next_ticket
    }

    /// Returns the id the next generated report will get.
    pub fn next_report_id(&self) -> ReportId {
        self.next_report
    }

    /// Runs `build` with the next event id and consumes the id only on success.
    pub fn allocate_event<T>(&mut self, build: impl FnOnce(EventId) -> Result<T>) -> Result<T> {
        let value = build(self.next_event)?;
        self.next_event = self.next_event.next();
        Ok(value)
    }

    /// Runs `build` with the next ticket id and consumes the id only on success.
    pub fn allocate_ticket<T>(&mut self, build: impl FnOnce(TicketId) -> Result<T>) -> Result<T> {
        let value = build(self.next_ticket)?;
        self.next_ticket = self.next_ticket.next();
        Ok(value)
    }

    /// Runs `build` with the next report id and consumes the id only on success.
    pub fn allocate_report<T>(&mut self, build: impl FnOnce(ReportId) -> Result<T>) -> Result<T> {
        let value = build(self.next_report)?;
        self.next_report = self.next_report.next();
        Ok(value)
    }
}

impl Default for IdAllocator {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use common::IdentityId;

    use super::*;
    use crate::error::DomainError;

    #[test]
    fn test_starting_values() {
        let ids = IdAllocator::new();
        assert_eq!(ids.next_event_id(), EventId::new(1));
        assert_eq!(ids.next_ticket_id(), TicketId::new(100));
        assert_eq!(ids.next_report_id(), ReportId::new(1));
    }

    #[test]
    fn test_success_consumes_id() {
        let mut ids = IdAllocator::new();
        let first = ids.allocate_ticket(Ok).unwrap();
        let second = ids.allocate_ticket(Ok).unwrap();
        assert_eq!(first, TicketId::new(100));
        assert_eq!(second, TicketId::new(101));
        assert_eq!(ids.next_ticket_id(), TicketId::new(102));
    }

    #[test]
    fn test_failure_keeps_id() {
        let mut ids = IdAllocator::new();
        let result: crate::Result<EventId> = ids.allocate_event(|_| {
            Err(DomainError::NotAuthorized {
                organizer: IdentityId::new(3),
            })
        });

        assert!(result.is_err());
        assert_eq!(ids.next_event_id(), EventId::new(1));
        assert_eq!(ids.allocate_event(Ok).unwrap(), EventId::new(1));
    }
}
