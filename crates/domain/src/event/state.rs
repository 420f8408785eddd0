//! Event and ticket state machines.

use serde::{Deserialize, Serialize};

/// The state of an event in its lifecycle.
///
/// State transitions:
/// ```text
/// Planned ──► Cancelled
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum EventStatus {
    /// Event is scheduled and accepts enrollments.
    #[default]
    Planned,

    /// Event was cancelled (terminal state).
    Cancelled,
}

impl EventStatus {
    /// Returns true if tickets can be issued in this state.
    pub fn can_issue_tickets(&self) -> bool {
        matches!(self, EventStatus::Planned)
    }

    /// Returns true if the event can be cancelled in this state.
    pub fn can_cancel(&self) -> bool {
        matches!(self, EventStatus::Planned)
    }

    /// Returns the state name as a string.
    pub fn as_str(&self) -> &'static str {
        match self {
            EventStatus::Planned => "Planned",
            EventStatus::Cancelled => "Cancelled",
        }
    }
}

impl std::fmt::Display for EventStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// The state of a ticket in its lifecycle.
///
/// State transitions:
/// ```text
/// Sold ──┬──► Used
///        └──► Cancelled
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum TicketStatus {
    /// Ticket holds one seat of the event.
    #[default]
    Sold,

    /// Ticket was validated at the door (terminal state).
    Used,

    /// Ticket was cancelled and its seat released (terminal state).
    Cancelled,
}

impl TicketStatus {
    /// Returns true if the ticket counts against event capacity.
    pub fn occupies_seat(&self) -> bool {
        matches!(self, TicketStatus::Sold)
    }

    /// Returns true if the ticket can be validated in this state.
    pub fn can_validate(&self) -> bool {
        matches!(self, TicketStatus::Sold)
    }

    /// Returns true if the ticket can be cancelled in this state.
    pub fn can_cancel(&self) -> bool {
        matches!(self, TicketStatus::Sold)
    }

    /// Returns the state name as a string.
    pub fn as_str(&self) -> &'static str {
        match self {
            TicketStatus::Sold => "Sold",
            TicketStatus::Used => "Used",
            TicketStatus::Cancelled => "Cancelled",
        }
    }
}

impl std::fmt::Display for TicketStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_states() {
        assert_eq!(EventStatus::default(), EventStatus::Planned);
        assert_eq!(TicketStatus::default(), TicketStatus::Sold);
    }

    #[test]
    fn test_only_planned_events_issue_tickets() {
        assert!(EventStatus::Planned.can_issue_tickets());
        assert!(!EventStatus::Cancelled.can_issue_tickets());
        assert!(EventStatus::Planned.can_cancel());
        assert!(!EventStatus::Cancelled.can_cancel());
    }

    #[test]
    fn test_only_sold_tickets_occupy_seats() {
        assert!(TicketStatus::Sold.occupies_seat());
        assert!(!TicketStatus::Used.occupies_seat());
        assert!(!TicketStatus::Cancelled.occupies_seat());
    }

    #[test]
    fn test_ticket_transitions_leave_sold_only() {
        assert!(TicketStatus::Sold.can_validate());
        assert!(TicketStatus::Sold.can_cancel());
        assert!(!TicketStatus::Used.can_cancel());
        assert!(!TicketStatus::Cancelled.can_validate());
    }

    #[test]
    fn test_display() {
        assert_eq!(EventStatus::Cancelled.to_string(), "Cancelled");
        assert_eq!(TicketStatus::Used.to_string(), "Used");
    }

    #[test]
    fn test_serialization() {
        let state = TicketStatus::Cancelled;
        let json = serde_json::to_string(&state).unwrap();
        let deserialized: TicketStatus = serde_json::from_str(&json).unwrap();
        assert_eq!(state, deserialized);
    }
}
