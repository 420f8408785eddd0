//! Shared types for the event management system.

mod types;

pub use types::{EventId, IdentityId, ReportId, TicketId};
