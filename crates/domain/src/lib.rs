//! Domain layer for the event management system.
//!
//! This crate provides:
//! - Identity variants (administrator, organizer, attendee) with authentication
//! - Event aggregate enforcing ticket capacity, with its ticket state machine
//! - Registry coordinating identities, events, id allocation and reports
//! - A journal of every change applied to the registry

pub mod error;
pub mod event;
pub mod identity;
pub mod journal;
pub mod money;
pub mod registry;
pub mod report;
pub mod venue;

pub use common::{EventId, IdentityId, ReportId, TicketId};
pub use error::{DomainError, Result};
pub use event::{Event, EventStatus, NewEvent, Ticket, TicketStatus};
pub use identity::{Account, Administrator, Attendee, Identity, Organizer, Role, TicketRef};
pub use journal::{DomainEvent, Journal, JournalEntry, RegistryEvent};
pub use money::Money;
pub use registry::{IdAllocator, Registry};
pub use report::Report;
pub use venue::Venue;
