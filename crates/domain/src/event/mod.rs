//! Event aggregate, its tickets, and their state machines.

mod aggregate;
mod state;
mod ticket;

pub use aggregate::{Event, NewEvent};
pub use state::{EventStatus, TicketStatus};
pub use ticket::Ticket;
