//! Change journal of the registry.
//!
//! Every successful mutation is appended as a [`RegistryEvent`] wrapped in a
//! [`JournalEntry`]. Rejected operations leave no trace here; they are only
//! logged.

use chrono::{DateTime, Utc};
use common::{EventId, IdentityId, ReportId, TicketId};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::identity::Role;
use crate::money::Money;

/// Trait for domain events.
///
/// Domain events represent facts that have happened in the domain.
/// They are immutable and should be named in past tense.
pub trait DomainEvent: Serialize + Clone {
    /// Returns the event type name.
    fn event_type(&self) -> &'static str;
}

/// Facts recorded by the registry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data")]
pub enum RegistryEvent {
    IdentityRegistered {
        identity: IdentityId,
        role: Role,
    },
    EventCreated {
        event: EventId,
        organizer: IdentityId,
        name: String,
        capacity: u32,
    },
    EventRenamed {
        event: EventId,
        name: String,
    },
    EventCancelled {
        event: EventId,
        cancelled_tickets: Vec<TicketId>,
    },
    TicketIssued {
        ticket: TicketId,
        event: EventId,
        attendee: IdentityId,
        price: Money,
    },
    TicketValidated {
        ticket: TicketId,
        event: EventId,
    },
    TicketCancelled {
        ticket: TicketId,
        event: EventId,
        attendee: IdentityId,
    },
    ReportGenerated {
        report: ReportId,
        admin: IdentityId,
    },
    IdentityManaged {
        admin: IdentityId,
        target: IdentityId,
        action: String,
    },
}

impl DomainEvent for RegistryEvent {
    fn event_type(&self) -> &'static str {
        match self {
            RegistryEvent::IdentityRegistered { .. } => "IdentityRegistered",
            RegistryEvent::EventCreated { .. } => "EventCreated",
            RegistryEvent::EventRenamed { .. } => "EventRenamed",
            RegistryEvent::EventCancelled { .. } => "EventCancelled",
            RegistryEvent::TicketIssued { .. } => "TicketIssued",
            RegistryEvent::TicketValidated { .. } => "TicketValidated",
            RegistryEvent::TicketCancelled { .. } => "TicketCancelled",
            RegistryEvent::ReportGenerated { .. } => "ReportGenerated",
            RegistryEvent::IdentityManaged { .. } => "IdentityManaged",
        }
    }
}

/// A recorded event with its metadata.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JournalEntry {
    /// Unique identifier for this entry.
    pub entry_id: Uuid,

    /// Position in the journal, starting at 1.
    pub sequence: u64,

    /// The type of the event (e.g., "TicketIssued").
    pub event_type: String,

    /// When the event was recorded.
    pub recorded_at: DateTime<Utc>,

    pub event: RegistryEvent,
}

/// Append-only list of journal entries.
#[derive(Debug, Clone, Default)]
pub struct Journal {
    entries: Vec<JournalEntry>,
}

impl Journal {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends an event and returns its sequence number.
    pub(crate) fn record(&mut self, event: RegistryEvent) -> u64 {
        let sequence = self.entries.len() as u64 + 1;
        tracing::debug!(sequence, event_type = event.event_type(), "journal entry recorded");

        self.entries.push(JournalEntry {
            entry_id: Uuid::new_v4(),
            sequence,
            event_type: event.event_type().to_string(),
            recorded_at: Utc::now(),
            event,
        });
        sequence
    }

    pub fn entries(&self) -> &[JournalEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns the entries of one event type, in order.
    pub fn of_type<'a>(&'a self, event_type: &'a str) -> impl Iterator<Item = &'a JournalEntry> {
        self.entries
            .iter()
            .filter(move |entry| entry.event_type == event_type)
    }

    /// Serializes every entry as one JSON document per line.
    pub fn to_json_lines(&self) -> serde_json::Result<String> {
        let mut out = String::new();
        for entry in &self.entries {
            out.push_str(&serde_json::to_string(entry)?);
            out.push('\n');
        }
        Ok(out)
    }
}
