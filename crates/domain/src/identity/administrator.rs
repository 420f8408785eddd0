//! Administrator identity.

use std::fmt::Write;

use common::{IdentityId, ReportId};

use super::{Account, Identity, Profile, Role};
use crate::event::Event;
use crate::report::Report;

/// An identity that can report on and audit the whole registry.
#[derive(Debug, Clone)]
pub struct Administrator {
    profile: Profile,
}

impl Administrator {
    /// Creates a new administrator.
    pub fn new(
        id: IdentityId,
        name: impl Into<String>,
        email: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            profile: Profile::new(id, name, email, password),
        }
    }

    /// Builds a report listing every identity and every event.
    ///
    /// Identities and events appear in the order given.
    pub fn generate_report(
        &self,
        id: ReportId,
        identities: &[Identity],
        events: &[Event],
    ) -> Report {
        tracing::info!(admin = %self.id(), report = %id, "generating report");

        let mut content = String::new();
        // Writing to a String cannot fail.
        let _ = writeln!(content, "--- Users ---");
        let _ = writeln!(content, "Total users: {}", identities.len());
        for identity in identities {
            let _ = writeln!(content, "- {} ({})", identity.name(), identity.role());
        }

        let _ = writeln!(content);
        let _ = writeln!(content, "--- Events ---");
        let _ = writeln!(content, "Total events: {}", events.len());
        for event in events {
            let _ = writeln!(
                content,
                "- {} ({}/{} tickets, {}, revenue {})",
                event.name(),
                event.sold_count(),
                event.capacity(),
                event.status(),
                event.revenue()
            );
        }

        Report::new(id, content)
    }

    /// Records an administrative action against another identity.
    ///
    /// Nothing about the target changes; the action is only logged.
    pub fn manage_identity(&self, target: &Identity, action: &str) {
        tracing::info!(
            admin = %self.id(),
            target = %target.id(),
            action,
            "administrative action"
        );
    }
}

impl Account for Administrator {
    fn profile(&self) -> &Profile {
        &self.profile
    }

    fn role(&self) -> Role {
        Role::Administrator
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
