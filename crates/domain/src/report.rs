//! Generated reports.

use chrono::{DateTime, Utc};
use common::ReportId;
use serde::{Deserialize, Serialize};

/// An immutable, timestamped textual snapshot of the registry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Report {
    id: ReportId,
    generated_at: DateTime<Utc>,
    content: String,
}

impl Report {
    /// Creates a report stamped with the current time.
    pub(crate) fn new(id: ReportId, content: String) -> Self {
        Self {
            id,
            generated_at: Utc::now(),
            content,
        }
    }

    pub fn id(&self) -> ReportId {
        self.id
    }

    pub fn generated_at(&self) -> DateTime<Utc> {
        self.generated_at
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    /// Returns a human-readable rendering with header and content.
    pub fn summary(&self) -> String {
        format!(
            "Report {} (generated {})\n{}\n{}",
            self.id,
            self.generated_at.format("%Y-%m-%d %H:%M:%S UTC"),
            "=".repeat(20),
            self.content
        )
    }
}
