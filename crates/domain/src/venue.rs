//! Venue value object.

use serde::{Deserialize, Serialize};

/// A physical location owned by the event it was created for.
///
/// `capacity` is informational only and is never checked against the
/// capacity of the event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Venue {
    id: u64,
    name: String,
    address: String,
    capacity: u32,
}

impl Venue {
    /// Creates a new venue description.
    pub fn new(
        id: u64,
        name: impl Into<String>,
        address: impl Into<String>,
        capacity: u32,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            address: address.into(),
            capacity,
        }
    }

    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn address(&self) -> &str {
        &self.address
    }

    pub fn capacity(&self) -> u32 {
        self.capacity
    }
}

impl std::fmt::Display for Venue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Venue: {} ({})", self.name, self.address)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        let venue = Venue::new(101, "Auditorium", "Rod. SC-150, Km 125", 200);
        assert_eq!(venue.to_string(), "Venue: Auditorium (Rod. SC-150, Km 125)");
        assert_eq!(venue.capacity(), 200);
    }
}
