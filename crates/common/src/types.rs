use serde::{Deserialize, Serialize};

/// Defines a `u64`-backed identifier newtype.
///
/// Wrapping the raw number keeps event, ticket, identity and report ids
/// from being mixed up at call sites.
macro_rules! numeric_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
        )]
        #[serde(transparent)]
        pub struct $name(u64);

        impl $name {
            /// Creates an id from its raw value.
            pub const fn new(value: u64) -> Self {
                Self(value)
            }

            /// Returns the raw value.
            pub const fn as_u64(&self) -> u64 {
                self.0
            }

            /// Returns the id that follows this one.
            pub const fn next(&self) -> Self {
                Self(self.0 + 1)
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<u64> for $name {
            fn from(value: u64) -> Self {
                Self(value)
            }
        }

        impl From<$name> for u64 {
            fn from(id: $name) -> Self {
                id.0
            }
        }
    };
}

numeric_id!(
    /// Identifier of a registered identity, chosen by the caller at registration.
    IdentityId
);

numeric_id!(
    /// Identifier of an event, allocated by the registry starting at 1.
    EventId
);

numeric_id!(
    /// Identifier of a ticket, allocated by the registry starting at 100.
    TicketId
);

numeric_id!(
    /// Identifier of a generated report.
    ReportId
);
