//! Registered actors and their authentication rules.
//!
//! Every actor shares a [`Profile`] and implements [`Account`]; the role
//! specific behavior lives on [`Administrator`], [`Organizer`] and
//! [`Attendee`]. [`Identity`] is the closed set the registry stores.

mod administrator;
mod attendee;
mod organizer;

pub use administrator::Administrator;
pub use attendee::{Attendee, TicketRef};
pub use organizer::Organizer;

use common::IdentityId;
use serde::{Deserialize, Serialize};

/// The variant of a registered identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Role {
    Administrator,
    Organizer,
    Attendee,
}

impl Role {
    /// Returns the role name as a string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Administrator => "Administrator",
            Role::Organizer => "Organizer",
            Role::Attendee => "Attendee",
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Fields shared by every identity.
///
/// The password is kept in plain text and compared exactly; this model
/// makes no security claims.
#[derive(Clone, PartialEq, Eq)]
pub struct Profile {
    id: IdentityId,
    name: String,
    email: String,
    password: String,
}

impl Profile {
    /// Creates a new profile.
    pub fn new(
        id: IdentityId,
        name: impl Into<String>,
        email: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            email: email.into(),
            password: password.into(),
        }
    }

    pub fn id(&self) -> IdentityId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    /// Exact, case-sensitive password comparison.
    pub fn password_matches(&self, candidate: &str) -> bool {
        self.password == candidate
    }
}

impl std::fmt::Debug for Profile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Profile")
            .field("id", &self.id)
            .field("name", &self.name)
            .field("email", &self.email)
            .finish_non_exhaustive()
    }
}

/// Capabilities shared by every identity variant.
pub trait Account {
    /// Returns the shared profile.
    fn profile(&self) -> &Profile;

    /// Returns the role of this identity.
    fn role(&self) -> Role;

    /// Checks a candidate password.
    fn authenticate(&self, password: &str) -> bool;

    fn id(&self) -> IdentityId {
        self.profile().id()
    }

    fn name(&self) -> &str {
        self.profile().name()
    }

    fn email(&self) -> &str {
        self.profile().email()
    }
}

/// A registered identity of any role.
#[derive(Debug, Clone)]
pub enum Identity {
    Administrator(Administrator),
    Organizer(Organizer),
    Attendee(Attendee),
}

impl Identity {
    fn account(&self) -> &dyn Account {
        match self {
            Identity::Administrator(admin) => admin,
            Identity::Organizer(organizer) => organizer,
            Identity::Attendee(attendee) => attendee,
        }
    }

    pub fn as_administrator(&self) -> Option<&Administrator> {
        match self {
            Identity::Administrator(admin) => Some(admin),
            _ => None,
        }
    }

    pub fn as_organizer(&self) -> Option<&Organizer> {
        match self {
            Identity::Organizer(organizer) => Some(organizer),
            _ => None,
        }
    }

    pub fn as_attendee(&self) -> Option<&Attendee> {
        match self {
            Identity::Attendee(attendee) => Some(attendee),
            _ => None,
        }
    }

    pub fn as_attendee_mut(&mut self) -> Option<&mut Attendee> {
        match self {
            Identity::Attendee(attendee) => Some(attendee),
            _ => None,
        }
    }
}

impl Account for Identity {
    fn profile(&self) -> &Profile {
        self.account().profile()
    }

    fn role(&self) -> Role {
        self.account().role()
    }

    fn authenticate(&self, password: &str) -> bool {
        self.account().authenticate(password)
    }
}

impl From<Administrator> for Identity {
    fn from(admin: Administrator) -> Self {
        Identity::Administrator(admin)
    }
}

impl From<Organizer> for Identity {
    fn from(organizer: Organizer) -> Self {
        Identity::Organizer(organizer)
    }
}

impl From<Attendee> for Identity {
    fn from(attendee: Attendee) -> Self {
        Identity::Attendee(attendee)
    }
}

impl std::fmt::Display for Identity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {} ({})", self.role(), self.name(), self.email())
    }
}
