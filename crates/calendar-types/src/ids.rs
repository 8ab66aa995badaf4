//! Type-safe identifiers for calendar entities.
//!
//! Event identifiers wrap a random (v4) [`Uuid`]. They are generated by the
//! event store on creation and never reused. Ordering compares the raw
//! bytes, which is the same order as comparing the lowercase hyphenated
//! string form, so sorting by [`EventId`] gives a stable textual tie-break.
//!
//! Users are identified by a plain signed integer. Non-positive values are
//! representable on purpose: the store decides what they mean per operation.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Identifier of the user owning a bucket of events.
///
/// Valid owners are strictly positive.
pub type UserId = i64;

/// Unique identifier for a calendar event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EventId(pub Uuid);

impl EventId {
    /// Create a fresh random identifier.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Parse an identifier from the exact form produced by [`Display`].
    ///
    /// Ids are opaque strings to clients, so only the lowercase hyphenated
    /// spelling names an event. Uppercase, simple, braced, and URN spellings
    /// of the same UUID return `None`, as does empty or malformed input.
    /// No event can carry such an id, so callers treat `None` as "not found".
    ///
    /// [`Display`]: core::fmt::Display
    pub fn parse(s: &str) -> Option<Self> {
        let id = Uuid::try_parse(s).ok()?;
        let mut buf = Uuid::encode_buffer();
        let canonical: &str = id.hyphenated().encode_lower(&mut buf);
        (canonical == s).then_some(Self(id))
    }

    /// Return the inner [`Uuid`] value.
    pub const fn into_inner(self) -> Uuid {
        self.0
    }
}

impl Default for EventId {
    fn default() -> Self {
        Self::new()
    }
}

impl core::fmt::Display for EventId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<Uuid> for EventId {
    fn from(id: Uuid) -> Self {
        Self(id)
    }
}

impl From<EventId> for Uuid {
    fn from(id: EventId) -> Self {
        id.0
    }
}
