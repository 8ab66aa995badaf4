//! Error taxonomy for event store operations.

/// Failure kinds returned by the [`EventStore`](crate::store::EventStore)
/// and the date helpers.
///
/// The `Display` strings are part of the HTTP contract: the transport layer
/// forwards them verbatim in its `{"error": ...}` envelope.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum CalendarError {
    /// The user id is zero or negative.
    #[error("invalid user id")]
    InvalidUserId,

    /// A date string could not be parsed as `YYYY-MM-DD`.
    #[error("invalid date")]
    InvalidDate,

    /// The event description is empty.
    #[error("invalid text")]
    InvalidText,

    /// The referenced event (or the user's bucket) does not exist.
    #[error("event not found")]
    NotFound,
}

impl CalendarError {
    /// Whether the error describes malformed input rather than a missing
    /// entity.
    pub const fn is_validation(self) -> bool {
        matches!(self, Self::InvalidUserId | Self::InvalidDate | Self::InvalidText)
    }
}
