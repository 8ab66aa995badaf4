//! The calendar event record.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::ids::{EventId, UserId};

/// A single calendar entry owned by one user.
///
/// The date carries no time-of-day component: whatever the caller passed
/// in has already been truncated to its calendar day. `id` and `user_id`
/// never change after creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    /// Unique event identifier.
    pub id: EventId,
    /// The owning user.
    pub user_id: UserId,
    /// The calendar day the event falls on.
    pub date: NaiveDate,
    /// Free-text description. Never empty.
    #[serde(rename = "event")]
    pub text: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_with_wire_field_names() {
        let event = Event {
            id: EventId::new(),
            user_id: 7,
            date: NaiveDate::from_ymd_opt(2023, 12, 25).unwrap_or_default(),
            text: String::from("Standup"),
        };
        let value = serde_json::to_value(&event).unwrap_or_default();
        assert_eq!(value["user_id"], 7);
        assert_eq!(value["date"], "2023-12-25");
        assert_eq!(value["event"], "Standup");
        assert_eq!(value["id"], event.id.to_string());
    }
}
