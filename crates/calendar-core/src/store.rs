//! Concurrent in-memory event store.
//!
//! Events are partitioned by owner: a map from [`UserId`] to a bucket of
//! that user's events keyed by [`EventId`]. A single reader/writer lock
//! guards the whole structure. Mutations hold the write lock, range
//! queries the read lock, and no operation spans more than one critical
//! section, so callers never observe a partial write.
//!
//! Both levels are ordered maps. Iterating a bucket therefore yields events
//! in id order, and admin deletes search users in ascending id order.

use std::collections::BTreeMap;

use calendar_types::{Event, EventId, UserId};
use chrono::NaiveDate;
use parking_lot::RwLock;

use crate::dates::{self, DayRange, IntoCalendarDay};
use crate::error::CalendarError;

/// One user's events keyed by id.
type Bucket = BTreeMap<EventId, Event>;

/// Thread-safe store of calendar events, shared behind an `Arc`.
#[derive(Debug, Default)]
pub struct EventStore {
    users: RwLock<BTreeMap<UserId, Bucket>>,
}

impl EventStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    // -----------------------------------------------------------------------
    // Mutations
    // -----------------------------------------------------------------------

    /// Create an event for `user_id` on the calendar day of `date`.
    ///
    /// Returns a copy of the stored event, including its generated id.
    pub fn create_event(
        &self,
        user_id: UserId,
        date: impl IntoCalendarDay,
        text: impl Into<String>,
    ) -> Result<Event, CalendarError> {
        validate_user(user_id)?;
        let text = validate_text(text.into())?;

        let event = Event {
            id: EventId::new(),
            user_id,
            date: date.into_calendar_day(),
            text,
        };

        self.users
            .write()
            .entry(user_id)
            .or_default()
            .insert(event.id, event.clone());

        Ok(event)
    }

    /// Replace the date and text of an existing event.
    ///
    /// The lookup is scoped to `user_id`: an id owned by someone else is
    /// reported as [`CalendarError::NotFound`], exactly like an unknown id.
    /// Input is validated before the lookup, so an empty id wins over a bad
    /// user id, which wins over empty text, which wins over a missing event.
    pub fn update_event(
        &self,
        id: &str,
        user_id: UserId,
        date: impl IntoCalendarDay,
        text: impl Into<String>,
    ) -> Result<Event, CalendarError> {
        if id.is_empty() {
            return Err(CalendarError::NotFound);
        }
        validate_user(user_id)?;
        let text = validate_text(text.into())?;
        let key = EventId::parse(id).ok_or(CalendarError::NotFound)?;
        let date = date.into_calendar_day();

        let mut users = self.users.write();
        let event = users
            .get_mut(&user_id)
            .and_then(|bucket| bucket.get_mut(&key))
            .ok_or(CalendarError::NotFound)?;

        event.date = date;
        event.text = text;
        Ok(event.clone())
    }

    /// Delete an event.
    ///
    /// With a positive `user_id` only that user's bucket is searched. A
    /// `user_id` of zero or below is an unscoped delete: every bucket is
    /// searched and the first match is removed. Either way a bucket left
    /// empty is dropped. Deleting an id twice fails the second time.
    pub fn delete_event(&self, id: &str, user_id: UserId) -> Result<(), CalendarError> {
        let key = EventId::parse(id).ok_or(CalendarError::NotFound)?;

        let mut users = self.users.write();
        let owner = if user_id > 0 {
            user_id
        } else {
            users
                .iter()
                .find_map(|(owner, bucket)| bucket.contains_key(&key).then_some(*owner))
                .ok_or(CalendarError::NotFound)?
        };

        let bucket = users.get_mut(&owner).ok_or(CalendarError::NotFound)?;
        bucket.remove(&key).ok_or(CalendarError::NotFound)?;
        if bucket.is_empty() {
            users.remove(&owner);
        }
        Ok(())
    }

    // -----------------------------------------------------------------------
    // Range queries
    // -----------------------------------------------------------------------

    /// Events on the calendar day of `day`, ordered by id.
    pub fn events_for_day(
        &self,
        user_id: UserId,
        day: impl IntoCalendarDay,
    ) -> Result<Vec<Event>, CalendarError> {
        validate_user(user_id)?;
        let day = day.into_calendar_day();
        Ok(self.collect(user_id, |date| date == day))
    }

    /// Events in the Monday-to-Sunday week containing `any_day`, ordered by
    /// date and then id.
    pub fn events_for_week(
        &self,
        user_id: UserId,
        any_day: impl IntoCalendarDay,
    ) -> Result<Vec<Event>, CalendarError> {
        validate_user(user_id)?;
        let range = dates::week_bounds(any_day.into_calendar_day());
        Ok(self.collect_range(user_id, range))
    }

    /// Events in the calendar month containing `any_day`, ordered by date
    /// and then id.
    pub fn events_for_month(
        &self,
        user_id: UserId,
        any_day: impl IntoCalendarDay,
    ) -> Result<Vec<Event>, CalendarError> {
        validate_user(user_id)?;
        let range = dates::month_bounds(any_day.into_calendar_day());
        Ok(self.collect_range(user_id, range))
    }

    // -----------------------------------------------------------------------
    // Introspection
    // -----------------------------------------------------------------------

    /// Number of users that currently own at least one event.
    pub fn user_count(&self) -> usize {
        self.users.read().len()
    }

    /// Total number of stored events across all users.
    pub fn event_count(&self) -> usize {
        self.users.read().values().map(BTreeMap::len).sum()
    }

    fn collect_range(&self, user_id: UserId, range: DayRange) -> Vec<Event> {
        self.collect(user_id, |date| range.contains(date))
    }

    /// Copy out every event of `user_id` whose date matches, sorted by
    /// `(date, id)`.
    fn collect(&self, user_id: UserId, matches: impl Fn(NaiveDate) -> bool) -> Vec<Event> {
        let users = self.users.read();
        let Some(bucket) = users.get(&user_id) else {
            return Vec::new();
        };

        let mut events: Vec<Event> = bucket
            .values()
            .filter(|event| matches(event.date))
            .cloned()
            .collect();
        drop(users);

        events.sort_unstable_by_key(|event| (event.date, event.id));
        events
    }
}

const fn validate_user(user_id: UserId) -> Result<(), CalendarError> {
    if user_id <= 0 {
        return Err(CalendarError::InvalidUserId);
    }
    Ok(())
}

fn validate_text(text: String) -> Result<String, CalendarError> {
    if text.is_empty() {
        return Err(CalendarError::InvalidText);
    }
    Ok(text)
}
