//! Property-style tests for the event store, including concurrent access.

#![allow(clippy::unwrap_used)]

use std::sync::Arc;
use std::thread;

use calendar_core::{CalendarError, EventStore};
use chrono::{Days, NaiveDate};

fn day(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

#[test]
fn non_positive_users_are_rejected_except_for_delete() {
    let store = EventStore::new();
    let d = day(2024, 2, 14);
    for user in [0, -1, i64::MIN] {
        assert_eq!(store.create_event(user, d, "x"), Err(CalendarError::InvalidUserId));
        assert_eq!(store.update_event("id", user, d, "x"), Err(CalendarError::InvalidUserId));
        assert_eq!(store.events_for_day(user, d), Err(CalendarError::InvalidUserId));
        assert_eq!(store.events_for_week(user, d), Err(CalendarError::InvalidUserId));
        assert_eq!(store.events_for_month(user, d), Err(CalendarError::InvalidUserId));
    }

    let id = store.create_event(42, d, "owned").unwrap().id.to_string();
    assert_eq!(store.delete_event(&id, i64::MIN), Ok(()));
    assert_eq!(store.event_count(), 0);
}

#[test]
fn every_day_of_a_year_lands_in_its_own_week_and_month() {
    let store = EventStore::new();
    let first = day(2023, 1, 1);
    for offset in 0..365 {
        let date = first.checked_add_days(Days::new(offset)).unwrap();
        store.create_event(1, date, date.to_string()).unwrap();
    }

    let mut seen_in_months = 0;
    for month in 1..=12 {
        let events = store.events_for_month(1, day(2023, month, 15)).unwrap();
        assert!(events.iter().all(|e| chrono::Datelike::month(&e.date) == month));
        seen_in_months += events.len();
    }
    assert_eq!(seen_in_months, 365);

    // 2023-01-02 is a Monday; from there every full week has seven events.
    let monday = day(2023, 1, 2);
    for week in 0..51 {
        let midweek = monday.checked_add_days(Days::new(week * 7 + 3)).unwrap();
        let events = store.events_for_week(1, midweek).unwrap();
        assert_eq!(events.len(), 7, "week containing {midweek}");
        assert_eq!(
            chrono::Datelike::weekday(&events.first().unwrap().date),
            chrono::Weekday::Mon
        );
        assert_eq!(
            chrono::Datelike::weekday(&events.last().unwrap().date),
            chrono::Weekday::Sun
        );
    }
}

#[test]
fn concurrent_creates_are_not_lost() {
    let store = Arc::new(EventStore::new());
    let threads: u32 = 8;
    let per_thread: u32 = 200;

    thread::scope(|scope| {
        for t in 0..threads {
            let store = Arc::clone(&store);
            scope.spawn(move || {
                for i in 0..per_thread {
                    let user = i64::from(t % 3) + 1;
                    let date = day(2024, 3, (i % 28) + 1);
                    store.create_event(user, date, format!("t{t}-{i}")).unwrap();
                }
            });
        }
    });

    let total = usize::try_from(threads * per_thread).unwrap();
    assert_eq!(store.event_count(), total);
    assert_eq!(store.user_count(), 3);

    let month_total: usize = (1..=3)
        .map(|user| store.events_for_month(user, day(2024, 3, 1)).unwrap().len())
        .sum();
    assert_eq!(month_total, total);
}

#[test]
fn readers_and_writers_interleave_safely() {
    let store = Arc::new(EventStore::new());
    let date = day(2024, 7, 4);

    thread::scope(|scope| {
        let writer = Arc::clone(&store);
        scope.spawn(move || {
            for i in 0..500 {
                let event = writer.create_event(1, date, format!("e{i}")).unwrap();
                if i % 2 == 0 {
                    writer.delete_event(&event.id.to_string(), 1).unwrap();
                }
            }
        });

        for _ in 0..4 {
            let reader = Arc::clone(&store);
            scope.spawn(move || {
                for _ in 0..500 {
                    let events = reader.events_for_week(1, date).unwrap();
                    assert!(events.windows(2).all(|w| match w {
                        [a, b] => (a.date, a.id) < (b.date, b.id),
                        _ => true,
                    }));
                }
            });
        }
    });

    assert_eq!(store.event_count(), 250);
}
