//! Event storage core for the calendar service.
//!
//! This crate owns every piece of the service with real invariants:
//!
//! - [`store`] -- the concurrent, per-user partitioned [`EventStore`]
//! - [`dates`] -- calendar-day normalization and week/month boundaries
//! - [`error`] -- the [`CalendarError`] taxonomy returned by the store
//! - [`config`] -- YAML + environment configuration for the service
//!
//! The HTTP adapter in `calendar-api` is a thin layer over these types.

pub mod config;
pub mod dates;
pub mod error;
pub mod store;

pub use config::{CalendarConfig, ConfigError, LoggingConfig, ServerSettings};
pub use dates::{DayRange, IntoCalendarDay, month_bounds, parse_day, week_bounds};
pub use error::CalendarError;
pub use store::EventStore;
