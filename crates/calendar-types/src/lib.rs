//! Shared type definitions for the calendar event service.
//!
//! # Modules
//!
//! - [`ids`] -- Event identifiers and the user id alias
//! - [`event`] -- The [`Event`] record returned by every store operation

pub mod event;
pub mod ids;

pub use event::Event;
pub use ids::{EventId, UserId};
