//! HTTP API server for the calendar event store.
//!
//! This crate is a thin Axum adapter over [`calendar_core::EventStore`]:
//!
//! - **Mutation endpoints** (`POST /create_event`, `/update_event`,
//!   `/delete_event`) accepting JSON or form-encoded bodies
//! - **Range endpoints** (`GET /events_for_day`, `/events_for_week`,
//!   `/events_for_month`) reading `user_id` and `date` from the query string
//!
//! Successful responses are `{"result": ...}`; failures are
//! `{"error": "..."}` with the status chosen by [`error::ApiError`].
//! Every request is logged by [`middleware::log_requests`].

pub mod error;
pub mod extract;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod server;
pub mod state;

// Re-export primary types for convenience.
pub use error::ApiError;
pub use router::build_router;
pub use server::{ServerError, shutdown_signal, start_server};
pub use state::AppState;
