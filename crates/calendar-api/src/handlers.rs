//! REST endpoint handlers for the calendar API.
//!
//! Every handler parses its input, calls exactly one [`EventStore`]
//! operation, and wraps the outcome in a `{"result": ...}` envelope.
//! Failures become an `{"error": ...}` body through [`ApiError`].
//!
//! # Endpoints
//!
//! | Method | Path | Description |
//! |--------|------|-------------|
//! | `POST` | `/create_event` | Create an event |
//! | `POST` | `/update_event` | Change the date and text of an event |
//! | `POST` | `/delete_event` | Delete an event |
//! | `GET` | `/events_for_day` | Events on one day |
//! | `GET` | `/events_for_week` | Events in the Monday-Sunday week |
//! | `GET` | `/events_for_month` | Events in the calendar month |
//!
//! [`EventStore`]: calendar_core::EventStore

use std::sync::Arc;

use axum::Json;
use axum::extract::State;
use axum::response::IntoResponse;
use serde::Serialize;

use crate::error::ApiError;
use crate::extract::{Fields, RangeQuery};
use crate::state::AppState;

/// Result string returned by a successful delete.
pub const DELETED: &str = "deleted";

/// Success envelope shared by every endpoint.
#[derive(Debug, Serialize)]
pub struct Envelope<T> {
    /// The operation's payload.
    pub result: T,
}

fn respond<T: Serialize>(result: T) -> Result<Json<serde_json::Value>, ApiError> {
    Ok(Json(serde_json::to_value(Envelope { result })?))
}

// ---------------------------------------------------------------------------
// Mutations
// ---------------------------------------------------------------------------

/// `POST /create_event` with `user_id`, `date`, and `event`.
pub async fn create_event(
    State(state): State<Arc<AppState>>,
    fields: Fields,
) -> Result<impl IntoResponse, ApiError> {
    let user_id = fields.user_id()?;
    let date = fields.date()?;
    let text = fields.text()?;

    let event = state.store.create_event(user_id, date, text)?;
    tracing::debug!(event_id = %event.id, user_id, "event created");
    respond(event)
}

/// `POST /update_event` with `id`, `user_id`, `date`, and `event`.
pub async fn update_event(
    State(state): State<Arc<AppState>>,
    fields: Fields,
) -> Result<impl IntoResponse, ApiError> {
    let user_id = fields.user_id()?;
    let date = fields.date()?;
    let text = fields.text()?;

    let event = state.store.update_event(fields.id(), user_id, date, text)?;
    tracing::debug!(event_id = %event.id, user_id, "event updated");
    respond(event)
}

/// `POST /delete_event` with `id` and an optional `user_id`.
///
/// A missing, unparsable, or non-positive `user_id` deletes the event
/// from whichever user owns it.
pub async fn delete_event(
    State(state): State<Arc<AppState>>,
    fields: Fields,
) -> Result<impl IntoResponse, ApiError> {
    let user_id = fields.user_id_or_unscoped();
    state.store.delete_event(fields.id(), user_id)?;
    tracing::debug!(event_id = fields.id(), user_id, "event deleted");
    respond(DELETED)
}

// ---------------------------------------------------------------------------
// Range queries
// ---------------------------------------------------------------------------

/// `GET /events_for_day?user_id=..&date=..`
pub async fn events_for_day(
    State(state): State<Arc<AppState>>,
    query: RangeQuery,
) -> Result<impl IntoResponse, ApiError> {
    let (user_id, day) = query.parse()?;
    respond(state.store.events_for_day(user_id, day)?)
}

/// `GET /events_for_week?user_id=..&date=..`
pub async fn events_for_week(
    State(state): State<Arc<AppState>>,
    query: RangeQuery,
) -> Result<impl IntoResponse, ApiError> {
    let (user_id, day) = query.parse()?;
    respond(state.store.events_for_week(user_id, day)?)
}

/// `GET /events_for_month?user_id=..&date=..`
pub async fn events_for_month(
    State(state): State<Arc<AppState>>,
    query: RangeQuery,
) -> Result<impl IntoResponse, ApiError> {
    let (user_id, day) = query.parse()?;
    respond(state.store.events_for_month(user_id, day)?)
}
