//! Axum router construction for the calendar API.

use std::sync::Arc;

use axum::Router;
use axum::routing::{get, post};
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::middleware::log_requests;
use crate::state::AppState;

/// Build the complete Axum router.
///
/// The router includes:
/// - `POST /create_event`
/// - `POST /update_event`
/// - `POST /delete_event`
/// - `GET /events_for_day`
/// - `GET /events_for_week`
/// - `GET /events_for_month`
///
/// Any other method on these paths is answered with `405 Method Not Allowed`.
pub fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/create_event", post(handlers::create_event))
        .route("/update_event", post(handlers::update_event))
        .route("/delete_event", post(handlers::delete_event))
        .route("/events_for_day", get(handlers::events_for_day))
        .route("/events_for_week", get(handlers::events_for_week))
        .route("/events_for_month", get(handlers::events_for_month))
        .layer(axum::middleware::from_fn(log_requests))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
