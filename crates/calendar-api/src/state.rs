//! Shared application state for the calendar API server.

use std::sync::Arc;

use calendar_core::EventStore;

/// Shared state for the Axum application.
///
/// Wrapped in [`Arc`] and injected via Axum's `State` extractor. The store
/// does its own locking, so handlers call it directly without holding any
/// lock across an `.await`.
#[derive(Debug, Clone, Default)]
pub struct AppState {
    /// The event store backing every endpoint.
    pub store: Arc<EventStore>,
}

impl AppState {
    /// Create application state around a fresh, empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create application state around an existing store.
    pub const fn with_store(store: Arc<EventStore>) -> Self {
        Self { store }
    }
}
