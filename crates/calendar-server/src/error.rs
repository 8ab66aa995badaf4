//! Error types for the calendar server binary.

/// Top-level error for the calendar server binary.
///
/// Each variant wraps a specific subsystem error, providing a single
/// error type that `main` can propagate with `?`.
#[derive(Debug, thiserror::Error)]
pub enum StartupError {
    /// Configuration loading failed.
    #[error("config error: {source}")]
    Config {
        /// The underlying config error.
        #[from]
        source: calendar_core::ConfigError,
    },

    /// The log filter could not be built from the configured level.
    #[error("invalid log level {level:?}: {message}")]
    Logging {
        /// The configured level string.
        level: String,
        /// Description of the parse failure.
        message: String,
    },

    /// The HTTP server failed to start or crashed.
    #[error("server error: {source}")]
    Server {
        /// The underlying server error.
        #[from]
        source: calendar_api::ServerError,
    },
}
