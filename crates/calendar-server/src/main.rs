//! Calendar event service binary.
//!
//! Wires the in-memory event store to the HTTP API and runs until Ctrl-C.
//!
//! # Startup Sequence
//!
//! 1. Parse command-line flags
//! 2. Load configuration (`calendar-config.yaml`, environment, flags)
//! 3. Initialize structured logging (tracing)
//! 4. Create the event store and shared HTTP state
//! 5. Serve requests until a shutdown signal arrives

mod error;

use std::path::{Path, PathBuf};
use std::sync::Arc;

use calendar_api::AppState;
use calendar_core::config::DEFAULT_CONFIG_FILE;
use calendar_core::{CalendarConfig, EventStore, LoggingConfig};
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::error::StartupError;

/// In-memory calendar event service.
#[derive(Parser, Debug)]
#[command(name = "calendar-server", about = "In-memory calendar event service")]
struct Cli {
    /// Path to the YAML config file (default: `calendar-config.yaml` if present).
    #[arg(long)]
    config: Option<PathBuf>,

    /// Host to bind. Overrides the config file and `CALENDAR_HOST`.
    #[arg(long)]
    host: Option<String>,

    /// Port to bind. Overrides the config file and `PORT`.
    #[arg(long)]
    port: Option<u16>,
}

impl Cli {
    /// Apply flag overrides on top of loaded configuration.
    fn apply(&self, config: &mut CalendarConfig) {
        if let Some(host) = &self.host {
            config.server.host.clone_from(host);
        }
        if let Some(port) = self.port {
            config.server.port = port;
        }
    }
}

/// Application entry point for the calendar server.
///
/// # Errors
///
/// Returns an error if configuration, logging, or the server fails.
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // 1. Parse flags.
    let cli = Cli::parse();

    // 2. Load configuration.
    let mut config = load_config(cli.config.as_deref())?;
    cli.apply(&mut config);

    // 3. Initialize structured logging.
    init_logging(&config.logging)?;
    info!(
        host = config.server.host,
        port = config.server.port,
        log_level = config.logging.level,
        "calendar-server starting"
    );

    // 4. Create the store.
    let store = Arc::new(EventStore::new());
    let state = Arc::new(AppState::with_store(Arc::clone(&store)));

    // 5. Serve until Ctrl-C.
    calendar_api::start_server(&config.server, state, calendar_api::shutdown_signal())
        .await
        .map_err(StartupError::from)?;

    info!(
        users = store.user_count(),
        events = store.event_count(),
        "calendar-server shutdown complete"
    );
    Ok(())
}

/// Load configuration from an explicit path, the default file if it
/// exists, or defaults plus environment overrides.
fn load_config(path: Option<&Path>) -> Result<CalendarConfig, StartupError> {
    let config = match path {
        Some(path) => CalendarConfig::from_file(path)?,
        None => {
            let default_path = Path::new(DEFAULT_CONFIG_FILE);
            if default_path.exists() {
                CalendarConfig::from_file(default_path)?
            } else {
                CalendarConfig::from_env()?
            }
        }
    };
    Ok(config)
}

/// Install the global tracing subscriber.
///
/// `RUST_LOG` takes precedence over the configured level.
fn init_logging(logging: &LoggingConfig) -> Result<(), StartupError> {
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(&logging.level).map_err(|e| StartupError::Logging {
            level: logging.level.clone(),
            message: format!("{e}"),
        })?,
    };

    if logging.json {
        tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(true)
            .init();
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;

    #[test]
    fn cli_defaults_to_no_overrides() {
        let cli = Cli::parse_from(["calendar-server"]);
        assert_eq!(cli.config, None);
        assert_eq!(cli.host, None);
        assert_eq!(cli.port, None);
    }

    #[test]
    fn cli_port_overrides_config() {
        let cli = Cli::parse_from(["calendar-server", "--port", "9191", "--host", "127.0.0.1"]);
        let mut config = CalendarConfig::default();
        cli.apply(&mut config);
        assert_eq!(config.server.port, 9191);
        assert_eq!(config.server.host, "127.0.0.1");
    }

    #[test]
    fn cli_rejects_bad_port() {
        assert!(Cli::try_parse_from(["calendar-server", "--port", "http"]).is_err());
    }

    #[test]
    fn cli_config_path() {
        let cli = Cli::parse_from(["calendar-server", "--config", "/etc/calendar.yaml"]);
        assert_eq!(cli.config, Some(PathBuf::from("/etc/calendar.yaml")));
    }

    #[test]
    fn explicit_missing_config_is_an_error() {
        let result = load_config(Some(Path::new("/nonexistent/calendar.yaml")));
        assert!(matches!(result, Err(StartupError::Config { .. })));
    }
}
