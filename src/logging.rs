//! Tracing setup.
//!
//! The terminal owns stdout and stderr while a session runs, so events go to
//! a file. Without a log path no subscriber is installed and every event is
//! discarded.

use std::fs::OpenOptions;
use std::path::Path;
use std::sync::{Mutex, Once};

use anyhow::{Context, Result};
use tracing_subscriber::EnvFilter;

/// Filter used when `RUST_LOG` is not set
pub const DEFAULT_FILTER: &str = "info,rhyme_mahjong_core=debug";

static TRACING_INIT: Once = Once::new();

/// Install a file subscriber (idempotent, first call wins).
///
/// Returns whether this call installed it.
pub fn init_tracing(log_path: Option<&Path>) -> Result<bool> {
    let Some(path) = log_path else {
        return Ok(false);
    };
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("failed to open log file {}", path.display()))?;

    let mut installed = false;
    TRACING_INIT.call_once(|| {
        let filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

        let subscriber = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(Mutex::new(file))
            .with_ansi(false)
            .with_target(true)
            .compact();

        installed = subscriber.try_init().is_ok();
    });
    Ok(installed)
}
