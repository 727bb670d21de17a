// src/log.rs
//! Console + append-only log file, the monitor's only persisted artifact.
//!
//! Level comes from `RUST_LOG` when set, `info` otherwise. Both sinks get the
//! same lines; the file never gets ANSI colours.

use std::fs::OpenOptions;
use std::path::Path;
use std::sync::Mutex;

use tracing_subscriber::{
    fmt::{self, time::ChronoLocal},
    prelude::*,
    EnvFilter,
};

use crate::error::{MonitorError, Result};

const TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

pub fn init(log_file: &Path) -> Result<()> {
    if let Some(parent) = log_file.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(log_file)?;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let console = fmt::layer()
        .with_target(false)
        .with_timer(ChronoLocal::new(s!(TIME_FORMAT)))
        .with_writer(std::io::stdout);

    let file_layer = fmt::layer()
        .with_target(false)
        .with_ansi(false)
        .with_timer(ChronoLocal::new(s!(TIME_FORMAT)))
        .with_writer(Mutex::new(file));

    tracing_subscriber::registry()
        .with(filter)
        .with(console)
        .with(file_layer)
        .try_init()
        .map_err(|e| MonitorError::Logging(e.to_string()))
}
