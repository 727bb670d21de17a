// src/lib.rs
#[macro_use]
pub mod macros;

pub mod browser;
pub mod check;
pub mod clock;
pub mod config;
pub mod core;
pub mod error;
pub mod log;
pub mod monitor;
pub mod notify;

#[cfg(feature = "cli")]
pub mod cli;

pub use check::CheckResult;
pub use error::{MonitorError, Result};
pub use monitor::{Availability, CycleOutcome, Monitor, RunningCounters};
