// src/error.rs
//! Error type shared by the browser, check and notification layers.
//!
//! Almost every error here is caught close to where it happens and turned
//! into a negative `CheckResult` or a logged delivery failure. Only
//! `BrowserNotFound`/`BrowserLaunch` escape a cycle, and the main loop
//! answers those with its cooldown.

use std::time::Duration;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum MonitorError {
    /// No usable Chromium/Chrome binary on PATH (or at the configured path)
    #[error("no headless browser found (tried: {0})")]
    BrowserNotFound(String),

    /// Browser process could not be started
    #[error("browser launch failed: {0}")]
    BrowserLaunch(String),

    /// Page did not finish rendering in time
    #[error("navigation to {url} timed out after {}s", .timeout.as_secs())]
    NavigationTimeout { url: String, timeout: Duration },

    /// Browser exited unsuccessfully while rendering a page
    #[error("navigation to {url} failed: {reason}")]
    Navigation { url: String, reason: String },

    /// Telegram answered with a non-success status
    #[error("Telegram error ({status}): {body}")]
    TelegramStatus { status: u16, body: String },

    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("invalid e-mail address: {0}")]
    EmailAddress(#[from] lettre::address::AddressError),

    #[error("could not build e-mail: {0}")]
    EmailBuild(#[from] lettre::error::Error),

    #[error("SMTP delivery failed: {0}")]
    Smtp(#[from] lettre::transport::smtp::Error),

    /// Local notification tool failed or is unavailable on this platform
    #[error("desktop notification failed: {0}")]
    Desktop(String),

    #[error("invalid configuration: {0}")]
    Config(String),

    #[error("logging setup failed: {0}")]
    Logging(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, MonitorError>;
