// src/config/options.rs
use std::path::PathBuf;
use std::time::Duration;

use super::consts::*;
use crate::error::{MonitorError, Result};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MonitorOptions {
    pub target: TargetOptions,
    pub schedule: ScheduleOptions,
    pub telegram: Option<TelegramOptions>,
    pub email: Option<EmailOptions>,
    pub desktop: bool,
    /// Alert only when a condition flips on, not on every cycle it holds.
    pub alert_on_change: bool,
    /// Explicit browser binary; `None` searches `BROWSER_CANDIDATES`.
    pub browser_path: Option<PathBuf>,
    pub log_file: PathBuf,
}

impl Default for MonitorOptions {
    fn default() -> Self {
        Self {
            target: TargetOptions::default(),
            schedule: ScheduleOptions::default(),
            telegram: None,
            email: None,
            desktop: true,
            alert_on_change: false,
            browser_path: None,
            log_file: PathBuf::from(LOG_FILE),
        }
    }
}

impl MonitorOptions {
    /// Reject settings that would make the loop spin or match everything.
    pub fn validate(&self) -> Result<()> {
        if self.target.model.trim().is_empty() {
            return Err(MonitorError::Config(s!("target model is empty")));
        }
        if self.target.pack.trim().is_empty() {
            return Err(MonitorError::Config(s!("target pack is empty")));
        }
        if self.schedule.check_interval.is_zero() {
            return Err(MonitorError::Config(s!("check interval must be positive")));
        }
        if self.schedule.report_every.is_zero() {
            return Err(MonitorError::Config(s!("status report interval must be positive")));
        }
        if let Some(t) = &self.telegram {
            if t.token.is_empty() || t.chat_id.is_empty() {
                return Err(MonitorError::Config(s!("Telegram needs both bot token and chat id")));
            }
        }
        if let Some(e) = &self.email {
            if e.address.is_empty() {
                return Err(MonitorError::Config(s!("e-mail channel needs an address")));
            }
        }
        Ok(())
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TargetOptions {
    pub model: String,
    pub pack: String,
    pub button_text: String,
    pub store_url: String,
    pub stock_url: String,
}

impl Default for TargetOptions {
    fn default() -> Self {
        Self {
            model: s!(TARGET_MODEL),
            pack: s!(TARGET_PACK),
            button_text: s!(DESIGN_BUTTON_TEXT),
            store_url: s!(MAIN_STORE_URL),
            stock_url: s!(STOCK_LIST_URL),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ScheduleOptions {
    pub check_interval: Duration,
    pub report_every: Duration,
    pub error_cooldown: Duration,
    pub fatal_pause: Duration,
    pub navigation_timeout: Duration,
    pub render_budget: Duration,
}

impl Default for ScheduleOptions {
    fn default() -> Self {
        Self {
            check_interval: Duration::from_secs(CHECK_INTERVAL_MINUTES * 60),
            report_every: Duration::from_secs(STATUS_REPORT_HOURS * 3600),
            error_cooldown: Duration::from_secs(ERROR_COOLDOWN_SECS),
            fatal_pause: Duration::from_secs(FATAL_PAUSE_SECS),
            navigation_timeout: Duration::from_secs(NAVIGATION_TIMEOUT_SECS),
            render_budget: Duration::from_millis(RENDER_BUDGET_MS),
        }
    }
}

impl ScheduleOptions {
    pub fn interval_minutes(&self) -> u64 {
        self.check_interval.as_secs() / 60
    }

    pub fn report_hours(&self) -> u64 {
        self.report_every.as_secs() / 3600
    }
}

#[derive(Clone, PartialEq, Eq)]
pub struct TelegramOptions {
    pub token: String,
    pub chat_id: String,
    pub api_base: String,
}

impl TelegramOptions {
    pub fn new(token: impl Into<String>, chat_id: impl Into<String>) -> Self {
        Self {
            token: token.into(),
            chat_id: chat_id.into(),
            api_base: s!(TELEGRAM_API_BASE),
        }
    }
}

// Keep the bot token out of logs and panics.
impl std::fmt::Debug for TelegramOptions {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TelegramOptions")
            .field("token", &"<redacted>")
            .field("chat_id", &self.chat_id)
            .field("api_base", &self.api_base)
            .finish()
    }
}

#[derive(Clone, PartialEq, Eq)]
pub struct EmailOptions {
    pub server: String,
    pub port: u16,
    pub address: String,
    pub password: String,
}

impl EmailOptions {
    pub fn new(address: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            server: s!(SMTP_SERVER),
            port: SMTP_PORT,
            address: address.into(),
            password: password.into(),
        }
    }
}

impl std::fmt::Debug for EmailOptions {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EmailOptions")
            .field("server", &self.server)
            .field("port", &self.port)
            .field("address", &self.address)
            .field("password", &"<redacted>")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_store_constants() {
        let opts = MonitorOptions::default();
        assert_eq!(opts.target.model, "COUNTRYMAN E");
        assert_eq!(opts.target.pack, "Favoured");
        assert_eq!(opts.schedule.interval_minutes(), 5);
        assert_eq!(opts.schedule.report_hours(), 24);
        assert!(opts.telegram.is_none());
        assert!(opts.validate().is_ok());
    }

    #[test]
    fn validate_rejects_half_configured_telegram() {
        let mut opts = MonitorOptions::default();
        opts.telegram = Some(TelegramOptions::new("123:abc", ""));
        assert!(matches!(opts.validate(), Err(MonitorError::Config(_))));
    }

    #[test]
    fn validate_rejects_zero_interval() {
        let mut opts = MonitorOptions::default();
        opts.schedule.check_interval = Duration::ZERO;
        assert!(opts.validate().is_err());
    }

    #[test]
    fn debug_output_redacts_secrets() {
        let t = TelegramOptions::new("123:secret", "42");
        let e = EmailOptions::new("me@example.com", "hunter2");
        let dbg = format!("{t:?} {e:?}");
        assert!(!dbg.contains("secret"));
        assert!(!dbg.contains("hunter2"));
        assert!(dbg.contains("42"));
    }
}
