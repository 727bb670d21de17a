// src/cli.rs
use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use tracing::{error, info};

use crate::browser::Chromium;
use crate::clock::SystemClock;
use crate::config::consts::*;
use crate::config::{EmailOptions, MonitorOptions, TelegramOptions};
use crate::monitor::Monitor;
use crate::notify::Dispatcher;

#[derive(Parser, Debug, Clone)]
#[command(
    name = "mini_watch",
    version,
    about = "Watches the MINI Turkey online store for the Tasarla button and a trim pack in stock"
)]
pub struct Args {
    #[arg(long, env = "TELEGRAM_BOT_TOKEN", hide_env_values = true, help = "Telegram bot token (from @BotFather)")]
    pub telegram_token: Option<String>,
    #[arg(long, env = "TELEGRAM_CHAT_ID", help = "Telegram chat id to send alerts to")]
    pub telegram_chat_id: Option<String>,

    #[arg(long, env = "EMAIL_ADDRESS", help = "Enable e-mail alerts to/from this address")]
    pub email_address: Option<String>,
    #[arg(long, env = "EMAIL_PASSWORD", hide_env_values = true, default_value = "")]
    pub email_password: String,
    #[arg(long, env = "SMTP_SERVER", default_value = SMTP_SERVER)]
    pub smtp_server: String,
    #[arg(long, env = "SMTP_PORT", default_value_t = SMTP_PORT)]
    pub smtp_port: u16,

    #[arg(long, default_value = TARGET_MODEL, help = "Model name to look for in the carousel")]
    pub model: String,
    #[arg(long, default_value = TARGET_PACK, help = "Trim pack to look for in the stock list")]
    pub pack: String,
    #[arg(long, default_value = MAIN_STORE_URL)]
    pub store_url: String,
    #[arg(long, default_value = STOCK_LIST_URL)]
    pub stock_url: String,

    #[arg(long, default_value_t = CHECK_INTERVAL_MINUTES, value_parser = clap::value_parser!(u64).range(..=MAX_INTERVAL_MINUTES), help = "Minutes between checks")]
    pub interval_minutes: u64,
    #[arg(long, default_value_t = STATUS_REPORT_HOURS, value_parser = clap::value_parser!(u64).range(..=MAX_REPORT_HOURS), help = "Hours between status reports")]
    pub report_hours: u64,
    #[arg(long, default_value_t = FATAL_PAUSE_SECS, value_parser = clap::value_parser!(u64).range(..=MAX_FATAL_PAUSE_SECS), help = "Pause before exiting on a fatal error")]
    pub fatal_pause_secs: u64,

    #[arg(long, env = "CHROME_PATH", help = "Chromium/Chrome binary (default: search PATH)")]
    pub chrome: Option<PathBuf>,
    #[arg(long, help = "Disable local desktop notifications")]
    pub no_desktop: bool,
    #[arg(long, help = "Alert only when a condition appears, not on every check while it holds")]
    pub alert_on_change: bool,
    #[arg(long, default_value = LOG_FILE)]
    pub log_file: PathBuf,

    #[arg(long, help = "Run a single check, print the result and exit")]
    pub once: bool,
    #[arg(long, requires = "once", help = "With --once: print the result as JSON")]
    pub json: bool,
}

impl Args {
    pub fn to_options(&self) -> MonitorOptions {
        let mut opts = MonitorOptions::default();

        opts.target.model = self.model.clone();
        opts.target.pack = self.pack.clone();
        opts.target.store_url = self.store_url.clone();
        opts.target.stock_url = self.stock_url.clone();

        opts.schedule.check_interval = Duration::from_secs(self.interval_minutes * 60);
        opts.schedule.report_every = Duration::from_secs(self.report_hours * 3600);
        opts.schedule.fatal_pause = Duration::from_secs(self.fatal_pause_secs);

        // A half-filled Telegram pair is kept so `validate` can complain about it.
        opts.telegram = match (&self.telegram_token, &self.telegram_chat_id) {
            (None, None) => None,
            (t, c) => Some(TelegramOptions::new(
                t.clone().unwrap_or_default(),
                c.clone().unwrap_or_default(),
            )),
        };
        opts.email = self.email_address.as_ref().filter(|a| !a.is_empty()).map(|addr| {
            let mut e = EmailOptions::new(addr.clone(), self.email_password.clone());
            e.server = self.smtp_server.clone();
            e.port = self.smtp_port;
            e
        });

        opts.desktop = !self.no_desktop;
        opts.alert_on_change = self.alert_on_change;
        opts.browser_path = self.chrome.clone();
        opts.log_file = self.log_file.clone();
        opts
    }
}

/// Parse args and run until Ctrl-C (or one check with `--once`).
///
/// A fatal error outside `--once` is logged, then the process waits
/// `--fatal-pause-secs` before returning it, so a supervisor restart loop
/// does not hammer the store.
pub async fn run() -> color_eyre::Result<()> {
    let args = Args::parse();
    let opts = args.to_options();
    let pause = opts.schedule.fatal_pause;

    match serve(&args, opts).await {
        Err(e) if !args.once => {
            error!("Fatal error: {e:#}");
            tokio::time::sleep(pause).await;
            Err(e)
        }
        other => other,
    }
}

async fn serve(args: &Args, opts: MonitorOptions) -> color_eyre::Result<()> {
    opts.validate()?;
    crate::log::init(&opts.log_file)?;

    let dispatcher = Dispatcher::from_options(&opts)?;
    let source = Chromium::new(&opts);
    let mut monitor = Monitor::new(opts, source, SystemClock, dispatcher);

    if args.once {
        let outcome = monitor.run_cycle().await?;
        if args.json {
            println!("{}", serde_json::to_string_pretty(&outcome)?);
        } else {
            for (label, r) in [("Tasarla", &outcome.design), ("Stock", &outcome.stock)] {
                println!("{label}: {} {}", r.mark(), r.message);
                for line in &r.evidence {
                    println!("  {line}");
                }
            }
        }
        return Ok(());
    }

    tokio::select! {
        _ = monitor.run() => {}
        _ = tokio::signal::ctrl_c() => info!("Monitor stopped by user."),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::{CommandFactory, FromArgMatches};

    /// Parse with every `env` fallback switched off, so the runner's
    /// environment cannot leak credentials into the result.
    fn try_parse(args: &[&str]) -> Result<Args, clap::Error> {
        let mut full = vec!["mini_watch"];
        full.extend_from_slice(args);
        let cmd = Args::command().mut_args(|a| a.env(None));
        Args::from_arg_matches(&cmd.try_get_matches_from(full)?)
    }

    fn parse(args: &[&str]) -> Args {
        try_parse(args).unwrap()
    }

    #[test]
    fn defaults_become_default_options() {
        let a = parse(&["--telegram-token", "1:x", "--telegram-chat-id", "9"]);
        assert!(a.email_address.is_none());
        let opts = a.to_options();
        assert_eq!(opts.target, crate::config::TargetOptions::default());
        assert_eq!(opts.schedule.interval_minutes(), 5);
        assert_eq!(opts.telegram.as_ref().map(|t| t.chat_id.as_str()), Some("9"));
        assert!(opts.email.is_none());
        assert!(opts.desktop);
    }

    #[test]
    fn flags_override_schedule_and_channels() {
        let a = parse(&[
            "--interval-minutes", "2",
            "--report-hours", "6",
            "--no-desktop",
            "--alert-on-change",
            "--email-address", "me@example.com",
            "--smtp-port", "2525",
            "--pack", "Classic",
        ]);
        let opts = a.to_options();
        assert_eq!(opts.schedule.check_interval, Duration::from_secs(120));
        assert_eq!(opts.schedule.report_hours(), 6);
        assert!(!opts.desktop);
        assert!(opts.alert_on_change);
        assert_eq!(opts.email.as_ref().map(|e| e.port), Some(2525));
        assert_eq!(opts.target.pack, "Classic");
    }

    #[test]
    fn half_telegram_config_fails_validation() {
        let a = parse(&["--telegram-chat-id", "9"]);
        assert!(a.telegram_token.is_none());
        let opts = a.to_options();
        assert!(opts.telegram.is_some());
        assert!(opts.validate().is_err());
    }

    #[test]
    fn json_requires_once() {
        assert!(try_parse(&["--json"]).is_err());
    }

    #[test]
    fn oversized_schedule_flags_are_rejected() {
        assert!(try_parse(&["--interval-minutes", "99999999999999999"]).is_err());
        assert!(try_parse(&["--report-hours", "18446744073709551615"]).is_err());
        assert!(try_parse(&["--fatal-pause-secs", "100000000"]).is_err());
        let a = parse(&["--interval-minutes", &MAX_INTERVAL_MINUTES.to_string()]);
        assert_eq!(a.to_options().schedule.interval_minutes(), MAX_INTERVAL_MINUTES);
    }

    #[test]
    fn zero_interval_reaches_validation() {
        let opts = parse(&["--interval-minutes", "0"]).to_options();
        assert!(opts.validate().is_err());
    }
}
