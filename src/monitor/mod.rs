// src/monitor/mod.rs
//! The poll loop.
//!
//! `Monitor` owns everything that changes while it runs (counters, last seen
//! availability, time of the last status report), so there is no global
//! state. One cycle is: check both pages → count → alert → log. The loop is
//! an immediate cycle followed by sleep/cycle forever, with a status report
//! whenever the report interval has elapsed.

mod counters;

pub use counters::RunningCounters;

use chrono::{DateTime, Local};
use serde::Serialize;
use tracing::{error, info, warn};

use crate::browser::PageSource;
use crate::check::{self, CheckResult};
use crate::clock::Clock;
use crate::config::consts::EVIDENCE_IN_ALERT;
use crate::config::MonitorOptions;
use crate::error::Result;
use crate::notify::{DeliveryReport, Dispatcher, Notification};

/// Last observed state of both conditions.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct Availability {
    pub design: bool,
    pub stock: bool,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct CycleOutcome {
    pub design: CheckResult,
    pub stock: CheckResult,
    pub alerts_sent: usize,
}

impl CycleOutcome {
    pub fn anything_available(&self) -> bool {
        self.design.available || self.stock.available
    }
}

pub struct Monitor<S, C> {
    opts: MonitorOptions,
    source: S,
    clock: C,
    dispatcher: Dispatcher,
    counters: RunningCounters,
    last_report: DateTime<Local>,
    last_seen: Availability,
}

impl<S: PageSource, C: Clock> Monitor<S, C> {
    pub fn new(opts: MonitorOptions, source: S, clock: C, dispatcher: Dispatcher) -> Self {
        let now = clock.now();
        Self {
            opts,
            source,
            clock,
            dispatcher,
            counters: RunningCounters::new(now),
            last_report: now,
            last_seen: Availability::default(),
        }
    }

    pub fn counters(&self) -> &RunningCounters {
        &self.counters
    }

    pub fn last_seen(&self) -> Availability {
        self.last_seen
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    /// Load both pages and evaluate them: (design button, stock list).
    pub async fn run_check(&self) -> Result<(CheckResult, CheckResult)> {
        check::run_check(&self.source, &self.opts.target).await
    }

    /// Send one alert through every configured channel.
    pub async fn notify(&self, title: &str, body: &str, link: Option<&str>) -> DeliveryReport {
        let mut note = Notification::new(title, body);
        if let Some(link) = link {
            note = note.with_link(link);
        }
        self.dispatcher.notify(&note).await
    }

    fn should_alert(&self, now: bool, before: bool) -> bool {
        now && !(self.opts.alert_on_change && before)
    }

    pub async fn run_cycle(&mut self) -> Result<CycleOutcome> {
        info!("{}", "=".repeat(50));
        info!("Starting check at {}", self.clock.now().format("%Y-%m-%d %H:%M:%S"));

        let (design, stock) = self.run_check().await?;
        self.counters.record_check();
        if stock.available {
            let pack = self.opts.target.pack.clone();
            self.counters.record_pack(&pack);
        }

        let target = &self.opts.target;
        let mut alerts_sent = 0;

        if self.should_alert(design.available, self.last_seen.design) {
            let body = format!(
                "Mini {} için {} butonu artık aktif! Hemen tasarlayıp sipariş verebilirsin!",
                target.model, target.button_text
            );
            let title = format!("🎉 {} Butonu Aktif!", target.button_text);
            self.notify(&title, &body, Some(target.store_url.as_str())).await;
            alerts_sent += 1;
        }

        if self.should_alert(stock.available, self.last_seen.stock) {
            let shown: Vec<&str> = stock.evidence.iter().take(EVIDENCE_IN_ALERT).map(String::as_str).collect();
            let body = format!(
                "Mini {} {} paket stokta bulundu!\n\n{}",
                target.model,
                target.pack,
                shown.join("\n")
            );
            let title = format!("🎉 {} Paket Stokta!", target.pack);
            self.notify(&title, &body, Some(target.stock_url.as_str())).await;
            alerts_sent += 1;
        }

        self.last_seen = Availability { design: design.available, stock: stock.available };
        info!(
            "Check complete - {}: {}, Stock: {}",
            self.opts.target.button_text,
            design.mark(),
            stock.mark()
        );

        Ok(CycleOutcome { design, stock, alerts_sent })
    }

    pub fn report_due(&self) -> bool {
        let every = chrono::Duration::from_std(self.opts.schedule.report_every)
            .unwrap_or_else(|_| chrono::Duration::days(36_500));
        self.clock.now() - self.last_report >= every
    }

    /// Human-readable summary of the counters.
    pub fn status_text(&self) -> Notification {
        let (h, m) = self.counters.uptime(self.clock.now());
        let mark = |b: bool| if b { "✅" } else { "❌" };

        let mut body = format!(
            "✅ Monitor is running\n⏱ Uptime: {h}h {m}m\n🔍 Checks completed: {}\n",
            self.counters.checks_since_last_report
        );
        let pack = &self.opts.target.pack;
        if !self.counters.observed_pack_counts.contains_key(pack) {
            body.push_str(&format!("📦 {pack} sightings: 0\n"));
        }
        for (name, count) in &self.counters.observed_pack_counts {
            body.push_str(&format!("📦 {name} sightings: {count}\n"));
        }
        body.push_str(&format!(
            "📅 Next report in {}h\n\n{}: {} | Stock: {}",
            self.opts.schedule.report_hours(),
            self.opts.target.button_text,
            mark(self.last_seen.design),
            mark(self.last_seen.stock)
        ));

        Notification::new("📊 Status Report", body)
    }

    /// Dispatch the summary, then start a fresh reporting window.
    pub async fn status_report(&mut self) -> DeliveryReport {
        let note = self.status_text();
        let report = self.dispatcher.notify(&note).await;
        let (h, m) = self.counters.uptime(self.clock.now());
        info!(
            "Status report sent - {} checks, uptime {h}h {m}m",
            self.counters.checks_since_last_report
        );
        self.counters.reset();
        self.last_report = self.clock.now();
        report
    }

    /// Startup banner, "monitor started" alert and the immediate first check.
    pub async fn start(&mut self) {
        let target = &self.opts.target;
        info!("🚗 Mini {} {} Monitor Started", target.model, target.pack);
        info!("Target: {} - {} pack", target.model, target.pack);
        info!("Check interval: {} minutes", self.opts.schedule.interval_minutes());
        info!("Status report interval: {} hours", self.opts.schedule.report_hours());

        if self.dispatcher.is_empty() {
            warn!("⚠️  No notification channel configured! Alerts will only appear in the log.");
            warn!("   Set TELEGRAM_BOT_TOKEN and TELEGRAM_CHAT_ID (see --help).");
        } else {
            info!("Notification channels: {}", self.dispatcher.channel_names().join(", "));
            let body = format!(
                "Monitoring {} - {} pack\nCheck interval: {} min\nStatus reports every {}h",
                target.model,
                target.pack,
                self.opts.schedule.interval_minutes(),
                self.opts.schedule.report_hours()
            );
            self.notify("Mini Monitor Started!", &body, None).await;
        }

        if let Err(e) = self.run_cycle().await {
            error!("Initial check failed: {e}");
            self.notify("⚠️ Initial check failed", &e.to_string(), None).await;
        }
    }

    /// One loop iteration: wait, check, maybe report. Errors cost a cooldown, never the loop.
    pub async fn tick(&mut self) {
        info!("Next check in {} minutes...", self.opts.schedule.interval_minutes());
        self.clock.sleep(self.opts.schedule.check_interval).await;

        match self.run_cycle().await {
            Ok(outcome) => {
                if outcome.anything_available() {
                    info!("🎉 AVAILABILITY DETECTED! Continuing monitoring...");
                }
                if self.report_due() {
                    self.status_report().await;
                }
            }
            Err(e) => {
                error!("Error during check: {e}");
                self.clock.sleep(self.opts.schedule.error_cooldown).await;
            }
        }
    }

    /// Run forever. Stop it by dropping the future (Ctrl-C in the binary).
    pub async fn run(&mut self) {
        self.start().await;
        loop {
            self.tick().await;
        }
    }
}
