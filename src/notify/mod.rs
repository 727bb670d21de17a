// src/notify/mod.rs
//! Best-effort, multi-channel alerts.
//!
//! A `Dispatcher` holds an ordered list of `Notifier`s and tries every one of
//! them for each alert. A failing channel is logged and skipped; it never
//! stops the next one and never reaches the caller as an error.

mod desktop;
mod email;
mod telegram;

pub use desktop::Desktop;
pub use email::Email;
pub use telegram::Telegram;

use async_trait::async_trait;
use tracing::{debug, warn};

use crate::config::MonitorOptions;
use crate::error::Result;

/// One alert, as plain text. Channels render it for their medium.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Notification {
    pub title: String,
    pub body: String,
    pub link: Option<String>,
}

impl Notification {
    pub fn new(title: impl Into<String>, body: impl Into<String>) -> Self {
        Self { title: title.into(), body: body.into(), link: None }
    }

    pub fn with_link(mut self, link: impl Into<String>) -> Self {
        self.link = Some(link.into());
        self
    }
}

#[async_trait]
pub trait Notifier: Send + Sync {
    fn name(&self) -> &'static str;

    /// Channels that may legitimately be unavailable (desktop on a server)
    /// log their failures at debug level only.
    fn best_effort(&self) -> bool {
        false
    }

    async fn send(&self, note: &Notification) -> Result<()>;
}

/// Which channels took an alert and which did not.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DeliveryReport {
    pub delivered: Vec<&'static str>,
    pub failed: Vec<&'static str>,
}

impl DeliveryReport {
    pub fn any_delivered(&self) -> bool {
        !self.delivered.is_empty()
    }
}

#[derive(Default)]
pub struct Dispatcher {
    channels: Vec<Box<dyn Notifier>>,
}

impl Dispatcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Channels from options, in delivery order: Telegram (instant), e-mail, desktop.
    pub fn from_options(opts: &MonitorOptions) -> Result<Self> {
        let mut d = Self::new();
        if let Some(t) = &opts.telegram {
            d.push(Telegram::new(t.clone())?);
        }
        if let Some(e) = &opts.email {
            d.push(Email::new(e.clone())?);
        }
        if opts.desktop {
            d.push(Desktop);
        }
        Ok(d)
    }

    pub fn push(&mut self, channel: impl Notifier + 'static) {
        self.channels.push(Box::new(channel));
    }

    pub fn with(mut self, channel: impl Notifier + 'static) -> Self {
        self.push(channel);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.channels.is_empty()
    }

    pub fn channel_names(&self) -> Vec<&'static str> {
        self.channels.iter().map(|c| c.name()).collect()
    }

    pub async fn notify(&self, note: &Notification) -> DeliveryReport {
        let mut report = DeliveryReport::default();
        for channel in &self.channels {
            match channel.send(note).await {
                Ok(()) => report.delivered.push(channel.name()),
                Err(e) => {
                    if channel.best_effort() {
                        debug!("{} notification skipped: {e}", channel.name());
                    } else {
                        warn!("Failed to send {} notification: {e}", channel.name());
                    }
                    report.failed.push(channel.name());
                }
            }
        }
        report
    }
}
