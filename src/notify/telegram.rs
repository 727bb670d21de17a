// src/notify/telegram.rs
use std::time::Duration;

use async_trait::async_trait;
use serde::Serialize;
use tracing::info;

use super::{Notification, Notifier};
use crate::config::TelegramOptions;
use crate::core::sanitize::escape_html;
use crate::error::{MonitorError, Result};

/// Telegram bot `sendMessage` channel.
pub struct Telegram {
    opts: TelegramOptions,
    http: reqwest::Client,
}

#[derive(Serialize)]
struct SendMessage<'a> {
    chat_id: &'a str,
    text: &'a str,
    parse_mode: &'static str,
    disable_web_page_preview: bool,
}

impl Telegram {
    pub fn new(opts: TelegramOptions) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(15))
            .build()?;
        Ok(Self { opts, http })
    }

    fn endpoint(&self) -> String {
        format!("{}/bot{}/sendMessage", self.opts.api_base.trim_end_matches('/'), self.opts.token)
    }

    /// Send pre-rendered Telegram HTML as-is.
    pub async fn send_html(&self, text: &str) -> Result<()> {
        let payload = SendMessage {
            chat_id: &self.opts.chat_id,
            text,
            parse_mode: "HTML",
            disable_web_page_preview: true,
        };
        let resp = self.http.post(self.endpoint()).json(&payload).send().await?;
        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(MonitorError::TelegramStatus { status: status.as_u16(), body });
        }
        info!("Telegram notification sent successfully!");
        Ok(())
    }
}

/// `🚗 <b>title</b>`, blank line, body, then an order link when present.
pub fn render_html(note: &Notification) -> String {
    let mut out = format!("🚗 <b>{}</b>\n\n{}", escape_html(&note.title), escape_html(&note.body));
    if let Some(link) = &note.link {
        out.push_str(&format!("\n\n🔗 <a href='{}'>Hemen Sipariş Ver</a>", escape_html(link)));
    }
    out
}

#[async_trait]
impl Notifier for Telegram {
    fn name(&self) -> &'static str {
        "telegram"
    }

    async fn send(&self, note: &Notification) -> Result<()> {
        self.send_html(&render_html(note)).await
    }
}
