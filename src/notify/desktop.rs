// src/notify/desktop.rs
use async_trait::async_trait;
use tokio::process::Command;

use super::{Notification, Notifier};
use crate::error::{MonitorError, Result};

/// Local OS notification: `osascript` on macOS, `notify-send` on Linux.
/// Anywhere else, or without the tool installed, it just fails quietly.
pub struct Desktop;

/// AppleScript string literal body: backslashes and double quotes escaped.
fn applescript_quote(s: &str) -> String {
    s.replace('\\', "\\\\").replace('"', "\\\"")
}

pub fn osascript_line(note: &Notification) -> String {
    format!(
        "display notification \"{}\" with title \"{}\" sound name \"Glass\"",
        applescript_quote(&note.body),
        applescript_quote(&note.title)
    )
}

#[async_trait]
impl Notifier for Desktop {
    fn name(&self) -> &'static str {
        "desktop"
    }

    fn best_effort(&self) -> bool {
        true
    }

    async fn send(&self, note: &Notification) -> Result<()> {
        let mut cmd = if cfg!(target_os = "macos") {
            let mut c = Command::new("osascript");
            c.arg("-e").arg(osascript_line(note));
            c
        } else if cfg!(target_os = "linux") {
            let mut c = Command::new("notify-send");
            c.arg(&note.title).arg(&note.body);
            c
        } else {
            return Err(MonitorError::Desktop(s!("unsupported platform")));
        };

        let status = cmd
            .kill_on_drop(true)
            .status()
            .await
            .map_err(|e| MonitorError::Desktop(e.to_string()))?;
        if !status.success() {
            return Err(MonitorError::Desktop(format!("exited with {status}")));
        }
        Ok(())
    }
}
