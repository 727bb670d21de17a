// src/browser/chromium.rs
use std::path::PathBuf;
use std::process::Stdio;
use std::sync::OnceLock;
use std::time::Duration;

use async_trait::async_trait;
use tokio::process::Command;
use tracing::{debug, info};

use super::PageSource;
use crate::config::consts::{BROWSER_CANDIDATES, BROWSER_LOCALE, WINDOW_SIZE};
use crate::config::MonitorOptions;
use crate::error::{MonitorError, Result};

/// Headless Chromium driven through `--dump-dom`.
///
/// Each `render` spawns a fresh browser process, so no cookies or consent
/// state carry over between pages or cycles. The child is killed when the
/// future is dropped (timeout or Ctrl-C).
pub struct Chromium {
    explicit: Option<PathBuf>,
    binary: OnceLock<PathBuf>,
    nav_timeout: Duration,
    render_budget: Duration,
}

impl Chromium {
    pub fn new(opts: &MonitorOptions) -> Self {
        Self {
            explicit: opts.browser_path.clone(),
            binary: OnceLock::new(),
            nav_timeout: opts.schedule.navigation_timeout,
            render_budget: opts.schedule.render_budget,
        }
    }

    fn args(&self, url: &str) -> Vec<String> {
        let (w, h) = WINDOW_SIZE;
        vec![
            s!("--headless=new"),
            s!("--disable-gpu"),
            s!("--no-sandbox"),
            s!("--no-first-run"),
            s!("--hide-scrollbars"),
            format!("--lang={BROWSER_LOCALE}"),
            format!("--window-size={w},{h}"),
            format!("--virtual-time-budget={}", self.render_budget.as_millis()),
            s!("--dump-dom"),
            s!(url),
        ]
    }

    async fn locate(&self) -> Result<PathBuf> {
        if let Some(found) = self.binary.get() {
            return Ok(found.clone());
        }

        let candidates: Vec<PathBuf> = match &self.explicit {
            Some(p) => vec![p.clone()],
            None => BROWSER_CANDIDATES.iter().map(|c| PathBuf::from(*c)).collect(),
        };

        for cand in &candidates {
            let probe = Command::new(cand)
                .arg("--version")
                .stdin(Stdio::null())
                .stdout(Stdio::piped())
                .stderr(Stdio::null())
                .kill_on_drop(true)
                .output()
                .await;
            match probe {
                Ok(out) if out.status.success() => {
                    let version = String::from_utf8_lossy(&out.stdout);
                    info!("Using browser {} ({})", cand.display(), version.trim());
                    return Ok(self.binary.get_or_init(|| cand.clone()).clone());
                }
                Ok(out) => debug!("{} --version exited with {}", cand.display(), out.status),
                Err(e) => debug!("{} not usable: {e}", cand.display()),
            }
        }

        let tried: Vec<String> = candidates.iter().map(|p| p.display().to_string()).collect();
        Err(MonitorError::BrowserNotFound(tried.join(", ")))
    }
}

#[async_trait]
impl PageSource for Chromium {
    async fn launch(&self) -> Result<()> {
        self.locate().await.map(|_| ())
    }

    async fn render(&self, url: &str) -> Result<String> {
        let bin = self.locate().await?;
        debug!("Rendering {url}");

        let child = Command::new(&bin)
            .args(self.args(url))
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| MonitorError::BrowserLaunch(format!("{}: {e}", bin.display())))?;

        let out = tokio::time::timeout(self.nav_timeout, child.wait_with_output())
            .await
            .map_err(|_| MonitorError::NavigationTimeout {
                url: s!(url),
                timeout: self.nav_timeout,
            })??;

        if !out.status.success() {
            let stderr = String::from_utf8_lossy(&out.stderr);
            let reason = stderr.lines().last().unwrap_or("no output").trim().to_string();
            return Err(MonitorError::Navigation {
                url: s!(url),
                reason: format!("{} ({reason})", out.status),
            });
        }

        let dom = String::from_utf8_lossy(&out.stdout).into_owned();
        if dom.trim().is_empty() {
            return Err(MonitorError::Navigation { url: s!(url), reason: s!("empty DOM") });
        }
        debug!("Rendered {url}: {} bytes", dom.len());
        Ok(dom)
    }
}
