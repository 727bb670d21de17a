// tests/common/mod.rs
#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;

use mini_watch::browser::PageSource;
use mini_watch::clock::ManualClock;
use mini_watch::config::MonitorOptions;
use mini_watch::notify::{Dispatcher, Notification, Notifier};
use mini_watch::{Monitor, MonitorError, Result};

pub const STORE_WITHOUT_BUTTON: &str = r#"<html><body>
  <div class="slide"><h2>MINI Cooper</h2><a href="/cooper">Keşfet</a></div>
  <div class="slide"><h2>MINI Countryman E</h2><p>Yakında</p></div>
</body></html>"#;

pub const STORE_WITH_BUTTON: &str = r#"<html><body>
  <div class="slide"><h2>MINI Countryman E</h2>
    <button class="btn-primary" type="button"><span>Tasarla</span></button>
  </div>
</body></html>"#;

pub const STOCK_EMPTY: &str = r#"<html><body><ul class="stock">
  <li><span>Countryman E</span> Classic Trim - Midnight Black</li>
  <li><span>Countryman E</span> JCW Trim - Chili Red</li>
</ul><script>var filters = ["Favoured","Classic"];</script></body></html>"#;

pub const STOCK_WITH_FAVOURED: &str = r#"<html><body><ul class="stock">
  <li><span>Countryman E</span> Classic Trim - Midnight Black</li>
  <li><span>Countryman E</span> <b>Favoured</b> Trim - Legend Grey</li>
</ul></body></html>"#;

/// Page source serving canned DOMs keyed by URL; unknown URLs fail like a navigation error.
#[derive(Clone, Default)]
pub struct FakeStore {
    pages: Arc<Mutex<HashMap<String, String>>>,
    launch_fails: Arc<AtomicBool>,
    renders: Arc<AtomicUsize>,
}

impl FakeStore {
    pub fn new(opts: &MonitorOptions, store: &str, stock: &str) -> Self {
        let s = Self::default();
        s.set(&opts.target.store_url, store);
        s.set(&opts.target.stock_url, stock);
        s
    }

    pub fn set(&self, url: &str, dom: &str) {
        self.pages.lock().unwrap().insert(url.to_string(), dom.to_string());
    }

    pub fn remove(&self, url: &str) {
        self.pages.lock().unwrap().remove(url);
    }

    pub fn fail_launch(&self, fail: bool) {
        self.launch_fails.store(fail, Ordering::SeqCst);
    }

    pub fn renders(&self) -> usize {
        self.renders.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl PageSource for FakeStore {
    async fn launch(&self) -> Result<()> {
        if self.launch_fails.load(Ordering::SeqCst) {
            return Err(MonitorError::BrowserNotFound("chromium".into()));
        }
        Ok(())
    }

    async fn render(&self, url: &str) -> Result<String> {
        self.renders.fetch_add(1, Ordering::SeqCst);
        self.pages
            .lock()
            .unwrap()
            .get(url)
            .cloned()
            .ok_or_else(|| MonitorError::NavigationTimeout {
                url: url.to_string(),
                timeout: Duration::from_secs(30),
            })
    }
}

/// Notifier that keeps every alert it is given.
#[derive(Clone, Default)]
pub struct Inbox {
    notes: Arc<Mutex<Vec<Notification>>>,
    fail: bool,
}

impl Inbox {
    pub fn failing() -> Self {
        Self { fail: true, ..Self::default() }
    }

    pub fn notes(&self) -> Vec<Notification> {
        self.notes.lock().unwrap().clone()
    }

    pub fn titles(&self) -> Vec<String> {
        self.notes().into_iter().map(|n| n.title).collect()
    }
}

#[async_trait]
impl Notifier for Inbox {
    fn name(&self) -> &'static str {
        if self.fail { "broken" } else { "inbox" }
    }

    async fn send(&self, note: &Notification) -> Result<()> {
        self.notes.lock().unwrap().push(note.clone());
        if self.fail {
            return Err(MonitorError::TelegramStatus { status: 401, body: "Unauthorized".into() });
        }
        Ok(())
    }
}

pub fn options() -> MonitorOptions {
    let mut opts = MonitorOptions::default();
    opts.desktop = false;
    opts
}

pub fn monitor(
    opts: MonitorOptions,
    store: &FakeStore,
    inbox: &Inbox,
) -> Monitor<FakeStore, ManualClock> {
    let dispatcher = Dispatcher::new().with(inbox.clone());
    Monitor::new(opts, store.clone(), ManualClock::at_epoch(), dispatcher)
}
