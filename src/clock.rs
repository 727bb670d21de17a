// src/clock.rs
//! Time source for the poll loop.
//!
//! The monitor only ever asks two things of time: "what time is it" and
//! "wait this long". `SystemClock` answers with the wall clock and Tokio's
//! timer; `ManualClock` answers instantly and just moves its own hands, so
//! a day of polling runs in a test in microseconds.

use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Local, TimeZone};

#[async_trait]
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Local>;
    async fn sleep(&self, d: Duration);
}

pub struct SystemClock;

#[async_trait]
impl Clock for SystemClock {
    fn now(&self) -> DateTime<Local> {
        Local::now()
    }

    async fn sleep(&self, d: Duration) {
        tokio::time::sleep(d).await;
    }
}

/// Fake clock: `sleep` returns immediately after advancing `now` by `d`.
pub struct ManualClock {
    now: Mutex<DateTime<Local>>,
    slept: Mutex<Vec<Duration>>,
}

impl ManualClock {
    pub fn new(start: DateTime<Local>) -> Self {
        Self { now: Mutex::new(start), slept: Mutex::new(Vec::new()) }
    }

    /// Fixed, DST-free starting point for tests.
    pub fn at_epoch() -> Self {
        let start = Local
            .timestamp_opt(1_700_000_000, 0)
            .single()
            .unwrap_or_else(Local::now);
        Self::new(start)
    }

    pub fn advance(&self, d: Duration) {
        let step = chrono::Duration::from_std(d).unwrap_or_else(|_| chrono::Duration::days(36_500));
        let mut now = self.now.lock().unwrap_or_else(|p| p.into_inner());
        *now = *now + step;
    }

    /// Every duration passed to `sleep`, in order.
    pub fn sleeps(&self) -> Vec<Duration> {
        self.slept.lock().unwrap_or_else(|p| p.into_inner()).clone()
    }
}

#[async_trait]
impl Clock for ManualClock {
    fn now(&self) -> DateTime<Local> {
        *self.now.lock().unwrap_or_else(|p| p.into_inner())
    }

    async fn sleep(&self, d: Duration) {
        self.slept.lock().unwrap_or_else(|p| p.into_inner()).push(d);
        self.advance(d);
    }
}
