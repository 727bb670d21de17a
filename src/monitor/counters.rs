// src/monitor/counters.rs
use std::collections::BTreeMap;

use chrono::{DateTime, Local};

/// What the monitor has seen since the last status report.
/// In memory only; a restart starts from zero.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RunningCounters {
    pub checks_since_last_report: u64,
    /// Pack name → cycles in which it showed up in the stock list.
    pub observed_pack_counts: BTreeMap<String, u64>,
    /// Process start; survives `reset`.
    pub uptime_start: DateTime<Local>,
}

impl RunningCounters {
    pub fn new(start: DateTime<Local>) -> Self {
        Self {
            checks_since_last_report: 0,
            observed_pack_counts: BTreeMap::new(),
            uptime_start: start,
        }
    }

    pub fn record_check(&mut self) {
        self.checks_since_last_report += 1;
    }

    pub fn record_pack(&mut self, pack: &str) {
        *self.observed_pack_counts.entry(s!(pack)).or_insert(0) += 1;
    }

    pub fn pack_count(&self, pack: &str) -> u64 {
        self.observed_pack_counts.get(pack).copied().unwrap_or(0)
    }

    pub fn reset(&mut self) {
        self.checks_since_last_report = 0;
        self.observed_pack_counts.clear();
    }

    /// (hours, minutes) of uptime at `now`.
    pub fn uptime(&self, now: DateTime<Local>) -> (i64, i64) {
        let secs = (now - self.uptime_start).num_seconds().max(0);
        (secs / 3600, (secs % 3600) / 60)
    }
}
