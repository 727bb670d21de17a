// src/check/stock.rs
use tracing::info;

use super::CheckResult;
use crate::config::consts::EVIDENCE_MAX_CHARS;
use crate::config::TargetOptions;
use crate::core::{html, sanitize};

/// Stock check over the rendered stock-list DOM.
pub fn inspect(dom: &str, target: &TargetOptions) -> CheckResult {
    inspect_text(&html::visible_text(dom), target)
}

/// Stock check over already-visible text (one rendered line per `\n`).
/// Raw markup is never searched: the pack name also shows up in filter
/// widgets' hidden JSON and would give false positives.
pub fn inspect_text(text: &str, target: &TargetOptions) -> CheckResult {
    let has_pack = html::contains_ci(text, &target.pack);
    if !has_pack {
        info!("No {} pack in current stock", target.pack);
        return CheckResult::missing(format!("No {} pack available", target.pack));
    }

    let evidence = matching_lines(text, &target.pack);
    info!("✅ {} PACK FOUND IN STOCK! ({} lines)", target.pack.to_uppercase(), evidence.len());
    CheckResult::found(
        format!("Found {} with {} pack!", target.model, target.pack),
        evidence,
    )
}

/// Every line mentioning `pack`, trimmed and capped at `EVIDENCE_MAX_CHARS`.
pub fn matching_lines(text: &str, pack: &str) -> Vec<String> {
    text.lines()
        .filter(|line| html::contains_ci(line, pack))
        .map(|line| sanitize::truncate_chars(line.trim(), EVIDENCE_MAX_CHARS).to_string())
        .collect()
}
