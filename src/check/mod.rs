// src/check/mod.rs
//! # Storefront checks
//!
//! Each check reads one page of the store and answers a yes/no question about
//! it, plus the snippets of rendered text that justify the answer.
//!
//! - `design` – is the "Tasarla" (design/order) button live for the target
//!   model on the main store page?
//! - `stock` – does the stock list mention the target pack?
//!
//! The matching here is plain substring search over rendered text. It is
//! tied to the store's current markup and will break when the site changes;
//! keep it simple rather than clever.
//!
//! Page-load failures never leave this module: `run_check` turns them into a
//! negative `CheckResult` whose message starts with `Error:`. The only error
//! it returns is a browser that cannot be launched at all.

pub mod design;
pub mod stock;

use serde::Serialize;
use tracing::{error, info};

use crate::browser::PageSource;
use crate::config::TargetOptions;
use crate::error::{MonitorError, Result};

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct CheckResult {
    pub available: bool,
    pub message: String,
    pub evidence: Vec<String>,
}

impl CheckResult {
    pub fn found(message: impl Into<String>, evidence: Vec<String>) -> Self {
        Self { available: true, message: message.into(), evidence }
    }

    pub fn missing(message: impl Into<String>) -> Self {
        Self { available: false, message: message.into(), evidence: Vec::new() }
    }

    pub fn failed(err: &MonitorError) -> Self {
        Self::missing(format!("Error: {err}"))
    }

    pub fn mark(&self) -> &'static str {
        if self.available { "✅" } else { "❌" }
    }
}

/// Both checks, in order: (design button, stock list).
pub async fn run_check(
    source: &dyn PageSource,
    target: &TargetOptions,
) -> Result<(CheckResult, CheckResult)> {
    source.launch().await?;
    let design = check_design(source, target).await;
    let stock = check_stock(source, target).await;
    Ok((design, stock))
}

pub async fn check_design(source: &dyn PageSource, target: &TargetOptions) -> CheckResult {
    info!("Checking for {} button on {}...", target.button_text, target.model);
    match source.render(&target.store_url).await {
        Ok(dom) => design::inspect(&dom, target),
        Err(e) => {
            error!("Error checking {} button: {e}", target.button_text);
            CheckResult::failed(&e)
        }
    }
}

pub async fn check_stock(source: &dyn PageSource, target: &TargetOptions) -> CheckResult {
    info!("Checking stock for {} pack...", target.pack);
    match source.render(&target.stock_url).await {
        Ok(dom) => stock::inspect(&dom, target),
        Err(e) => {
            error!("Error checking stock: {e}");
            CheckResult::failed(&e)
        }
    }
}
