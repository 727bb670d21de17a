// src/browser/mod.rs
//! Page rendering collaborator.
//!
//! The checks never talk to a browser directly; they get rendered DOM text
//! from a `PageSource`. Production uses headless Chromium, tests hand in
//! canned pages.

mod chromium;

pub use chromium::Chromium;

use async_trait::async_trait;

use crate::error::Result;

#[async_trait]
pub trait PageSource: Send + Sync {
    /// Make sure the browser can be used at all. Called once per cycle,
    /// before any page is loaded.
    async fn launch(&self) -> Result<()> {
        Ok(())
    }

    /// Navigate to `url` and return the DOM after client-side rendering.
    async fn render(&self, url: &str) -> Result<String>;
}
