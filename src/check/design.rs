// src/check/design.rs
use tracing::{info, warn};

use super::CheckResult;
use crate::config::consts::EVIDENCE_MAX_CHARS;
use crate::config::TargetOptions;
use crate::core::{html, sanitize};

const HEADINGS: &[&str] = &["h1", "h2", "h3", "h4", "h5", "h6"];

/// Decide from the rendered main-store DOM whether the design button is live.
///
/// The model carousel keeps every slide in the DOM, so "the model's slide is
/// showing" reduces to "the model name is in the visible text". Only buttons
/// inside that slide count.
pub fn inspect(dom: &str, target: &TargetOptions) -> CheckResult {
    let text = html::visible_text(dom);
    if !html::contains_ci(&text, &target.model) {
        warn!("Could not find {} in carousel", target.model);
        return CheckResult::missing(format!("{} not found in carousel", target.model));
    }
    info!("Found {} slide!", target.model);

    let buttons = active_buttons(model_section(dom, &target.model), &target.button_text);
    if buttons.is_empty() {
        info!("{} button not present on {} slide", target.button_text, target.model);
        return CheckResult::missing(format!("{} button not available", target.button_text));
    }

    info!("✅ {} BUTTON FOUND!", target.button_text.to_uppercase());
    CheckResult::found(
        format!("{} button is now available for {}!", target.button_text, target.model),
        buttons,
    )
}

/// The slice of the DOM belonging to the model's slide: from the heading that
/// names it (or its first mention) up to the next heading.
pub fn model_section<'a>(dom: &'a str, model: &str) -> &'a str {
    let mut heads: Vec<(usize, usize)> =
        HEADINGS.iter().flat_map(|h| html::tag_spans(dom, h)).collect();
    heads.sort_unstable();

    let start = heads
        .iter()
        .find(|&&(b, e)| html::contains_ci(&html::strip_tags(&dom[b..e]), model))
        .map(|&(b, _)| b)
        .or_else(|| html::to_lower(dom).find(&html::to_lower(model)))
        .unwrap_or(0);
    let end = heads
        .iter()
        .map(|&(b, _)| b)
        .find(|&b| b > start)
        .unwrap_or(dom.len());
    &dom[start..end]
}

/// Labels of `<button>`/`<a>` elements mentioning `label` that are not hidden or disabled.
pub fn active_buttons(dom: &str, label: &str) -> Vec<String> {
    let mut out = Vec::new();
    for tag in ["button", "a"] {
        for block in html::tag_blocks(dom, tag) {
            let text = html::strip_tags(block);
            if !html::contains_ci(&text, label) {
                continue;
            }
            if is_inert(html::open_tag(block)) {
                continue;
            }
            out.push(sanitize::truncate_chars(&text, EVIDENCE_MAX_CHARS).to_string());
        }
    }
    out
}

/// Hidden or disabled going by the opening tag alone. Stylesheet rules are invisible to us.
fn is_inert(open_tag: &str) -> bool {
    let lc = html::to_lower(open_tag);
    let compact: String = lc.chars().filter(|c| !c.is_whitespace()).collect();

    const MARKERS: &[&str] = &[
        "aria-hidden=\"true\"",
        "aria-disabled=\"true\"",
        "display:none",
        "visibility:hidden",
    ];
    if MARKERS.iter().any(|m| compact.contains(m)) {
        return true;
    }
    has_bare_attr(&lc, "hidden") || has_bare_attr(&lc, "disabled")
}

fn has_bare_attr(lc_tag: &str, name: &str) -> bool {
    let pat = join!(" ", name);
    lc_tag.match_indices(&pat).any(|(i, _)| {
        matches!(
            lc_tag.as_bytes().get(i + pat.len()),
            Some(b' ' | b'>' | b'=' | b'/' | b'\t' | b'\n')
        )
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn target() -> TargetOptions {
        TargetOptions::default()
    }

    const CAROUSEL: &str = r#"<div class="slide"><h2>MINI Cooper</h2><a href="/cooper">Tasarla</a></div>
        <div class="slide"><h2>Countryman E</h2>{BUTTON}</div>"#;

    fn page(button: &str) -> String {
        CAROUSEL.replace("{BUTTON}", button)
    }

    #[test]
    fn model_missing_is_negative() {
        let r = inspect("<div>MINI Cooper</div><button>Tasarla</button>", &target());
        assert!(!r.available);
        assert_eq!(r.message, "COUNTRYMAN E not found in carousel");
        assert!(r.evidence.is_empty());
    }

    #[test]
    fn visible_button_is_found() {
        let r = inspect(&page(r#"<button class="cta"><span>Tasarla</span></button>"#), &target());
        assert!(r.available);
        assert_eq!(r.message, "Tasarla button is now available for COUNTRYMAN E!");
        assert_eq!(r.evidence, vec!["Tasarla"]);
    }

    #[test]
    fn button_on_another_slide_is_not_credited() {
        let r = inspect(&page(""), &target());
        assert!(!r.available);
        assert_eq!(r.message, "Tasarla button not available");
        assert!(r.evidence.is_empty());

        let r = inspect(
            "<div class=slide><h2>MINI Cooper</h2><a href=/cooper>Tasarla</a></div>\
             <div class=slide><h2>Countryman E</h2><p>Yakında</p></div>",
            &target(),
        );
        assert!(!r.available);
    }

    #[test]
    fn later_slides_are_outside_the_section() {
        let dom = "<h2>Countryman E</h2><p>Yakında</p><h2>MINI Aceman</h2><button>Tasarla</button>";
        assert_eq!(model_section(dom, "COUNTRYMAN E"), "<h2>Countryman E</h2><p>Yakında</p>");
        assert!(!inspect(dom, &target()).available);
    }

    #[test]
    fn disabled_and_hidden_buttons_do_not_count() {
        let dom = r#"<div>Countryman E</div>
            <button disabled>Tasarla</button>
            <button aria-hidden="true">Tasarla</button>
            <a style="display: none" href="/x">TASARLA</a>
            <button hidden>Tasarla</button>"#;
        let r = inspect(dom, &target());
        assert!(!r.available);
        assert_eq!(r.message, "Tasarla button not available");
    }

    #[test]
    fn class_names_are_not_bare_attributes() {
        assert!(!is_inert(r#"<button class="not-disabled-yet" data-hidden-x="1">"#));
        assert!(is_inert(r#"<button type="button" disabled="">"#));
    }

    #[test]
    fn model_match_ignores_case() {
        let r = inspect("<h2>countryman e</h2><a href='/d'>tasarla</a>", &target());
        assert!(r.available);
    }
}
