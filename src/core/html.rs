// src/core/html.rs
use super::{sanitize, VisChars};

/// ASCII-only lowercase. Non-ASCII chars pass through untouched, so byte
/// offsets found in the folded string are valid in the original.
pub fn to_lower(s: &str) -> String {
    s.chars()
        .map(|c| {
            if c.is_ascii() {
                c.to_ascii_lowercase()
            } else {
                c
            }
        })
        .collect()
}

/// Full Unicode case-insensitive substring test (same as JS `toLowerCase().includes`).
pub fn contains_ci(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

/// All non-overlapping `<tag …>…</tag>` blocks of one element kind.
pub fn tag_blocks<'a>(s: &'a str, tag: &str) -> Vec<&'a str> {
    tag_spans(s, tag).into_iter().map(|(b, e)| &s[b..e]).collect()
}

/// Byte ranges of the blocks `tag_blocks` returns.
///
/// An opener whose element is never closed before the next opener of the same
/// kind is skipped. `<a>` and `<button>` cannot nest, so that opener is stray
/// markup and must not swallow the element after it.
pub fn tag_spans(s: &str, tag: &str) -> Vec<(usize, usize)> {
    let lc = to_lower(s);
    let open = join!("<", &to_lower(tag));
    let close = join!("</", &to_lower(tag), ">");
    let mut out = Vec::new();
    let mut from = 0;
    while let Some(start) = find_opener(&lc, &open, from) {
        let Some(open_end) = lc[start..].find('>').map(|p| p + start + 1) else { break };
        let Some(close_at) = lc[open_end..].find(&close).map(|p| p + open_end) else {
            from = open_end;
            continue;
        };
        if let Some(next) = find_opener(&lc, &open, open_end) {
            if next < close_at {
                from = next;
                continue;
            }
        }
        let end = close_at + close.len();
        out.push((start, end));
        from = end;
    }
    out
}

/// Next `<tag` at or after `from`. `<a` must not match `<abbr`/`<article`,
/// so the name has to be followed by a delimiter.
fn find_opener(lc: &str, open: &str, mut from: usize) -> Option<usize> {
    while let Some(rel) = lc.get(from..)?.find(open) {
        let start = from + rel;
        let after_name = lc.as_bytes().get(start + open.len()).copied();
        if matches!(after_name, Some(b' ' | b'>' | b'\t' | b'\n' | b'\r' | b'/')) {
            return Some(start);
        }
        from = start + open.len();
    }
    None
}

/// The opening tag (`<button class="…">`) of a block.
pub fn open_tag(block: &str) -> &str {
    match block.find('>') {
        Some(oe) => &block[..=oe],
        None => block,
    }
}

/// Visible text of an HTML fragment on one line.
pub fn strip_tags<S: AsRef<str>>(s: S) -> String {
    let flat: String = VisChars::new(s.as_ref())
        .map(|c| if c == '\n' { ' ' } else { c })
        .collect();
    sanitize::normalize_ws(&flat)
}

/// Rendered-text approximation of a whole document: one visible line per
/// block, whitespace collapsed, empty lines dropped.
pub fn visible_text(html: &str) -> String {
    visible_lines(html).join("\n")
}

pub fn visible_lines(html: &str) -> Vec<String> {
    let raw: String = VisChars::new(html).collect();
    raw.split('\n')
        .map(sanitize::normalize_ws)
        .filter(|l| !l.is_empty())
        .collect()
}
