// src/core/vischars.rs
// Visible-text character iterator over a rendered DOM dump.
// Skips tags and comments, drops <script>/<style>/<noscript>/<template> bodies,
// decodes the common entities, collapses ASCII whitespace to a single ' ',
// and emits '\n' at block-level tag boundaries (a rough `innerText`).

const BLOCK_TAGS: &[&str] = &[
    "address", "article", "aside", "blockquote", "br", "button", "dd", "div", "dl", "dt",
    "fieldset", "figcaption", "figure", "footer", "form", "h1", "h2", "h3", "h4", "h5", "h6",
    "header", "hr", "li", "main", "nav", "ol", "option", "p", "section", "select", "table",
    "tbody", "td", "th", "thead", "tr", "ul",
];

const RAW_TEXT_TAGS: &[&str] = &["script", "style", "noscript", "template"];

pub struct VisChars<'a> {
    s: &'a str,
    b: &'a [u8],
    i: usize,
    n: usize,
}

impl<'a> VisChars<'a> {
    pub fn new(s: &'a str) -> Self { Self { s, b: s.as_bytes(), i: 0, n: s.len() } }

    /// Called on '<'. Returns true when the tag breaks the line.
    fn skip_tag(&mut self) -> bool {
        if self.b[self.i..].starts_with(b"<!--") {
            self.i = find_ci(self.b, b"-->", self.i + 4).map_or(self.n, |p| p + 3);
            return false;
        }

        self.i += 1;
        let closing = self.i < self.n && self.b[self.i] == b'/';
        if closing { self.i += 1; }

        let name_start = self.i;
        while self.i < self.n && self.b[self.i].is_ascii_alphanumeric() { self.i += 1; }
        let name = &self.s[name_start..self.i];

        // rest of the tag, honouring quoted attribute values
        let mut in_s = false; // '
        let mut in_d = false; // "
        while self.i < self.n {
            match self.b[self.i] {
                b'\'' if !in_d => in_s = !in_s,
                b'"'  if !in_s => in_d = !in_d,
                b'>' if !in_s && !in_d => { self.i += 1; break; }
                _ => {}
            }
            self.i += 1;
        }

        if !closing && RAW_TEXT_TAGS.iter().any(|t| t.eq_ignore_ascii_case(name)) {
            let close = format!("</{name}");
            self.i = find_ci(self.b, close.as_bytes(), self.i).unwrap_or(self.n);
            // leave the closing tag for the next round
            return false;
        }

        BLOCK_TAGS.iter().any(|t| t.eq_ignore_ascii_case(name))
    }

    /// Called on '&'. Unknown or unterminated entities come out as a space.
    fn take_entity(&mut self) -> char {
        let start = self.i + 1;
        let mut end = start;
        while end < self.n && end - start <= 10 && self.b[end] != b';' && self.b[end] != b'&'
            && !self.b[end].is_ascii_whitespace()
        {
            end += 1;
        }
        if end >= self.n || self.b[end] != b';' {
            // bare ampersand
            self.i += 1;
            return '&';
        }
        self.i = end + 1;
        decode_entity(&self.s[start..end]).unwrap_or(' ')
    }

    #[inline]
    fn next_char(&mut self) -> Option<char> {
        if self.i >= self.n { return None; }
        let c = self.b[self.i];
        if c < 0x80 { self.i += 1; Some(c as char) }
        else {
            let ch = self.s[self.i..].chars().next()?;
            self.i += ch.len_utf8();
            Some(ch)
        }
    }
}

impl<'a> Iterator for VisChars<'a> {
    type Item = char;
    fn next(&mut self) -> Option<Self::Item> {
        while self.i < self.n {
            match self.b[self.i] {
                b'<' => {
                    if self.skip_tag() { return Some('\n'); }
                    continue;
                }
                b'&' => return Some(self.take_entity()),
                b' ' | b'\t' | b'\r' | b'\n' => {
                    // collapse consecutive whitespace to a single space
                    while self.i < self.n {
                        match self.b[self.i] { b' ' | b'\t' | b'\r' | b'\n' => self.i += 1, _ => break }
                    }
                    return Some(' ');
                }
                _ => return self.next_char(),
            }
        }
        None
    }
}

fn decode_entity(name: &str) -> Option<char> {
    match name {
        "nbsp" | "#160" => Some(' '),
        "amp" => Some('&'),
        "lt" => Some('<'),
        "gt" => Some('>'),
        "quot" => Some('"'),
        "apos" | "#39" => Some('\''),
        _ => {
            let num = name.strip_prefix('#')?;
            let code = match num.strip_prefix(|c: char| c == 'x' || c == 'X') {
                Some(hex) => u32::from_str_radix(hex, 16).ok()?,
                None => num.parse().ok()?,
            };
            char::from_u32(code)
        }
    }
}

fn find_ci(hay: &[u8], needle: &[u8], from: usize) -> Option<usize> {
    if needle.is_empty() || from >= hay.len() { return None; }
    hay[from..]
        .windows(needle.len())
        .position(|w| w.eq_ignore_ascii_case(needle))
        .map(|p| p + from)
}
