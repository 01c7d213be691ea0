//! Light markdown-to-HTML conversion for chat bubbles.
//!
//! Three substitutions are recognised, applied in this order:
//! - `**X**` becomes `<strong>X</strong>`
//! - `- X` running to the end of its line becomes `• X`
//! - every `\n` becomes `<br>`
//!
//! Bold and bullet must run before the newline pass, otherwise the bullet's
//! end-of-line anchor would never see a literal newline.
//!
//! [`format_message`] passes everything else through untouched (the output is
//! trusted as markup). [`parse_message`] builds a small line/span tree from the
//! same rules and [`to_escaped_html`] serialises that tree with every other
//! character escaped.

use once_cell::sync::Lazy;
use regex::Regex;

/// Glyph that replaces a leading `- ` marker.
pub const BULLET: char = '•';

/// Non-greedy bold match. Never crosses a line terminator.
static BOLD_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\*\*([^\n\r\x{2028}\x{2029}]*?)\*\*").expect("bold regex pattern is valid")
});

/// Bullet marker followed by the rest of its line. The terminator is captured
/// and written back so the newline pass still sees it.
static BULLET_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"- ([^\n\r\x{2028}\x{2029}]*)(\n|$)").expect("bullet regex pattern is valid")
});

/// How bubble text is turned into HTML.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum RenderMode {
    /// Substitutions only; any markup already in the text is kept as markup.
    #[default]
    Trusted,
    /// Only the recognised constructs produce markup; everything else is escaped.
    Escaped,
}

/// A run of text with uniform emphasis.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Span {
    pub text: String,
    pub bold: bool,
}

impl Span {
    fn plain(text: &str) -> Self {
        Self {
            text: text.to_string(),
            bold: false,
        }
    }

    fn bold(text: &str) -> Self {
        Self {
            text: text.to_string(),
            bold: true,
        }
    }
}

/// One visual line of a message (the text between two `\n`).
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Line {
    pub spans: Vec<Span>,
}

impl Line {
    pub fn is_empty(&self) -> bool {
        self.spans.iter().all(|s| s.text.is_empty())
    }
}

/// Apply the bold, bullet and line-break substitutions to raw text.
pub fn format_message(content: &str) -> String {
    let bold = BOLD_RE.replace_all(content, "<strong>${1}</strong>");
    let bulleted = BULLET_RE.replace_all(&bold, "• ${1}${2}");
    bulleted.replace('\n', "<br>")
}

/// Render `content` to an HTML fragment using the given mode.
pub fn render_html(content: &str, mode: RenderMode) -> String {
    match mode {
        RenderMode::Trusted => format_message(content),
        RenderMode::Escaped => to_escaped_html(&parse_message(content)),
    }
}

/// Parse raw text into lines of styled spans using the same rules as
/// [`format_message`].
pub fn parse_message(content: &str) -> Vec<Line> {
    content.split('\n').map(parse_line).collect()
}

fn parse_line(line: &str) -> Line {
    let mut spans = Vec::new();
    let mut last = 0;

    for caps in BOLD_RE.captures_iter(line) {
        let (Some(whole), Some(inner)) = (caps.get(0), caps.get(1)) else {
            continue;
        };
        if whole.start() > last {
            spans.push(Span::plain(&line[last..whole.start()]));
        }
        spans.push(Span::bold(inner.as_str()));
        last = whole.end();
    }
    if last < line.len() {
        spans.push(Span::plain(&line[last..]));
    }

    apply_bullet(&mut spans);
    Line { spans }
}

fn is_line_terminator(c: char) -> bool {
    matches!(c, '\r' | '\u{2028}' | '\u{2029}')
}

/// Byte offset just past the last line terminator in `text`, or 0.
fn after_last_terminator(text: &str) -> usize {
    text.char_indices()
        .filter(|(_, c)| is_line_terminator(*c))
        .last()
        .map_or(0, |(i, c)| i + c.len_utf8())
}

/// Replace the first `- ` that has a terminator-free run to the end of the
/// line. A marker split across two spans never matches, just as a tag in
/// between breaks the match in the HTML string.
fn apply_bullet(spans: &mut [Span]) {
    let dirty = spans
        .iter()
        .rposition(|s| s.text.contains(is_line_terminator));
    let first = dirty.unwrap_or(0);

    for (idx, span) in spans.iter_mut().enumerate().skip(first) {
        let floor = if dirty == Some(idx) {
            after_last_terminator(&span.text)
        } else {
            0
        };
        if let Some(pos) = span.text[floor..].find("- ") {
            let at = floor + pos;
            span.text.replace_range(at..at + 1, "•");
            return;
        }
    }
}

/// Serialise a parsed message, escaping everything except `<strong>` and `<br>`.
pub fn to_escaped_html(lines: &[Line]) -> String {
    let mut out = String::new();
    for (i, line) in lines.iter().enumerate() {
        if i > 0 {
            out.push_str("<br>");
        }
        for span in &line.spans {
            if span.bold {
                out.push_str("<strong>");
                push_escaped(&mut out, &span.text);
                out.push_str("</strong>");
            } else {
                push_escaped(&mut out, &span.text);
            }
        }
    }
    out
}

fn push_escaped(out: &mut String, text: &str) {
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
}
