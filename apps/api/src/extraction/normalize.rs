//! Text normalization — the first pipeline stage.
//!
//! Cleans encoding artifacts out of acquired text before any pattern
//! matching runs. Performs no structural reinterpretation: line breaks
//! survive, because every downstream matcher is line-oriented.

/// Normalizes raw acquired text. Never fails.
///
/// - CRLF and lone CR become LF.
/// - Control characters other than `\n` and `\t` are dropped.
/// - Replacement characters from lossy decoding become spaces.
/// - Leading/trailing whitespace is trimmed.
pub fn normalize(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut chars = raw.chars().peekable();
    while let Some(c) = chars.next() {
        match c {
            '\r' => {
                if chars.peek() != Some(&'\n') {
                    out.push('\n');
                }
            }
            '\u{FFFD}' => out.push(' '),
            c if c.is_control() && c != '\n' && c != '\t' => {}
            c => out.push(c),
        }
    }
    out.trim().to_string()
}

/// Collapses runs of whitespace into single spaces. Used on multi-line
/// captures (summaries, descriptions) where line structure no longer
/// matters.
pub fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
