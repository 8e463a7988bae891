//! Terminal text helpers.
//!
//! Views build their lines with `colored`, so widths have to be measured on
//! the text with escape sequences removed.

use std::borrow::Cow;
use std::sync::LazyLock;

use regex::Regex;

/// CSI sequences (`\x1b[...m` and friends), OSC sequences terminated by BEL
/// or ST, and charset selection (`\x1b(B`).
static ANSI_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\x1b\[[0-9;]*[A-Za-z]|\x1b\][^\x07\x1b]*(?:\x07|\x1b\\)|\x1b[()][A-B0-2]")
        .expect("ANSI regex must compile")
});

/// Remove ANSI escape sequences.
pub fn strip_ansi(s: &str) -> Cow<'_, str> {
    if s.contains('\x1b') {
        ANSI_RE.replace_all(s, "")
    } else {
        Cow::Borrowed(s)
    }
}

/// Number of characters a terminal would draw for `s`.
pub fn visible_width(s: &str) -> usize {
    strip_ansi(s).chars().count()
}

/// Pad `s` with spaces up to `width` visible characters.
pub fn pad_right(s: &str, width: usize) -> String {
    let missing = width.saturating_sub(visible_width(s));
    format!("{s}{}", " ".repeat(missing))
}

/// Truncate to `max_chars` characters, appending "…" if truncated.
pub fn truncate(s: &str, max_chars: usize) -> String {
    if s.chars().count() <= max_chars {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_chars.saturating_sub(1)).collect();
        format!("{kept}…")
    }
}
