//! Individual text-cleaning stages.
//!
//! Every stage is a pure `&str -> String` transform and an identity on input
//! it finds nothing to change in. The order they are chained in lives in
//! [`super::STAGE_ORDER`].

use regex::{Captures, Regex};
use std::sync::LazyLock;

/// Hebrew letters alef through tav.
const HEBREW_LETTERS: &str = r"[\x{05D0}-\x{05EA}]";

/// 1–2 letter marker after start-of-text, a period plus two whitespace
/// characters, two spaces, or a newline, followed by one whitespace character.
pub(crate) static BOUNDARY_VERSE_MARKER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(r"(?P<sep>^|\.\s\s|  |\n){HEBREW_LETTERS}{{1,2}}\s"))
        .expect("Invalid verse marker regex")
});

/// Same marker after any single whitespace character.
pub(crate) static ANY_WHITESPACE_VERSE_MARKER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(r"(?P<sep>^|\s){HEBREW_LETTERS}{{1,2}}\s"))
        .expect("Invalid verse marker regex")
});

static CURLY_ANNOTATION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{.*?\}").expect("Invalid curly annotation regex"));

static SPACE_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r" {2,}").expect("Invalid space run regex"));

static LINE_BREAK_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?:\r?\n){2,}").expect("Invalid line break regex"));

/// Replace verse-letter markers with a line break, using the default boundary rule.
pub fn remove_verse_markers(text: &str) -> String {
    remove_verse_markers_with(text, &BOUNDARY_VERSE_MARKER)
}

/// Replace every match of `pattern` with a line break.
///
/// When the pattern has a `sep` group that starts with a period, the period is
/// kept so the sentence end survives.
pub fn remove_verse_markers_with(text: &str, pattern: &Regex) -> String {
    pattern
        .replace_all(text, |caps: &Captures<'_>| {
            match caps.name("sep") {
                Some(sep) if sep.as_str().starts_with('.') => ".\n",
                _ => "\n",
            }
        })
        .into_owned()
}

/// `:` and `;` become `,`; `--` becomes a single space.
pub fn substitute_punctuation(text: &str) -> String {
    text.replace(&[':', ';'][..], ",").replace("--", " ")
}

/// Delete `{...}` annotations, braces included. Matches stop at the first `}`.
pub fn remove_curly_annotations(text: &str) -> String {
    CURLY_ANNOTATION.replace_all(text, "").into_owned()
}

/// Delete each literal sequence, in the order given.
pub fn strip_sequences(text: &str, sequences: &[String]) -> String {
    sequences
        .iter()
        .filter(|seq| !seq.is_empty())
        .fold(text.to_string(), |acc, seq| acc.replace(seq.as_str(), ""))
}

/// Hebrew points and accents layered over base letters (U+0591..=U+05C7).
pub fn is_cantillation_mark(c: char) -> bool {
    ('\u{0591}'..='\u{05C7}').contains(&c)
}

/// Delete cantillation marks and niqqud.
pub fn strip_cantillation(text: &str) -> String {
    text.chars().filter(|c| !is_cantillation_mark(*c)).collect()
}

/// Collapse runs of two or more spaces. Other whitespace is left alone.
pub fn collapse_spaces(text: &str) -> String {
    SPACE_RUN.replace_all(text, " ").into_owned()
}

/// CRLF becomes LF, then any run of line breaks becomes a single one.
pub fn normalize_line_endings(text: &str) -> String {
    let unix = text.replace("\r\n", "\n");
    LINE_BREAK_RUN.replace_all(&unix, "\n").into_owned()
}
