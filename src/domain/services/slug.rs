use regex::Regex;
use std::sync::LazyLock;

static WHITESPACE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").expect("valid regex"));
static NON_WORD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^A-Za-z0-9_\-]+").expect("valid regex"));
static HYPHEN_RUN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"-{2,}").expect("valid regex"));

/// Turns a display name into a URL-safe token.
///
/// Lowercases, replaces whitespace runs with `-`, drops anything outside
/// `[a-z0-9_-]`, collapses repeated hyphens and trims them from both ends.
/// Letters outside ASCII are dropped rather than transliterated, so
/// `"Montréal"` becomes `"montral"`. Never fails; empty input gives `""`.
pub fn to_slug(text: &str) -> String {
    if text.is_empty() {
        return String::new();
    }

    let lowered = text.to_lowercase();
    let hyphenated = WHITESPACE.replace_all(&lowered, "-");
    let stripped = NON_WORD.replace_all(&hyphenated, "");
    let collapsed = HYPHEN_RUN.replace_all(&stripped, "-");
    collapsed.trim_matches('-').to_string()
}

/// [`to_slug`] over an optional value; `None` gives `""`.
pub fn to_slug_opt(text: Option<&str>) -> String {
    text.map(to_slug).unwrap_or_default()
}
