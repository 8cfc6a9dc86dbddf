// Text normalization — the canonical form every downstream stage consumes.
//
// Normalization is a total function: any input string produces a defined
// output, and the same input always produces the same output. Order matters:
// whitespace is collapsed first, then disallowed characters are stripped,
// then the result is lowercased.

use std::sync::OnceLock;

use regex_lite::Regex;

fn whitespace_runs() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\s+").unwrap())
}

fn disallowed_chars() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    // Keep word characters, whitespace, and basic sentence punctuation.
    RE.get_or_init(|| Regex::new(r"[^\w\s.,!?;:]").unwrap())
}

/// Canonicalize raw text for analysis.
///
/// Collapses consecutive whitespace to single spaces and trims the ends,
/// strips everything except word characters, whitespace, and the punctuation
/// set `. , ! ? ; :`, then lowercases. Empty input yields empty output.
pub fn normalize(text: &str) -> String {
    let collapsed = whitespace_runs().replace_all(text.trim(), " ");
    let stripped = disallowed_chars().replace_all(&collapsed, "");
    stripped.to_lowercase()
}
