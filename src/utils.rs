//! Common text utilities shared across the crate
//!
//! Extracted node text arrives with arbitrary internal whitespace, and
//! search API titles arrive with highlight markup; both are normalized here
//! before any value reaches a record.

use once_cell::sync::Lazy;
use regex::Regex;

static WHITESPACE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").expect("static pattern"));
static MARKUP_TAG: Lazy<Regex> = Lazy::new(|| Regex::new(r"<[^>]*>").expect("static pattern"));

/// Collapse internal whitespace runs to single spaces and trim the ends.
pub fn clean_text(text: &str) -> String {
    WHITESPACE.replace_all(text.trim(), " ").into_owned()
}

/// Remove markup tags, then normalize whitespace.
///
/// Used for externally supplied titles (search results highlight matches
/// with `<b>` tags); not a sanitizer for untrusted output.
pub fn strip_tags(text: &str) -> String {
    clean_text(&MARKUP_TAG.replace_all(text, ""))
}
