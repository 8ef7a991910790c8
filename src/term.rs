//! Term normalization and ordering.
//!
//! A term is any surface form (abbreviation or expansion). Terms compare by
//! exact string equality after trimming; case only matters for presentation
//! order, which is case-insensitive with ties broken by the plain string order.

use std::cmp::Ordering;
use std::collections::BTreeSet;
use std::sync::LazyLock;

use regex::Regex;

/// Trailing `-<digits>` marker used by upstream sources to keep colliding
/// abbreviation keys apart (`AM-2`).
static DISAMBIGUATION_SUFFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"-\d+$").expect("valid suffix pattern"));

/// Normalize a raw term. Returns `None` when nothing is left after trimming.
pub fn normalize(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// Normalize and deduplicate a raw group of terms.
pub fn normalize_all<I, S>(raw: I) -> BTreeSet<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    raw.into_iter()
        .filter_map(|term| normalize(term.as_ref()))
        .collect()
}

/// Remove a trailing disambiguation marker, if any.
pub fn strip_disambiguation_suffix(term: &str) -> &str {
    match DISAMBIGUATION_SUFFIX.find(term) {
        Some(m) => &term[..m.start()],
        None => term,
    }
}

/// Presentation order: case-insensitive, then plain string order.
pub fn presentation_cmp(a: &str, b: &str) -> Ordering {
    a.to_lowercase()
        .cmp(&b.to_lowercase())
        .then_with(|| a.cmp(b))
}

/// Sort terms into presentation order.
pub fn sort_for_presentation(terms: &mut [String]) {
    terms.sort_by_cached_key(|term| (term.to_lowercase(), term.clone()));
}

/// Clean up a concept's member terms once clustering is done.
///
/// Strips disambiguation suffixes, drops terms that become empty, collapses
/// the duplicates that stripping can create and returns the members in
/// presentation order.
pub fn finalize_members<'a, I>(terms: I) -> Vec<String>
where
    I: IntoIterator<Item = &'a String>,
{
    let cleaned: BTreeSet<String> = terms
        .into_iter()
        .filter_map(|term| normalize(strip_disambiguation_suffix(term)))
        .collect();

    let mut members: Vec<String> = cleaned.into_iter().collect();
    sort_for_presentation(&mut members);
    members
}

/// Whether a term must be quoted when written into a boolean query.
pub fn needs_quoting(term: &str) -> bool {
    term.chars().any(char::is_whitespace)
}

/// Wrap a term in double quotes.
pub fn quote(term: &str) -> String {
    format!("\"{term}\"")
}
