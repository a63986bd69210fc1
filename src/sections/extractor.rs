//! Lenient Section Extraction
//!
//! Best-effort parsing of unstructured generated documentation into the six
//! canonical sections. The generation step is not contractually bound to a
//! specific output grammar, so extraction is deliberately lenient: headers
//! are located as literal tokens, content runs to the next known header or
//! end of document, and anything that fails to parse simply yields no entry
//! rather than an error.

use std::collections::BTreeMap;
use std::sync::LazyLock;

use regex::Regex;
use tracing::warn;

use super::{CanonicalSection, SectionContentMap};

/// Matches any canonical header token as a whole word.
static HEADER_RE: LazyLock<Regex> = LazyLock::new(|| {
    let alternation = CanonicalSection::ALL
        .iter()
        .map(|s| regex::escape(s.header()))
        .collect::<Vec<_>>()
        .join("|");
    Regex::new(&format!(r"\b(?:{})\b", alternation)).expect("header alternation is valid")
});

/// Leading enumeration markers left over from numbered headings ("2." / "2 ").
static LEADING_ENUM_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d+(\.|\s)").expect("valid regex"));

/// Trailing horizontal rule plus an optional stray number.
static TRAILING_RULE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\n?-{3,}\s*\d*\s*)$").expect("valid regex"));

/// Trailing heading marker of the next (already sliced off) section.
static TRAILING_HEADING_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\n?#{1,6}\s*\d*\.?\s*)$").expect("valid regex"));

fn section_for_header(header: &str) -> Option<CanonicalSection> {
    CanonicalSection::ALL
        .iter()
        .copied()
        .find(|s| s.header() == header)
}

/// Strip enumeration and separator artifacts around a captured span.
fn clean_captured(content: &str) -> String {
    let mut cleaned = content.trim().to_string();
    cleaned = TRAILING_RULE_RE.replace(&cleaned, "").into_owned();
    cleaned = TRAILING_HEADING_RE.replace(&cleaned, "").into_owned();
    cleaned = LEADING_ENUM_RE.replace(&cleaned, "").into_owned();
    cleaned.trim().to_string()
}

/// Extract the canonical sections present in one generated document.
///
/// A header with no matching text, or whose captured span is empty after
/// trimming, yields no entry for that section.
pub fn extract(doc: &str) -> BTreeMap<CanonicalSection, String> {
    // First occurrence of each header, in document order.
    let mut seen: BTreeMap<CanonicalSection, usize> = BTreeMap::new();
    let mut matches: Vec<(CanonicalSection, usize, usize)> = Vec::new();
    for m in HEADER_RE.find_iter(doc) {
        let Some(section) = section_for_header(m.as_str()) else {
            continue;
        };
        if seen.contains_key(&section) {
            continue;
        }
        seen.insert(section, m.start());
        matches.push((section, m.start(), m.end()));
    }

    let mut sections = BTreeMap::new();
    for (i, (section, _, body_start)) in matches.iter().enumerate() {
        let body_end = matches
            .get(i + 1)
            .map(|(_, next_start, _)| *next_start)
            .unwrap_or(doc.len());
        let content = clean_captured(&doc[*body_start..body_end]);
        if !content.is_empty() {
            sections.insert(*section, content);
        }
    }
    sections
}

/// Extract sections for a batch of documents keyed by path.
///
/// Documents with no usable text are skipped with a diagnostic; they never
/// abort the batch.
pub fn extract_all(docs: &BTreeMap<String, String>) -> SectionContentMap {
    let mut map = SectionContentMap::new();
    for (path, doc) in docs {
        if doc.trim().is_empty() {
            warn!(path = %path, "skipping documentation with no usable text");
            continue;
        }
        for (section, text) in extract(doc) {
            map.insert(section, path.clone(), text);
        }
    }
    map
}

// =============================================================================
// Tests
// =============================================================================
