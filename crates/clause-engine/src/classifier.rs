//! Semantic clause classification
//!
//! First match wins. The parent heading is checked before the clause's own
//! text: list items under "Events of Default" rarely repeat that vocabulary.

use lazy_static::lazy_static;
use regex::Regex;
use shared_types::ClauseType;

/// Material adverse change keywords
pub const MAC_KEYWORDS: &[&str] = &[
    "material adverse",
    "mac clause",
    "material adverse change",
    "material adverse effect",
];

/// Financial covenant keywords
pub const FINANCIAL_COVENANT_KEYWORDS: &[&str] = &[
    "financial covenant",
    "ebitda",
    "debt to equity",
    "leverage ratio",
    "leverage",
    "interest cover",
    "interest service",
    "debt service",
    "cash flow cover",
    "financial ratio",
    "covenant ratio",
];

/// Representation and warranty keywords
pub const REPRESENTATION_KEYWORDS: &[&str] = &["represent", "warranty", "warrants that"];

/// Event of default keywords
pub const DEFAULT_KEYWORDS: &[&str] = &[
    "event of default",
    "events of default",
    "default provisions",
    "non-payment",
    "cross default",
    "cross-default",
    "insolvency",
    "acceleration",
];

/// Definition section keywords
pub const DEFINITION_KEYWORDS: &[&str] = &["definitions", "defined terms", "interpretation"];

lazy_static! {
    /// "X means ...", "X shall mean ...", "X is defined as ..."
    static ref DEFINITION_PHRASE_PATTERN: Regex =
        Regex::new(r"\b(?:shall\s+mean|means|is\s+defined\s+as)\b").unwrap();
}

/// Classify a clause from its own text and, when present, its parent's header.
///
/// Pure: the same `(text, parent_header)` pair always yields the same type.
pub fn classify(text: &str, parent_header: Option<&str>) -> ClauseType {
    if let Some(parent) = parent_header {
        if let Some(inherited) = inherit_from_parent(&parent.to_lowercase()) {
            return inherited;
        }
    }
    classify_own_text(&text.to_lowercase())
}

fn inherit_from_parent(parent: &str) -> Option<ClauseType> {
    if parent.contains("event") && parent.contains("default") {
        Some(ClauseType::Default)
    } else if parent.contains("financial covenant")
        || (parent.contains("covenant") && !parent.contains("negative"))
    {
        Some(ClauseType::FinancialCovenant)
    } else if parent.contains("representation")
        || parent.contains("warrant")
        || parent.contains("warranties")
    {
        Some(ClauseType::Representation)
    } else if parent.contains("material adverse") {
        Some(ClauseType::Mac)
    } else {
        None
    }
}

fn classify_own_text(text: &str) -> ClauseType {
    if contains_any(text, MAC_KEYWORDS) {
        ClauseType::Mac
    } else if contains_any(text, FINANCIAL_COVENANT_KEYWORDS) {
        ClauseType::FinancialCovenant
    } else if is_representation(text) {
        ClauseType::Representation
    } else if is_default(text) {
        ClauseType::Default
    } else if contains_any(text, DEFINITION_KEYWORDS) || DEFINITION_PHRASE_PATTERN.is_match(text) {
        ClauseType::Definition
    } else {
        ClauseType::General
    }
}

fn is_representation(text: &str) -> bool {
    contains_any(text, REPRESENTATION_KEYWORDS)
        || (text.contains("status") && (text.contains("duly") || text.contains("validly")))
}

fn is_default(text: &str) -> bool {
    contains_any(text, DEFAULT_KEYWORDS)
        || (text.contains("misrepresentation") && text.contains("default"))
}

fn contains_any(text: &str, keywords: &[&str]) -> bool {
    keywords.iter().any(|kw| text.contains(kw))
}
