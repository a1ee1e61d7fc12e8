//! Structural marker detection
//!
//! A fixed, ordered catalog of independent matchers scans the raw text line by
//! line. Matchers may fire on the same line; the hierarchy builder and the
//! deduplicator sort that out later. Catalog order is also the tie-break for
//! matches that start at the same offset.

use lazy_static::lazy_static;
use regex::{Captures, Regex};
use tracing::debug;

use crate::config::SegmenterConfig;

pub const LEVEL_TOP: usize = 0;
pub const LEVEL_UPPER_ROMAN: usize = 2;
pub const LEVEL_CAPITAL_HEADER: usize = 2;
pub const LEVEL_LETTER: usize = 3;
pub const LEVEL_PAREN_NUMBER: usize = 3;
pub const LEVEL_LOWER_ROMAN: usize = 4;

/// Deepest decimal level the matcher will report ("1.1.1.1.1")
pub const MAX_DECIMAL_LEVEL: usize = 5;

lazy_static! {
    /// "CLAUSE 1", "ARTICLE IV", "SCHEDULE A", "Part 2"
    static ref TOP_LEVEL_PATTERN: Regex =
        Regex::new(r"(?im)^[ \t]*(clause|article|schedule|part)[ \t]+([0-9]+|[ivxlcdm]+|[a-z])\b[^\n]*")
            .unwrap();

    /// "1 Title", "1. Title", "1.1 Title", "1.1.1. Title", or a bare "5." line
    static ref DECIMAL_PATTERN: Regex =
        Regex::new(r"(?m)^[ \t]*(\d{1,3}(?:\.\d{1,3}){0,4})(\.?)(?:[ \t]+([^\n]*?))?[ \t\r]*$")
            .unwrap();

    /// "(a)", "(aa)"
    static ref LETTER_PATTERN: Regex =
        Regex::new(r"(?m)^[ \t]*\(([a-z]{1,2})\)[^\n]*").unwrap();

    /// "(i)" through "(xiii)"
    static ref LOWER_ROMAN_PATTERN: Regex =
        Regex::new(r"(?m)^[ \t]*\((xiii|xii|xi|x|ix|viii|vii|vi|v|iv|iii|ii|i)\)[^\n]*").unwrap();

    /// "(1)", "(12)"
    static ref PAREN_NUMBER_PATTERN: Regex =
        Regex::new(r"(?m)^[ \t]*\((\d{1,2})\)[^\n]*").unwrap();

    /// "(I)" through "(XIII)"
    static ref UPPER_ROMAN_PATTERN: Regex =
        Regex::new(r"(?m)^[ \t]*\((XIII|XII|XI|X|IX|VIII|VII|VI|V|IV|III|II|I)\)[^\n]*").unwrap();

    /// "A. Title"
    static ref CAPITAL_HEADER_PATTERN: Regex =
        Regex::new(r"(?m)^[ \t]*([A-Z])\.[ \t]+([^\n]+)").unwrap();

    /// Dot or dash leaders from a table of contents: "Definitions........ 5"
    static ref LEADER_RUN_PATTERN: Regex = Regex::new(r"[.\-–—·…]{3,}").unwrap();

    /// Trailing page reference after leader dots: "Definitions.. 5"
    static ref PAGE_REFERENCE_PATTERN: Regex = Regex::new(r"\.{2,}\s*\d+\s*$").unwrap();
}

/// Keyword that introduced a top-level unit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UnitKeyword {
    Clause,
    Article,
    Schedule,
    Part,
}

impl UnitKeyword {
    fn parse(word: &str) -> Option<Self> {
        match word.to_ascii_lowercase().as_str() {
            "clause" => Some(UnitKeyword::Clause),
            "article" => Some(UnitKeyword::Article),
            "schedule" => Some(UnitKeyword::Schedule),
            "part" => Some(UnitKeyword::Part),
            _ => None,
        }
    }
}

/// Which matcher class produced a candidate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MatchKind {
    TopLevelUnit(UnitKeyword),
    DecimalNumbering,
    LetterParagraph,
    LowerRoman,
    ParenthesizedNumber,
    UpperRoman,
    CapitalLetterHeader,
}

impl MatchKind {
    /// Position of the producing matcher in the catalog (1-based)
    pub fn catalog_rank(&self) -> u8 {
        match self {
            MatchKind::TopLevelUnit(_) => 1,
            MatchKind::DecimalNumbering => 2,
            MatchKind::LetterParagraph => 3,
            MatchKind::LowerRoman => 4,
            MatchKind::ParenthesizedNumber => 5,
            MatchKind::UpperRoman => 6,
            MatchKind::CapitalLetterHeader => 7,
        }
    }
}

/// A candidate structural marker
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PatternMatch {
    pub section_label: String,
    /// The full marker line, trimmed
    pub header_text: String,
    /// Byte offset of the start of the marker line
    pub start_offset: usize,
    pub level: usize,
    pub kind: MatchKind,
}

type Matcher = fn(&str, &SegmenterConfig) -> Vec<PatternMatch>;

/// The matcher catalog, in tie-break order
const CATALOG: [(&str, Matcher); 7] = [
    ("top_level_unit", match_top_level_units),
    ("decimal_numbering", match_decimal_numbering),
    ("letter_paragraph", match_letter_paragraphs),
    ("lower_roman", match_lower_roman),
    ("parenthesized_number", match_parenthesized_numbers),
    ("upper_roman", match_upper_roman),
    ("capital_letter_header", match_capital_headers),
];

/// Run every matcher in catalog order and concatenate the results.
///
/// The output is grouped by matcher, not sorted by position.
pub fn find_matches(text: &str, config: &SegmenterConfig) -> Vec<PatternMatch> {
    let mut matches = Vec::new();
    for (name, matcher) in CATALOG.iter() {
        let found = matcher(text, config);
        debug!(matcher = *name, count = found.len(), "structural matcher finished");
        matches.extend(found);
    }
    matches
}

fn build_match(
    caps: &Captures<'_>,
    section_label: String,
    level: usize,
    kind: MatchKind,
) -> Option<PatternMatch> {
    let whole = caps.get(0)?;
    Some(PatternMatch {
        section_label,
        header_text: whole.as_str().trim().to_string(),
        start_offset: whole.start(),
        level,
        kind,
    })
}

pub fn match_top_level_units(text: &str, _config: &SegmenterConfig) -> Vec<PatternMatch> {
    TOP_LEVEL_PATTERN
        .captures_iter(text)
        .filter_map(|caps| {
            let keyword = UnitKeyword::parse(&caps[1])?;
            // literal marker text, as written: "Schedule A", "ARTICLE IV"
            let label = text[caps.get(1)?.start()..caps.get(2)?.end()].to_string();
            build_match(&caps, label, LEVEL_TOP, MatchKind::TopLevelUnit(keyword))
        })
        .collect()
}

pub fn match_decimal_numbering(text: &str, _config: &SegmenterConfig) -> Vec<PatternMatch> {
    DECIMAL_PATTERN
        .captures_iter(text)
        .filter(is_decimal_heading)
        .filter_map(|caps| {
            let label = caps[1].to_string();
            let level = label.matches('.').count() + 1;
            build_match(&caps, label, level, MatchKind::DecimalNumbering)
        })
        .collect()
}

/// A bare number only counts when dotted ("5.", "1.1"); an undotted number
/// followed by more digits is an amount or a year, not a heading
fn is_decimal_heading(caps: &Captures<'_>) -> bool {
    let label = &caps[1];
    let dotted = !caps[2].is_empty() || label.contains('.');
    let title = caps.get(3).map_or("", |m| m.as_str().trim());

    match title.chars().next() {
        None => dotted,
        Some(first) if first.is_ascii_digit() && !dotted => false,
        Some(_) => !is_table_of_contents_entry(title),
    }
}

pub fn match_letter_paragraphs(text: &str, _config: &SegmenterConfig) -> Vec<PatternMatch> {
    parenthesized(&LETTER_PATTERN, text, LEVEL_LETTER, MatchKind::LetterParagraph)
}

pub fn match_lower_roman(text: &str, _config: &SegmenterConfig) -> Vec<PatternMatch> {
    parenthesized(&LOWER_ROMAN_PATTERN, text, LEVEL_LOWER_ROMAN, MatchKind::LowerRoman)
}

pub fn match_parenthesized_numbers(text: &str, _config: &SegmenterConfig) -> Vec<PatternMatch> {
    parenthesized(
        &PAREN_NUMBER_PATTERN,
        text,
        LEVEL_PAREN_NUMBER,
        MatchKind::ParenthesizedNumber,
    )
}

pub fn match_upper_roman(text: &str, _config: &SegmenterConfig) -> Vec<PatternMatch> {
    parenthesized(&UPPER_ROMAN_PATTERN, text, LEVEL_UPPER_ROMAN, MatchKind::UpperRoman)
}

fn parenthesized(pattern: &Regex, text: &str, level: usize, kind: MatchKind) -> Vec<PatternMatch> {
    pattern
        .captures_iter(text)
        .filter_map(|caps| {
            let label = format!("({})", &caps[1]);
            build_match(&caps, label, level, kind)
        })
        .collect()
}

/// "A." headers are only accepted with a substantial title or a known heading word;
/// otherwise they are usually initials ("J. Smith") or abbreviations
pub fn match_capital_headers(text: &str, config: &SegmenterConfig) -> Vec<PatternMatch> {
    CAPITAL_HEADER_PATTERN
        .captures_iter(text)
        .filter(|caps| is_plausible_capital_title(caps[2].trim(), config))
        .filter_map(|caps| {
            let label = caps[1].to_string();
            build_match(&caps, label, LEVEL_CAPITAL_HEADER, MatchKind::CapitalLetterHeader)
        })
        .collect()
}

fn is_plausible_capital_title(title: &str, config: &SegmenterConfig) -> bool {
    title.chars().count() >= config.capital_header_min_len
        || config
            .capital_header_keywords
            .iter()
            .any(|kw| title.starts_with(kw.as_str()))
}

/// Leader dots/dashes or a dotted page reference mark a table-of-contents line
pub fn is_table_of_contents_entry(header: &str) -> bool {
    LEADER_RUN_PATTERN.is_match(header) || PAGE_REFERENCE_PATTERN.is_match(header)
}
