use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// Extracted contract text, one entry per page.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct ContractDocument {
    pub id: String,
    pub filename: String,
    pub pages: u32,
    pub text_content: Vec<String>, // Per-page text
}

impl ContractDocument {
    /// Join all pages into the single newline-delimited text the segmenter reads
    pub fn full_text(&self) -> String {
        self.text_content.join("\n")
    }
}

/// Semantic category assigned to a clause
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum ClauseType {
    #[serde(rename = "MAC")]
    Mac,
    #[serde(rename = "financial_covenant")]
    FinancialCovenant,
    #[serde(rename = "representation")]
    Representation,
    #[serde(rename = "default")]
    Default,
    #[serde(rename = "definition")]
    Definition,
    #[serde(rename = "general")]
    General,
}

impl ClauseType {
    pub const ALL: [ClauseType; 6] = [
        ClauseType::Mac,
        ClauseType::FinancialCovenant,
        ClauseType::Representation,
        ClauseType::Default,
        ClauseType::Definition,
        ClauseType::General,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ClauseType::Mac => "MAC",
            ClauseType::FinancialCovenant => "financial_covenant",
            ClauseType::Representation => "representation",
            ClauseType::Default => "default",
            ClauseType::Definition => "definition",
            ClauseType::General => "general",
        }
    }
}

impl fmt::Display for ClauseType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Unknown clause type: {0}")]
pub struct ParseClauseTypeError(pub String);

impl FromStr for ClauseType {
    type Err = ParseClauseTypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        ClauseType::ALL
            .into_iter()
            .find(|ty| ty.as_str().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| ParseClauseTypeError(s.to_string()))
    }
}

/// One segmented unit of contract text.
///
/// `parent_section` is a label, not a pointer: it names the `section` of the
/// nearest earlier clause one hierarchy level up.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Clause {
    pub id: String,
    pub section: String, // e.g., "1.1", "(a)", "SCHEDULE A"
    pub text: String,
    #[serde(rename = "type")]
    pub clause_type: ClauseType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_section: Option<String>,
}

impl Clause {
    /// True when the clause names itself as its parent, which happens when two
    /// matchers fire on the same line at different levels
    pub fn is_self_referential(&self) -> bool {
        self.parent_section.as_deref() == Some(self.section.as_str())
    }
}

/// Counters collected during one segmentation pass
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct SegmentationStats {
    pub raw_matches: usize,
    pub noise_discarded: usize,
    pub duplicates_dropped: usize,
    pub duplicates_replaced: usize,
    pub fallback_used: bool,
}

#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct SegmentationReport {
    pub document_id: String,
    pub clauses: Vec<Clause>,
    pub stats: SegmentationStats,
}

/// Direct children of `section`, in document order
pub fn children_of<'a>(clauses: &'a [Clause], section: &str) -> Vec<&'a Clause> {
    clauses
        .iter()
        .filter(|c| c.parent_section.as_deref() == Some(section) && c.section != section)
        .collect()
}

pub fn clauses_of_type(clauses: &[Clause], clause_type: ClauseType) -> Vec<&Clause> {
    clauses
        .iter()
        .filter(|c| c.clause_type == clause_type)
        .collect()
}
