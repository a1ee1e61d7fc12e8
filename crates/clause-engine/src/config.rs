//! Tunable limits for a segmentation pass

use serde::{Deserialize, Serialize};

use crate::error::SegmentError;

pub const DEFAULT_MAX_CLAUSE_CHARS: usize = 2000;
pub const DEFAULT_MIN_CLAUSE_CHARS: usize = 10;
pub const DEFAULT_CAPITAL_HEADER_MIN_LEN: usize = 15;

/// Titles that make a short `A.`-style header believable
pub const CAPITAL_HEADER_KEYWORDS: &[&str] = &[
    "Corporate",
    "Financial",
    "Legal",
    "Borrower",
    "Lender",
    "Details",
    "Information",
];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SegmenterConfig {
    /// Clause text is cut to this many characters
    pub max_clause_chars: usize,
    /// Clauses whose composed text is at most this long are dropped as noise
    pub min_clause_chars: usize,
    /// Minimum title length for a capital-letter header without an allow-listed keyword
    pub capital_header_min_len: usize,
    pub capital_header_keywords: Vec<String>,
}

impl Default for SegmenterConfig {
    fn default() -> Self {
        Self {
            max_clause_chars: DEFAULT_MAX_CLAUSE_CHARS,
            min_clause_chars: DEFAULT_MIN_CLAUSE_CHARS,
            capital_header_min_len: DEFAULT_CAPITAL_HEADER_MIN_LEN,
            capital_header_keywords: CAPITAL_HEADER_KEYWORDS
                .iter()
                .map(|kw| kw.to_string())
                .collect(),
        }
    }
}

impl SegmenterConfig {
    pub fn from_json(json: &str) -> Result<Self, SegmentError> {
        let config: SegmenterConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), SegmentError> {
        if self.max_clause_chars == 0 {
            return Err(SegmentError::InvalidConfig(
                "max_clause_chars must be greater than zero".to_string(),
            ));
        }
        if self.min_clause_chars >= self.max_clause_chars {
            return Err(SegmentError::InvalidConfig(format!(
                "min_clause_chars ({}) must be smaller than max_clause_chars ({})",
                self.min_clause_chars, self.max_clause_chars
            )));
        }
        Ok(())
    }
}
