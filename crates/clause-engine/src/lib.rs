//! Contract clause segmentation
//!
//! Turns extracted contract text into an ordered list of labeled, classified
//! clauses. The pass is synchronous and deterministic:
//!
//! 1. [`patterns`] scans the text with a fixed catalog of structural matchers
//! 2. [`hierarchy`] orders the matches, slices clause bodies, assigns parents and
//!    calls [`classifier`] once per clause
//! 3. [`dedup`] removes duplicates produced by overlapping matchers
//!
//! ```
//! use clause_engine::ClauseSegmenter;
//! use shared_types::ClauseType;
//!
//! let segmenter = ClauseSegmenter::new();
//! let clauses = segmenter.segment("1. DEFINITIONS\n\"Borrower\" means the company.\n");
//! assert_eq!(clauses[0].section, "1");
//! assert_eq!(clauses[0].clause_type, ClauseType::Definition);
//! ```

pub mod classifier;
pub mod config;
pub mod dedup;
pub mod error;
pub mod hierarchy;
pub mod patterns;

pub use classifier::classify;
pub use config::SegmenterConfig;
pub use error::SegmentError;
pub use hierarchy::FULL_TEXT_SECTION;
pub use patterns::{MatchKind, PatternMatch, UnitKeyword};

use shared_types::{Clause, ContractDocument, SegmentationReport, SegmentationStats};
use tracing::{debug, instrument};

/// ClauseSegmenter entry point
#[derive(Debug, Clone, Default)]
pub struct ClauseSegmenter {
    config: SegmenterConfig,
}

impl ClauseSegmenter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: SegmenterConfig) -> Result<Self, SegmentError> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &SegmenterConfig {
        &self.config
    }

    /// Segment raw text into clauses
    pub fn segment(&self, text: &str) -> Vec<Clause> {
        self.segment_with_stats(text).0
    }

    #[instrument(skip_all, fields(text_len = text.len()))]
    pub fn segment_with_stats(&self, text: &str) -> (Vec<Clause>, SegmentationStats) {
        let matches = patterns::find_matches(text, &self.config);
        let raw_matches = matches.len();

        let built = hierarchy::build_clauses(text, matches, &self.config);
        let deduped = dedup::deduplicate(built.clauses);

        let stats = SegmentationStats {
            raw_matches,
            noise_discarded: built.noise_discarded,
            duplicates_dropped: deduped.dropped,
            duplicates_replaced: deduped.replaced,
            fallback_used: built.fallback_used,
        };
        debug!(
            raw_matches,
            clauses = deduped.clauses.len(),
            noise = stats.noise_discarded,
            duplicates = stats.duplicates_dropped + stats.duplicates_replaced,
            fallback = stats.fallback_used,
            "segmentation finished"
        );

        (deduped.clauses, stats)
    }

    /// Segment every page of an extracted document as one text
    pub fn segment_document(&self, document: &ContractDocument) -> SegmentationReport {
        let (clauses, stats) = self.segment_with_stats(&document.full_text());

        SegmentationReport {
            document_id: document.id.clone(),
            clauses,
            stats,
        }
    }
}

/// Segment with the default configuration
pub fn segment_clauses(text: &str) -> Vec<Clause> {
    ClauseSegmenter::new().segment(text)
}
