use thiserror::Error;

#[derive(Error, Debug)]
pub enum SegmentError {
    #[error("Invalid segmenter config: {0}")]
    InvalidConfig(String),

    #[error("Failed to parse segmenter config: {0}")]
    ConfigParse(#[from] serde_json::Error),
}
