use std::fs::File;
use std::io::{self, Read};
use std::path::Path;

use thiserror::Error;

use crate::score::Score;

/// Errors produced while reading or writing score documents.
#[derive(Debug, Error)]
pub enum ScoreError {
    #[error("io error while loading score: {0}")]
    Io(#[from] io::Error),
    /// A required key is missing, a value has the wrong shape, or an enum literal is unknown.
    #[error("malformed score document: {0}")]
    Malformed(#[from] serde_json::Error),
    #[error("invalid score version {0:?}")]
    InvalidVersion(String),
}

/// Parses a score from raw JSON bytes.
pub fn parse_score(buffer: &[u8]) -> Result<Score, ScoreError> {
    Ok(serde_json::from_slice(buffer)?)
}

pub fn parse_score_str(json: &str) -> Result<Score, ScoreError> {
    Ok(serde_json::from_str(json)?)
}

/// Reads and parses the score stored at `path`.
pub fn load_score(path: &Path) -> Result<Score, ScoreError> {
    let mut buffer = Vec::new();
    let mut file = File::open(path)?;
    file.read_to_end(&mut buffer)?;
    parse_score(&buffer)
}

#[cfg(any(test, feature = "fuzzing"))]
pub fn fuzz_parse_score(data: &[u8]) {
    if let Ok(score) = parse_score(data) {
        let json = score.to_json().expect("parsed score serializes");
        let reparsed = parse_score_str(&json).expect("serialized score parses");
        assert_eq!(score, reparsed);
    }
}
