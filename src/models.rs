use serde::{Deserialize, Serialize};

use crate::error::{FetchError, Result};

/// Numeric Discogs release identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ReleaseId(pub u64);

impl std::fmt::Display for ReleaseId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The shapes a release identifier may arrive in before normalization.
#[derive(Debug, Clone, PartialEq)]
pub enum ReleaseInput {
    Id(u64),
    Text(String),
    Bytes(Vec<u8>),
}

impl ReleaseInput {
    /// Decode the input into a [`ReleaseId`].
    ///
    /// Text and bytes are trimmed of surrounding whitespace and parsed as a
    /// base-10 unsigned integer. Bytes must be valid UTF-8.
    pub fn normalize(&self) -> Result<ReleaseId> {
        match self {
            ReleaseInput::Id(id) => Ok(ReleaseId(*id)),
            ReleaseInput::Text(text) => parse_id(text),
            ReleaseInput::Bytes(bytes) => {
                let text = std::str::from_utf8(bytes).map_err(|e| {
                    FetchError::InvalidInput(format!("release identifier is not UTF-8: {}", e))
                })?;
                parse_id(text)
            }
        }
    }
}

fn parse_id(text: &str) -> Result<ReleaseId> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err(FetchError::InvalidInput(
            "release identifier is empty".to_string(),
        ));
    }
    trimmed
        .parse::<u64>()
        .map(ReleaseId)
        .map_err(|e| FetchError::InvalidInput(format!("{:?}: {}", trimmed, e)))
}

impl From<u64> for ReleaseInput {
    fn from(id: u64) -> Self {
        ReleaseInput::Id(id)
    }
}

impl From<&str> for ReleaseInput {
    fn from(text: &str) -> Self {
        ReleaseInput::Text(text.to_string())
    }
}

impl From<String> for ReleaseInput {
    fn from(text: String) -> Self {
        ReleaseInput::Text(text)
    }
}

impl From<Vec<u8>> for ReleaseInput {
    fn from(bytes: Vec<u8>) -> Self {
        ReleaseInput::Bytes(bytes)
    }
}

impl From<&[u8]> for ReleaseInput {
    fn from(bytes: &[u8]) -> Self {
        ReleaseInput::Bytes(bytes.to_vec())
    }
}

/// Outcome of a listings fetch that received an HTTP response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum FetchResult {
    /// 2xx response; carries the raw HTML body.
    Ok { body: String },
    /// Any other status; the body is dropped.
    Error { code: u16 },
}

impl FetchResult {
    pub fn is_ok(&self) -> bool {
        matches!(self, FetchResult::Ok { .. })
    }
}
