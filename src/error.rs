//! Error types for record extraction
//!
//! Every failure names the landmark and the record it happened in, so a
//! caller can tell markup drift apart from a bad value.

use thiserror::Error;

pub type ExtractResult<T> = Result<T, ExtractError>;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ExtractError {
    #[error("landmark '{landmark}' not found in {record}")]
    StructureMismatch { landmark: String, record: String },

    #[error("landmark '{landmark}' in {record} holds malformed value {value:?}: {reason}")]
    FormatError {
        landmark: String,
        record: String,
        value: String,
        reason: String,
    },

    #[error("failed to fetch {url} ({status})")]
    Fetch { url: String, status: u16 },

    #[error("transport error for {url}: {message}")]
    Transport { url: String, message: String },

    #[error("invalid selector for '{landmark}': {selector} - {reason}")]
    InvalidSelector {
        landmark: String,
        selector: String,
        reason: String,
    },

    #[error("configuration error: {message}")]
    Config { message: String },
}

impl ExtractError {
    pub fn structure_mismatch(landmark: &str, record: &str) -> Self {
        Self::StructureMismatch {
            landmark: landmark.to_string(),
            record: record.to_string(),
        }
    }

    /// Attach landmark and record context to a normalizer failure
    pub fn format(landmark: &str, record: &str, err: FormatError) -> Self {
        Self::FormatError {
            landmark: landmark.to_string(),
            record: record.to_string(),
            value: err.value,
            reason: err.reason,
        }
    }

    pub fn fetch(url: &str, status: u16) -> Self {
        Self::Fetch {
            url: url.to_string(),
            status,
        }
    }

    pub fn transport(url: &str, message: impl ToString) -> Self {
        Self::Transport {
            url: url.to_string(),
            message: message.to_string(),
        }
    }

    /// True when the markup no longer matches the expected layout
    pub fn is_markup_drift(&self) -> bool {
        matches!(self, Self::StructureMismatch { .. } | Self::FormatError { .. })
    }
}

/// A field normalizer could not make sense of its input
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("cannot parse {value:?}: {reason}")]
pub struct FormatError {
    pub value: String,
    pub reason: String,
}

impl FormatError {
    pub fn new(value: &str, reason: impl ToString) -> Self {
        Self {
            value: value.to_string(),
            reason: reason.to_string(),
        }
    }
}
