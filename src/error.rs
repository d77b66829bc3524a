use thiserror::Error;

use crate::domain::lead::LeadStatus;

pub type Result<T> = std::result::Result<T, LeadsError>;

#[derive(Debug, Error)]
pub enum LeadsError {
    #[error("Failed to fetch leads: {0}")]
    Fetch(String),

    #[error("Failed to update lead status: {0}")]
    StatusUpdate(String),

    #[error("Index {index} is out of range for column {status} ({len} leads)")]
    IndexOutOfRange {
        status: LeadStatus,
        index: usize,
        len: usize,
    },

    #[error("Unknown date preset: {0}")]
    UnknownPreset(String),

    #[error("Invalid date range: start {start} is after end {end}")]
    InvalidDateRange { start: String, end: String },

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
}
