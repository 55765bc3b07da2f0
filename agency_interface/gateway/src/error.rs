// Error taxonomy for gateway lookups.
//
// Each failure cause keeps its own variant so Rust callers can tell a
// missing record from a missing asset file or a broken configuration.
// The C surface collapses all of them to NULL / -1.

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised by catalog loading, lookups, asset reads and issue checks.
#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("Failed to read configuration file {}: {source}", path.display())]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid JSON in configuration file {}: {source}", path.display())]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("'agencies' key not found in configuration")]
    MissingAgencies,

    #[error("Agency not found: {0}")]
    AgencyNotFound(String),

    #[error("Asset file not found: {}", path.display())]
    AssetNotFound { path: PathBuf },

    #[error("Failed to read asset file {}: {source}", path.display())]
    AssetRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Agency {acronym} has no '{field}' field")]
    MissingField { acronym: String, field: &'static str },

    #[error("Issue is not valid JSON: {0}")]
    IssueParse(#[source] serde_json::Error),

    #[error("Serialization error: {0}")]
    Serialize(#[source] serde_json::Error),
}

impl GatewayError {
    /// True for failures caused by the configuration file itself.
    pub fn is_config_error(&self) -> bool {
        matches!(
            self,
            GatewayError::ConfigRead { .. }
                | GatewayError::ConfigParse { .. }
                | GatewayError::MissingAgencies
        )
    }
}

pub type Result<T> = std::result::Result<T, GatewayError>;
