use thiserror::Error;

/// Rejected catalog. Raised at startup only; nothing is built from a catalog
/// that fails any check.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("duplicate body id: {0}")]
    DuplicateId(String),

    #[error("satellite {satellite} names unknown parent {parent}")]
    UnknownParent { satellite: String, parent: String },

    #[error("invalid body {id}: {reason}")]
    InvalidBody { id: String, reason: String },

    #[error("catalog parse error: {0}")]
    Catalog(#[from] serde_json::Error),
}

impl ConfigError {
    pub(crate) fn invalid(id: &str, reason: impl Into<String>) -> Self {
        Self::InvalidBody {
            id: id.to_string(),
            reason: reason.into(),
        }
    }
}
