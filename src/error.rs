//! Error taxonomy for the prediction engine
//!
//! Three classes matter to callers: a fixture that resolves to no data at
//! all (`FixtureNotFound`, a not-found condition), a single source that
//! could not be fetched (`SourceUnavailable`, always recovered locally by
//! renormalizing weights), and an internal invariant violation
//! (`Inconsistency`, a programming-defect class that fails the prediction
//! loudly instead of returning malformed output).

use crate::factors::Category;

/// Errors produced by the prediction engine and its orchestration layer.
#[derive(Debug, thiserror::Error)]
pub enum PredictorError {
    /// The fixture id does not resolve to any data at all.
    #[error("fixture not found: {0}")]
    FixtureNotFound(String),

    /// A single category's data could not be fetched. Never surfaced as a
    /// request failure; the orchestrator downgrades it to an unavailable
    /// bundle.
    #[error("source {category} unavailable: {reason}")]
    SourceUnavailable { category: Category, reason: String },

    /// An internal invariant was violated (e.g. probabilities failing to
    /// sum to 100 after normalization).
    #[error("aggregation inconsistency: {0}")]
    Inconsistency(String),

    #[error("configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// Cross-cutting provider failure (affects every fixture in a batch).
    #[error("provider error: {0}")]
    Provider(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serde(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, PredictorError>;

impl PredictorError {
    /// Whether this error should abort a whole batch rather than a single
    /// fixture's pipeline.
    pub fn is_cross_cutting(&self) -> bool {
        matches!(
            self,
            PredictorError::Config(_) | PredictorError::InvalidConfig(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn source_unavailable_mentions_category() {
        let err = PredictorError::SourceUnavailable {
            category: Category::Injuries,
            reason: "timed out".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("injuries"));
        assert!(msg.contains("timed out"));
    }

    #[test]
    fn not_found_is_per_fixture() {
        let err = PredictorError::FixtureNotFound("fx-1".to_string());
        assert!(!err.is_cross_cutting());
    }

    #[test]
    fn invalid_config_is_cross_cutting() {
        let err = PredictorError::InvalidConfig("weights".to_string());
        assert!(err.is_cross_cutting());
    }
}
