//! Confidence scoring
//!
//! The score blends overall data completeness with signal agreement (the
//! inverse of the spread among per-category tilts). It is monotonically
//! non-decreasing in completeness when agreement is held fixed. Tier
//! mapping comes from the configured threshold table.

use crate::config::ConfidenceConfig;
use crate::types::ConfidenceLevel;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Confidence {
    /// 0-100.
    pub score: f64,
    pub level: ConfidenceLevel,
}

/// Score a prediction from data completeness (fraction in [0, 1]), the
/// available categories' tilts, and the maximum outcome probability
/// (percent) used for tier gating.
pub fn score(
    completeness: f64,
    tilts: &[f64],
    max_probability: f64,
    cfg: &ConfidenceConfig,
) -> Confidence {
    let agreement = agreement(tilts);
    let score = 100.0
        * (cfg.completeness_weight * completeness.clamp(0.0, 1.0)
            + cfg.agreement_weight * agreement);
    let score = score.clamp(0.0, 100.0);

    let level = if score >= cfg.high_min_score && max_probability >= cfg.high_min_probability {
        ConfidenceLevel::High
    } else if score >= cfg.medium_min_score && max_probability >= cfg.medium_min_probability {
        ConfidenceLevel::Medium
    } else {
        ConfidenceLevel::Low
    };

    Confidence { score, level }
}

/// Agreement in [0, 1]: one minus the standard deviation of the tilts.
/// Categories pointing the same way score high; contradictions score low.
/// No tilts at all means nothing agrees on anything.
fn agreement(tilts: &[f64]) -> f64 {
    if tilts.is_empty() {
        return 0.0;
    }
    let n = tilts.len() as f64;
    let mean = tilts.iter().sum::<f64>() / n;
    let variance = tilts.iter().map(|t| (t - mean).powi(2)).sum::<f64>() / n;
    (1.0 - variance.sqrt()).clamp(0.0, 1.0)
}
