//! Weighted aggregation of category signals into outcome probabilities
//!
//! Weights are renormalized over the available categories only, so total
//! effective weight is exactly 1 however many sources are missing — the
//! main defense against partial-data bias. The aggregate home/away tilt
//! is damped toward zero as data completeness falls (sparse data means
//! less differentiation and a larger draw share), then squashed through a
//! softmax with floor/ceiling clamps to keep predictions non-degenerate.

use crate::config::{DrawModelConfig, WeightTable};
use crate::error::{PredictorError, Result};
use crate::factors::{Category, CategorySignal};

/// Outcome probabilities in percent, summing to 100 within 0.01.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OutcomeProbabilities {
    pub home: f64,
    pub draw: f64,
    pub away: f64,
}

impl OutcomeProbabilities {
    pub fn max(&self) -> f64 {
        self.home.max(self.draw).max(self.away)
    }
}

/// One available category's share of the aggregate.
#[derive(Debug, Clone, PartialEq)]
pub struct Contribution {
    pub category: Category,
    /// Renormalized weight; contributions sum to weight 1.0.
    pub effective_weight: f64,
    /// Home-vs-away tilt of this category in [-1, 1].
    pub tilt: f64,
    /// Signed contribution to the aggregate tilt.
    pub contribution: f64,
}

/// Aggregation output consumed by the scoring and presentation stages.
#[derive(Debug, Clone, PartialEq)]
pub struct Aggregate {
    pub probabilities: OutcomeProbabilities,
    /// Damped aggregate tilt actually used for scoring.
    pub tilt: f64,
    /// Fraction of total category weight backed by an available source.
    pub completeness: f64,
    pub contributions: Vec<Contribution>,
}

/// Effective weights over the available categories: `weight(c) / W` where
/// `W` is the raw weight sum of available categories.
pub fn effective_weights(signals: &[CategorySignal], weights: &WeightTable) -> Vec<(Category, f64)> {
    let available: Vec<Category> = signals
        .iter()
        .filter(|s| s.is_available())
        .map(|s| s.category)
        .collect();
    let raw_sum: f64 = available.iter().map(|c| weights.weight(*c)).sum();
    if raw_sum <= 0.0 {
        return Vec::new();
    }
    available
        .into_iter()
        .map(|c| (c, weights.weight(c) / raw_sum))
        .collect()
}

pub fn aggregate(
    signals: &[CategorySignal],
    weights: &WeightTable,
    draw_model: &DrawModelConfig,
) -> Result<Aggregate> {
    let effective = effective_weights(signals, weights);
    let available_mass: f64 = signals
        .iter()
        .filter(|s| s.is_available())
        .map(|s| weights.weight(s.category))
        .sum();
    let completeness = (available_mass / weights.total()).clamp(0.0, 1.0);

    let mut contributions = Vec::with_capacity(effective.len());
    let mut raw_tilt = 0.0;
    for (category, effective_weight) in &effective {
        let signal = signals
            .iter()
            .find(|s| s.category == *category)
            .and_then(|s| s.tilt());
        // Only available categories appear in `effective`.
        let tilt = signal.unwrap_or(0.0);
        let contribution = effective_weight * tilt;
        raw_tilt += contribution;
        contributions.push(Contribution {
            category: *category,
            effective_weight: *effective_weight,
            tilt,
            contribution,
        });
    }

    // Sparse data damps differentiation toward the draw.
    let damp = draw_model.tilt_damp_floor + (1.0 - draw_model.tilt_damp_floor) * completeness;
    let tilt = (raw_tilt * damp).clamp(-1.0, 1.0);

    let score_home = 0.5 + tilt / 2.0;
    let score_away = 0.5 - tilt / 2.0;
    let score_draw = draw_model.draw_base + draw_model.draw_spread * (1.0 - tilt.abs());

    let mut probs = softmax_percent(
        [score_home, score_draw, score_away],
        draw_model.temperature,
    );
    clamp_and_redistribute(
        &mut probs,
        draw_model.probability_floor,
        draw_model.probability_ceiling,
    )?;

    Ok(Aggregate {
        probabilities: OutcomeProbabilities {
            home: probs[0],
            draw: probs[1],
            away: probs[2],
        },
        tilt,
        completeness,
        contributions,
    })
}

fn softmax_percent(scores: [f64; 3], temperature: f64) -> [f64; 3] {
    let max = scores.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
    let exps = scores.map(|s| ((s - max) / temperature).exp());
    let sum: f64 = exps.iter().sum();
    exps.map(|e| e / sum * 100.0)
}

/// Clamp each outcome into `[floor, ceiling]` and push the difference back
/// onto the outcomes that still have room, so the set sums to 100.
fn clamp_and_redistribute(probs: &mut [f64; 3], floor: f64, ceiling: f64) -> Result<()> {
    for p in probs.iter_mut() {
        *p = p.clamp(floor, ceiling);
    }
    for _ in 0..16 {
        let sum: f64 = probs.iter().sum();
        let diff = 100.0 - sum;
        if diff.abs() < 1e-9 {
            break;
        }
        let free: Vec<usize> = if diff > 0.0 {
            (0..3).filter(|&i| probs[i] < ceiling - 1e-12).collect()
        } else {
            (0..3).filter(|&i| probs[i] > floor + 1e-12).collect()
        };
        if free.is_empty() {
            break;
        }
        let share = diff / free.len() as f64;
        for i in free {
            probs[i] = (probs[i] + share).clamp(floor, ceiling);
        }
    }

    // Tiny residue goes to the draw column when it has room.
    let residue = 100.0 - probs.iter().sum::<f64>();
    if residue.abs() > 0.0 && (probs[1] + residue) >= floor && (probs[1] + residue) <= ceiling {
        probs[1] += residue;
    }

    let sum: f64 = probs.iter().sum();
    if (sum - 100.0).abs() > 0.01 {
        return Err(PredictorError::Inconsistency(format!(
            "outcome probabilities sum to {sum:.4}, expected 100"
        )));
    }
    Ok(())
}
