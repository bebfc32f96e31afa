//! Value-bet selection and staking
//!
//! Each derived market is checked against its configured minimum
//! probability; only medium- and high-confidence predictions qualify.
//! Stakes use a bounded fractional-Kelly-style heuristic scaled by the
//! edge over the breakeven threshold — explicitly not a full Kelly
//! computation against real market odds.

use rust_decimal::prelude::FromPrimitive;
use rust_decimal::Decimal;

use crate::config::ValueBetConfig;
use crate::types::{ConfidenceLevel, Market, ValueBet};

/// A candidate market/selection pair with its modeled probability.
#[derive(Debug, Clone, PartialEq)]
pub struct MarketQuote {
    pub market: Market,
    pub selection: String,
    /// Percent.
    pub probability: f64,
}

impl MarketQuote {
    pub fn new(market: Market, selection: &str, probability: f64) -> Self {
        Self {
            market,
            selection: selection.to_string(),
            probability,
        }
    }
}

pub fn select(
    quotes: Vec<MarketQuote>,
    confidence: ConfidenceLevel,
    cfg: &ValueBetConfig,
) -> Vec<ValueBet> {
    if confidence == ConfidenceLevel::Low {
        return Vec::new();
    }

    let mut qualifying: Vec<MarketQuote> = quotes
        .into_iter()
        .filter(|q| q.probability >= minimum_for(q.market, cfg))
        .collect();

    // Descending by probability; market and selection break ties so the
    // ranking is deterministic.
    qualifying.sort_by(|a, b| {
        b.probability
            .partial_cmp(&a.probability)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then(a.market.cmp(&b.market))
            .then(a.selection.cmp(&b.selection))
    });
    qualifying.truncate(cfg.max_picks);

    qualifying
        .into_iter()
        .map(|q| {
            let stake_units = stake_units(q.probability, confidence, cfg);
            ValueBet {
                market: q.market,
                selection: q.selection,
                probability: q.probability,
                confidence,
                stake_units,
            }
        })
        .collect()
}

fn minimum_for(market: Market, cfg: &ValueBetConfig) -> f64 {
    match market {
        Market::MatchResult => cfg.result_min_probability,
        Market::DoubleChance => cfg.double_chance_min_probability,
        Market::BothTeamsToScore | Market::TotalGoals => cfg.goals_min_probability,
    }
}

/// `clamp(base_unit * (p - breakeven) * tier_multiplier, min, max)`.
fn stake_units(probability_pct: f64, confidence: ConfidenceLevel, cfg: &ValueBetConfig) -> Decimal {
    let multiplier = match confidence {
        ConfidenceLevel::High => cfg.high_confidence_multiplier,
        ConfidenceLevel::Medium => cfg.medium_confidence_multiplier,
        ConfidenceLevel::Low => return Decimal::ZERO,
    };
    let probability =
        Decimal::from_f64(probability_pct / 100.0).unwrap_or(cfg.breakeven_threshold);
    let edge = probability - cfg.breakeven_threshold;
    let raw = cfg.base_unit * edge * multiplier;
    raw.clamp(cfg.min_stake, cfg.max_stake).round_dp(2)
}
