//! Prediction pipeline
//!
//! Pure, synchronous and deterministic: extract per-category signals,
//! aggregate them under renormalized weights, estimate goals, score
//! confidence, pick value bets and render the summary. Identical inputs
//! produce bit-identical output; the kickoff timestamp is pass-through.

pub mod aggregator;
pub mod confidence;
pub mod expected_goals;
pub mod summary;
pub mod value_bets;

pub use aggregator::{Aggregate, Contribution, OutcomeProbabilities};
pub use confidence::Confidence;
pub use value_bets::MarketQuote;

use std::collections::BTreeMap;

use crate::config::Config;
use crate::error::Result;
use crate::factors::{self, Category};
use crate::types::{FixtureContext, FixtureSources, Market, PredictionResult};

pub struct PredictionEngine {
    config: Config,
}

impl PredictionEngine {
    pub fn new(config: Config) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Run the full pipeline for one fixture over whatever sources are
    /// available. Missing sources never fail the prediction; an internal
    /// invariant violation does, loudly.
    pub fn predict(
        &self,
        ctx: &FixtureContext,
        sources: &FixtureSources,
    ) -> Result<PredictionResult> {
        let signals = factors::extract_all(sources, ctx);
        let agg = aggregator::aggregate(&signals, &self.config.weights, &self.config.draw_model)?;
        let goals = expected_goals::estimate(sources, &self.config.goal_model);

        let tilts: Vec<f64> = agg.contributions.iter().map(|c| c.tilt).collect();
        let conf = confidence::score(
            agg.completeness,
            &tilts,
            agg.probabilities.max(),
            &self.config.confidence,
        );

        let floor = self.config.draw_model.probability_floor;
        let ceiling = self.config.draw_model.probability_ceiling;

        let (btts_yes, btts_no) = clamp_complement(goals.btts_yes, floor, ceiling);
        let (over_15, under_15) = clamp_complement(goals.over[0], floor, ceiling);
        let (over_25, under_25) = clamp_complement(goals.over[1], floor, ceiling);
        let (over_35, under_35) = clamp_complement(goals.over[2], floor, ceiling);

        let p = agg.probabilities;
        let dc_1x = (p.home + p.draw).clamp(floor, ceiling);
        let dc_x2 = (p.draw + p.away).clamp(floor, ceiling);
        let dc_12 = (p.home + p.away).clamp(floor, ceiling);

        let quotes = vec![
            MarketQuote::new(Market::MatchResult, "Home Win", p.home),
            MarketQuote::new(Market::MatchResult, "Draw", p.draw),
            MarketQuote::new(Market::MatchResult, "Away Win", p.away),
            MarketQuote::new(Market::DoubleChance, "1X", dc_1x),
            MarketQuote::new(Market::DoubleChance, "X2", dc_x2),
            MarketQuote::new(Market::DoubleChance, "12", dc_12),
            MarketQuote::new(Market::BothTeamsToScore, "Yes", btts_yes),
            MarketQuote::new(Market::BothTeamsToScore, "No", btts_no),
            MarketQuote::new(Market::TotalGoals, "Over 1.5", over_15),
            MarketQuote::new(Market::TotalGoals, "Under 1.5", under_15),
            MarketQuote::new(Market::TotalGoals, "Over 2.5", over_25),
            MarketQuote::new(Market::TotalGoals, "Under 2.5", under_25),
            MarketQuote::new(Market::TotalGoals, "Over 3.5", over_35),
            MarketQuote::new(Market::TotalGoals, "Under 3.5", under_35),
        ];
        let value_bets = value_bets::select(quotes, conf.level, &self.config.value_bets);

        let completeness_pct = agg.completeness * 100.0;
        let prediction_summary = summary::render(
            ctx,
            &agg.probabilities,
            &conf,
            completeness_pct,
            &agg.contributions,
            &signals,
        );

        let mut factors_breakdown = BTreeMap::new();
        for category in Category::ALL {
            let contribution = agg
                .contributions
                .iter()
                .find(|c| c.category == category)
                .map(|c| c.contribution)
                .unwrap_or(0.0);
            factors_breakdown.insert(category.name().to_string(), contribution);
        }

        tracing::debug!(
            fixture_id = %ctx.fixture_id,
            home = p.home,
            draw = p.draw,
            away = p.away,
            confidence = conf.score,
            completeness = completeness_pct,
            "prediction computed"
        );

        Ok(PredictionResult {
            fixture_id: ctx.fixture_id.clone(),
            home_team: ctx.home_team.clone(),
            away_team: ctx.away_team.clone(),
            kickoff: ctx.kickoff,
            win_probability_home: p.home,
            draw_probability: p.draw,
            win_probability_away: p.away,
            double_chance_1x: dc_1x,
            double_chance_x2: dc_x2,
            double_chance_12: dc_12,
            btts_probability: btts_yes,
            btts_no_probability: btts_no,
            over_15_probability: over_15,
            under_15_probability: under_15,
            over_25_probability: over_25,
            under_25_probability: under_25,
            over_35_probability: over_35,
            under_35_probability: under_35,
            expected_goals: goals.expected,
            confidence_score: conf.score,
            confidence_level: conf.level,
            data_completeness: completeness_pct,
            factors_breakdown,
            value_bets,
            prediction_summary,
        })
    }
}

/// Clamp a complementary pair so both sides respect the floor/ceiling and
/// still sum to exactly 100.
fn clamp_complement(probability: f64, floor: f64, ceiling: f64) -> (f64, f64) {
    let lo = floor.max(100.0 - ceiling);
    let hi = ceiling.min(100.0 - floor);
    let p = probability.clamp(lo, hi);
    (p, 100.0 - p)
}
