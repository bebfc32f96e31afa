//! Engine configuration
//!
//! Every tunable in the pipeline lives here — the category weight table,
//! draw-model coefficients, confidence thresholds, value-bet gates, staking
//! parameters and orchestration limits — so they can be tuned and tested
//! independently of the aggregation algorithm. Defaults are fully usable
//! without a config file.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::error::{PredictorError, Result};
use crate::factors::Category;

/// Top-level configuration, loadable from TOML with `MATCHCAST_*`
/// environment overrides.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub weights: WeightTable,
    #[serde(default)]
    pub draw_model: DrawModelConfig,
    #[serde(default)]
    pub confidence: ConfidenceConfig,
    #[serde(default)]
    pub value_bets: ValueBetConfig,
    #[serde(default)]
    pub goal_model: GoalModelConfig,
    #[serde(default)]
    pub orchestrator: OrchestratorConfig,
}

impl Config {
    /// Load configuration, merging an optional TOML file with environment
    /// overrides (e.g. `MATCHCAST_ORCHESTRATOR__FETCH_TIMEOUT_MS=2000`).
    pub fn load(path: Option<&str>) -> Result<Self> {
        let mut builder = config::Config::builder();
        if let Some(path) = path {
            builder = builder.add_source(config::File::with_name(path));
        }
        let cfg: Config = builder
            .add_source(config::Environment::with_prefix("MATCHCAST").separator("__"))
            .build()?
            .try_deserialize()?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn validate(&self) -> Result<()> {
        self.weights.validate()?;
        self.draw_model.validate()?;
        self.confidence.validate()?;
        self.value_bets.validate()?;
        Ok(())
    }
}

/// Fixed mapping from category to weight fraction. The full set sums
/// to 1.0; when a category's source is missing its weight is redistributed
/// proportionally among the available ones at aggregation time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeightTable {
    #[serde(default = "default_weight_form")]
    pub form: f64,
    #[serde(default = "default_weight_h2h")]
    pub head_to_head: f64,
    #[serde(default = "default_weight_injuries")]
    pub injuries: f64,
    #[serde(default = "default_weight_home_advantage")]
    pub home_advantage: f64,
    #[serde(default = "default_weight_standings")]
    pub standings: f64,
    #[serde(default = "default_weight_live_context")]
    pub live_context: f64,
}

fn default_weight_form() -> f64 {
    0.40
}
fn default_weight_h2h() -> f64 {
    0.20
}
fn default_weight_injuries() -> f64 {
    0.15
}
fn default_weight_home_advantage() -> f64 {
    0.10
}
fn default_weight_standings() -> f64 {
    0.10
}
fn default_weight_live_context() -> f64 {
    0.05
}

impl Default for WeightTable {
    fn default() -> Self {
        Self {
            form: default_weight_form(),
            head_to_head: default_weight_h2h(),
            injuries: default_weight_injuries(),
            home_advantage: default_weight_home_advantage(),
            standings: default_weight_standings(),
            live_context: default_weight_live_context(),
        }
    }
}

impl WeightTable {
    pub fn weight(&self, category: Category) -> f64 {
        match category {
            Category::Form => self.form,
            Category::HeadToHead => self.head_to_head,
            Category::Injuries => self.injuries,
            Category::HomeAdvantage => self.home_advantage,
            Category::Standings => self.standings,
            Category::LiveContext => self.live_context,
        }
    }

    pub fn total(&self) -> f64 {
        Category::ALL.iter().map(|c| self.weight(*c)).sum()
    }

    fn validate(&self) -> Result<()> {
        for category in Category::ALL {
            if self.weight(category) < 0.0 {
                return Err(PredictorError::InvalidConfig(format!(
                    "negative weight for {category}"
                )));
            }
        }
        let total = self.total();
        if (total - 1.0).abs() > 1e-6 {
            return Err(PredictorError::InvalidConfig(format!(
                "category weights must sum to 1.0, got {total}"
            )));
        }
        Ok(())
    }
}

/// Coefficients for mapping the aggregate home/away tilt into outcome
/// probabilities. The draw-tendency blend is heuristic by design; these
/// knobs are validated against the engine invariants rather than fitted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DrawModelConfig {
    /// Softmax temperature; lower values sharpen the distribution.
    #[serde(default = "default_temperature")]
    pub temperature: f64,
    /// Baseline draw score before tilt adjustment.
    #[serde(default = "default_draw_base")]
    pub draw_base: f64,
    /// How strongly a balanced tilt raises the draw share.
    #[serde(default = "default_draw_spread")]
    pub draw_spread: f64,
    /// Fraction of the tilt retained at zero data completeness; sparse
    /// data damps differentiation toward the draw.
    #[serde(default = "default_tilt_damp_floor")]
    pub tilt_damp_floor: f64,
    /// No outcome probability below this percentage.
    #[serde(default = "default_probability_floor")]
    pub probability_floor: f64,
    /// No outcome probability above this percentage.
    #[serde(default = "default_probability_ceiling")]
    pub probability_ceiling: f64,
}

fn default_temperature() -> f64 {
    0.20
}
fn default_draw_base() -> f64 {
    0.20
}
fn default_draw_spread() -> f64 {
    0.30
}
fn default_tilt_damp_floor() -> f64 {
    0.40
}
fn default_probability_floor() -> f64 {
    2.0
}
fn default_probability_ceiling() -> f64 {
    95.0
}

impl Default for DrawModelConfig {
    fn default() -> Self {
        Self {
            temperature: default_temperature(),
            draw_base: default_draw_base(),
            draw_spread: default_draw_spread(),
            tilt_damp_floor: default_tilt_damp_floor(),
            probability_floor: default_probability_floor(),
            probability_ceiling: default_probability_ceiling(),
        }
    }
}

impl DrawModelConfig {
    fn validate(&self) -> Result<()> {
        if self.temperature <= 0.0 {
            return Err(PredictorError::InvalidConfig(
                "softmax temperature must be positive".to_string(),
            ));
        }
        if !(0.0..=1.0).contains(&self.tilt_damp_floor) {
            return Err(PredictorError::InvalidConfig(
                "tilt_damp_floor must be in [0, 1]".to_string(),
            ));
        }
        if self.probability_floor < 0.0
            || self.probability_ceiling > 100.0
            || self.probability_floor * 3.0 >= 100.0
            || self.probability_floor >= self.probability_ceiling
        {
            return Err(PredictorError::InvalidConfig(format!(
                "invalid probability clamps [{}, {}]",
                self.probability_floor, self.probability_ceiling
            )));
        }
        Ok(())
    }
}

/// Confidence blend weights and tier threshold table.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfidenceConfig {
    /// Weight of data completeness in the blended score.
    #[serde(default = "default_completeness_weight")]
    pub completeness_weight: f64,
    /// Weight of cross-category signal agreement in the blended score.
    #[serde(default = "default_agreement_weight")]
    pub agreement_weight: f64,
    #[serde(default = "default_high_min_score")]
    pub high_min_score: f64,
    #[serde(default = "default_high_min_probability")]
    pub high_min_probability: f64,
    #[serde(default = "default_medium_min_score")]
    pub medium_min_score: f64,
    #[serde(default = "default_medium_min_probability")]
    pub medium_min_probability: f64,
}

fn default_completeness_weight() -> f64 {
    0.55
}
fn default_agreement_weight() -> f64 {
    0.45
}
fn default_high_min_score() -> f64 {
    70.0
}
fn default_high_min_probability() -> f64 {
    55.0
}
fn default_medium_min_score() -> f64 {
    45.0
}
fn default_medium_min_probability() -> f64 {
    45.0
}

impl Default for ConfidenceConfig {
    fn default() -> Self {
        Self {
            completeness_weight: default_completeness_weight(),
            agreement_weight: default_agreement_weight(),
            high_min_score: default_high_min_score(),
            high_min_probability: default_high_min_probability(),
            medium_min_score: default_medium_min_score(),
            medium_min_probability: default_medium_min_probability(),
        }
    }
}

impl ConfidenceConfig {
    fn validate(&self) -> Result<()> {
        let total = self.completeness_weight + self.agreement_weight;
        if (total - 1.0).abs() > 1e-6 {
            return Err(PredictorError::InvalidConfig(format!(
                "confidence blend weights must sum to 1.0, got {total}"
            )));
        }
        if self.medium_min_score > self.high_min_score {
            return Err(PredictorError::InvalidConfig(
                "medium confidence threshold above high threshold".to_string(),
            ));
        }
        Ok(())
    }
}

/// Value-bet gates and the bounded staking heuristic.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValueBetConfig {
    /// Minimum probability (percent) for match-result selections.
    #[serde(default = "default_result_min_probability")]
    pub result_min_probability: f64,
    /// Minimum probability (percent) for double-chance selections.
    #[serde(default = "default_double_chance_min_probability")]
    pub double_chance_min_probability: f64,
    /// Minimum probability (percent) for BTTS and totals selections.
    #[serde(default = "default_goals_min_probability")]
    pub goals_min_probability: f64,
    /// Ranked list cap.
    #[serde(default = "default_max_picks")]
    pub max_picks: usize,
    /// Stake units scaled by edge over the breakeven threshold.
    #[serde(default = "default_base_unit")]
    pub base_unit: Decimal,
    /// Probability fraction below which no stake is warranted.
    #[serde(default = "default_breakeven_threshold")]
    pub breakeven_threshold: Decimal,
    #[serde(default = "default_high_multiplier")]
    pub high_confidence_multiplier: Decimal,
    #[serde(default = "default_medium_multiplier")]
    pub medium_confidence_multiplier: Decimal,
    #[serde(default = "default_min_stake")]
    pub min_stake: Decimal,
    #[serde(default = "default_max_stake")]
    pub max_stake: Decimal,
}

fn default_result_min_probability() -> f64 {
    55.0
}
fn default_double_chance_min_probability() -> f64 {
    70.0
}
fn default_goals_min_probability() -> f64 {
    65.0
}
fn default_max_picks() -> usize {
    5
}
fn default_base_unit() -> Decimal {
    dec!(10)
}
fn default_breakeven_threshold() -> Decimal {
    dec!(0.50)
}
fn default_high_multiplier() -> Decimal {
    dec!(1.0)
}
fn default_medium_multiplier() -> Decimal {
    dec!(0.6)
}
fn default_min_stake() -> Decimal {
    dec!(0.5)
}
fn default_max_stake() -> Decimal {
    dec!(5.0)
}

impl Default for ValueBetConfig {
    fn default() -> Self {
        Self {
            result_min_probability: default_result_min_probability(),
            double_chance_min_probability: default_double_chance_min_probability(),
            goals_min_probability: default_goals_min_probability(),
            max_picks: default_max_picks(),
            base_unit: default_base_unit(),
            breakeven_threshold: default_breakeven_threshold(),
            high_confidence_multiplier: default_high_multiplier(),
            medium_confidence_multiplier: default_medium_multiplier(),
            min_stake: default_min_stake(),
            max_stake: default_max_stake(),
        }
    }
}

impl ValueBetConfig {
    fn validate(&self) -> Result<()> {
        if self.max_picks == 0 {
            return Err(PredictorError::InvalidConfig(
                "max_picks must be at least 1".to_string(),
            ));
        }
        if self.min_stake > self.max_stake {
            return Err(PredictorError::InvalidConfig(
                "min_stake above max_stake".to_string(),
            ));
        }
        Ok(())
    }
}

/// Expected-goals model parameters.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GoalModelConfig {
    /// League-average total goals per match, used when form data is missing.
    #[serde(default = "default_baseline_total_goals")]
    pub baseline_total_goals: f64,
    /// Home-advantage edge expressed in goals.
    #[serde(default = "default_home_edge_goals")]
    pub home_edge_goals: f64,
    /// How strongly attacking injury impact suppresses a side's goal rate.
    #[serde(default = "default_injury_attack_penalty")]
    pub injury_attack_penalty: f64,
    /// How strongly the opponent's defensive injury impact boosts it.
    #[serde(default = "default_injury_defense_bonus")]
    pub injury_defense_bonus: f64,
    #[serde(default = "default_lambda_floor")]
    pub lambda_floor: f64,
    #[serde(default = "default_lambda_ceiling")]
    pub lambda_ceiling: f64,
    /// Poisson grid truncation per team.
    #[serde(default = "default_max_goals")]
    pub max_goals: u32,
}

fn default_baseline_total_goals() -> f64 {
    2.60
}
fn default_home_edge_goals() -> f64 {
    0.15
}
fn default_injury_attack_penalty() -> f64 {
    0.30
}
fn default_injury_defense_bonus() -> f64 {
    0.25
}
fn default_lambda_floor() -> f64 {
    0.20
}
fn default_lambda_ceiling() -> f64 {
    3.80
}
fn default_max_goals() -> u32 {
    10
}

impl Default for GoalModelConfig {
    fn default() -> Self {
        Self {
            baseline_total_goals: default_baseline_total_goals(),
            home_edge_goals: default_home_edge_goals(),
            injury_attack_penalty: default_injury_attack_penalty(),
            injury_defense_bonus: default_injury_defense_bonus(),
            lambda_floor: default_lambda_floor(),
            lambda_ceiling: default_lambda_ceiling(),
            max_goals: default_max_goals(),
        }
    }
}

/// Concurrency limits for the fetch/batch layer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrchestratorConfig {
    /// Individual timeout per source fetch.
    #[serde(default = "default_fetch_timeout_ms")]
    pub fetch_timeout_ms: u64,
    /// Bounded worker pool size for batch fan-out.
    #[serde(default = "default_max_concurrent_fixtures")]
    pub max_concurrent_fixtures: usize,
}

fn default_fetch_timeout_ms() -> u64 {
    4_000
}
fn default_max_concurrent_fixtures() -> usize {
    15
}

impl Default for OrchestratorConfig {
    fn default() -> Self {
        Self {
            fetch_timeout_ms: default_fetch_timeout_ms(),
            max_concurrent_fixtures: default_max_concurrent_fixtures(),
        }
    }
}
