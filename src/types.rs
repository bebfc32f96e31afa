//! Data contracts for the prediction engine
//!
//! Input signals are supplied per fixture by an external data-access
//! collaborator; absence of a source is a first-class state
//! ([`SourceBundle::Unavailable`]), not an error. The output
//! [`PredictionResult`] is created fresh per request and never mutated
//! after construction.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Immutable fixture identity, supplied by the caller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FixtureContext {
    pub fixture_id: String,
    pub home_team_id: String,
    pub home_team: String,
    pub away_team_id: String,
    pub away_team: String,
    pub kickoff: DateTime<Utc>,
}

/// Result of a single past match from one team's perspective.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MatchResult {
    #[serde(rename = "W")]
    Win,
    #[serde(rename = "D")]
    Draw,
    #[serde(rename = "L")]
    Loss,
}

impl MatchResult {
    pub fn points(self) -> u32 {
        match self {
            MatchResult::Win => 3,
            MatchResult::Draw => 1,
            MatchResult::Loss => 0,
        }
    }

    pub fn letter(self) -> char {
        match self {
            MatchResult::Win => 'W',
            MatchResult::Draw => 'D',
            MatchResult::Loss => 'L',
        }
    }
}

/// Recent form for one team. Results are ordered most recent last.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TeamFormSignal {
    pub results: Vec<MatchResult>,
    pub goals_scored: u32,
    pub goals_conceded: u32,
    /// Scalar form rating in [0, 1].
    pub rating: f64,
    /// Fraction of recent matches kept as clean sheets.
    pub clean_sheet_rate: f64,
    /// Fraction of recent matches where both teams scored.
    pub btts_rate: f64,
}

impl TeamFormSignal {
    pub fn matches_played(&self) -> usize {
        self.results.len()
    }

    pub fn goals_scored_per_match(&self) -> Option<f64> {
        if self.results.is_empty() {
            return None;
        }
        Some(self.goals_scored as f64 / self.results.len() as f64)
    }

    pub fn goals_conceded_per_match(&self) -> Option<f64> {
        if self.results.is_empty() {
            return None;
        }
        Some(self.goals_conceded as f64 / self.results.len() as f64)
    }
}

/// Home/away pair of per-team signals.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TeamPair<T> {
    pub home: T,
    pub away: T,
}

pub type TeamFormPair = TeamPair<TeamFormSignal>;
pub type InjuryPair = TeamPair<InjurySignal>;
pub type StandingsPair = TeamPair<StandingsSignal>;

/// Head-to-head history, counted from the home team's perspective.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HeadToHeadSignal {
    pub meetings: u32,
    pub home_wins: u32,
    pub draws: u32,
    pub away_wins: u32,
    pub avg_total_goals: f64,
    /// Recency-weighted trend over the most recent meetings, in [-1, 1];
    /// positive favors the home team.
    pub recent_trend: f64,
}

/// Squad availability for one team, with position-weighted impact ratings.
///
/// Goalkeeper and defender absences feed `defensive_impact`; forward
/// absences feed `attacking_impact`. Both are in [0, 1].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InjurySignal {
    pub players_out: u32,
    pub defensive_impact: f64,
    pub attacking_impact: f64,
}

/// Categorical motivation state derived from league position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Motivation {
    TitleRace,
    EuropeanSpots,
    MidTable,
    RelegationBattle,
}

/// Win/draw/loss record at a single venue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct VenueRecord {
    pub wins: u32,
    pub draws: u32,
    pub losses: u32,
}

impl VenueRecord {
    pub fn played(&self) -> u32 {
        self.wins + self.draws + self.losses
    }

    pub fn win_rate(&self) -> Option<f64> {
        let played = self.played();
        if played == 0 {
            return None;
        }
        Some(self.wins as f64 / played as f64)
    }
}

/// League table position for one team, including venue splits.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StandingsSignal {
    pub position: u32,
    pub points_from_top: u32,
    pub points_from_bottom: u32,
    pub motivation: Motivation,
    pub home_record: VenueRecord,
    pub away_record: VenueRecord,
}

/// Match-day factors: fatigue and motivation context.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LiveContextSignal {
    pub home_days_since_last: Option<u32>,
    pub away_days_since_last: Option<u32>,
    /// A rival plays a simultaneous fixture that affects motivation.
    pub home_rival_fixture_today: bool,
    pub away_rival_fixture_today: bool,
}

/// Wraps one per-source signal with an explicit presence state.
///
/// Absence is tagged rather than encoded as zeroed numbers, so the weight
/// renormalization step cannot accidentally include a missing category at
/// full weight.
#[derive(Debug, Clone, PartialEq)]
pub enum SourceBundle<T> {
    Available(T),
    Unavailable,
}

impl<T> SourceBundle<T> {
    pub fn available(&self) -> bool {
        matches!(self, SourceBundle::Available(_))
    }

    pub fn value(&self) -> Option<&T> {
        match self {
            SourceBundle::Available(v) => Some(v),
            SourceBundle::Unavailable => None,
        }
    }

    pub fn from_option(opt: Option<T>) -> Self {
        match opt {
            Some(v) => SourceBundle::Available(v),
            None => SourceBundle::Unavailable,
        }
    }
}

/// The five per-fixture source bundles fed into the pipeline.
#[derive(Debug, Clone, PartialEq)]
pub struct FixtureSources {
    pub form: SourceBundle<TeamFormPair>,
    pub head_to_head: SourceBundle<HeadToHeadSignal>,
    pub injuries: SourceBundle<InjuryPair>,
    pub standings: SourceBundle<StandingsPair>,
    pub live_context: SourceBundle<LiveContextSignal>,
}

impl FixtureSources {
    /// All sources unavailable; the engine still produces a neutral result.
    pub fn empty() -> Self {
        Self {
            form: SourceBundle::Unavailable,
            head_to_head: SourceBundle::Unavailable,
            injuries: SourceBundle::Unavailable,
            standings: SourceBundle::Unavailable,
            live_context: SourceBundle::Unavailable,
        }
    }
}

/// Coarse confidence bucket used to gate value-bet eligibility.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConfidenceLevel {
    Low,
    Medium,
    High,
}

impl fmt::Display for ConfidenceLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ConfidenceLevel::Low => "low",
            ConfidenceLevel::Medium => "medium",
            ConfidenceLevel::High => "high",
        };
        write!(f, "{s}")
    }
}

/// Derived betting market families.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Market {
    MatchResult,
    DoubleChance,
    BothTeamsToScore,
    TotalGoals,
}

impl fmt::Display for Market {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Market::MatchResult => "match_result",
            Market::DoubleChance => "double_chance",
            Market::BothTeamsToScore => "both_teams_to_score",
            Market::TotalGoals => "total_goals",
        };
        write!(f, "{s}")
    }
}

/// A market/selection pair that cleared the configured thresholds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValueBet {
    pub market: Market,
    pub selection: String,
    /// Modeled probability in percent.
    pub probability: f64,
    pub confidence: ConfidenceLevel,
    /// Bounded stake suggestion in units, not a betting-theory guarantee.
    pub stake_units: Decimal,
}

/// Expected goals estimate per team.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ExpectedGoals {
    pub home: f64,
    pub away: f64,
}

impl ExpectedGoals {
    pub fn total(&self) -> f64 {
        self.home + self.away
    }
}

/// Output aggregate of one prediction request.
///
/// All probability fields are percentages; mutually exclusive market sets
/// sum to 100 within a 0.01 tolerance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionResult {
    pub fixture_id: String,
    pub home_team: String,
    pub away_team: String,
    pub kickoff: DateTime<Utc>,

    pub win_probability_home: f64,
    pub draw_probability: f64,
    pub win_probability_away: f64,

    /// Home or draw.
    pub double_chance_1x: f64,
    /// Draw or away.
    pub double_chance_x2: f64,
    /// Home or away.
    pub double_chance_12: f64,

    pub btts_probability: f64,
    pub btts_no_probability: f64,

    pub over_15_probability: f64,
    pub under_15_probability: f64,
    pub over_25_probability: f64,
    pub under_25_probability: f64,
    pub over_35_probability: f64,
    pub under_35_probability: f64,

    pub expected_goals: ExpectedGoals,

    /// 0-100.
    pub confidence_score: f64,
    pub confidence_level: ConfidenceLevel,
    /// Percent of total category weight backed by an available source.
    pub data_completeness: f64,

    /// Per-category signed contribution to the aggregate tilt, keyed by
    /// category name. Deterministically ordered.
    pub factors_breakdown: BTreeMap<String, f64>,

    pub value_bets: Vec<ValueBet>,
    pub prediction_summary: String,
}

/// Per-fixture failure reported alongside batch successes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FixtureError {
    pub fixture_id: String,
    pub error: String,
}

/// Batch prediction outcome. Collaborating systems depend on this shape
/// field-for-field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatchOutcome {
    pub results: Vec<PredictionResult>,
    pub errors: Vec<FixtureError>,
    pub requested: usize,
    pub successful: usize,
    pub failed: usize,
}
