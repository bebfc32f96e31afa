//! Expected goals and derived goal markets
//!
//! Per-team goal rates come from the form bundle (league baseline when
//! missing), adjusted by injury impact and the home edge — never from the
//! outcome probabilities. An independent Poisson grid over the two rates
//! produces BTTS and over/under probabilities.

use crate::config::GoalModelConfig;
use crate::types::{ExpectedGoals, FixtureSources, TeamFormSignal};

/// Derived goal-market probabilities in percent.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GoalMarkets {
    pub expected: ExpectedGoals,
    pub btts_yes: f64,
    /// Over 1.5 / 2.5 / 3.5 goals.
    pub over: [f64; 3],
}

pub fn estimate(sources: &FixtureSources, cfg: &GoalModelConfig) -> GoalMarkets {
    let per_side_baseline = cfg.baseline_total_goals / 2.0;

    let (home_attack, home_defense) = side_rates(
        sources.form.value().map(|pair| &pair.home),
        per_side_baseline,
    );
    let (away_attack, away_defense) = side_rates(
        sources.form.value().map(|pair| &pair.away),
        per_side_baseline,
    );

    let mut lambda_home = (home_attack + away_defense) / 2.0 + cfg.home_edge_goals / 2.0;
    let mut lambda_away = (away_attack + home_defense) / 2.0 - cfg.home_edge_goals / 2.0;

    if let Some(pair) = sources.injuries.value() {
        lambda_home *= 1.0 - cfg.injury_attack_penalty * pair.home.attacking_impact.clamp(0.0, 1.0);
        lambda_home *= 1.0 + cfg.injury_defense_bonus * pair.away.defensive_impact.clamp(0.0, 1.0);
        lambda_away *= 1.0 - cfg.injury_attack_penalty * pair.away.attacking_impact.clamp(0.0, 1.0);
        lambda_away *= 1.0 + cfg.injury_defense_bonus * pair.home.defensive_impact.clamp(0.0, 1.0);
    }

    let lambda_home = lambda_home.clamp(cfg.lambda_floor, cfg.lambda_ceiling);
    let lambda_away = lambda_away.clamp(cfg.lambda_floor, cfg.lambda_ceiling);

    let pmf_home = poisson_pmf(lambda_home, cfg.max_goals);
    let pmf_away = poisson_pmf(lambda_away, cfg.max_goals);

    let btts_yes = (1.0 - pmf_home[0]) * (1.0 - pmf_away[0]) * 100.0;

    // P(total goals > line) for lines 1.5, 2.5, 3.5.
    let mut over = [0.0; 3];
    for (i, p_i) in pmf_home.iter().enumerate() {
        for (j, p_j) in pmf_away.iter().enumerate() {
            let total = i + j;
            let p = p_i * p_j * 100.0;
            if total >= 2 {
                over[0] += p;
            }
            if total >= 3 {
                over[1] += p;
            }
            if total >= 4 {
                over[2] += p;
            }
        }
    }

    GoalMarkets {
        expected: ExpectedGoals {
            home: lambda_home,
            away: lambda_away,
        },
        btts_yes,
        over,
    }
}

/// `(goals scored per match, goals conceded per match)` for one side.
fn side_rates(form: Option<&TeamFormSignal>, baseline: f64) -> (f64, f64) {
    match form {
        Some(f) => (
            f.goals_scored_per_match().unwrap_or(baseline),
            f.goals_conceded_per_match().unwrap_or(baseline),
        ),
        None => (baseline, baseline),
    }
}

/// Truncated Poisson pmf with the tail mass folded into the last bucket.
fn poisson_pmf(lambda: f64, max_k: u32) -> Vec<f64> {
    let max_k = max_k as usize;
    let mut out = vec![0.0; max_k + 1];
    let lambda = lambda.max(0.0);

    out[0] = (-lambda).exp();
    for k in 1..=max_k {
        out[k] = out[k - 1] * lambda / k as f64;
    }

    let sum: f64 = out.iter().sum();
    if sum < 1.0 {
        out[max_k] += 1.0 - sum;
    }
    out
}
