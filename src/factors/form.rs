//! Recent-form extractor
//!
//! Blends the supplied scalar form rating with a recency-weighted points
//! rate over the last matches, per team.

use crate::factors::{Category, CategorySignal, Signal};
use crate::types::{FixtureContext, MatchResult, SourceBundle, TeamFormPair, TeamFormSignal};

const RECENCY_DECAY: f64 = 0.85;
const RATING_WEIGHT: f64 = 0.6;

pub fn extract(bundle: &SourceBundle<TeamFormPair>, _ctx: &FixtureContext) -> CategorySignal {
    let Some(pair) = bundle.value() else {
        return CategorySignal::unavailable(Category::Form);
    };

    let home = team_strength(&pair.home);
    let away = team_strength(&pair.away);
    let note = format!("{} vs {}", streak(&pair.home.results), streak(&pair.away.results));

    CategorySignal {
        category: Category::Form,
        signal: Signal::available(home, away, Some(note)),
    }
}

fn team_strength(form: &TeamFormSignal) -> f64 {
    let rating = form.rating.clamp(0.0, 1.0);
    match recency_weighted_points_rate(&form.results) {
        Some(rate) => RATING_WEIGHT * rating + (1.0 - RATING_WEIGHT) * rate,
        None => rating,
    }
}

/// Points rate in [0, 1] with the most recent match weighted heaviest.
/// Results are ordered most recent last.
fn recency_weighted_points_rate(results: &[MatchResult]) -> Option<f64> {
    if results.is_empty() {
        return None;
    }
    let mut weighted = 0.0;
    let mut weight_sum = 0.0;
    for (age, result) in results.iter().rev().enumerate() {
        let w = RECENCY_DECAY.powi(age as i32);
        weighted += w * result.points() as f64 / 3.0;
        weight_sum += w;
    }
    Some(weighted / weight_sum)
}

fn streak(results: &[MatchResult]) -> String {
    if results.is_empty() {
        return "-".to_string();
    }
    results.iter().map(|r| r.letter()).collect()
}
