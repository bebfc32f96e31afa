//! Injury-burden extractor
//!
//! Compares position-weighted squad impact between the sides. Goalkeeper
//! and defender absences carry more weight for defensive solidity;
//! attacking absences cut the attacking signal separately (the goal model
//! reads the raw impacts for that).

use crate::factors::{Category, CategorySignal, Signal};
use crate::types::{FixtureContext, InjuryPair, InjurySignal, SourceBundle};

const DEFENSIVE_WEIGHT: f64 = 0.6;
const ATTACKING_WEIGHT: f64 = 0.4;

pub fn extract(bundle: &SourceBundle<InjuryPair>, _ctx: &FixtureContext) -> CategorySignal {
    let Some(pair) = bundle.value() else {
        return CategorySignal::unavailable(Category::Injuries);
    };

    let home_burden = burden(&pair.home);
    let away_burden = burden(&pair.away);
    let home = 0.5 + 0.5 * (away_burden - home_burden);

    let note = if pair.home.players_out > 0 || pair.away.players_out > 0 {
        Some(format!(
            "{} out vs {} out",
            pair.home.players_out, pair.away.players_out
        ))
    } else {
        None
    };

    CategorySignal {
        category: Category::Injuries,
        signal: Signal::available(home, 1.0 - home, note),
    }
}

fn burden(report: &InjurySignal) -> f64 {
    DEFENSIVE_WEIGHT * report.defensive_impact.clamp(0.0, 1.0)
        + ATTACKING_WEIGHT * report.attacking_impact.clamp(0.0, 1.0)
}
