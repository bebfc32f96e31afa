//! Live-context extractor
//!
//! Match-day factors: rest-day differential between the sides (fatigue)
//! and whether a rival's simultaneous fixture is pulling focus.

use crate::factors::{Category, CategorySignal, Signal};
use crate::types::{FixtureContext, LiveContextSignal, SourceBundle};

const REST_DAY_COEFF: f64 = 0.04;
const MAX_REST_DIFF_DAYS: f64 = 4.0;
const RIVAL_DISTRACTION: f64 = 0.05;

pub fn extract(bundle: &SourceBundle<LiveContextSignal>, _ctx: &FixtureContext) -> CategorySignal {
    let Some(live) = bundle.value() else {
        return CategorySignal::unavailable(Category::LiveContext);
    };

    let mut tilt = 0.0;
    let mut notes = Vec::new();

    if let (Some(home_rest), Some(away_rest)) =
        (live.home_days_since_last, live.away_days_since_last)
    {
        let diff = (home_rest as f64 - away_rest as f64)
            .clamp(-MAX_REST_DIFF_DAYS, MAX_REST_DIFF_DAYS);
        tilt += REST_DAY_COEFF * diff;
        if diff.abs() >= 2.0 {
            let (fresh, tired) = if diff > 0.0 { ("home", "away") } else { ("away", "home") };
            notes.push(format!("{fresh} side better rested than {tired}"));
        }
    }

    if live.home_rival_fixture_today {
        tilt -= RIVAL_DISTRACTION;
        notes.push("home side distracted by a rival fixture".to_string());
    }
    if live.away_rival_fixture_today {
        tilt += RIVAL_DISTRACTION;
        notes.push("away side distracted by a rival fixture".to_string());
    }

    let home = 0.5 + tilt / 2.0;
    let note = if notes.is_empty() { None } else { Some(notes.join("; ")) };

    CategorySignal {
        category: Category::LiveContext,
        signal: Signal::available(home, 1.0 - home, note),
    }
}
