//! Standings/motivation extractor
//!
//! Table-quality differential from points above the bottom and below the
//! top, adjusted by the motivation state (sides with something to play
//! for get an urgency bump, settled mid-table sides a small discount).

use crate::factors::{Category, CategorySignal, Signal};
use crate::types::{FixtureContext, Motivation, SourceBundle, StandingsPair, StandingsSignal};

const QUALITY_WEIGHT: f64 = 0.5;

pub fn extract(bundle: &SourceBundle<StandingsPair>, _ctx: &FixtureContext) -> CategorySignal {
    let Some(pair) = bundle.value() else {
        return CategorySignal::unavailable(Category::Standings);
    };

    let quality_gap = table_quality(&pair.home) - table_quality(&pair.away);
    let urgency_gap = urgency(pair.home.motivation) - urgency(pair.away.motivation);
    let home = 0.5 + QUALITY_WEIGHT * quality_gap + urgency_gap;

    let note = Some(format!(
        "{} vs {}",
        ordinal(pair.home.position),
        ordinal(pair.away.position)
    ));

    CategorySignal {
        category: Category::Standings,
        signal: Signal::available(home, 1.0 - home, note),
    }
}

/// Position in the table as a [0, 1] score; 1 is top.
fn table_quality(s: &StandingsSignal) -> f64 {
    let span = s.points_from_top + s.points_from_bottom;
    if span == 0 {
        return 0.5;
    }
    s.points_from_bottom as f64 / span as f64
}

fn urgency(motivation: Motivation) -> f64 {
    match motivation {
        Motivation::TitleRace => 0.05,
        Motivation::RelegationBattle => 0.05,
        Motivation::EuropeanSpots => 0.03,
        Motivation::MidTable => -0.03,
    }
}

fn ordinal(position: u32) -> String {
    let suffix = match (position % 10, position % 100) {
        (1, 11) | (2, 12) | (3, 13) => "th",
        (1, _) => "st",
        (2, _) => "nd",
        (3, _) => "rd",
        _ => "th",
    };
    format!("{position}{suffix}")
}
