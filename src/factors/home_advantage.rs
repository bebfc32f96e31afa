//! Home-advantage extractor
//!
//! A fixed base edge for playing at home, blended with the venue splits
//! the league table carries (home team's record at home vs the away
//! team's record on the road). Sourced from the standings bundle, so the
//! category is unavailable when standings are.

use crate::factors::{Category, CategorySignal, Signal};
use crate::types::{FixtureContext, SourceBundle, StandingsPair};

const BASE_EDGE: f64 = 0.10;
const VENUE_WEIGHT: f64 = 0.25;

pub fn extract(bundle: &SourceBundle<StandingsPair>, _ctx: &FixtureContext) -> CategorySignal {
    let Some(pair) = bundle.value() else {
        return CategorySignal::unavailable(Category::HomeAdvantage);
    };

    let home_rate = pair.home.home_record.win_rate().unwrap_or(0.5);
    let away_rate = pair.away.away_record.win_rate().unwrap_or(0.5);
    let home = 0.5 + BASE_EDGE + VENUE_WEIGHT * (home_rate - away_rate);

    let note = Some(format!(
        "{:.0}% home wins vs {:.0}% away wins",
        home_rate * 100.0,
        away_rate * 100.0
    ));

    CategorySignal {
        category: Category::HomeAdvantage,
        signal: Signal::available(home, 1.0 - home, note),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::factors::test_support::fixture;
    use crate::types::{Motivation, StandingsSignal, TeamPair, VenueRecord};

    fn standings(home_rec: VenueRecord, away_rec: VenueRecord) -> StandingsPair {
        let template = |record_home: VenueRecord, record_away: VenueRecord| StandingsSignal {
            position: 8,
            points_from_top: 12,
            points_from_bottom: 14,
            motivation: Motivation::MidTable,
            home_record: record_home,
            away_record: record_away,
        };
        TeamPair {
            home: template(home_rec, VenueRecord { wins: 2, draws: 2, losses: 2 }),
            away: template(VenueRecord { wins: 2, draws: 2, losses: 2 }, away_rec),
        }
    }

    #[test]
    fn unavailable_without_standings() {
        let signal = extract(&SourceBundle::Unavailable, &fixture());
        assert!(!signal.is_available());
    }

    #[test]
    fn base_edge_applies_with_even_venue_records() {
        let pair = standings(
            VenueRecord { wins: 3, draws: 0, losses: 3 },
            VenueRecord { wins: 3, draws: 0, losses: 3 },
        );
        let signal = extract(&SourceBundle::Available(pair), &fixture());
        let tilt = signal.tilt().unwrap();
        assert!((tilt - 2.0 * BASE_EDGE).abs() < 1e-9);
    }

    #[test]
    fn fortress_home_record_widens_the_edge() {
        let strong = standings(
            VenueRecord { wins: 9, draws: 1, losses: 0 },
            VenueRecord { wins: 1, draws: 2, losses: 7 },
        );
        let even = standings(
            VenueRecord { wins: 3, draws: 0, losses: 3 },
            VenueRecord { wins: 3, draws: 0, losses: 3 },
        );
        let strong_tilt = extract(&SourceBundle::Available(strong), &fixture()).tilt().unwrap();
        let even_tilt = extract(&SourceBundle::Available(even), &fixture()).tilt().unwrap();
        assert!(strong_tilt > even_tilt);
    }

    #[test]
    fn missing_venue_games_fall_back_to_neutral_rates() {
        let pair = standings(
            VenueRecord { wins: 0, draws: 0, losses: 0 },
            VenueRecord { wins: 0, draws: 0, losses: 0 },
        );
        let signal = extract(&SourceBundle::Available(pair), &fixture());
        assert!((signal.tilt().unwrap() - 2.0 * BASE_EDGE).abs() < 1e-9);
    }
}
