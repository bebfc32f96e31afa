//! Head-to-head extractor
//!
//! Win share from the home side's perspective, nudged by the
//! recency-weighted trend and shrunk toward neutral for small samples.

use crate::factors::{Category, CategorySignal, Signal};
use crate::types::{FixtureContext, HeadToHeadSignal, SourceBundle};

const TREND_COEFF: f64 = 0.15;
/// Meetings needed before the signal gets full weight.
const FULL_SAMPLE: f64 = 4.0;

pub fn extract(bundle: &SourceBundle<HeadToHeadSignal>, _ctx: &FixtureContext) -> CategorySignal {
    let Some(h2h) = bundle.value() else {
        return CategorySignal::unavailable(Category::HeadToHead);
    };

    let home = home_share(h2h);
    let note = format!("H{}-D{}-A{}", h2h.home_wins, h2h.draws, h2h.away_wins);

    CategorySignal {
        category: Category::HeadToHead,
        signal: Signal::available(home, 1.0 - home, Some(note)),
    }
}

fn home_share(h2h: &HeadToHeadSignal) -> f64 {
    if h2h.meetings == 0 {
        return 0.5;
    }
    let share = (h2h.home_wins as f64 + 0.5 * h2h.draws as f64) / h2h.meetings as f64;
    let adjusted = share + TREND_COEFF * h2h.recent_trend.clamp(-1.0, 1.0);
    let shrink = (h2h.meetings as f64 / FULL_SAMPLE).min(1.0);
    0.5 + shrink * (adjusted.clamp(0.0, 1.0) - 0.5)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::factors::test_support::fixture;

    fn h2h(meetings: u32, home_wins: u32, draws: u32, away_wins: u32, trend: f64) -> HeadToHeadSignal {
        HeadToHeadSignal {
            meetings,
            home_wins,
            draws,
            away_wins,
            avg_total_goals: 2.7,
            recent_trend: trend,
        }
    }

    #[test]
    fn unavailable_bundle_excluded() {
        let signal = extract(&SourceBundle::Unavailable, &fixture());
        assert!(!signal.is_available());
    }

    #[test]
    fn home_dominant_history_tilts_home() {
        let b = SourceBundle::Available(h2h(8, 6, 1, 1, 0.5));
        let signal = extract(&b, &fixture());
        assert!(signal.tilt().unwrap() > 0.3);
        assert_eq!(signal.note(), Some("H6-D1-A1"));
    }

    #[test]
    fn no_prior_meetings_is_neutral_but_available() {
        let b = SourceBundle::Available(h2h(0, 0, 0, 0, 0.0));
        let signal = extract(&b, &fixture());
        assert!(signal.is_available());
        assert_eq!(signal.tilt().unwrap(), 0.0);
    }

    #[test]
    fn small_samples_shrink_toward_neutral() {
        let two = extract(&SourceBundle::Available(h2h(2, 2, 0, 0, 0.0)), &fixture());
        let eight = extract(&SourceBundle::Available(h2h(8, 8, 0, 0, 0.0)), &fixture());
        assert!(two.tilt().unwrap() < eight.tilt().unwrap());
    }

    #[test]
    fn trend_shifts_balanced_history() {
        let flat = extract(&SourceBundle::Available(h2h(6, 2, 2, 2, 0.0)), &fixture());
        let trending = extract(&SourceBundle::Available(h2h(6, 2, 2, 2, 0.8)), &fixture());
        assert!(trending.tilt().unwrap() > flat.tilt().unwrap());
    }
}
