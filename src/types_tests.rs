//! Tests for core types

#[cfg(test)]
mod tests {
    use super::super::types::*;
    use chrono::{TimeZone, Utc};
    use rust_decimal_macros::dec;
    use std::collections::BTreeMap;

    #[test]
    fn test_match_result_serialization() {
        assert_eq!(serde_json::to_string(&MatchResult::Win).unwrap(), "\"W\"");
        assert_eq!(serde_json::to_string(&MatchResult::Draw).unwrap(), "\"D\"");
        assert_eq!(serde_json::to_string(&MatchResult::Loss).unwrap(), "\"L\"");
    }

    #[test]
    fn test_match_result_points() {
        assert_eq!(MatchResult::Win.points(), 3);
        assert_eq!(MatchResult::Draw.points(), 1);
        assert_eq!(MatchResult::Loss.points(), 0);
    }

    #[test]
    fn test_confidence_level_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&ConfidenceLevel::Low).unwrap(), "\"low\"");
        assert_eq!(serde_json::to_string(&ConfidenceLevel::Medium).unwrap(), "\"medium\"");
        assert_eq!(serde_json::to_string(&ConfidenceLevel::High).unwrap(), "\"high\"");
    }

    #[test]
    fn test_market_serializes_snake_case() {
        assert_eq!(serde_json::to_string(&Market::MatchResult).unwrap(), "\"match_result\"");
        assert_eq!(serde_json::to_string(&Market::DoubleChance).unwrap(), "\"double_chance\"");
        assert_eq!(
            serde_json::to_string(&Market::BothTeamsToScore).unwrap(),
            "\"both_teams_to_score\""
        );
        assert_eq!(serde_json::to_string(&Market::TotalGoals).unwrap(), "\"total_goals\"");
    }

    #[test]
    fn test_market_ordering() {
        assert!(Market::MatchResult < Market::DoubleChance);
        assert!(Market::DoubleChance < Market::BothTeamsToScore);
        assert!(Market::BothTeamsToScore < Market::TotalGoals);
    }

    #[test]
    fn test_source_bundle_states() {
        let present = SourceBundle::Available(7u32);
        let absent: SourceBundle<u32> = SourceBundle::Unavailable;
        assert!(present.available());
        assert_eq!(present.value(), Some(&7));
        assert!(!absent.available());
        assert_eq!(absent.value(), None);
        assert_eq!(SourceBundle::from_option(Some(1u32)), SourceBundle::Available(1));
        assert_eq!(SourceBundle::<u32>::from_option(None), SourceBundle::Unavailable);
    }

    #[test]
    fn test_empty_sources_have_nothing_available() {
        let sources = FixtureSources::empty();
        assert!(!sources.form.available());
        assert!(!sources.head_to_head.available());
        assert!(!sources.injuries.available());
        assert!(!sources.standings.available());
        assert!(!sources.live_context.available());
    }

    #[test]
    fn test_form_per_match_rates() {
        let form = TeamFormSignal {
            results: vec![MatchResult::Win, MatchResult::Draw, MatchResult::Loss, MatchResult::Win],
            goals_scored: 6,
            goals_conceded: 3,
            rating: 0.6,
            clean_sheet_rate: 0.25,
            btts_rate: 0.5,
        };
        assert_eq!(form.goals_scored_per_match(), Some(1.5));
        assert_eq!(form.goals_conceded_per_match(), Some(0.75));

        let empty = TeamFormSignal {
            results: vec![],
            goals_scored: 0,
            goals_conceded: 0,
            rating: 0.5,
            clean_sheet_rate: 0.0,
            btts_rate: 0.0,
        };
        assert_eq!(empty.goals_scored_per_match(), None);
    }

    #[test]
    fn test_venue_record_win_rate() {
        let record = VenueRecord { wins: 6, draws: 2, losses: 2 };
        assert_eq!(record.played(), 10);
        assert_eq!(record.win_rate(), Some(0.6));
        let unplayed = VenueRecord { wins: 0, draws: 0, losses: 0 };
        assert_eq!(unplayed.win_rate(), None);
    }

    #[test]
    fn test_prediction_result_field_names() {
        let result = PredictionResult {
            fixture_id: "fx-1".into(),
            home_team: "Harbour City".into(),
            away_team: "Riverton".into(),
            kickoff: Utc.with_ymd_and_hms(2026, 3, 14, 15, 0, 0).unwrap(),
            win_probability_home: 55.0,
            draw_probability: 25.0,
            win_probability_away: 20.0,
            double_chance_1x: 80.0,
            double_chance_x2: 45.0,
            double_chance_12: 75.0,
            btts_probability: 52.0,
            btts_no_probability: 48.0,
            over_15_probability: 74.0,
            under_15_probability: 26.0,
            over_25_probability: 51.0,
            under_25_probability: 49.0,
            over_35_probability: 28.0,
            under_35_probability: 72.0,
            expected_goals: ExpectedGoals { home: 1.6, away: 1.1 },
            confidence_score: 68.0,
            confidence_level: ConfidenceLevel::Medium,
            data_completeness: 85.0,
            factors_breakdown: BTreeMap::new(),
            value_bets: vec![ValueBet {
                market: Market::MatchResult,
                selection: "Home Win".into(),
                probability: 55.0,
                confidence: ConfidenceLevel::Medium,
                stake_units: dec!(0.5),
            }],
            prediction_summary: "Harbour City to win (55%).".into(),
        };

        let json: serde_json::Value = serde_json::to_value(&result).unwrap();
        for field in [
            "fixture_id",
            "win_probability_home",
            "draw_probability",
            "win_probability_away",
            "double_chance_1x",
            "double_chance_x2",
            "double_chance_12",
            "btts_probability",
            "over_25_probability",
            "expected_goals",
            "confidence_score",
            "confidence_level",
            "data_completeness",
            "factors_breakdown",
            "value_bets",
            "prediction_summary",
        ] {
            assert!(json.get(field).is_some(), "missing field {field}");
        }
        assert_eq!(json["confidence_level"], "medium");
        assert_eq!(json["value_bets"][0]["market"], "match_result");
    }

    #[test]
    fn test_batch_outcome_shape() {
        let outcome = BatchOutcome {
            results: vec![],
            errors: vec![FixtureError {
                fixture_id: "fx-9".into(),
                error: "fixture not found: fx-9".into(),
            }],
            requested: 1,
            successful: 0,
            failed: 1,
        };
        let json: serde_json::Value = serde_json::to_value(&outcome).unwrap();
        assert!(json["results"].is_array());
        assert_eq!(json["errors"][0]["fixture_id"], "fx-9");
        assert_eq!(json["requested"], 1);
        assert_eq!(json["successful"], 0);
        assert_eq!(json["failed"], 1);
    }

    #[test]
    fn test_expected_goals_total() {
        let goals = ExpectedGoals { home: 1.7, away: 0.9 };
        assert!((goals.total() - 2.6).abs() < 1e-12);
    }
}
