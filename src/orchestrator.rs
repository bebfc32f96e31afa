//! Async orchestration
//!
//! Fetches the five source bundles concurrently with a per-fetch timeout,
//! degrades failed or slow sources to [`SourceBundle::Unavailable`], and
//! fans batches out over a bounded number of concurrent fixtures. Only
//! fixture resolution failures and cross-cutting errors abort a
//! prediction; per-source failures never do.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tokio::time::error::Elapsed;

use crate::config::OrchestratorConfig;
use crate::engine::PredictionEngine;
use crate::error::Result;
use crate::factors::Category;
use crate::provider::DataProvider;
use crate::types::{BatchOutcome, FixtureContext, FixtureError, FixtureSources, PredictionResult, SourceBundle};

#[derive(Clone)]
pub struct Orchestrator {
    engine: Arc<PredictionEngine>,
    provider: Arc<dyn DataProvider>,
    config: OrchestratorConfig,
}

impl Orchestrator {
    pub fn new(engine: PredictionEngine, provider: Arc<dyn DataProvider>) -> Self {
        let config = engine.config().orchestrator.clone();
        Self {
            engine: Arc::new(engine),
            provider,
            config,
        }
    }

    /// Predict a single fixture. Fails only if the fixture itself cannot
    /// be resolved or the engine reports an internal inconsistency.
    pub async fn predict(&self, fixture_id: &str) -> Result<PredictionResult> {
        let ctx = self.provider.fixture(fixture_id).await?;
        let sources = self.gather(&ctx).await;
        self.engine.predict(&ctx, &sources)
    }

    /// Predict many fixtures concurrently, bounded by the configured
    /// fixture concurrency. One bad fixture never sinks the batch.
    pub async fn predict_batch(&self, fixture_ids: &[String]) -> BatchOutcome {
        let requested = fixture_ids.len();
        let semaphore = Arc::new(Semaphore::new(self.config.max_concurrent_fixtures));
        let mut tasks = JoinSet::new();

        for (index, fixture_id) in fixture_ids.iter().cloned().enumerate() {
            let this = self.clone();
            let semaphore = Arc::clone(&semaphore);
            tasks.spawn(async move {
                // Closed only when the JoinSet is dropped, which cannot
                // happen while this task runs.
                let _permit = semaphore.acquire_owned().await;
                let outcome = this.predict(&fixture_id).await;
                (index, fixture_id, outcome)
            });
        }

        let mut completed: Vec<(usize, String, Result<PredictionResult>)> =
            Vec::with_capacity(requested);
        while let Some(joined) = tasks.join_next().await {
            match joined {
                Ok(entry) => completed.push(entry),
                Err(err) => tracing::error!(error = %err, "batch prediction task failed to join"),
            }
        }
        // Input order, regardless of completion order.
        completed.sort_by_key(|(index, _, _)| *index);

        let mut results = Vec::new();
        let mut errors = Vec::new();
        for (_, fixture_id, outcome) in completed {
            match outcome {
                Ok(result) => results.push(result),
                Err(err) => {
                    tracing::warn!(fixture_id = %fixture_id, error = %err, "fixture prediction failed");
                    errors.push(FixtureError {
                        fixture_id,
                        error: err.to_string(),
                    });
                }
            }
        }

        let successful = results.len();
        BatchOutcome {
            results,
            errors,
            requested,
            successful,
            failed: requested - successful,
        }
    }

    /// Fetch all five sources concurrently. Each fetch gets its own
    /// timeout; a failure or timeout degrades that source alone.
    async fn gather(&self, ctx: &FixtureContext) -> FixtureSources {
        let timeout = Duration::from_millis(self.config.fetch_timeout_ms);
        let (form, head_to_head, injuries, standings, live_context) = tokio::join!(
            tokio::time::timeout(timeout, self.provider.form(ctx)),
            tokio::time::timeout(timeout, self.provider.head_to_head(ctx)),
            tokio::time::timeout(timeout, self.provider.injuries(ctx)),
            tokio::time::timeout(timeout, self.provider.standings(ctx)),
            tokio::time::timeout(timeout, self.provider.live_context(ctx)),
        );

        FixtureSources {
            form: bundle(ctx, Category::Form, form),
            head_to_head: bundle(ctx, Category::HeadToHead, head_to_head),
            injuries: bundle(ctx, Category::Injuries, injuries),
            standings: bundle(ctx, Category::Standings, standings),
            live_context: bundle(ctx, Category::LiveContext, live_context),
        }
    }
}

fn bundle<T>(
    ctx: &FixtureContext,
    category: Category,
    fetched: std::result::Result<Result<T>, Elapsed>,
) -> SourceBundle<T> {
    match fetched {
        Ok(Ok(value)) => SourceBundle::Available(value),
        Ok(Err(err)) => {
            tracing::warn!(
                fixture_id = %ctx.fixture_id,
                %category,
                error = %err,
                "source fetch failed, predicting without it"
            );
            SourceBundle::Unavailable
        }
        Err(_) => {
            tracing::warn!(
                fixture_id = %ctx.fixture_id,
                %category,
                "source fetch timed out, predicting without it"
            );
            SourceBundle::Unavailable
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use chrono::{TimeZone, Utc};

    use crate::config::Config;
    use crate::error::PredictorError;
    use crate::types::MatchResult::{Draw, Loss, Win};
    use crate::types::*;

    /// Serves a handful of fixtures; one source is configurably slow and
    /// one fixture is missing entirely.
    struct ScriptedProvider {
        standings_delay: Duration,
        fail_injuries: bool,
    }

    impl ScriptedProvider {
        fn quick() -> Self {
            Self {
                standings_delay: Duration::ZERO,
                fail_injuries: false,
            }
        }

        fn context(fixture_id: &str) -> FixtureContext {
            FixtureContext {
                fixture_id: fixture_id.to_string(),
                home_team_id: "t-10".into(),
                home_team: "Harbour City".into(),
                away_team_id: "t-22".into(),
                away_team: "Riverton".into(),
                kickoff: Utc.with_ymd_and_hms(2026, 3, 14, 15, 0, 0).unwrap(),
            }
        }
    }

    #[async_trait]
    impl DataProvider for ScriptedProvider {
        async fn fixture(&self, fixture_id: &str) -> crate::error::Result<FixtureContext> {
            if fixture_id == "fx-missing" {
                return Err(PredictorError::FixtureNotFound(fixture_id.to_string()));
            }
            Ok(Self::context(fixture_id))
        }

        async fn form(&self, _ctx: &FixtureContext) -> crate::error::Result<TeamFormPair> {
            Ok(TeamPair {
                home: TeamFormSignal {
                    results: vec![Win, Win, Draw, Win, Win],
                    goals_scored: 11,
                    goals_conceded: 3,
                    rating: 0.85,
                    clean_sheet_rate: 0.6,
                    btts_rate: 0.4,
                },
                away: TeamFormSignal {
                    results: vec![Loss, Draw, Loss, Loss, Loss],
                    goals_scored: 2,
                    goals_conceded: 9,
                    rating: 0.2,
                    clean_sheet_rate: 0.0,
                    btts_rate: 0.4,
                },
            })
        }

        async fn head_to_head(&self, _ctx: &FixtureContext) -> crate::error::Result<HeadToHeadSignal> {
            Ok(HeadToHeadSignal {
                meetings: 6,
                home_wins: 4,
                draws: 1,
                away_wins: 1,
                avg_total_goals: 2.8,
                recent_trend: 0.4,
            })
        }

        async fn injuries(&self, ctx: &FixtureContext) -> crate::error::Result<InjuryPair> {
            if self.fail_injuries {
                return Err(PredictorError::SourceUnavailable {
                    category: Category::Injuries,
                    reason: format!("feed offline for {}", ctx.fixture_id),
                });
            }
            Ok(TeamPair {
                home: InjurySignal {
                    players_out: 1,
                    defensive_impact: 0.1,
                    attacking_impact: 0.0,
                },
                away: InjurySignal {
                    players_out: 2,
                    defensive_impact: 0.4,
                    attacking_impact: 0.3,
                },
            })
        }

        async fn standings(&self, _ctx: &FixtureContext) -> crate::error::Result<StandingsPair> {
            tokio::time::sleep(self.standings_delay).await;
            Ok(TeamPair {
                home: StandingsSignal {
                    position: 2,
                    points_from_top: 3,
                    points_from_bottom: 38,
                    motivation: Motivation::TitleRace,
                    home_record: VenueRecord { wins: 7, draws: 2, losses: 1 },
                    away_record: VenueRecord { wins: 5, draws: 2, losses: 3 },
                },
                away: StandingsSignal {
                    position: 16,
                    points_from_top: 32,
                    points_from_bottom: 6,
                    motivation: Motivation::RelegationBattle,
                    home_record: VenueRecord { wins: 2, draws: 3, losses: 5 },
                    away_record: VenueRecord { wins: 1, draws: 1, losses: 8 },
                },
            })
        }

        async fn live_context(&self, _ctx: &FixtureContext) -> crate::error::Result<LiveContextSignal> {
            Ok(LiveContextSignal {
                home_days_since_last: Some(6),
                away_days_since_last: Some(4),
                home_rival_fixture_today: false,
                away_rival_fixture_today: false,
            })
        }
    }

    fn orchestrator(provider: ScriptedProvider) -> Orchestrator {
        let mut config = Config::default();
        config.orchestrator.fetch_timeout_ms = 50;
        let engine = PredictionEngine::new(config).unwrap();
        Orchestrator::new(engine, Arc::new(provider))
    }

    #[tokio::test]
    async fn predicts_with_all_sources() {
        let result = orchestrator(ScriptedProvider::quick())
            .predict("fx-1")
            .await
            .unwrap();
        assert_eq!(result.fixture_id, "fx-1");
        assert!((result.data_completeness - 100.0).abs() < 1e-9);
    }

    #[tokio::test]
    async fn failed_source_degrades_instead_of_failing() {
        let provider = ScriptedProvider {
            fail_injuries: true,
            ..ScriptedProvider::quick()
        };
        let result = orchestrator(provider).predict("fx-1").await.unwrap();
        // The injuries category's weight is dropped from completeness.
        assert!(result.data_completeness < 100.0);
        assert_eq!(result.factors_breakdown["injuries"], 0.0);
    }

    #[tokio::test]
    async fn slow_source_times_out_and_degrades() {
        let provider = ScriptedProvider {
            standings_delay: Duration::from_millis(500),
            ..ScriptedProvider::quick()
        };
        let result = orchestrator(provider).predict("fx-1").await.unwrap();
        assert!(result.data_completeness < 100.0);
        // Home advantage reads the same bundle, so it degrades too.
        assert_eq!(result.factors_breakdown["standings"], 0.0);
        assert_eq!(result.factors_breakdown["home_advantage"], 0.0);
    }

    #[tokio::test]
    async fn unknown_fixture_fails_the_prediction() {
        let err = orchestrator(ScriptedProvider::quick())
            .predict("fx-missing")
            .await
            .unwrap_err();
        assert!(matches!(err, PredictorError::FixtureNotFound(_)));
    }

    #[tokio::test]
    async fn batch_isolates_per_fixture_failures() {
        let ids = vec![
            "fx-1".to_string(),
            "fx-missing".to_string(),
            "fx-3".to_string(),
        ];
        let outcome = orchestrator(ScriptedProvider::quick())
            .predict_batch(&ids)
            .await;

        assert_eq!(outcome.requested, 3);
        assert_eq!(outcome.successful, 2);
        assert_eq!(outcome.failed, 1);
        assert_eq!(outcome.errors.len(), 1);
        assert_eq!(outcome.errors[0].fixture_id, "fx-missing");
        assert_eq!(outcome.results[0].fixture_id, "fx-1");
        assert_eq!(outcome.results[1].fixture_id, "fx-3");
    }

    #[tokio::test]
    async fn empty_batch_is_a_no_op() {
        let outcome = orchestrator(ScriptedProvider::quick()).predict_batch(&[]).await;
        assert_eq!(outcome.requested, 0);
        assert!(outcome.results.is_empty());
        assert!(outcome.errors.is_empty());
    }
}
