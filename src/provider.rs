//! Data-access seam
//!
//! [`DataProvider`] is the boundary between the engine and whatever feeds
//! it. Each source is fetched independently so the orchestrator can
//! degrade per source instead of failing the fixture. [`StaticProvider`]
//! serves a pre-loaded dataset from disk, which is all the CLI and the
//! test suite need.

use std::collections::HashMap;
use std::path::Path;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::{PredictorError, Result};
use crate::factors::Category;
use crate::types::{
    FixtureContext, HeadToHeadSignal, InjuryPair, LiveContextSignal, StandingsPair, TeamFormPair,
};

#[async_trait]
pub trait DataProvider: Send + Sync {
    /// Resolve a fixture id to its identity, or [`PredictorError::FixtureNotFound`].
    async fn fixture(&self, fixture_id: &str) -> Result<FixtureContext>;

    async fn form(&self, ctx: &FixtureContext) -> Result<TeamFormPair>;
    async fn head_to_head(&self, ctx: &FixtureContext) -> Result<HeadToHeadSignal>;
    async fn injuries(&self, ctx: &FixtureContext) -> Result<InjuryPair>;
    async fn standings(&self, ctx: &FixtureContext) -> Result<StandingsPair>;
    async fn live_context(&self, ctx: &FixtureContext) -> Result<LiveContextSignal>;
}

/// One fixture's worth of data. Any source may be absent.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FixtureRecord {
    #[serde(flatten)]
    pub context: FixtureContext,
    #[serde(default)]
    pub form: Option<TeamFormPair>,
    #[serde(default)]
    pub head_to_head: Option<HeadToHeadSignal>,
    #[serde(default)]
    pub injuries: Option<InjuryPair>,
    #[serde(default)]
    pub standings: Option<StandingsPair>,
    #[serde(default)]
    pub live_context: Option<LiveContextSignal>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FixtureDataset {
    pub fixtures: Vec<FixtureRecord>,
}

/// In-memory provider over a [`FixtureDataset`].
pub struct StaticProvider {
    records: HashMap<String, FixtureRecord>,
}

impl StaticProvider {
    pub fn new(dataset: FixtureDataset) -> Self {
        let records = dataset
            .fixtures
            .into_iter()
            .map(|r| (r.context.fixture_id.clone(), r))
            .collect();
        Self { records }
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let raw = std::fs::read_to_string(path)?;
        let dataset: FixtureDataset = serde_json::from_str(&raw)?;
        Ok(Self::new(dataset))
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    fn record(&self, fixture_id: &str) -> Result<&FixtureRecord> {
        self.records
            .get(fixture_id)
            .ok_or_else(|| PredictorError::FixtureNotFound(fixture_id.to_string()))
    }

    fn source<T: Clone>(&self, ctx: &FixtureContext, category: Category, value: &Option<T>) -> Result<T> {
        value.clone().ok_or_else(|| PredictorError::SourceUnavailable {
            category,
            reason: format!("no {category} data for fixture {}", ctx.fixture_id),
        })
    }
}

#[async_trait]
impl DataProvider for StaticProvider {
    async fn fixture(&self, fixture_id: &str) -> Result<FixtureContext> {
        Ok(self.record(fixture_id)?.context.clone())
    }

    async fn form(&self, ctx: &FixtureContext) -> Result<TeamFormPair> {
        let record = self.record(&ctx.fixture_id)?;
        self.source(ctx, Category::Form, &record.form)
    }

    async fn head_to_head(&self, ctx: &FixtureContext) -> Result<HeadToHeadSignal> {
        let record = self.record(&ctx.fixture_id)?;
        self.source(ctx, Category::HeadToHead, &record.head_to_head)
    }

    async fn injuries(&self, ctx: &FixtureContext) -> Result<InjuryPair> {
        let record = self.record(&ctx.fixture_id)?;
        self.source(ctx, Category::Injuries, &record.injuries)
    }

    async fn standings(&self, ctx: &FixtureContext) -> Result<StandingsPair> {
        let record = self.record(&ctx.fixture_id)?;
        self.source(ctx, Category::Standings, &record.standings)
    }

    async fn live_context(&self, ctx: &FixtureContext) -> Result<LiveContextSignal> {
        let record = self.record(&ctx.fixture_id)?;
        self.source(ctx, Category::LiveContext, &record.live_context)
    }
}
