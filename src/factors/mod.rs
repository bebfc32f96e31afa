//! Factor extractors
//!
//! One pure, total function per weighted category. Each maps a source
//! bundle plus the fixture context to a [`CategorySignal`]: a pair of
//! `(home, away)` strengths in [0, 1] with an optional presentation note,
//! or an explicit [`Signal::Unavailable`] that excludes the category from
//! weighting. Extractors never error — absence of data is a normal state.

pub mod form;
pub mod head_to_head;
pub mod home_advantage;
pub mod injuries;
pub mod live_context;
pub mod standings;

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::types::{FixtureContext, FixtureSources};

/// The six weighted signal categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Form,
    HeadToHead,
    Injuries,
    HomeAdvantage,
    Standings,
    LiveContext,
}

impl Category {
    pub const ALL: [Category; 6] = [
        Category::Form,
        Category::HeadToHead,
        Category::Injuries,
        Category::HomeAdvantage,
        Category::Standings,
        Category::LiveContext,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Category::Form => "form",
            Category::HeadToHead => "head_to_head",
            Category::Injuries => "injuries",
            Category::HomeAdvantage => "home_advantage",
            Category::Standings => "standings",
            Category::LiveContext => "live_context",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Normalized directional signal for one category.
#[derive(Debug, Clone, PartialEq)]
pub enum Signal {
    Available {
        /// Home-side strength in [0, 1].
        home: f64,
        /// Away-side strength in [0, 1].
        away: f64,
        /// Category-specific sub-signal used only by the summary renderer.
        note: Option<String>,
    },
    Unavailable,
}

impl Signal {
    pub fn available(home: f64, away: f64, note: Option<String>) -> Self {
        Signal::Available {
            home: home.clamp(0.0, 1.0),
            away: away.clamp(0.0, 1.0),
            note,
        }
    }
}

/// One category's extracted signal.
#[derive(Debug, Clone, PartialEq)]
pub struct CategorySignal {
    pub category: Category,
    pub signal: Signal,
}

impl CategorySignal {
    pub fn unavailable(category: Category) -> Self {
        Self {
            category,
            signal: Signal::Unavailable,
        }
    }

    pub fn is_available(&self) -> bool {
        matches!(self.signal, Signal::Available { .. })
    }

    /// `(home, away)` strengths; the neutral midpoint when unavailable.
    pub fn strengths(&self) -> (f64, f64) {
        match &self.signal {
            Signal::Available { home, away, .. } => (*home, *away),
            Signal::Unavailable => (0.5, 0.5),
        }
    }

    /// Home-vs-away tilt in [-1, 1], or `None` when unavailable.
    pub fn tilt(&self) -> Option<f64> {
        match &self.signal {
            Signal::Available { home, away, .. } => Some(home - away),
            Signal::Unavailable => None,
        }
    }

    pub fn note(&self) -> Option<&str> {
        match &self.signal {
            Signal::Available { note, .. } => note.as_deref(),
            Signal::Unavailable => None,
        }
    }
}

/// Run every extractor over the fixture's bundles, in canonical category
/// order. Total: missing bundles yield unavailable signals, never errors.
pub fn extract_all(sources: &FixtureSources, ctx: &FixtureContext) -> Vec<CategorySignal> {
    vec![
        form::extract(&sources.form, ctx),
        head_to_head::extract(&sources.head_to_head, ctx),
        injuries::extract(&sources.injuries, ctx),
        home_advantage::extract(&sources.standings, ctx),
        standings::extract(&sources.standings, ctx),
        live_context::extract(&sources.live_context, ctx),
    ]
}
