//! Football Match Outcome Prediction Engine
//!
//! Converts several independently fetched, often-incomplete signal sources
//! about a fixture into one coherent prediction.
//!
//! ## Architecture
//!
//! ```text
//! DataProvider (form/h2h/injuries/standings/live) → Factor Extractors
//!         → Weighted Aggregator → Confidence Scorer → Value Bets → Summary
//!                                      ↑
//!                  Orchestrator (concurrent fetches, partial-failure policy)
//! ```
//!
//! The engine consumes typed per-source bundles and emits a typed
//! [`types::PredictionResult`]. It does not fetch data itself, persist
//! anything, or know about HTTP.

pub mod config;
pub mod engine;
pub mod error;
pub mod factors;
pub mod orchestrator;
pub mod provider;
pub mod types;

#[cfg(test)]
mod types_tests;
