//! # Tradesight Risk Alerts
//!
//! Stateless threshold rules applied over the analytics engine's outputs and
//! the raw record set: drawdown depth over a trailing window, consecutive
//! losing trades, and per-strategy win-rate performance.
//!
//! Like the rest of the engine, this crate is pure: alerts are recomputed on
//! every call from the current record set and never persisted.

pub mod error;
pub mod evaluator;

// Re-export the core types to provide a clean public API.
pub use error::RiskError;
pub use evaluator::{RiskAlert, RiskAlertEvaluator, Severity};
