//! # Tradesight Core Types
//!
//! This crate defines the foundational data structures shared by the entire
//! analytics workspace: the raw trade record exactly as the surrounding
//! journal application hands it over, and its canonical, fully-typed form.
//!
//! As a Layer 0 crate it has no knowledge of any other part of the system.

pub mod error;
pub mod record;

// Re-export the core types to provide a clean public API.
pub use error::CoreError;
pub use record::{NO_STRATEGY, RawTradeRecord, TradeRecord};
