//! Core types for the Crypto Dashboard backend
//!
//! This crate defines the shared data structures used across the dashboard,
//! including the tracked assets, per-asset snapshots and the combined record
//! served to the frontend.

pub mod asset;
pub mod error;
pub mod record;

pub use asset::{Asset, TRACKED_ASSETS};
pub use error::{DashboardError, DashboardResult};
pub use record::{CombinedRecord, CurrentSnapshot, HistoricalSeries, PricePoint};
