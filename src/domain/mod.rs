//! Domain types used throughout the pipeline.
//!
//! This module defines:
//!
//! - validated job records (`Job`) and the month viewing window (`Window`)
//! - derived views (`ClippedJob`, `DailySpendPoint`, `CumulativePoint`, `KpiSnapshot`)
//! - run configuration (`DashConfig`, `DataSource`)
//! - the saved-dashboard JSON schema (`DashboardFile`)

pub mod types;

pub use types::*;
