//! Data acquisition collaborators.
//!
//! Everything here sits OUTSIDE the pipeline core: the core only ever sees
//! a fully materialized `RawTable`.
//!
//! - `sheet`: Google Sheets fetch (network, API key)
//! - `cache`: time-boxed snapshot cache with explicit invalidation
//! - `sample`: built-in demo dataset

pub mod cache;
pub mod sample;
pub mod sheet;

pub use cache::*;
pub use sample::*;
pub use sheet::*;
