//! Input/output helpers.
//!
//! - CSV table loading (`table`)
//! - spend-series CSV and dashboard JSON exports (`export`)

pub mod export;
pub mod table;

pub use export::*;
pub use table::*;
