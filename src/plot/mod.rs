//! ASCII/Unicode plotting for terminal output.

pub mod ascii;

pub use ascii::*;
