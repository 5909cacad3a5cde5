//! Core domain types and logic.

pub mod error;
pub mod format;
pub mod recalc;
pub mod stock;
pub mod transaction;
