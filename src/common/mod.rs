//! Shared types, coercion and formatting helpers

pub mod coercion;
pub mod errors;
pub mod format;
pub mod types;
