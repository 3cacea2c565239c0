//! Thai Electricity Tariff Engine Library
//!
//! Computes monthly electricity bills for MEA and PEA customers under the
//! normal, time-of-use and time-of-day tariffs.

pub mod config;
pub mod core;
pub mod modules;

// Re-export commonly used types
pub use modules::health;
pub use modules::tariffs;
