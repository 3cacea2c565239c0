pub mod mea_rates;
pub mod pea_rates;
pub mod rate_catalog;

pub use rate_catalog::{RateCatalog, RateKey, SCHEDULE_VERSION};
