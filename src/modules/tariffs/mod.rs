// Tariffs module

pub mod controllers;
pub mod models;
pub mod repositories;
pub mod services;

pub use models::{BillResult, BillingInput, CalculationClass, Provider, RateRow, TariffType, Usage, VoltageLevel};
pub use repositories::RateCatalog;
pub use services::{CalculationService, InputValidator, TariffStrategy};
