pub mod bill;
pub mod calculation_class;
pub mod provider;
pub mod rate_row;
pub mod tariff_type;
pub mod usage;
pub mod voltage_level;

pub use bill::{BillResult, ChargeBreakdown, DemandCharge};
pub use calculation_class::CalculationClass;
pub use provider::Provider;
pub use rate_row::{DemandRates, EnergyRates, EnergyTier, PowerFactorRate, RateRow};
pub use tariff_type::TariffType;
pub use usage::{required_reading, usage_fields, BillingInput, Usage, UsageFields};
pub use voltage_level::VoltageLevel;
