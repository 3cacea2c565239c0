//! Static rate catalog
//!
//! Holds every rate row keyed by (provider, class, tariff, voltage). The
//! tables are built once on first use and shared read-only afterwards.

use std::collections::HashMap;
use std::sync::LazyLock;

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::core::{AppError, Result};
use crate::modules::tariffs::models::{
    CalculationClass, DemandRates, EnergyRates, EnergyTier, PowerFactorRate, Provider, RateRow,
    TariffType, VoltageLevel,
};

use super::{mea_rates, pea_rates};

/// Tariff schedule the tables were transcribed from. FT is supplied per request.
pub const SCHEDULE_VERSION: &str = "2023-09 retail tariff (base rates excluding FT)";

/// kVAR allowed per kW of peak demand (tan(acos(0.85)))
pub const PF_THRESHOLD_RATIO: Decimal = dec!(0.6197);

/// baht per excess kVAR per month
pub const PF_PENALTY_RATE: Decimal = dec!(56.07);

/// Share of the 12-month highest demand charge billed at minimum
pub const MINIMUM_BILL_FACTOR: Decimal = dec!(0.70);

/// Monthly service charge for small low-voltage connections
pub const SMALL_SERVICE_CHARGE: Decimal = dec!(33.29);

/// Monthly service charge for every other connection
pub const STANDARD_SERVICE_CHARGE: Decimal = dec!(312.24);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RateKey {
    pub provider: Provider,
    pub class: CalculationClass,
    pub tariff: TariffType,
    pub voltage: VoltageLevel,
}

impl RateKey {
    pub fn new(
        provider: Provider,
        class: CalculationClass,
        tariff: TariffType,
        voltage: VoltageLevel,
    ) -> Self {
        Self {
            provider,
            class,
            tariff,
            voltage,
        }
    }
}

impl std::fmt::Display for RateKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} {} {} {}",
            self.provider, self.class, self.tariff, self.voltage
        )
    }
}

static STANDARD_CATALOG: LazyLock<RateCatalog> = LazyLock::new(RateCatalog::standard);

/// Read-only lookup over all rate rows
#[derive(Debug, Clone, Default)]
pub struct RateCatalog {
    rows: HashMap<RateKey, RateRow>,
}

impl RateCatalog {
    /// The process-wide catalog of MEA and PEA rates
    pub fn global() -> &'static RateCatalog {
        &STANDARD_CATALOG
    }

    /// Build the MEA and PEA tables
    pub fn standard() -> Self {
        let rows = mea_rates::rows()
            .into_iter()
            .chain(pea_rates::rows())
            .collect();
        Self { rows }
    }

    /// Build a catalog from explicit rows, validating each one
    pub fn from_rows(rows: impl IntoIterator<Item = (RateKey, RateRow)>) -> Result<Self> {
        let mut catalog = Self::default();
        for (key, row) in rows {
            row.validate()
                .map_err(|e| AppError::Configuration(format!("{}: {}", key, e)))?;
            if catalog.rows.insert(key, row).is_some() {
                return Err(AppError::Configuration(format!(
                    "Duplicate rate row for {}",
                    key
                )));
            }
        }
        Ok(catalog)
    }

    /// Resolve the rate row for a fully specified combination
    pub fn lookup(
        &self,
        provider: Provider,
        class: CalculationClass,
        tariff: TariffType,
        voltage: VoltageLevel,
    ) -> Result<&RateRow> {
        let key = RateKey::new(provider, class, tariff, voltage);
        self.rows
            .get(&key)
            .ok_or_else(|| AppError::RateNotFound(key.to_string()))
    }

    /// Voltage levels that have a row for the combination, provider order
    pub fn voltage_levels(
        &self,
        provider: Provider,
        class: CalculationClass,
        tariff: TariffType,
    ) -> Vec<VoltageLevel> {
        provider
            .voltage_levels()
            .iter()
            .copied()
            .filter(|voltage| {
                self.rows
                    .contains_key(&RateKey::new(provider, class, tariff, *voltage))
            })
            .collect()
    }

    /// Check every row invariant and that every legal (class, tariff) pair
    /// has at least one voltage level
    pub fn verify(&self) -> Result<()> {
        for (key, row) in &self.rows {
            row.validate()
                .map_err(|e| AppError::Configuration(format!("{}: {}", key, e)))?;
            if !key.provider.voltage_levels().contains(&key.voltage) {
                return Err(AppError::Configuration(format!(
                    "{} is not served at {}",
                    key.provider, key.voltage
                )));
            }
            if !key.class.supports(key.tariff) {
                return Err(AppError::Configuration(format!(
                    "Rate row for unsupported combination {}",
                    key
                )));
            }
        }

        for provider in Provider::ALL {
            for class in CalculationClass::ALL {
                for tariff in class.allowed_tariffs() {
                    if self.voltage_levels(provider, class, *tariff).is_empty() {
                        return Err(AppError::Configuration(format!(
                            "No rates for {} {} {}",
                            provider, class, tariff
                        )));
                    }
                }
            }
        }

        Ok(())
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

// Row builders shared by the provider tables

fn power_factor() -> Option<PowerFactorRate> {
    Some(PowerFactorRate {
        threshold_ratio: PF_THRESHOLD_RATIO,
        penalty_rate: PF_PENALTY_RATE,
    })
}

/// Energy-only row with tiered (or single flat) energy pricing
pub(super) fn energy_row(service_charge: Decimal, tiers: Vec<EnergyTier>) -> RateRow {
    RateRow {
        service_charge,
        energy: EnergyRates::Tiered { tiers },
        demand: DemandRates::None,
        power_factor: None,
        minimum_bill_factor: None,
    }
}

/// Energy-only row with on-peak / off-peak energy pricing
pub(super) fn energy_tou_row(service_charge: Decimal, on_peak: Decimal, off_peak: Decimal) -> RateRow {
    RateRow {
        service_charge,
        energy: EnergyRates::TimeOfUse { on_peak, off_peak },
        demand: DemandRates::None,
        power_factor: None,
        minimum_bill_factor: None,
    }
}

/// Demand-billed row with a single demand rate and flat energy
pub(super) fn demand_row(demand_rate: Decimal, energy_rate: Decimal) -> RateRow {
    RateRow {
        service_charge: STANDARD_SERVICE_CHARGE,
        energy: EnergyRates::Tiered {
            tiers: vec![EnergyTier::unbounded(energy_rate)],
        },
        demand: DemandRates::Flat { rate: demand_rate },
        power_factor: power_factor(),
        minimum_bill_factor: Some(MINIMUM_BILL_FACTOR),
    }
}

/// Demand-billed TOU row: on-peak demand, split energy
pub(super) fn demand_tou_row(on_peak_demand: Decimal, on_peak_energy: Decimal, off_peak_energy: Decimal) -> RateRow {
    RateRow {
        service_charge: STANDARD_SERVICE_CHARGE,
        energy: EnergyRates::TimeOfUse {
            on_peak: on_peak_energy,
            off_peak: off_peak_energy,
        },
        demand: DemandRates::TimeOfUse {
            on_peak: on_peak_demand,
        },
        power_factor: power_factor(),
        minimum_bill_factor: Some(MINIMUM_BILL_FACTOR),
    }
}

/// Demand-billed TOD row: three demand periods, flat energy
pub(super) fn demand_tod_row(
    on_peak: Decimal,
    partial_peak: Decimal,
    off_peak: Decimal,
    energy_rate: Decimal,
) -> RateRow {
    RateRow {
        service_charge: STANDARD_SERVICE_CHARGE,
        energy: EnergyRates::Tiered {
            tiers: vec![EnergyTier::unbounded(energy_rate)],
        },
        demand: DemandRates::TimeOfDay {
            on_peak,
            partial_peak,
            off_peak,
        },
        power_factor: power_factor(),
        minimum_bill_factor: Some(MINIMUM_BILL_FACTOR),
    }
}
