//! Rate row: the tariff constants for one
//! (provider, calculation class, tariff type, voltage level) combination.

use rust_decimal::Decimal;
use serde::Serialize;

use crate::core::{AppError, Result};

/// One step of a tiered energy schedule.
///
/// `up_to_kwh` is the cumulative upper bound of the tier; `None` marks the
/// final, unbounded tier.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EnergyTier {
    #[serde(with = "rust_decimal::serde::float_option")]
    pub up_to_kwh: Option<Decimal>,
    #[serde(with = "rust_decimal::serde::float")]
    pub rate: Decimal,
}

impl EnergyTier {
    pub fn bounded(up_to_kwh: Decimal, rate: Decimal) -> Self {
        Self {
            up_to_kwh: Some(up_to_kwh),
            rate,
        }
    }

    pub fn unbounded(rate: Decimal) -> Self {
        Self {
            up_to_kwh: None,
            rate,
        }
    }
}

/// Energy (baht/kWh) pricing
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum EnergyRates {
    /// Ascending tiers; a single unbounded tier is a flat rate
    Tiered { tiers: Vec<EnergyTier> },
    /// Separate on-peak and off-peak prices
    #[serde(rename_all = "camelCase")]
    TimeOfUse {
        #[serde(with = "rust_decimal::serde::float")]
        on_peak: Decimal,
        #[serde(with = "rust_decimal::serde::float")]
        off_peak: Decimal,
    },
}

/// Demand (baht/kW) pricing, one rate per billed period
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum DemandRates {
    /// Energy-only classes
    None,
    /// Single monthly peak
    Flat {
        #[serde(with = "rust_decimal::serde::float")]
        rate: Decimal,
    },
    /// Only on-peak demand is billed
    #[serde(rename_all = "camelCase")]
    TimeOfUse {
        #[serde(with = "rust_decimal::serde::float")]
        on_peak: Decimal,
    },
    #[serde(rename_all = "camelCase")]
    TimeOfDay {
        #[serde(with = "rust_decimal::serde::float")]
        on_peak: Decimal,
        #[serde(with = "rust_decimal::serde::float")]
        partial_peak: Decimal,
        #[serde(with = "rust_decimal::serde::float")]
        off_peak: Decimal,
    },
}

/// Reactive power penalty constants
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PowerFactorRate {
    /// kVAR allowed per kW of peak demand before the penalty applies
    #[serde(with = "rust_decimal::serde::float")]
    pub threshold_ratio: Decimal,
    /// baht per excess kVAR
    #[serde(with = "rust_decimal::serde::float")]
    pub penalty_rate: Decimal,
}

/// Immutable tariff constants for one catalog entry
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RateRow {
    /// baht per month
    #[serde(with = "rust_decimal::serde::float")]
    pub service_charge: Decimal,
    pub energy: EnergyRates,
    pub demand: DemandRates,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub power_factor: Option<PowerFactorRate>,
    /// Fraction of the trailing 12-month highest demand charge billed at minimum
    #[serde(
        with = "rust_decimal::serde::float_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub minimum_bill_factor: Option<Decimal>,
}

impl RateRow {
    /// Check the structural invariants of the row.
    ///
    /// Tier bounds must be positive and strictly increasing, only the last
    /// tier may be unbounded and it must be. Rates must be non-negative.
    pub fn validate(&self) -> Result<()> {
        if self.service_charge < Decimal::ZERO {
            return Err(AppError::Configuration(
                "Service charge cannot be negative".to_string(),
            ));
        }

        match &self.energy {
            EnergyRates::Tiered { tiers } => Self::validate_tiers(tiers)?,
            EnergyRates::TimeOfUse { on_peak, off_peak } => {
                Self::validate_rates(&[*on_peak, *off_peak])?
            }
        }

        match &self.demand {
            DemandRates::None => {}
            DemandRates::Flat { rate } => Self::validate_rates(&[*rate])?,
            DemandRates::TimeOfUse { on_peak } => Self::validate_rates(&[*on_peak])?,
            DemandRates::TimeOfDay {
                on_peak,
                partial_peak,
                off_peak,
            } => Self::validate_rates(&[*on_peak, *partial_peak, *off_peak])?,
        }

        if let Some(factor) = self.minimum_bill_factor {
            if factor < Decimal::ZERO || factor > Decimal::ONE {
                return Err(AppError::Configuration(format!(
                    "Minimum bill factor must be between 0 and 1, got {}",
                    factor
                )));
            }
        }

        Ok(())
    }

    fn validate_tiers(tiers: &[EnergyTier]) -> Result<()> {
        let Some((last, bounded)) = tiers.split_last() else {
            return Err(AppError::Configuration(
                "Tiered energy rates need at least one tier".to_string(),
            ));
        };

        if last.up_to_kwh.is_some() {
            return Err(AppError::Configuration(
                "The last energy tier must be unbounded".to_string(),
            ));
        }

        let mut previous = Decimal::ZERO;
        for tier in bounded {
            let bound = tier.up_to_kwh.ok_or_else(|| {
                AppError::Configuration("Only the last energy tier may be unbounded".to_string())
            })?;
            if bound <= previous {
                return Err(AppError::Configuration(format!(
                    "Energy tier bounds must be strictly increasing ({} after {})",
                    bound, previous
                )));
            }
            previous = bound;
        }

        let rates: Vec<Decimal> = tiers.iter().map(|t| t.rate).collect();
        Self::validate_rates(&rates)
    }

    fn validate_rates(rates: &[Decimal]) -> Result<()> {
        if rates.iter().any(|r| *r < Decimal::ZERO) {
            return Err(AppError::Configuration(
                "Tariff rates cannot be negative".to_string(),
            ));
        }
        Ok(())
    }
}
