//! Tariff-agnostic charge arithmetic shared by every strategy
//!
//! All functions are pure and work on unrounded `Decimal` baht; rounding is
//! left to the presentation layer.

use rust_decimal::{Decimal, RoundingStrategy};
use rust_decimal_macros::dec;

use crate::core::currency::satang_to_baht;
use crate::core::{AppError, Result};
use crate::modules::tariffs::models::{
    BillResult, BillingInput, ChargeBreakdown, DemandCharge, EnergyRates, EnergyTier,
    PowerFactorRate, RateRow,
};

/// Value added tax (7%)
pub const VAT_RATE: Decimal = dec!(0.07);

/// Energy charge for a tiered schedule.
///
/// Each tier bills `min(remaining, width) × rate`; the last tier is unbounded
/// and takes whatever is left.
pub fn tiered_energy_charge(kwh: Decimal, tiers: &[EnergyTier]) -> Decimal {
    let mut remaining = kwh.max(Decimal::ZERO);
    let mut lower = Decimal::ZERO;
    let mut charge = Decimal::ZERO;

    for tier in tiers {
        if remaining <= Decimal::ZERO {
            break;
        }
        let billed = match tier.up_to_kwh {
            Some(upper) => remaining.min(upper - lower),
            None => remaining,
        };
        charge += billed * tier.rate;
        remaining -= billed;
        if let Some(upper) = tier.up_to_kwh {
            lower = upper;
        }
    }

    charge
}

/// Energy charge for a row whose energy pricing is not split by period
pub fn flat_energy_charge(kwh: Decimal, row: &RateRow) -> Result<Decimal> {
    match &row.energy {
        EnergyRates::Tiered { tiers } => Ok(tiered_energy_charge(kwh, tiers)),
        EnergyRates::TimeOfUse { .. } => Err(AppError::internal(
            "Rate row has time-of-use energy rates where a single schedule was expected",
        )),
    }
}

/// Energy charge for on-peak / off-peak consumption
pub fn time_of_use_energy_charge(
    on_peak_kwh: Decimal,
    off_peak_kwh: Decimal,
    row: &RateRow,
) -> Result<Decimal> {
    match &row.energy {
        EnergyRates::TimeOfUse { on_peak, off_peak } => {
            Ok(on_peak_kwh * on_peak + off_peak_kwh * off_peak)
        }
        EnergyRates::Tiered { .. } => Err(AppError::internal(
            "Rate row has no time-of-use energy rates",
        )),
    }
}

/// Apply the minimum-bill floor to a demand charge.
///
/// With a trailing 12-month highest demand charge, the billed demand is at
/// least `highest × factor`. Without history the calculated charge stands.
pub fn apply_minimum_bill(
    calculated: Decimal,
    highest_demand_charge_last_12m: Option<Decimal>,
    minimum_bill_factor: Option<Decimal>,
) -> DemandCharge {
    let effective = match (highest_demand_charge_last_12m, minimum_bill_factor) {
        (Some(highest), Some(factor)) => calculated.max(highest * factor),
        _ => calculated,
    };
    DemandCharge {
        calculated,
        effective,
    }
}

/// Excess reactive power in whole kVAR.
///
/// kVAR above `peak_kw × threshold_ratio` is billed; the excess is rounded to
/// the nearest kVAR (half away from zero) and never negative.
pub fn excess_kvar(peak_kvar: Decimal, peak_kw: Decimal, rate: &PowerFactorRate) -> Decimal {
    let excess = peak_kvar - peak_kw * rate.threshold_ratio;
    excess
        .max(Decimal::ZERO)
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
}

/// Power-factor penalty for the month
pub fn power_factor_charge(peak_kvar: Decimal, peak_kw: Decimal, rate: &PowerFactorRate) -> Decimal {
    excess_kvar(peak_kvar, peak_kw, rate) * rate.penalty_rate
}

/// Power-factor penalty for a demand-billed row; zero when the row has none
pub fn row_power_factor_charge(peak_kvar: Option<Decimal>, peak_kw: Decimal, row: &RateRow) -> Decimal {
    match (&row.power_factor, peak_kvar) {
        (Some(rate), Some(kvar)) => power_factor_charge(kvar, peak_kw, rate),
        _ => Decimal::ZERO,
    }
}

/// Fuel adjustment charge: `kWh × satang/kWh / 100`
pub fn ft_charge(total_kwh: Decimal, ft_rate_satang: Decimal) -> Decimal {
    total_kwh * satang_to_baht(ft_rate_satang)
}

pub fn vat(sub_total: Decimal) -> Decimal {
    sub_total * VAT_RATE
}

/// Turn a strategy's charges into a complete bill
pub fn summarize(input: &BillingInput, charges: ChargeBreakdown) -> BillResult {
    let ft = ft_charge(input.usage.total_kwh(), input.ft_rate_satang);
    let demand = charges.demand.map(|d| d.effective).unwrap_or(Decimal::ZERO);
    let pf = charges.pf_charge.unwrap_or(Decimal::ZERO);

    let base_tariff = demand + charges.energy_charge + pf + charges.service_charge;
    let sub_total = base_tariff + ft;
    let vat = vat(sub_total);

    BillResult {
        provider: input.provider,
        class: input.class,
        tariff_type: input.tariff_type(),
        voltage_level: input.voltage_level,
        energy_charge: charges.energy_charge,
        service_charge: charges.service_charge,
        calculated_demand_charge: charges.demand.map(|d| d.calculated),
        effective_demand_charge: charges.demand.map(|d| d.effective),
        pf_charge: charges.pf_charge,
        ft_charge: ft,
        base_tariff,
        sub_total,
        vat,
        grand_total: sub_total + vat,
    }
}
