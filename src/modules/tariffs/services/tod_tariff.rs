use crate::core::{AppError, Result};
use crate::modules::tariffs::models::{
    BillResult, BillingInput, CalculationClass, ChargeBreakdown, DemandRates, RateRow, TariffType,
    Usage,
};

use super::charges;
use super::strategy::{ensure_supported, TariffStrategy};

/// Time-of-day tariff for large general business (Type 4).
///
/// Demand is billed in three periods; energy is a single flat rate.
pub struct TimeOfDayTariff;

impl TariffStrategy for TimeOfDayTariff {
    fn tariff_type(&self) -> TariffType {
        TariffType::Tod
    }

    fn supports(&self, class: CalculationClass) -> bool {
        class == CalculationClass::Type4
    }

    fn calculate(&self, input: &BillingInput, row: &RateRow) -> Result<BillResult> {
        ensure_supported(self, input)?;

        let Usage::TimeOfDay {
            on_peak_kw,
            partial_peak_kw,
            off_peak_kw,
            total_kwh,
        } = input.usage
        else {
            return Err(AppError::internal("TOD tariff received non-TOD usage"));
        };

        let DemandRates::TimeOfDay {
            on_peak,
            partial_peak,
            off_peak,
        } = row.demand
        else {
            return Err(AppError::internal(
                "TOD rate row has no three-period demand rates",
            ));
        };

        let calculated =
            on_peak_kw * on_peak + partial_peak_kw * partial_peak + off_peak_kw * off_peak;
        let demand = charges::apply_minimum_bill(
            calculated,
            input.highest_demand_charge_last_12m,
            row.minimum_bill_factor,
        );

        let overall_peak_kw = on_peak_kw.max(partial_peak_kw).max(off_peak_kw);
        let pf_charge = charges::row_power_factor_charge(input.peak_kvar, overall_peak_kw, row);

        Ok(charges::summarize(
            input,
            ChargeBreakdown {
                energy_charge: charges::flat_energy_charge(total_kwh, row)?,
                service_charge: row.service_charge,
                demand: Some(demand),
                pf_charge: Some(pf_charge),
            },
        ))
    }
}
