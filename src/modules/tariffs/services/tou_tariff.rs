use rust_decimal::Decimal;

use crate::core::{AppError, Result};
use crate::modules::tariffs::models::{
    required_reading, BillResult, BillingInput, CalculationClass, ChargeBreakdown, DemandRates,
    RateRow, TariffType, Usage,
};

use super::charges;
use super::strategy::{ensure_supported, TariffStrategy};

/// Time-of-use tariff.
///
/// Energy is split into on-peak and off-peak prices. Demand-billed classes pay
/// for on-peak demand only; off-peak demand just sets the power-factor
/// reference.
pub struct TimeOfUseTariff;

impl TariffStrategy for TimeOfUseTariff {
    fn tariff_type(&self) -> TariffType {
        TariffType::Tou
    }

    fn supports(&self, _class: CalculationClass) -> bool {
        true
    }

    fn calculate(&self, input: &BillingInput, row: &RateRow) -> Result<BillResult> {
        ensure_supported(self, input)?;

        let Usage::TimeOfUse {
            on_peak_kwh,
            off_peak_kwh,
            on_peak_kw,
            off_peak_kw,
        } = input.usage
        else {
            return Err(AppError::internal("TOU tariff received non-TOU usage"));
        };

        let energy_charge = charges::time_of_use_energy_charge(on_peak_kwh, off_peak_kwh, row)?;

        let (demand, pf_charge) = if input.class.is_demand_billed() {
            let on_peak_kw = required_reading("on_peak_kw", on_peak_kw)?;
            let DemandRates::TimeOfUse { on_peak } = row.demand else {
                return Err(AppError::internal(
                    "TOU rate row has no on-peak demand rate",
                ));
            };

            let demand = charges::apply_minimum_bill(
                on_peak_kw * on_peak,
                input.highest_demand_charge_last_12m,
                row.minimum_bill_factor,
            );
            let overall_peak_kw = on_peak_kw.max(off_peak_kw.unwrap_or(Decimal::ZERO));
            let pf = charges::row_power_factor_charge(input.peak_kvar, overall_peak_kw, row);
            (Some(demand), Some(pf))
        } else {
            (None, None)
        };

        Ok(charges::summarize(
            input,
            ChargeBreakdown {
                energy_charge,
                service_charge: row.service_charge,
                demand,
                pf_charge,
            },
        ))
    }
}
