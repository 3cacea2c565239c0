use rust_decimal::Decimal;

use crate::core::{AppError, Result};
use crate::modules::tariffs::models::{
    required_reading, BillResult, BillingInput, CalculationClass, ChargeBreakdown, DemandRates,
    RateRow, TariffType, Usage,
};

use super::charges;
use super::strategy::{ensure_supported, TariffStrategy};

/// Normal tariff: tiered energy for Type 2, single demand reading plus flat
/// energy for Types 3 and 5
pub struct NormalTariff;

impl NormalTariff {
    fn energy_only(&self, total_kwh: Decimal, row: &RateRow) -> Result<ChargeBreakdown> {
        Ok(ChargeBreakdown {
            energy_charge: charges::flat_energy_charge(total_kwh, row)?,
            service_charge: row.service_charge,
            demand: None,
            pf_charge: None,
        })
    }

    fn demand_billed(
        &self,
        input: &BillingInput,
        total_kwh: Decimal,
        peak_kw: Decimal,
        row: &RateRow,
    ) -> Result<ChargeBreakdown> {
        let DemandRates::Flat { rate } = row.demand else {
            return Err(AppError::internal(
                "Normal tariff rate row has no flat demand rate",
            ));
        };

        let demand = charges::apply_minimum_bill(
            peak_kw * rate,
            input.highest_demand_charge_last_12m,
            row.minimum_bill_factor,
        );

        Ok(ChargeBreakdown {
            energy_charge: charges::flat_energy_charge(total_kwh, row)?,
            service_charge: row.service_charge,
            demand: Some(demand),
            pf_charge: Some(charges::row_power_factor_charge(
                input.peak_kvar,
                peak_kw,
                row,
            )),
        })
    }
}

impl TariffStrategy for NormalTariff {
    fn tariff_type(&self) -> TariffType {
        TariffType::Normal
    }

    fn supports(&self, class: CalculationClass) -> bool {
        matches!(
            class,
            CalculationClass::Type2 | CalculationClass::Type3 | CalculationClass::Type5
        )
    }

    fn calculate(&self, input: &BillingInput, row: &RateRow) -> Result<BillResult> {
        ensure_supported(self, input)?;

        let Usage::Normal { total_kwh, peak_kw } = input.usage else {
            return Err(AppError::internal("Normal tariff received non-normal usage"));
        };

        let breakdown = if input.class.is_demand_billed() {
            let peak_kw = required_reading("peak_kw", peak_kw)?;
            self.demand_billed(input, total_kwh, peak_kw, row)?
        } else {
            self.energy_only(total_kwh, row)?
        };

        Ok(charges::summarize(input, breakdown))
    }
}
