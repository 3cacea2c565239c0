use rust_decimal::Decimal;

use super::{CalculationClass, Provider, TariffType, VoltageLevel};

/// Demand charge before and after the minimum-bill floor
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DemandCharge {
    pub calculated: Decimal,
    pub effective: Decimal,
}

/// Charges produced by a strategy before FT, VAT and totals are applied
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChargeBreakdown {
    pub energy_charge: Decimal,
    pub service_charge: Decimal,
    pub demand: Option<DemandCharge>,
    pub pf_charge: Option<Decimal>,
}

/// An itemized monthly bill. Amounts are unrounded baht.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BillResult {
    pub provider: Provider,
    pub class: CalculationClass,
    pub tariff_type: TariffType,
    pub voltage_level: VoltageLevel,
    pub energy_charge: Decimal,
    pub service_charge: Decimal,
    pub calculated_demand_charge: Option<Decimal>,
    pub effective_demand_charge: Option<Decimal>,
    pub pf_charge: Option<Decimal>,
    pub ft_charge: Decimal,
    /// Everything except the FT charge and VAT
    pub base_tariff: Decimal,
    pub sub_total: Decimal,
    pub vat: Decimal,
    pub grand_total: Decimal,
}

impl BillResult {
    pub fn is_demand_billed(&self) -> bool {
        self.calculated_demand_charge.is_some()
    }
}
