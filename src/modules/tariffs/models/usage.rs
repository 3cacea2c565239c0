use rust_decimal::Decimal;

use super::{CalculationClass, Provider, TariffType, VoltageLevel};
use crate::core::{AppError, Result};

/// Metered consumption for one billing month, shaped by tariff type
#[derive(Debug, Clone, PartialEq)]
pub enum Usage {
    Normal {
        total_kwh: Decimal,
        /// Monthly peak demand; demand-billed classes only
        peak_kw: Option<Decimal>,
    },
    TimeOfUse {
        on_peak_kwh: Decimal,
        off_peak_kwh: Decimal,
        on_peak_kw: Option<Decimal>,
        off_peak_kw: Option<Decimal>,
    },
    TimeOfDay {
        on_peak_kw: Decimal,
        partial_peak_kw: Decimal,
        off_peak_kw: Decimal,
        total_kwh: Decimal,
    },
}

impl Usage {
    pub fn tariff_type(&self) -> TariffType {
        match self {
            Usage::Normal { .. } => TariffType::Normal,
            Usage::TimeOfUse { .. } => TariffType::Tou,
            Usage::TimeOfDay { .. } => TariffType::Tod,
        }
    }

    /// Energy used for the FT charge, all periods combined
    pub fn total_kwh(&self) -> Decimal {
        match self {
            Usage::Normal { total_kwh, .. } | Usage::TimeOfDay { total_kwh, .. } => *total_kwh,
            Usage::TimeOfUse {
                on_peak_kwh,
                off_peak_kwh,
                ..
            } => on_peak_kwh + off_peak_kwh,
        }
    }
}

/// Usage field names, relative to the `usage` object
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UsageFields {
    pub required: &'static [&'static str],
}

const NORMAL_ENERGY: UsageFields = UsageFields {
    required: &["total_kwh"],
};

const NORMAL_DEMAND: UsageFields = UsageFields {
    required: &["peak_kw", "total_kwh"],
};

const TOU_ENERGY: UsageFields = UsageFields {
    required: &["on_peak_kwh", "off_peak_kwh"],
};

// `off_peak_kw` is optional; it only feeds the power-factor reference
const TOU_DEMAND: UsageFields = UsageFields {
    required: &["on_peak_kw", "on_peak_kwh", "off_peak_kwh"],
};

const TOD_DEMAND: UsageFields = UsageFields {
    required: &["on_peak_kw", "partial_peak_kw", "off_peak_kw", "total_kwh"],
};

/// Usage fields a calculation needs for the class and tariff
pub fn usage_fields(class: CalculationClass, tariff: TariffType) -> UsageFields {
    match (tariff, class.is_demand_billed()) {
        (TariffType::Normal, false) => NORMAL_ENERGY,
        (TariffType::Normal, true) => NORMAL_DEMAND,
        (TariffType::Tou, false) => TOU_ENERGY,
        (TariffType::Tou, true) => TOU_DEMAND,
        (TariffType::Tod, _) => TOD_DEMAND,
    }
}

/// A request that passed validation; every number is finite and parsed
#[derive(Debug, Clone, PartialEq)]
pub struct BillingInput {
    pub provider: Provider,
    pub class: CalculationClass,
    pub voltage_level: VoltageLevel,
    /// Fuel adjustment rate, satang per kWh
    pub ft_rate_satang: Decimal,
    pub peak_kvar: Option<Decimal>,
    pub highest_demand_charge_last_12m: Option<Decimal>,
    pub usage: Usage,
}

impl BillingInput {
    pub fn tariff_type(&self) -> TariffType {
        self.usage.tariff_type()
    }
}

/// Unwrap a reading a strategy depends on
pub fn required_reading(field: &str, value: Option<Decimal>) -> Result<Decimal> {
    value.ok_or_else(|| AppError::missing_field(format!("usage.{}", field)))
}
