//! Request validation
//!
//! Turns a raw JSON body into a `BillingInput`. Checks run in a fixed order
//! and stop at the first failure:
//!
//! 1. body present and non-empty
//! 2. required top-level fields present
//! 3. tariff type legal for the class
//! 4. voltage level legal for the provider
//! 5. required usage readings present
//! 6. every number finite, within `MAX_MAGNITUDE` and non-negative unless
//!    configured otherwise

use std::str::FromStr;

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde_json::{Map, Value};

use crate::core::error::format_choices;
use crate::core::{AppError, Result};
use crate::modules::tariffs::models::{
    usage_fields, BillingInput, CalculationClass, Provider, TariffType, Usage, VoltageLevel,
};
use crate::modules::tariffs::repositories::RateCatalog;

const TARIFF_TYPE: &str = "tariffType";
const VOLTAGE_LEVEL: &str = "voltageLevel";
const FT_RATE_SATANG: &str = "ftRateSatang";
const PEAK_KVAR: &str = "peakKvar";
const HIGHEST_DEMAND_CHARGE: &str = "highestDemandChargeLast12m";
const USAGE: &str = "usage";

/// Largest accepted magnitude for any input number. Every charge multiplies
/// one input by a catalog rate, which stays far inside `Decimal` range.
pub const MAX_MAGNITUDE: Decimal = dec!(1000000000000);

/// Validates calculation requests against the catalog's legal combinations
#[derive(Debug, Clone, Copy)]
pub struct InputValidator {
    reject_negative_values: bool,
}

impl InputValidator {
    pub fn new(reject_negative_values: bool) -> Self {
        Self {
            reject_negative_values,
        }
    }

    pub fn rejects_negative_values(&self) -> bool {
        self.reject_negative_values
    }

    pub fn validate(
        &self,
        catalog: &RateCatalog,
        provider: Provider,
        class: CalculationClass,
        body: &Value,
    ) -> Result<BillingInput> {
        let fields = match body {
            Value::Object(map) if !map.is_empty() => map,
            _ => return Err(AppError::EmptyBody),
        };

        for name in required_fields(class) {
            if is_missing(fields.get(*name)) {
                return Err(AppError::missing_field(*name));
            }
        }

        let tariff = parse_tariff_type(class, &fields[TARIFF_TYPE])?;
        let voltage_level = parse_voltage_level(
            catalog,
            provider,
            class,
            tariff,
            &fields[VOLTAGE_LEVEL],
        )?;

        let usage = fields[USAGE].as_object().ok_or_else(|| AppError::InvalidType {
            field: USAGE.to_string(),
            expected: "an object",
        })?;
        for name in usage_fields(class, tariff).required {
            if is_missing(usage.get(*name)) {
                return Err(AppError::missing_field(format!("{}.{}", USAGE, name)));
            }
        }

        let ft_rate_satang = self.required_number(fields, FT_RATE_SATANG, FT_RATE_SATANG)?;
        let peak_kvar = self.optional_number(fields, PEAK_KVAR, PEAK_KVAR)?;
        let highest_demand_charge_last_12m =
            self.optional_number(fields, HIGHEST_DEMAND_CHARGE, HIGHEST_DEMAND_CHARGE)?;
        let usage = self.parse_usage(class, tariff, usage)?;

        Ok(BillingInput {
            provider,
            class,
            voltage_level,
            ft_rate_satang,
            peak_kvar,
            highest_demand_charge_last_12m,
            usage,
        })
    }

    fn parse_usage(
        &self,
        class: CalculationClass,
        tariff: TariffType,
        usage: &Map<String, Value>,
    ) -> Result<Usage> {
        let reading = |name: &str| self.optional_number(usage, name, &format!("{}.{}", USAGE, name));
        let required = |name: &str| {
            self.required_number(usage, name, &format!("{}.{}", USAGE, name))
        };
        // Parsed for every class; energy-only classes then drop the value
        let demand_reading = |name: &str| {
            reading(name).map(|value| value.filter(|_| class.is_demand_billed()))
        };

        let parsed = match tariff {
            TariffType::Normal => Usage::Normal {
                total_kwh: required("total_kwh")?,
                peak_kw: demand_reading("peak_kw")?,
            },
            TariffType::Tou => Usage::TimeOfUse {
                on_peak_kwh: required("on_peak_kwh")?,
                off_peak_kwh: required("off_peak_kwh")?,
                on_peak_kw: demand_reading("on_peak_kw")?,
                off_peak_kw: demand_reading("off_peak_kw")?,
            },
            TariffType::Tod => Usage::TimeOfDay {
                on_peak_kw: required("on_peak_kw")?,
                partial_peak_kw: required("partial_peak_kw")?,
                off_peak_kw: required("off_peak_kw")?,
                total_kwh: required("total_kwh")?,
            },
        };

        Ok(parsed)
    }

    fn required_number(&self, map: &Map<String, Value>, key: &str, field: &str) -> Result<Decimal> {
        self.optional_number(map, key, field)?
            .ok_or_else(|| AppError::missing_field(field))
    }

    fn optional_number(
        &self,
        map: &Map<String, Value>,
        key: &str,
        field: &str,
    ) -> Result<Option<Decimal>> {
        let value = map.get(key);
        if is_missing(value) {
            return Ok(None);
        }

        let number = value
            .and_then(parse_decimal)
            .ok_or_else(|| AppError::invalid_number(field))?;

        if self.reject_negative_values && number < Decimal::ZERO {
            return Err(AppError::negative_value(field));
        }

        if number.abs() > MAX_MAGNITUDE {
            return Err(AppError::ValueOutOfRange {
                field: field.to_string(),
                max: MAX_MAGNITUDE,
            });
        }

        Ok(Some(number))
    }
}

impl Default for InputValidator {
    fn default() -> Self {
        Self::new(true)
    }
}

fn required_fields(class: CalculationClass) -> &'static [&'static str] {
    if class.is_demand_billed() {
        &[TARIFF_TYPE, VOLTAGE_LEVEL, USAGE, FT_RATE_SATANG, PEAK_KVAR]
    } else {
        &[TARIFF_TYPE, VOLTAGE_LEVEL, USAGE, FT_RATE_SATANG]
    }
}

/// `null`, absent and blank strings all count as missing
fn is_missing(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => true,
        Some(Value::String(s)) => s.trim().is_empty(),
        Some(_) => false,
    }
}

/// Text of a value as it appears in error messages
fn received(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Accept JSON numbers and numeric strings; reject anything non-finite
fn parse_decimal(value: &Value) -> Option<Decimal> {
    let text = match value {
        Value::Number(n) => n.to_string(),
        Value::String(s) => s.trim().to_string(),
        _ => return None,
    };
    Decimal::from_str(&text)
        .or_else(|_| Decimal::from_scientific(&text))
        .ok()
}

fn parse_tariff_type(class: CalculationClass, value: &Value) -> Result<TariffType> {
    let allowed = class.allowed_tariffs();
    value
        .as_str()
        .and_then(|s| s.parse::<TariffType>().ok())
        .filter(|tariff| allowed.contains(tariff))
        .ok_or_else(|| AppError::InvalidTariffType {
            class: class.to_string(),
            allowed: format_choices(allowed),
            received: received(value),
        })
}

fn parse_voltage_level(
    catalog: &RateCatalog,
    provider: Provider,
    class: CalculationClass,
    tariff: TariffType,
    value: &Value,
) -> Result<VoltageLevel> {
    let allowed = catalog.voltage_levels(provider, class, tariff);
    value
        .as_str()
        .and_then(|s| s.parse::<VoltageLevel>().ok())
        .filter(|level| allowed.contains(level))
        .ok_or_else(|| AppError::InvalidVoltageLevel {
            provider: provider.to_string(),
            allowed: format_choices(&allowed),
            received: received(value),
        })
}
