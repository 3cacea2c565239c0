use crate::core::{AppError, Result};
use crate::modules::tariffs::models::{
    BillResult, BillingInput, CalculationClass, RateRow, TariffType,
};

use super::normal_tariff::NormalTariff;
use super::tod_tariff::TimeOfDayTariff;
use super::tou_tariff::TimeOfUseTariff;

/// A billing formula for one tariff type.
///
/// Strategies hold no state: provider, class and voltage specifics arrive
/// through the rate row, so one instance serves every request.
pub trait TariffStrategy: Send + Sync {
    fn tariff_type(&self) -> TariffType;

    /// Calculation classes this formula can bill
    fn supports(&self, class: CalculationClass) -> bool;

    /// Compute the itemized bill for validated input against its rate row
    fn calculate(&self, input: &BillingInput, row: &RateRow) -> Result<BillResult>;
}

static NORMAL: NormalTariff = NormalTariff;
static TIME_OF_USE: TimeOfUseTariff = TimeOfUseTariff;
static TIME_OF_DAY: TimeOfDayTariff = TimeOfDayTariff;

/// Resolve the strategy for a class and tariff type.
///
/// Fails with `UnsupportedCombination` when the class does not offer the
/// tariff (e.g. "normal" for Type 4).
pub fn select(class: CalculationClass, tariff: TariffType) -> Result<&'static dyn TariffStrategy> {
    if !class.supports(tariff) {
        return Err(unsupported(class, tariff));
    }

    let strategy: &'static dyn TariffStrategy = match tariff {
        TariffType::Normal => &NORMAL,
        TariffType::Tou => &TIME_OF_USE,
        TariffType::Tod => &TIME_OF_DAY,
    };
    Ok(strategy)
}

pub(super) fn unsupported(class: CalculationClass, tariff: TariffType) -> AppError {
    AppError::UnsupportedCombination {
        class: class.to_string(),
        tariff: tariff.to_string(),
    }
}

/// Guard used by strategies before any arithmetic runs
pub(super) fn ensure_supported(
    strategy: &dyn TariffStrategy,
    input: &BillingInput,
) -> Result<()> {
    if input.tariff_type() != strategy.tariff_type() || !strategy.supports(input.class) {
        return Err(unsupported(input.class, strategy.tariff_type()));
    }
    Ok(())
}
