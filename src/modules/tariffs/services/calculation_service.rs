use serde_json::Value;
use tracing::{debug, error, info};

use crate::core::currency::format_baht;
use crate::core::Result;
use crate::modules::tariffs::models::{BillResult, BillingInput, CalculationClass, Provider};
use crate::modules::tariffs::repositories::RateCatalog;

use super::input_validator::InputValidator;
use super::strategy;

/// Entry point for bill calculation: validate, select strategy, resolve the
/// rate row, compute.
///
/// Holds only read-only references, so one instance is shared by every
/// worker.
#[derive(Debug, Clone, Copy)]
pub struct CalculationService {
    catalog: &'static RateCatalog,
    validator: InputValidator,
}

impl CalculationService {
    pub fn new(catalog: &'static RateCatalog, validator: InputValidator) -> Self {
        Self { catalog, validator }
    }

    pub fn catalog(&self) -> &'static RateCatalog {
        self.catalog
    }

    /// Validate a raw request body and compute the bill
    pub fn calculate(
        &self,
        provider: Provider,
        class: CalculationClass,
        body: &Value,
    ) -> Result<BillResult> {
        let input = self
            .validator
            .validate(self.catalog, provider, class, body)
            .inspect_err(|e| {
                debug!(
                    provider = %provider,
                    class = %class,
                    error = %e,
                    "Rejected calculation request"
                );
            })?;

        self.calculate_validated(&input)
    }

    /// Compute a bill for input that has already been validated
    pub fn calculate_validated(&self, input: &BillingInput) -> Result<BillResult> {
        let tariff = input.tariff_type();
        let strategy = strategy::select(input.class, tariff)?;

        let row = self
            .catalog
            .lookup(input.provider, input.class, tariff, input.voltage_level)
            .inspect_err(|e| {
                error!(error = %e, "Validated request has no rate row");
            })?;

        let bill = strategy.calculate(input, row)?;

        info!(
            provider = %input.provider,
            class = %input.class,
            tariff = %tariff,
            voltage = %input.voltage_level,
            sub_total = %format_baht(bill.sub_total),
            grand_total = %format_baht(bill.grand_total),
            "Bill calculated"
        );

        Ok(bill)
    }
}

impl Default for CalculationService {
    fn default() -> Self {
        Self::new(RateCatalog::global(), InputValidator::default())
    }
}
