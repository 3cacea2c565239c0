//! Tariff controller for HTTP endpoints
//!
//! Parses path parameters and the raw JSON body, hands them to the
//! `CalculationService` and shapes the bill for the wire. Amounts are rounded
//! to satang here and nowhere else.

use actix_web::{web, HttpResponse, ResponseError};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::core::currency::round_baht;
use crate::core::{AppError, Result};
use crate::modules::tariffs::models::{
    BillResult, CalculationClass, Provider, RateRow, TariffType, VoltageLevel,
};
use crate::modules::tariffs::repositories::SCHEDULE_VERSION;
use crate::modules::tariffs::services::CalculationService;

/// Bill as returned to clients.
///
/// Energy-only bills carry `totalBill`; demand-billed ones carry `grandTotal`
/// along with the demand and power-factor lines.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BillResponse {
    #[serde(with = "rust_decimal::serde::float")]
    pub energy_charge: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub service_charge: Decimal,
    #[serde(
        with = "rust_decimal::serde::float_option",
        skip_serializing_if = "Option::is_none",
        default
    )]
    pub calculated_demand_charge: Option<Decimal>,
    #[serde(
        with = "rust_decimal::serde::float_option",
        skip_serializing_if = "Option::is_none",
        default
    )]
    pub effective_demand_charge: Option<Decimal>,
    #[serde(
        with = "rust_decimal::serde::float_option",
        skip_serializing_if = "Option::is_none",
        default
    )]
    pub pf_charge: Option<Decimal>,
    #[serde(with = "rust_decimal::serde::float")]
    pub ft_charge: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub base_tariff: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub sub_total: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub vat: Decimal,
    #[serde(
        with = "rust_decimal::serde::float_option",
        skip_serializing_if = "Option::is_none",
        default
    )]
    pub total_bill: Option<Decimal>,
    #[serde(
        with = "rust_decimal::serde::float_option",
        skip_serializing_if = "Option::is_none",
        default
    )]
    pub grand_total: Option<Decimal>,
}

impl From<&BillResult> for BillResponse {
    fn from(bill: &BillResult) -> Self {
        let total = round_baht(bill.grand_total);
        let (total_bill, grand_total) = if bill.is_demand_billed() {
            (None, Some(total))
        } else {
            (Some(total), None)
        };

        Self {
            energy_charge: round_baht(bill.energy_charge),
            service_charge: round_baht(bill.service_charge),
            calculated_demand_charge: bill.calculated_demand_charge.map(round_baht),
            effective_demand_charge: bill.effective_demand_charge.map(round_baht),
            pf_charge: bill.pf_charge.map(round_baht),
            ft_charge: round_baht(bill.ft_charge),
            base_tariff: round_baht(bill.base_tariff),
            sub_total: round_baht(bill.sub_total),
            vat: round_baht(bill.vat),
            total_bill,
            grand_total,
        }
    }
}

/// Rate rows for one (provider, class, tariff) block
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RateBlockResponse {
    pub provider: Provider,
    pub calculation_type: CalculationClass,
    pub tariff_type: TariffType,
    pub schedule_version: &'static str,
    pub rates: Vec<VoltageRate>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VoltageRate {
    pub voltage_level: VoltageLevel,
    pub rate: RateRow,
}

fn parse_provider(raw: &str) -> Result<Provider> {
    raw.parse().map_err(AppError::not_found)
}

fn parse_class(raw: &str) -> Result<CalculationClass> {
    raw.parse().map_err(AppError::not_found)
}

/// Empty bodies become `null` so the validator reports them uniformly
fn parse_body(body: &[u8]) -> Result<Value> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(Value::Null);
    }
    Ok(serde_json::from_slice(body)?)
}

fn calculate(
    service: &CalculationService,
    path: &(String, String),
    body: &[u8],
) -> Result<BillResponse> {
    let provider = parse_provider(&path.0)?;
    let class = parse_class(&path.1)?;
    let body = parse_body(body)?;

    let bill = service.calculate(provider, class, &body)?;
    Ok(BillResponse::from(&bill))
}

/// Calculate a bill, flat response
///
/// POST /api/v1/{provider}/calculate/{calculationType}
pub async fn calculate_v1(
    service: web::Data<CalculationService>,
    path: web::Path<(String, String)>,
    body: web::Bytes,
) -> std::result::Result<HttpResponse, AppError> {
    let bill = calculate(service.get_ref(), &path, &body)?;
    Ok(HttpResponse::Ok().json(bill))
}

/// Calculate a bill, `{ success, data }` envelope
///
/// POST /api/v2/{provider}/calculate/{calculationType}
pub async fn calculate_v2(
    service: web::Data<CalculationService>,
    path: web::Path<(String, String)>,
    body: web::Bytes,
) -> HttpResponse {
    match calculate(service.get_ref(), &path, &body) {
        Ok(bill) => HttpResponse::Ok().json(serde_json::json!({
            "success": true,
            "data": bill,
        })),
        Err(err) => {
            if err.is_server_fault() {
                tracing::error!(error = %err, "Tariff engine fault");
            }
            HttpResponse::build(err.status_code()).json(serde_json::json!({
                "success": false,
                "error": err.to_string(),
            }))
        }
    }
}

/// List the rate rows for a class and tariff type
///
/// GET /api/v1/{provider}/rates/{calculationType}/{tariffType}
pub async fn get_rates(
    service: web::Data<CalculationService>,
    path: web::Path<(String, String, String)>,
) -> std::result::Result<HttpResponse, AppError> {
    let (provider, class, tariff) = path.into_inner();
    let provider = parse_provider(&provider)?;
    let class = parse_class(&class)?;
    let tariff: TariffType = tariff.parse().map_err(AppError::not_found)?;

    if !class.supports(tariff) {
        return Err(AppError::UnsupportedCombination {
            class: class.to_string(),
            tariff: tariff.to_string(),
        });
    }

    let catalog = service.catalog();
    let rates = catalog
        .voltage_levels(provider, class, tariff)
        .into_iter()
        .map(|voltage_level| {
            catalog
                .lookup(provider, class, tariff, voltage_level)
                .map(|row| VoltageRate {
                    voltage_level,
                    rate: row.clone(),
                })
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(HttpResponse::Ok().json(RateBlockResponse {
        provider,
        calculation_type: class,
        tariff_type: tariff,
        schedule_version: SCHEDULE_VERSION,
        rates,
    }))
}

/// Configure tariff routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api")
            .route(
                "/v1/{provider}/calculate/{calculation_type}",
                web::post().to(calculate_v1),
            )
            .route(
                "/v2/{provider}/calculate/{calculation_type}",
                web::post().to(calculate_v2),
            )
            .route(
                "/v1/{provider}/rates/{calculation_type}/{tariff_type}",
                web::get().to(get_rates),
            ),
    );
}
