use actix_web::{web, HttpResponse, Responder};
use serde::{Deserialize, Serialize};

use crate::modules::tariffs::repositories::SCHEDULE_VERSION;
use crate::modules::tariffs::CalculationService;

/// Health check response structure
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: String,
    pub checks: HealthChecks,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthChecks {
    pub rate_catalog: String,
    pub application: String,
}

/// Readiness probe response structure
#[derive(Debug, Serialize, Deserialize)]
pub struct ReadinessResponse {
    pub ready: bool,
    pub schedule_version: String,
    pub rate_rows: usize,
    pub checks: ReadinessChecks,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ReadinessChecks {
    pub rate_catalog: bool,
    pub application: bool,
}

/// GET /health - Liveness probe
/// Returns 200 if the application can respond to requests
pub async fn health_check() -> impl Responder {
    let response = HealthResponse {
        status: "healthy".to_string(),
        timestamp: chrono::Utc::now().to_rfc3339(),
        checks: HealthChecks {
            rate_catalog: "not_checked".to_string(),
            application: "healthy".to_string(),
        },
    };

    HttpResponse::Ok().json(response)
}

/// GET /ready - Readiness probe
/// Returns 200 once the rate catalog is loaded and internally consistent
pub async fn readiness_check(service: web::Data<CalculationService>) -> impl Responder {
    let catalog = service.catalog();
    let mut checks = ReadinessChecks {
        rate_catalog: false,
        application: true,
    };

    match catalog.verify() {
        Ok(()) => checks.rate_catalog = !catalog.is_empty(),
        Err(e) => tracing::error!("Rate catalog readiness check failed: {}", e),
    }

    let ready = checks.rate_catalog && checks.application;
    let response = ReadinessResponse {
        ready,
        schedule_version: SCHEDULE_VERSION.to_string(),
        rate_rows: catalog.len(),
        checks,
    };

    if ready {
        HttpResponse::Ok().json(response)
    } else {
        HttpResponse::ServiceUnavailable().json(response)
    }
}

/// Configure health check routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/health", web::get().to(health_check))
        .route("/ready", web::get().to(readiness_check));
}
