use actix_web::web;

pub mod health;
pub mod tariffs;

/// Register every module's routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    health::controllers::configure(cfg);
    tariffs::controllers::configure(cfg);
}
