pub mod calculation_service;
pub mod charges;
pub mod input_validator;
pub mod normal_tariff;
pub mod strategy;
pub mod tod_tariff;
pub mod tou_tariff;

pub use calculation_service::CalculationService;
pub use input_validator::InputValidator;
pub use normal_tariff::NormalTariff;
pub use strategy::{select, TariffStrategy};
pub use tod_tariff::TimeOfDayTariff;
pub use tou_tariff::TimeOfUseTariff;
