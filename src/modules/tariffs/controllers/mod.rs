pub mod tariff_controller;

pub use tariff_controller::{configure, BillResponse};
