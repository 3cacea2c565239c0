//! Provincial Electricity Authority base rates (excluding FT)

use rust_decimal_macros::dec;

use crate::modules::tariffs::models::{
    CalculationClass::{Type2, Type3, Type4, Type5},
    EnergyTier, Provider, RateRow,
    TariffType::{Normal, Tod, Tou},
    VoltageLevel::{AtLeast69kV, Below22kV, From22To33kV},
};

use super::rate_catalog::{
    demand_row, demand_tod_row, demand_tou_row, energy_row, energy_tou_row, RateKey,
    SMALL_SERVICE_CHARGE, STANDARD_SERVICE_CHARGE,
};

pub fn rows() -> Vec<(RateKey, RateRow)> {
    let key = |class, tariff, voltage| RateKey::new(Provider::PEA, class, tariff, voltage);

    vec![
        // 2.1 small general business
        (
            key(Type2, Normal, Below22kV),
            energy_row(
                SMALL_SERVICE_CHARGE,
                vec![
                    EnergyTier::bounded(dec!(150), dec!(3.2484)),
                    EnergyTier::bounded(dec!(400), dec!(4.2218)),
                    EnergyTier::unbounded(dec!(4.4217)),
                ],
            ),
        ),
        (
            key(Type2, Normal, From22To33kV),
            energy_row(
                STANDARD_SERVICE_CHARGE,
                vec![EnergyTier::unbounded(dec!(3.9086))],
            ),
        ),
        // 2.2 small general business, TOU
        (
            key(Type2, Tou, Below22kV),
            energy_tou_row(SMALL_SERVICE_CHARGE, dec!(5.7982), dec!(2.6369)),
        ),
        (
            key(Type2, Tou, From22To33kV),
            energy_tou_row(STANDARD_SERVICE_CHARGE, dec!(5.1135), dec!(2.6037)),
        ),
        // 3.1 medium general business
        (key(Type3, Normal, AtLeast69kV), demand_row(dec!(175.70), dec!(3.1097))),
        (key(Type3, Normal, From22To33kV), demand_row(dec!(196.26), dec!(3.1729))),
        (key(Type3, Normal, Below22kV), demand_row(dec!(221.50), dec!(3.2449))),
        // 3.2 medium general business, TOU
        (
            key(Type3, Tou, AtLeast69kV),
            demand_tou_row(dec!(74.14), dec!(4.1025), dec!(2.5849)),
        ),
        (
            key(Type3, Tou, From22To33kV),
            demand_tou_row(dec!(132.93), dec!(4.1839), dec!(2.6037)),
        ),
        (
            key(Type3, Tou, Below22kV),
            demand_tou_row(dec!(210.00), dec!(4.3297), dec!(2.6369)),
        ),
        // 4.1 large general business, TOD
        (
            key(Type4, Tod, AtLeast69kV),
            demand_tod_row(dec!(280.00), dec!(74.14), dec!(0), dec!(3.1097)),
        ),
        (
            key(Type4, Tod, From22To33kV),
            demand_tod_row(dec!(285.05), dec!(58.88), dec!(0), dec!(3.1729)),
        ),
        (
            key(Type4, Tod, Below22kV),
            demand_tod_row(dec!(332.71), dec!(68.22), dec!(0), dec!(3.2449)),
        ),
        // 4.2 large general business, TOU
        (
            key(Type4, Tou, AtLeast69kV),
            demand_tou_row(dec!(74.14), dec!(4.1025), dec!(2.5849)),
        ),
        (
            key(Type4, Tou, From22To33kV),
            demand_tou_row(dec!(132.93), dec!(4.1839), dec!(2.6037)),
        ),
        (
            key(Type4, Tou, Below22kV),
            demand_tou_row(dec!(210.00), dec!(4.3297), dec!(2.6369)),
        ),
        // 5.1 specific business
        (key(Type5, Normal, AtLeast69kV), demand_row(dec!(220.56), dec!(3.1097))),
        (key(Type5, Normal, From22To33kV), demand_row(dec!(256.07), dec!(3.1729))),
        (key(Type5, Normal, Below22kV), demand_row(dec!(276.64), dec!(3.2449))),
        // 5.2 specific business, TOU
        (
            key(Type5, Tou, AtLeast69kV),
            demand_tou_row(dec!(220.56), dec!(4.1025), dec!(2.5849)),
        ),
        (
            key(Type5, Tou, From22To33kV),
            demand_tou_row(dec!(256.07), dec!(4.1839), dec!(2.6037)),
        ),
        (
            key(Type5, Tou, Below22kV),
            demand_tou_row(dec!(276.64), dec!(4.3297), dec!(2.6369)),
        ),
    ]
}
