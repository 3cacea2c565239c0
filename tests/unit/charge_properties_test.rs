// Property-based tests for the charge arithmetic shared by every tariff
//
// Covers the time-of-use zero-period law, minimum-bill floor idempotence,
// power-factor non-negativity and VAT linearity.

use proptest::prelude::*;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde_json::json;

use tariff_engine::tariffs::models::{
    CalculationClass, EnergyRates, PowerFactorRate, Provider, RateRow, TariffType, VoltageLevel,
};
use tariff_engine::tariffs::services::charges::{
    apply_minimum_bill, excess_kvar, ft_charge, power_factor_charge, time_of_use_energy_charge,
    vat,
};
use tariff_engine::tariffs::{CalculationService, RateCatalog};

fn tou_row() -> &'static RateRow {
    RateCatalog::global()
        .lookup(
            Provider::MEA,
            CalculationClass::Type5,
            TariffType::Tou,
            VoltageLevel::Below12kV,
        )
        .unwrap()
}

fn tou_rates(row: &RateRow) -> (Decimal, Decimal) {
    match row.energy {
        EnergyRates::TimeOfUse { on_peak, off_peak } => (on_peak, off_peak),
        ref other => panic!("Expected time-of-use energy rates, got {:?}", other),
    }
}

fn pf_rate() -> PowerFactorRate {
    PowerFactorRate {
        threshold_ratio: dec!(0.6197),
        penalty_rate: dec!(56.07),
    }
}

/// Amount with two decimal places, 0.00 to 10,000,000.00
fn amount() -> impl Strategy<Value = Decimal> {
    (0i64..=1_000_000_000i64).prop_map(|n| Decimal::new(n, 2))
}

/// Reading with two decimal places, 0.00 to 100000.00
fn reading() -> impl Strategy<Value = Decimal> {
    (0i64..=10_000_000i64).prop_map(|n| Decimal::new(n, 2))
}

#[test]
fn test_excess_kvar_rounds_to_whole_kvar() {
    // 120 - 100 × 0.6197 = 58.03
    assert_eq!(excess_kvar(dec!(120), dec!(100), &pf_rate()), dec!(58));
    // 62.47 - 100 × 0.6197 = 0.5 rounds away from zero
    assert_eq!(excess_kvar(dec!(62.47), dec!(100), &pf_rate()), dec!(1));
    assert_eq!(power_factor_charge(dec!(120), dec!(100), &pf_rate()), dec!(3252.06));
}

#[test]
fn test_ft_charge_converts_satang() {
    assert_eq!(ft_charge(dec!(500), dec!(19.72)), dec!(98.60));
    assert_eq!(ft_charge(Decimal::ZERO, dec!(39.72)), Decimal::ZERO);
}

proptest! {
    #[test]
    fn test_tou_zero_on_peak(off_kwh in reading()) {
        let row = tou_row();
        let (_, off_rate) = tou_rates(row);

        prop_assert_eq!(
            time_of_use_energy_charge(Decimal::ZERO, off_kwh, row).unwrap(),
            off_kwh * off_rate
        );
    }

    #[test]
    fn test_tou_zero_off_peak(on_kwh in reading()) {
        let row = tou_row();
        let (on_rate, _) = tou_rates(row);

        prop_assert_eq!(
            time_of_use_energy_charge(on_kwh, Decimal::ZERO, row).unwrap(),
            on_kwh * on_rate
        );
    }

    #[test]
    fn test_tou_periods_are_independent(on_kwh in reading(), off_kwh in reading()) {
        let row = tou_row();

        let both = time_of_use_energy_charge(on_kwh, off_kwh, row).unwrap();
        let on_only = time_of_use_energy_charge(on_kwh, Decimal::ZERO, row).unwrap();
        let off_only = time_of_use_energy_charge(Decimal::ZERO, off_kwh, row).unwrap();

        prop_assert_eq!(both, on_only + off_only);
    }

    #[test]
    fn test_minimum_bill_is_max_of_calculated_and_floor(
        calculated in amount(),
        highest in amount()
    ) {
        let factor = dec!(0.70);
        let demand = apply_minimum_bill(calculated, Some(highest), Some(factor));

        prop_assert_eq!(demand.calculated, calculated);
        prop_assert_eq!(demand.effective, calculated.max(highest * factor));
        if calculated >= highest * factor {
            prop_assert_eq!(demand.effective, calculated);
        }
    }

    #[test]
    fn test_minimum_bill_without_history_is_identity(calculated in amount()) {
        let demand = apply_minimum_bill(calculated, None, Some(dec!(0.70)));
        prop_assert_eq!(demand.effective, calculated);
    }

    #[test]
    fn test_power_factor_charge_non_negative(kvar in reading(), kw in reading()) {
        let charge = power_factor_charge(kvar, kw, &pf_rate());
        prop_assert!(charge >= Decimal::ZERO, "pf charge {} for {} kVAR / {} kW", charge, kvar, kw);
    }

    #[test]
    fn test_excess_kvar_is_whole_and_non_negative(kvar in reading(), kw in reading()) {
        let excess = excess_kvar(kvar, kw, &pf_rate());
        prop_assert!(excess >= Decimal::ZERO);
        prop_assert_eq!(excess, excess.trunc());
    }

    #[test]
    fn test_vat_linearity(sub_total in amount()) {
        prop_assert_eq!(sub_total + vat(sub_total), sub_total * dec!(1.07));
    }

    #[test]
    fn test_bill_grand_total_is_sub_total_plus_vat(
        total_kwh in 0u32..50_000u32,
        ft_rate in 0u32..10_000u32
    ) {
        let bill = CalculationService::default()
            .calculate(
                Provider::PEA,
                CalculationClass::Type2,
                &json!({
                    "tariffType": "normal",
                    "voltageLevel": "<22kV",
                    "ftRateSatang": Decimal::new(ft_rate as i64, 2).to_string(),
                    "usage": { "total_kwh": total_kwh }
                }),
            )
            .unwrap();

        prop_assert_eq!(bill.grand_total, bill.sub_total * dec!(1.07));
        prop_assert_eq!(bill.sub_total, bill.base_tariff + bill.ft_charge);
    }
}
