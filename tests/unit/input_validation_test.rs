// Tests for request validation
//
// Checks run in a fixed order and stop at the first failure, so a request
// with several problems always reports the earliest one. Error messages are
// part of the public contract.

use proptest::prelude::*;
use rust_decimal_macros::dec;
use serde_json::{json, Value};

use tariff_engine::core::AppError;
use tariff_engine::tariffs::models::{CalculationClass, Provider, Usage, VoltageLevel};
use tariff_engine::tariffs::{InputValidator, RateCatalog};

fn validate(provider: Provider, class: CalculationClass, body: Value) -> Result<Usage, AppError> {
    InputValidator::default()
        .validate(RateCatalog::global(), provider, class, &body)
        .map(|input| input.usage)
}

fn error_message(provider: Provider, class: CalculationClass, body: Value) -> String {
    validate(provider, class, body).unwrap_err().to_string()
}

fn demand_body() -> Value {
    json!({
        "tariffType": "normal",
        "voltageLevel": ">=69kV",
        "ftRateSatang": 19.72,
        "peakKvar": 120,
        "usage": { "total_kwh": 40000, "peak_kw": 100 }
    })
}

#[test]
fn test_invalid_tariff_type_for_type5() {
    let mut body = demand_body();
    body["tariffType"] = json!("tod");

    assert_eq!(
        error_message(Provider::MEA, CalculationClass::Type5, body),
        "Invalid tariff type for Type 5. Must be \"normal\" or \"tou\", received: tod"
    );
}

#[test]
fn test_type4_offers_tod_and_tou_only() {
    let mut body = demand_body();
    body["tariffType"] = json!("normal");

    assert_eq!(
        error_message(Provider::PEA, CalculationClass::Type4, body),
        "Invalid tariff type for Type 4. Must be \"tod\" or \"tou\", received: normal"
    );
}

#[test]
fn test_missing_usage_for_demand_classes() {
    for class in [
        CalculationClass::Type3,
        CalculationClass::Type4,
        CalculationClass::Type5,
    ] {
        let mut body = demand_body();
        body["tariffType"] = json!("tou");
        body.as_object_mut().unwrap().remove("usage");

        let message = error_message(Provider::MEA, class, body);
        assert_eq!(
            message,
            "Missing required field: usage. This field is mandatory for the calculation."
        );
    }
}

#[test]
fn test_missing_usage_reported_before_missing_peak_kvar() {
    let body = json!({
        "tariffType": "normal",
        "voltageLevel": ">=69kV",
        "ftRateSatang": 19.72
    });

    let err = validate(Provider::MEA, CalculationClass::Type3, body).unwrap_err();
    assert!(matches!(err, AppError::MissingField(ref f) if f == "usage"));
}

#[test]
fn test_peak_kvar_required_only_for_demand_classes() {
    let mut body = demand_body();
    body.as_object_mut().unwrap().remove("peakKvar");
    let err = validate(Provider::MEA, CalculationClass::Type3, body).unwrap_err();
    assert!(matches!(err, AppError::MissingField(ref f) if f == "peakKvar"));

    let usage = validate(
        Provider::MEA,
        CalculationClass::Type2,
        json!({
            "tariffType": "normal",
            "voltageLevel": "<12kV",
            "ftRateSatang": 19.72,
            "usage": { "total_kwh": 500 }
        }),
    )
    .unwrap();
    assert_eq!(
        usage,
        Usage::Normal {
            total_kwh: dec!(500),
            peak_kw: None,
        }
    );
}

#[test]
fn test_blank_and_null_count_as_missing() {
    for blank in [json!(null), json!(""), json!("   ")] {
        let mut body = demand_body();
        body["voltageLevel"] = blank;

        let err = validate(Provider::MEA, CalculationClass::Type3, body).unwrap_err();
        assert!(matches!(err, AppError::MissingField(ref f) if f == "voltageLevel"));
    }
}

#[test]
fn test_empty_body() {
    for body in [Value::Null, json!({}), json!("text")] {
        let err = validate(Provider::PEA, CalculationClass::Type2, body).unwrap_err();
        assert!(matches!(err, AppError::EmptyBody));
    }
}

#[test]
fn test_voltage_level_enumerates_legal_set() {
    let body = json!({
        "tariffType": "normal",
        "voltageLevel": ">=69kV",
        "ftRateSatang": 19.72,
        "usage": { "total_kwh": 500 }
    });

    assert_eq!(
        error_message(Provider::MEA, CalculationClass::Type2, body),
        "Invalid voltage level for MEA. Must be \"<12kV\" or \"12-24kV\", received: >=69kV"
    );
}

#[test]
fn test_voltage_level_of_other_provider_rejected() {
    let mut body = demand_body();
    body["voltageLevel"] = json!("<12kV");

    assert_eq!(
        error_message(Provider::PEA, CalculationClass::Type3, body),
        "Invalid voltage level for PEA. Must be \"<22kV\", \"22-33kV\" or \">=69kV\", received: <12kV"
    );
}

#[test]
fn test_missing_usage_reading_is_qualified() {
    let mut body = demand_body();
    body["usage"] = json!({ "peak_kw": 100 });

    let err = validate(Provider::MEA, CalculationClass::Type3, body).unwrap_err();
    assert!(matches!(err, AppError::MissingField(ref f) if f == "usage.total_kwh"));
}

#[test]
fn test_tod_requires_all_three_periods() {
    let body = json!({
        "tariffType": "tod",
        "voltageLevel": ">=69kV",
        "ftRateSatang": 19.72,
        "peakKvar": 0,
        "usage": { "on_peak_kw": 250, "off_peak_kw": 100, "total_kwh": 100000 }
    });

    let err = validate(Provider::MEA, CalculationClass::Type4, body).unwrap_err();
    assert!(matches!(err, AppError::MissingField(ref f) if f == "usage.partial_peak_kw"));
}

#[test]
fn test_tou_off_peak_demand_is_optional() {
    let body = json!({
        "tariffType": "tou",
        "voltageLevel": "<22kV",
        "ftRateSatang": 39.72,
        "peakKvar": 50,
        "usage": { "on_peak_kwh": 22500, "off_peak_kwh": 22500, "on_peak_kw": 110 }
    });

    let usage = validate(Provider::PEA, CalculationClass::Type5, body).unwrap();
    assert_eq!(
        usage,
        Usage::TimeOfUse {
            on_peak_kwh: dec!(22500),
            off_peak_kwh: dec!(22500),
            on_peak_kw: Some(dec!(110)),
            off_peak_kw: None,
        }
    );
}

#[test]
fn test_numeric_strings_accepted() {
    let mut body = demand_body();
    body["ftRateSatang"] = json!("19.72");
    body["usage"] = json!({ "total_kwh": "40000", "peak_kw": " 100.5 " });

    let input = InputValidator::default()
        .validate(
            RateCatalog::global(),
            Provider::MEA,
            CalculationClass::Type3,
            &body,
        )
        .unwrap();

    assert_eq!(input.ft_rate_satang, dec!(19.72));
    assert_eq!(input.voltage_level, VoltageLevel::AtLeast69kV);
    assert_eq!(
        input.usage,
        Usage::Normal {
            total_kwh: dec!(40000),
            peak_kw: Some(dec!(100.5)),
        }
    );
}

#[test]
fn test_non_numeric_field_rejected() {
    let mut body = demand_body();
    body["usage"]["total_kwh"] = json!("lots");

    assert_eq!(
        error_message(Provider::MEA, CalculationClass::Type3, body),
        "Invalid type for field: usage.total_kwh. Expected a finite number."
    );

    let mut body = demand_body();
    body["peakKvar"] = json!([1, 2]);
    let err = validate(Provider::MEA, CalculationClass::Type3, body).unwrap_err();
    assert!(matches!(err, AppError::InvalidType { ref field, .. } if field == "peakKvar"));
}

#[test]
fn test_usage_must_be_object() {
    let mut body = demand_body();
    body["usage"] = json!(40000);

    let err = validate(Provider::MEA, CalculationClass::Type3, body).unwrap_err();
    assert!(matches!(err, AppError::InvalidType { ref field, .. } if field == "usage"));
}

#[test]
fn test_negative_values_rejected_by_default() {
    let mut body = demand_body();
    body["highestDemandChargeLast12m"] = json!(-1);

    let err = validate(Provider::MEA, CalculationClass::Type3, body).unwrap_err();
    assert!(matches!(err, AppError::NegativeValue(ref f) if f == "highestDemandChargeLast12m"));
}

#[test]
fn test_negative_values_accepted_when_configured() {
    let validator = InputValidator::new(false);
    assert!(!validator.rejects_negative_values());

    let mut body = demand_body();
    body["ftRateSatang"] = json!(-5.5);

    let input = validator
        .validate(
            RateCatalog::global(),
            Provider::MEA,
            CalculationClass::Type3,
            &body,
        )
        .unwrap();
    assert_eq!(input.ft_rate_satang, dec!(-5.5));
}

#[test]
fn test_energy_only_tou_demand_readings_are_validated() {
    let body = json!({
        "tariffType": "tou",
        "voltageLevel": "<12kV",
        "ftRateSatang": 19.72,
        "usage": {
            "on_peak_kwh": 300,
            "off_peak_kwh": 200,
            "on_peak_kw": "abc",
            "off_peak_kw": -50
        }
    });

    assert_eq!(
        error_message(Provider::MEA, CalculationClass::Type2, body.clone()),
        "Invalid type for field: usage.on_peak_kw. Expected a finite number."
    );

    let mut body = body;
    body["usage"]["on_peak_kw"] = json!(12);
    let err = validate(Provider::MEA, CalculationClass::Type2, body).unwrap_err();
    assert!(matches!(err, AppError::NegativeValue(ref f) if f == "usage.off_peak_kw"));
}

#[test]
fn test_energy_only_normal_peak_kw_is_validated_then_dropped() {
    let mut body = json!({
        "tariffType": "normal",
        "voltageLevel": "<12kV",
        "ftRateSatang": 19.72,
        "usage": { "total_kwh": 500, "peak_kw": "high" }
    });

    let err = validate(Provider::MEA, CalculationClass::Type2, body.clone()).unwrap_err();
    assert!(matches!(err, AppError::InvalidType { ref field, .. } if field == "usage.peak_kw"));

    body["usage"]["peak_kw"] = json!(25);
    assert_eq!(
        validate(Provider::MEA, CalculationClass::Type2, body).unwrap(),
        Usage::Normal {
            total_kwh: dec!(500),
            peak_kw: None,
        }
    );
}

#[test]
fn test_huge_reading_rejected_before_arithmetic() {
    let mut body = demand_body();
    body["usage"]["total_kwh"] = json!(7.0e28);

    assert_eq!(
        error_message(Provider::MEA, CalculationClass::Type3, body),
        "Invalid value for field: usage.total_kwh. Must not exceed 1000000000000 in magnitude."
    );

    // Out of range is checked even when negatives are allowed
    let mut body = demand_body();
    body["ftRateSatang"] = json!(-2.5e13);
    let err = InputValidator::new(false)
        .validate(
            RateCatalog::global(),
            Provider::MEA,
            CalculationClass::Type3,
            &body,
        )
        .unwrap_err();
    assert!(matches!(err, AppError::ValueOutOfRange { ref field, .. } if field == "ftRateSatang"));
}

proptest! {
    #[test]
    fn test_any_negative_usage_reading_rejected(
        field in prop::sample::select(vec!["total_kwh", "peak_kw"]),
        value in -1_000_000i64..0i64
    ) {
        let mut body = demand_body();
        body["usage"][field] = json!(value);

        let err = validate(Provider::PEA, CalculationClass::Type5, body).unwrap_err();
        let expected = format!("usage.{}", field);
        prop_assert!(matches!(err, AppError::NegativeValue(ref f) if *f == expected));
    }

    #[test]
    fn test_unknown_tariff_type_names_received_value(tariff in "[a-z]{1,12}") {
        prop_assume!(!["normal", "tou", "tod"].contains(&tariff.as_str()));

        let mut body = demand_body();
        body["tariffType"] = json!(tariff.clone());

        let message = error_message(Provider::MEA, CalculationClass::Type3, body);
        let expected_suffix = format!("received: {}", tariff);
        prop_assert!(message.ends_with(&expected_suffix));
    }
}
