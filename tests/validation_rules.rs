use faraidh::prelude::*;
use num_bigint::BigInt;

fn input_json(json: &str) -> CalculationInput {
    serde_json::from_str(json).unwrap()
}

#[test]
fn test_all_violations_are_collected() {
    let input = input_json(
        r#"{
            "total_assets": "-5",
            "debt": "10",
            "bequest": { "num": "1", "den": "2" },
            "heirs": { "husband": 1, "wife": 2, "father": 2, "son": -1 }
        }"#,
    );

    let errors = validate(&input);
    let codes: Vec<ValidationCode> = errors.iter().map(|e| e.code).collect();
    assert_eq!(
        codes,
        vec![
            ValidationCode::NegativeAssets,
            ValidationCode::DebtExceedsAssets,
            ValidationCode::BequestExceedsOneThird,
            ValidationCode::InvalidSpouseCombination,
            ValidationCode::InvalidZeroOneValue,
            ValidationCode::NegativeHeirCount,
        ]
    );
    assert_eq!(errors[4].heir, Some(HeirKind::Father));
    assert_eq!(errors[4].message, "Father must be 0 or 1");
}

#[test]
fn test_engine_refuses_invalid_input() {
    let input = CalculationInput::builder()
        .total_assets(100_000_000u64)
        .bequest(1, 2)
        .heir(HeirKind::Wife, 5)
        .build()
        .unwrap();

    let err = calculate(&input, &FaraidhConfig::default()).unwrap_err();
    assert_eq!(
        err.to_string(),
        "Invalid input: Bequest must not exceed 1/3 of the estate after debts (and 1 more)"
    );
    let errors = err.validation_errors().unwrap();
    assert_eq!(errors[1].code, ValidationCode::WifeCountOutOfRange);
    assert_eq!(errors[1].message, "Number of wives must be between 0 and 4");
    assert_eq!(errors[1].field, "heirs.wife");
}

#[test]
fn test_boundaries_are_accepted() {
    let input = CalculationInput {
        debt: BigInt::from(90),
        bequest: Fraction::raw(1, 3),
        ..CalculationInput::new(BigInt::from(90), HeirCounts::new().wife(4))
    };
    assert!(validate(&input).is_empty());

    let res = calculate(&input, &FaraidhConfig::default()).unwrap();
    assert_eq!(res.total_distributed, BigInt::from(90));
    assert!(res.is_balanced());
}

#[test]
fn test_oversized_counts_are_refused() {
    let input = CalculationInput::new(BigInt::from(1_000), HeirCounts::new().son(i64::MAX).daughter(1));

    let err = calculate(&input, &FaraidhConfig::default()).unwrap_err();
    let errors = err.validation_errors().unwrap();
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].code, ValidationCode::HeirCountTooLarge);
    assert_eq!(errors[0].field, "heirs.son");

    let at_limit = CalculationInput::new(BigInt::from(3_000_000), HeirCounts::new().son(MAX_HEIR_COUNT));
    let res = calculate(&at_limit, &FaraidhConfig::default()).unwrap();
    assert_eq!(res.result_for(HeirKind::Son).unwrap().individual_share, BigInt::from(3));
}

#[test]
fn test_zero_denominator() {
    let input = CalculationInput {
        bequest: Fraction::raw(0, 0),
        ..CalculationInput::new(BigInt::from(1_000), HeirCounts::new().son(1))
    };
    let errors = validate(&input);
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].code, ValidationCode::InvalidBequestDenominator);
    assert_eq!(errors[0].field, "bequest.den");
}

#[test]
fn test_localized_messages() {
    let input = input_json(r#"{"total_assets": "100", "heirs": {"mother": 3, "wife": 7}}"#);
    let errors = validate(&input);
    let translator = default_translator();

    let indonesian: Vec<String> = errors
        .iter()
        .map(|e| e.localized(translator, FaraidhLocale::IdID))
        .collect();
    assert_eq!(
        indonesian,
        vec![
            "Jumlah istri harus antara 0 dan 4".to_string(),
            "Ibu harus bernilai 0 atau 1".to_string(),
        ]
    );
}

#[test]
fn test_errors_serialize_with_codes() {
    let error = ValidationError::new("heirs.son", ValidationCode::NegativeHeirCount, Some(HeirKind::Son));
    let json = serde_json::to_value(&error).unwrap();
    assert_eq!(json["code"], "NEGATIVE_HEIR_COUNT");
    assert_eq!(json["heir"], "son");
    assert_eq!(json["message"], "Count of Son must not be negative");
    assert_eq!(error.to_string(), "[NEGATIVE_HEIR_COUNT] heirs.son: Count of Son must not be negative");
}
