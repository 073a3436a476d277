use faraidh::prelude::*;
use num_bigint::BigInt;
use std::sync::Arc;
use std::thread;

#[test]
fn test_shared_config_across_threads() {
    let config = Arc::new(FaraidhConfig::default());

    let handles: Vec<_> = (1..=8u64)
        .map(|i| {
            let config = Arc::clone(&config);
            thread::spawn(move || {
                let input = CalculationInput::new(
                    BigInt::from(i * 24_000_000),
                    HeirCounts::new().wife(1).son(1).daughter(1),
                );
                (i, calculate(&input, config.as_ref()).unwrap())
            })
        })
        .collect();

    for handle in handles {
        let (i, result) = handle.join().unwrap();
        let net = BigInt::from(i * 24_000_000);
        // Wife 1/8, then the residue 2:1 between son and daughter.
        assert_eq!(result.share_of(HeirKind::Wife), &net / 8);
        assert_eq!(result.share_of(HeirKind::Son), &net * 7 / 12);
        assert_eq!(result.share_of(HeirKind::Daughter), &net * 7 / 24);
        assert!(result.is_balanced());
    }
}

#[test]
fn test_translator_is_shared() {
    let handles: Vec<_> = FaraidhLocale::ALL
        .into_iter()
        .map(|locale| thread::spawn(move || default_translator().heir_label(locale, HeirKind::Wife)))
        .collect();

    let labels: Vec<String> = handles.into_iter().map(|h| h.join().unwrap()).collect();
    assert_eq!(labels, vec!["Wife".to_string(), "Istri".to_string()]);
}

#[test]
fn test_dyn_rule_table_is_send() {
    let rules: Arc<dyn RuleTable> = Arc::new(FaraidhConfig::default().with_madhab(Madhab::Hanafi));
    let handle = thread::spawn(move || {
        let input = CalculationInput::new(BigInt::from(6_000), HeirCounts::new().father(1).mother(1));
        input.distribute(rules.as_ref()).unwrap()
    });

    let result = handle.join().unwrap();
    assert_eq!(result.madhab, Madhab::Hanafi);
    assert_eq!(result.share_of(HeirKind::Mother), BigInt::from(2_000));
    assert_eq!(result.share_of(HeirKind::Father), BigInt::from(4_000));
}

#[test]
fn test_input_schema() {
    let schema = schemars::schema_for!(CalculationInput);
    let value = serde_json::to_value(&schema).unwrap();

    assert_eq!(value["properties"]["total_assets"]["type"], "string");
    assert!(value["properties"]["heirs"].is_object());
    let required = value["required"].as_array().unwrap();
    assert!(required.iter().any(|r| r == "total_assets"));
}
