use faraidh::prelude::*;
use num_bigint::BigInt;
use std::env;
use std::fs;

#[test]
fn test_env_loading() {
    // Only this test touches the FARAIDH_* variables.
    unsafe {
        env::set_var("FARAIDH_MADHAB", "maliki");
        env::set_var("FARAIDH_LOCALE", "en");
        env::set_var("FARAIDH_CURRENCY", " MYR ");
        env::set_var("FARAIDH_RADD_FOR_SPOUSE", "true");
    }
    let config = FaraidhConfig::from_env().unwrap();
    assert_eq!(config.madhab, Madhab::Maliki);
    assert_eq!(config.locale, FaraidhLocale::EnUS);
    assert_eq!(config.currency, "MYR");
    assert!(config.radd_for_spouse);

    unsafe {
        env::set_var("FARAIDH_RADD_FOR_SPOUSE", "sometimes");
    }
    let err = FaraidhConfig::from_env().unwrap_err();
    assert!(err.to_string().contains("FARAIDH_RADD_FOR_SPOUSE"));

    unsafe {
        env::set_var("FARAIDH_RADD_FOR_SPOUSE", "false");
        env::set_var("FARAIDH_MADHAB", "zahiri");
    }
    assert!(matches!(FaraidhConfig::from_env(), Err(FaraidhError::Configuration(_))));

    unsafe {
        env::remove_var("FARAIDH_MADHAB");
        env::remove_var("FARAIDH_LOCALE");
        env::remove_var("FARAIDH_CURRENCY");
        env::remove_var("FARAIDH_RADD_FOR_SPOUSE");
    }
    assert_eq!(FaraidhConfig::from_env().unwrap(), FaraidhConfig::default());
}

#[test]
fn test_json_file_loading() {
    let path = env::temp_dir().join(format!("faraidh-config-{}.json", std::process::id()));
    fs::write(
        &path,
        r#"{
            "madhab": "hanbali",
            "locale": "en-US",
            "currency": "SAR",
            "radd_for_spouse": true,
            "hajb": { "son": ["sons_son", "full_brother"] }
        }"#,
    )
    .unwrap();

    let config = FaraidhConfig::try_from_json(path.to_str().unwrap()).unwrap();
    fs::remove_file(&path).ok();

    assert_eq!(config.madhab, Madhab::Hanbali);
    assert_eq!(config.currency, "SAR");
    assert_eq!(config.blocks(HeirKind::Son), &[HeirKind::SonsSon, HeirKind::FullBrother]);
    assert!(config.blocks(HeirKind::Father).is_empty());
}

#[test]
fn test_missing_file() {
    let res = FaraidhConfig::try_from_json("/definitely/not/here/faraidh.json");
    match res {
        Err(FaraidhError::Configuration(msg)) => assert!(msg.starts_with("Failed to read config file")),
        other => panic!("expected a configuration error, got {:?}", other),
    }
}

#[test]
fn test_self_blocking_rule_is_rejected() {
    let res: Result<FaraidhConfig, _> = r#"{"hajb": {"full_brother": ["full_brother"]}}"#.parse();
    let err = res.unwrap_err();
    assert_eq!(
        err.to_string(),
        "Configuration error: Hajb rule for 'full_brother' blocks itself"
    );
}

#[test]
fn test_injected_table_changes_the_outcome() {
    // Without the daughter's exclusion of the son's daughter, the latter completes two thirds.
    let config = FaraidhConfig::builder().hajb(HajbTable::empty()).build().unwrap();
    let input = CalculationInput::new(
        BigInt::from(120_000_000),
        HeirCounts::new().daughter(1).with(HeirKind::SonsDaughter, 1),
    );

    let custom = calculate(&input, &config).unwrap();
    assert!(custom.blocked.is_empty());
    assert_eq!(custom.share_of(HeirKind::Daughter), BigInt::from(90_000_000));
    assert_eq!(custom.share_of(HeirKind::SonsDaughter), BigInt::from(30_000_000));
    assert!(custom.radd_applied);

    let default = calculate(&input, &FaraidhConfig::default()).unwrap();
    assert_eq!(default.blocked, vec![HeirKind::SonsDaughter]);
    assert_eq!(default.share_of(HeirKind::Daughter), BigInt::from(120_000_000));
}

#[test]
fn test_maternal_siblings_beside_father_follow_the_table() {
    // The father shuts out agnatic collaterals only; maternal siblings keep their sixth.
    let table = HajbTable::empty().with_rule(
        HeirKind::Father,
        &[
            HeirKind::PaternalGrandfather,
            HeirKind::FullBrother,
            HeirKind::FullSister,
            HeirKind::PaternalHalfBrother,
            HeirKind::PaternalHalfSister,
            HeirKind::FullPaternalUncle,
            HeirKind::PaternalHalfUncle,
        ],
    );
    let config = FaraidhConfig::builder().hajb(table).build().unwrap();
    let input = CalculationInput::new(
        BigInt::from(60_000_000),
        HeirCounts::new().father(1).with(HeirKind::MaternalHalfSister, 1),
    );

    let res = calculate(&input, &config).unwrap();
    assert!(res.blocked.is_empty());
    assert_eq!(res.share_of(HeirKind::MaternalHalfSister), BigInt::from(10_000_000));
    assert_eq!(res.share_of(HeirKind::Father), BigInt::from(50_000_000));
    assert!(res.is_balanced());

    let default = calculate(&input, &FaraidhConfig::default()).unwrap();
    assert_eq!(default.blocked, vec![HeirKind::MaternalHalfSister]);
    assert_eq!(default.share_of(HeirKind::Father), BigInt::from(60_000_000));
}

#[test]
fn test_spouse_radd_switch() {
    let input = CalculationInput::new(BigInt::from(120_000_000), HeirCounts::new().husband(1).mother(1));

    // Default: the mother alone takes the residue back.
    let res = calculate(&input, &FaraidhConfig::default()).unwrap();
    assert_eq!(res.share_of(HeirKind::Husband), BigInt::from(60_000_000));
    assert_eq!(res.share_of(HeirKind::Mother), BigInt::from(60_000_000));

    // With spouses eligible the residue is split 3:2 by siham.
    let config = FaraidhConfig::default().with_radd_for_spouse(true);
    let res = calculate(&input, &config).unwrap();
    assert_eq!(res.share_of(HeirKind::Husband), BigInt::from(72_000_000));
    assert_eq!(res.share_of(HeirKind::Mother), BigInt::from(48_000_000));
    assert_eq!(res.radd_results.len(), 2);
    assert!(res.is_balanced());
}
