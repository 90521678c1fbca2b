//! Integration tests for promotion policy loading.

use std::io::Write;

use surebet::config::PromotionPolicy;
use surebet::error::{ConfigError, Error};

#[test]
fn load_reads_a_full_policy_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(
        file,
        r#"
freebet_conversion_rate = 0.75
freebet_bonus_rate = 0.85

[[boost_tiers]]
min_odds = 2.0
rate = 0.3

[[boost_tiers]]
min_odds = 3.0
rate = 0.6

[[cashback_tiers]]
min_stake = 10.0
refund = 5.0
"#
    )
    .unwrap();

    let policy = PromotionPolicy::load(file.path()).unwrap();
    assert_eq!(policy.freebet_conversion_rate, 0.75);
    assert_eq!(policy.freebet_bonus_rate, 0.85);
    assert_eq!(policy.boost_tiers.len(), 2);
    assert_eq!(policy.boost_rate(3.0), 0.6);
    assert_eq!(policy.cashback_refund(10.01), 5.0);
    assert!((policy.qualifying_stake() - 10.01).abs() < 1e-12);
}

#[test]
fn load_applies_defaults_for_missing_fields() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(file, "freebet_bonus_rate = 0.9").unwrap();

    let policy = PromotionPolicy::load(file.path()).unwrap();
    assert_eq!(policy.freebet_bonus_rate, 0.9);
    assert_eq!(policy.freebet_conversion_rate, 0.77);
    assert_eq!(policy.boost_tiers.len(), 3);
    assert_eq!(policy.cashback_tiers.len(), 5);
}

#[test]
fn load_rejects_invalid_rates() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(file, "freebet_conversion_rate = 1.3").unwrap();

    let result = PromotionPolicy::load(file.path());
    assert!(matches!(
        result,
        Err(Error::Config(ConfigError::InvalidValue { field, .. }))
            if field == "freebet_conversion_rate"
    ));
}

#[test]
fn load_rejects_malformed_toml() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(file, "freebet_conversion_rate = ").unwrap();

    let result = PromotionPolicy::load(file.path());
    assert!(matches!(result, Err(Error::Config(ConfigError::Parse(_)))));
}

#[test]
fn load_reports_missing_files() {
    let result = PromotionPolicy::load("no/such/policy.toml");
    assert!(matches!(
        result,
        Err(Error::Config(ConfigError::ReadFile(_)))
    ));
}
