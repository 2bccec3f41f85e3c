use std::io::Write;

use dsfusion_core::config::*;
use dsfusion_core::errors::{ConfigError, FusionError};
use dsfusion_core::RuleKind;

#[test]
fn config_loads_from_empty_toml_with_all_defaults() {
    let config = FusionConfig::from_toml("").unwrap();

    assert_eq!(config.rule, "DEMPSTER_SHAFER");
    assert_eq!(config.max_retained, None);
    assert_eq!(config.input_weight, 0.0);
    assert!(!config.strict_universal_set);
    assert_eq!(config.max_powerset_hypotheses, 16);
    assert_eq!(config, FusionConfig::default());
    assert_eq!(config.rule_kind().unwrap(), RuleKind::DempsterShafer);
}

#[test]
fn config_loads_partial_toml_with_overrides() {
    let toml = r#"
rule = "zhang"
max_retained = 5
"#;
    let config = FusionConfig::from_toml(toml).unwrap();
    assert_eq!(config.rule_kind().unwrap(), RuleKind::Zhang);
    assert_eq!(config.max_retained, Some(5));
    // Non-overridden fields keep defaults
    assert_eq!(config.input_weight, 0.0);
    assert_eq!(config.max_powerset_hypotheses, 16);
}

#[test]
fn invalid_toml_is_a_parse_error() {
    let err = FusionConfig::from_toml("rule = [").unwrap_err();
    assert!(matches!(err, ConfigError::ParseError { .. }));
}

#[test]
fn validation_rejects_bad_values() {
    for (toml, field) in [
        ("max_retained = 0", "max_retained"),
        ("input_weight = -1.0", "input_weight"),
        ("max_powerset_hypotheses = 0", "max_powerset_hypotheses"),
        ("max_powerset_hypotheses = 64", "max_powerset_hypotheses"),
    ] {
        match FusionConfig::from_toml(toml) {
            Err(ConfigError::ValidationFailed { field: f, .. }) => assert_eq!(f, field),
            other => panic!("{toml}: expected validation failure, got {other:?}"),
        }
    }
}

#[test]
fn unknown_rule_parses_but_fails_selection() {
    let config = FusionConfig::from_toml(r#"rule = "PCR6""#).unwrap();
    assert!(matches!(
        config.rule_kind(),
        Err(FusionError::InvalidArgument(msg)) if msg.contains("PCR6")
    ));
}

#[test]
fn load_reads_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "rule = \"MURPHY\"\ninput_weight = 0.5").unwrap();

    let config = FusionConfig::load(file.path()).unwrap();
    assert_eq!(config.input_weight, 0.5);
    assert!(!config.rule.is_empty());
}

#[test]
fn load_missing_file_is_file_not_found() {
    let dir = tempfile::tempdir().unwrap();
    let err = FusionConfig::load(&dir.path().join("absent.toml")).unwrap_err();
    assert!(matches!(err, ConfigError::FileNotFound { .. }));
}

#[test]
fn config_round_trips_through_toml() {
    let config = FusionConfig {
        rule: "YAGER".to_string(),
        max_retained: Some(8),
        input_weight: 1.5,
        strict_universal_set: true,
        max_powerset_hypotheses: 10,
    };
    let text = toml::to_string(&config).unwrap();
    assert_eq!(FusionConfig::from_toml(&text).unwrap(), config);
}

#[test]
fn tracing_init_is_idempotent() {
    dsfusion_core::tracing::init_tracing_with_filter("dsfusion=debug");
    dsfusion_core::tracing::init_tracing();
}
