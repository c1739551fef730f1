use approx::assert_relative_eq;
use scrolldeck::DeckError;
use scrolldeck::api::{DECK_CONFIG_JSON_SCHEMA_V1, DeckConfig};
use scrolldeck::platform::ScrollBehavior;

#[test]
fn defaults_match_the_page_behavior() {
    let config = DeckConfig::default();
    assert_eq!(config.initial_section.as_str(), "hero");
    assert_relative_eq!(config.focus_band.top_margin_ratio, 0.3);
    assert_relative_eq!(config.focus_band.bottom_margin_ratio, 0.3);
    assert_relative_eq!(config.counter.duration_ms, 1_500.0);
    assert_relative_eq!(config.counter.visibility_threshold, 0.5);
    assert_eq!(config.scroll_behavior, ScrollBehavior::Smooth);
    config.validate().expect("defaults are valid");

    let options = config.focus_band.observe_options().expect("band options");
    assert_eq!(options.root_margin.to_css(), "-30% 0px -30% 0px");
    assert_relative_eq!(options.threshold, 0.0);
}

#[test]
fn bare_json_fills_missing_fields_with_defaults() {
    let config = DeckConfig::from_json_str(r#"{ "initial_section": "blueprint" }"#)
        .expect("bare config");
    assert_eq!(config.initial_section.as_str(), "blueprint");
    assert_eq!(config.counter, DeckConfig::default().counter);

    let empty = DeckConfig::from_json_str("{}").expect("empty config");
    assert_eq!(empty, DeckConfig::default());
}

#[test]
fn contract_payload_round_trips() {
    let config = DeckConfig::new("risks")
        .with_focus_band(0.25, 0.35)
        .with_counter_duration_ms(900.0)
        .with_scroll_behavior(ScrollBehavior::Instant);

    let json = config.to_json_contract_v1_pretty().expect("serialize");
    assert!(json.contains(&format!("\"schema_version\": {DECK_CONFIG_JSON_SCHEMA_V1}")));
    assert!(json.contains("\"instant\""));

    let parsed = DeckConfig::from_json_str(&json).expect("parse contract");
    assert_eq!(parsed, config);
}

#[test]
fn unknown_schema_versions_are_rejected() {
    let input = r#"{ "schema_version": 2, "config": { "initial_section": "hero" } }"#;
    let err = DeckConfig::from_json_str(input).expect_err("unsupported version");
    assert!(matches!(err, DeckError::InvalidConfig(message) if message.contains("schema version")));
}

#[test]
fn invalid_values_are_rejected() {
    let overlapping = DeckConfig::default().with_focus_band(0.6, 0.5);
    assert!(matches!(
        overlapping.validate(),
        Err(DeckError::InvalidConfig(_))
    ));

    let zero_duration = DeckConfig::default().with_counter_duration_ms(0.0);
    assert!(zero_duration.validate().is_err());

    assert!(DeckConfig::new("").validate().is_err());
    assert!(DeckConfig::from_json_str(r#"{ "counter": { "duration_ms": 10.0, "visibility_threshold": 2.0 } }"#).is_err());
    assert!(DeckConfig::from_json_str("not json").is_err());
}
