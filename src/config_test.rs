#![allow(clippy::float_cmp)]

use super::*;

#[test]
fn default_matches_constants() {
    let cfg = LayerConfig::default();
    assert_eq!(cfg.stylus_radius, consts::STYLUS_RADIUS);
    assert_eq!(cfg.contact_z, consts::CONTACT_Z);
    assert_eq!(cfg.fade_ms, consts::FADE_MS);
    assert_eq!(cfg.ambient.color, 0x00ff_ffff);
    assert_eq!(cfg.directional.direction, [-0.1, 0.1, 1.0]);
}

#[test]
fn default_is_valid() {
    assert!(LayerConfig::default().validate().is_ok());
}

#[test]
fn from_json_overrides_named_fields_only() {
    let cfg = LayerConfig::from_json(r#"{ "fade_ms": 500, "lift_z": 200 }"#).unwrap();
    assert_eq!(cfg.fade_ms, 500.0);
    assert_eq!(cfg.lift_z, 200.0);
    assert_eq!(cfg.lift_ms, consts::LIFT_MS);
    assert_eq!(cfg.stylus_length, consts::STYLUS_LENGTH);
}

#[test]
fn from_json_accepts_nested_light() {
    let cfg = LayerConfig::from_json(r#"{ "ambient": { "color": 255, "intensity": 0.25 } }"#).unwrap();
    assert_eq!(cfg.ambient, LightConfig { color: 255, intensity: 0.25 });
}

#[test]
fn from_json_rejects_malformed() {
    let err = LayerConfig::from_json("{ not json").unwrap_err();
    assert!(matches!(err, LayerError::Config(_)));
}

#[test]
fn from_json_rejects_negative_duration() {
    let err = LayerConfig::from_json(r#"{ "lift_ms": -1 }"#).unwrap_err();
    assert!(matches!(err, LayerError::InvalidConfig { field: "lift_ms", .. }));
}

#[test]
fn from_json_rejects_opacity_above_one() {
    let err = LayerConfig::from_json(r#"{ "shadow_opacity": 1.5 }"#).unwrap_err();
    assert!(matches!(err, LayerError::InvalidConfig { field: "shadow_opacity", .. }));
    assert!(err.to_string().contains("shadow_opacity"));
}

#[test]
fn from_optional_json_none_or_blank_is_default() {
    assert_eq!(LayerConfig::from_optional_json(None).unwrap(), LayerConfig::default());
    assert_eq!(LayerConfig::from_optional_json(Some("  ")).unwrap(), LayerConfig::default());
}

#[test]
fn from_optional_json_parses_present_value() {
    let cfg = LayerConfig::from_optional_json(Some(r#"{ "marker_radius": 10 }"#)).unwrap();
    assert_eq!(cfg.marker_radius, 10.0);
}
