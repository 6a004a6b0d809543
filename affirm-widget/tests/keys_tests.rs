use affirm_store::StoreValue;
use affirm_types::Platform;
use affirm_widget::{Field, FieldKind, KeySchema};
use std::collections::HashSet;

// ── Resolution ──────────────────────────────────────────────────

#[test]
fn every_field_has_a_key() {
    for platform in [Platform::Ios, Platform::Android] {
        let schema = KeySchema::for_platform(platform);
        assert_eq!(schema.platform(), platform);
        assert_eq!(schema.records().len(), Field::ALL.len());
        for field in Field::ALL {
            assert!(!schema.key(field).is_empty());
            assert_eq!(schema.record(field).field, field);
            assert_eq!(schema.record(field).kind, field.kind());
        }
    }
}

#[test]
fn keys_are_unique_within_platform() {
    for platform in [Platform::Ios, Platform::Android] {
        let schema = KeySchema::for_platform(platform);
        let keys: HashSet<&str> = schema.records().iter().map(|r| r.key).collect();
        assert_eq!(keys.len(), Field::ALL.len());
    }
}

#[test]
fn keys_differ_between_platforms() {
    let ios = KeySchema::for_platform(Platform::Ios);
    let android = KeySchema::for_platform(Platform::Android);
    for field in Field::ALL {
        assert_ne!(ios.key(field), android.key(field), "{field}");
    }
}

#[test]
fn renderer_facing_keys_are_stable() {
    let ios = KeySchema::for_platform(Platform::Ios);
    assert_eq!(ios.key(Field::CurrentText), "currentAffirmationText");
    assert_eq!(ios.key(Field::HasItems), "hasAffirmations");
    assert_eq!(ios.key(Field::ListJson), "affirmationsList");

    let android = KeySchema::for_platform(Platform::Android);
    assert_eq!(android.key(Field::CurrentId), "widget_current_id");
    assert_eq!(android.key(Field::ListCount), "widget_affirmations_count");
    assert_eq!(android.key(Field::FontMultiplier), "widget_font_multiplier");
}

#[test]
fn reverse_lookup() {
    let schema = KeySchema::for_platform(Platform::Android);
    assert_eq!(
        schema.field_for_key("widget_theme_mode"),
        Some(Field::ThemeMode)
    );
    assert_eq!(schema.field_for_key("themeMode"), None);
}

#[test]
fn resolving_twice_is_identical() {
    assert_eq!(
        KeySchema::for_platform(Platform::Ios),
        KeySchema::for_platform(Platform::Ios)
    );
}

// ── Kinds ───────────────────────────────────────────────────────

#[test]
fn field_kinds() {
    assert_eq!(Field::LastUpdate.kind(), FieldKind::Timestamp);
    assert_eq!(Field::ListJson.kind(), FieldKind::JsonList);
    assert_eq!(Field::ListCount.kind(), FieldKind::Int);
    assert_eq!(Field::HasItems.kind(), FieldKind::Bool);
    assert_eq!(Field::FontMultiplier.kind(), FieldKind::Float);
    assert_eq!(Field::ThemeMode.kind(), FieldKind::Text);
}

#[test]
fn kind_accepts_matching_values_only() {
    assert!(FieldKind::Int.accepts(&StoreValue::Int(1)));
    assert!(!FieldKind::Int.accepts(&StoreValue::Float(1.0)));
    assert!(FieldKind::Timestamp.accepts(&StoreValue::Text("2024-01-01T00:00:00Z".into())));
    assert!(!FieldKind::Bool.accepts(&StoreValue::Text("true".into())));
    assert!(FieldKind::Float.accepts(&StoreValue::Float(1.2)));
}

#[test]
fn float_kind_rejects_non_finite() {
    assert!(!FieldKind::Float.accepts(&StoreValue::Float(f64::NAN)));
    assert!(!FieldKind::Float.accepts(&StoreValue::Float(f64::INFINITY)));
    assert!(!FieldKind::Float.accepts(&StoreValue::Float(f64::NEG_INFINITY)));
}
