use affirm_types::{Error, RefreshMode, ThemeMode, WidgetSettings};

#[test]
fn settings_default() {
    let settings = WidgetSettings::default();
    assert_eq!(settings.theme, ThemeMode::System);
    assert!(settings.rotation_enabled);
    assert_eq!(settings.font_multiplier, 1.0);
    assert_eq!(settings.refresh_mode, RefreshMode::Daily);
}

#[test]
fn theme_mode_string_forms() {
    for mode in [ThemeMode::System, ThemeMode::Light, ThemeMode::Dark] {
        assert_eq!(mode.as_str().parse::<ThemeMode>().unwrap(), mode);
        assert_eq!(mode.to_string(), mode.as_str());
    }
}

#[test]
fn refresh_mode_string_forms() {
    for mode in [RefreshMode::Manual, RefreshMode::Hourly, RefreshMode::Daily] {
        assert_eq!(mode.as_str().parse::<RefreshMode>().unwrap(), mode);
    }
}

#[test]
fn unknown_theme_mode_is_error() {
    let err = "sepia".parse::<ThemeMode>().unwrap_err();
    assert!(matches!(err, Error::UnknownVariant { kind: "theme mode", .. }));
    assert!(err.to_string().contains("sepia"));
}

#[test]
fn unknown_refresh_mode_is_error() {
    assert!("weekly".parse::<RefreshMode>().is_err());
}

#[test]
fn settings_serde_uses_camel_case() {
    let settings = WidgetSettings {
        theme: ThemeMode::Dark,
        rotation_enabled: false,
        font_multiplier: 1.25,
        refresh_mode: RefreshMode::Hourly,
    };
    let json = serde_json::to_value(settings).unwrap();
    assert_eq!(json["theme"], "dark");
    assert_eq!(json["rotationEnabled"], false);
    assert_eq!(json["fontMultiplier"], 1.25);
    assert_eq!(json["refreshMode"], "hourly");

    let back: WidgetSettings = serde_json::from_value(json).unwrap();
    assert_eq!(back, settings);
}
