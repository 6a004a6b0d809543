//! Widget display settings.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Color scheme the widget renders with.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemeMode {
    /// Follow the system appearance.
    #[default]
    System,
    Light,
    Dark,
}

impl ThemeMode {
    /// Stored string form.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::System => "system",
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }
}

impl fmt::Display for ThemeMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ThemeMode {
    type Err = crate::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "system" => Ok(Self::System),
            "light" => Ok(Self::Light),
            "dark" => Ok(Self::Dark),
            _ => Err(crate::Error::UnknownVariant {
                kind: "theme mode",
                value: s.to_string(),
            }),
        }
    }
}

/// How often the renderer rotates to a new affirmation on its own schedule.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RefreshMode {
    /// Only when the app publishes.
    Manual,
    Hourly,
    #[default]
    Daily,
}

impl RefreshMode {
    /// Stored string form.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Manual => "manual",
            Self::Hourly => "hourly",
            Self::Daily => "daily",
        }
    }
}

impl fmt::Display for RefreshMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RefreshMode {
    type Err = crate::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "manual" => Ok(Self::Manual),
            "hourly" => Ok(Self::Hourly),
            "daily" => Ok(Self::Daily),
            _ => Err(crate::Error::UnknownVariant {
                kind: "refresh mode",
                value: s.to_string(),
            }),
        }
    }
}

/// The settings group. Always published as a whole.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WidgetSettings {
    pub theme: ThemeMode,
    /// Whether the renderer rotates through the list by itself.
    pub rotation_enabled: bool,
    /// Multiplier applied to the widget's base font size.
    pub font_multiplier: f64,
    pub refresh_mode: RefreshMode,
}

impl WidgetSettings {
    pub const DEFAULT_FONT_MULTIPLIER: f64 = 1.0;
}

impl Default for WidgetSettings {
    fn default() -> Self {
        Self {
            theme: ThemeMode::default(),
            rotation_enabled: true,
            font_multiplier: Self::DEFAULT_FONT_MULTIPLIER,
            refresh_mode: RefreshMode::default(),
        }
    }
}
