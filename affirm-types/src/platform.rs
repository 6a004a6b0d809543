//! Target platform selection.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The mobile platform whose widget conventions the process follows.
///
/// Chosen once at startup; storage keys and the renderer name derive from it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    /// WidgetKit reading an app-group `UserDefaults` suite.
    Ios,
    /// An `AppWidgetProvider` reading `SharedPreferences`.
    Android,
}

impl Platform {
    /// The platform of the compilation target.
    ///
    /// Apple targets map to [`Platform::Ios`]; everything else to
    /// [`Platform::Android`].
    #[must_use]
    pub const fn current() -> Self {
        if cfg!(any(target_os = "ios", target_os = "macos")) {
            Self::Ios
        } else {
            Self::Android
        }
    }

    /// Lower-case name, as accepted by [`FromStr`].
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Ios => "ios",
            Self::Android => "android",
        }
    }
}

impl Default for Platform {
    fn default() -> Self {
        Self::current()
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Platform {
    type Err = crate::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "ios" => Ok(Self::Ios),
            "android" => Ok(Self::Android),
            _ => Err(crate::Error::UnknownVariant {
                kind: "platform",
                value: s.to_string(),
            }),
        }
    }
}
