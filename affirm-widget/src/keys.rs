//! Logical fields and their platform storage keys.
//!
//! The renderer on the other side of the process boundary hardcodes these
//! key strings, so they are a wire format: renaming one breaks every
//! installed widget until the next renderer release.

use affirm_store::StoreValue;
use affirm_types::Platform;
use std::fmt;

/// A logical field of the widget snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Field {
    CurrentText,
    CurrentId,
    LastUpdate,
    ThemeMode,
    RotationEnabled,
    FontMultiplier,
    RefreshMode,
    ListJson,
    ListCount,
    HasItems,
    /// Reserved for a future renderer feature; cleared, never published.
    ReservedA,
    /// Reserved for a future renderer feature; cleared, never published.
    ReservedB,
}

impl Field {
    /// Every field, in schema order.
    pub const ALL: [Field; 12] = [
        Field::CurrentText,
        Field::CurrentId,
        Field::LastUpdate,
        Field::ThemeMode,
        Field::RotationEnabled,
        Field::FontMultiplier,
        Field::RefreshMode,
        Field::ListJson,
        Field::ListCount,
        Field::HasItems,
        Field::ReservedA,
        Field::ReservedB,
    ];

    /// The current-item pair.
    pub const CURRENT: [Field; 3] = [Field::CurrentText, Field::CurrentId, Field::LastUpdate];

    /// The settings group.
    pub const SETTINGS: [Field; 4] = [
        Field::ThemeMode,
        Field::RotationEnabled,
        Field::FontMultiplier,
        Field::RefreshMode,
    ];

    /// The list bundle. Always written together.
    pub const LIST: [Field; 3] = [Field::ListJson, Field::ListCount, Field::HasItems];

    /// Semantic type of the field's value.
    pub const fn kind(self) -> FieldKind {
        match self {
            Self::CurrentText | Self::CurrentId | Self::ThemeMode | Self::RefreshMode => {
                FieldKind::Text
            }
            Self::LastUpdate => FieldKind::Timestamp,
            Self::RotationEnabled | Self::HasItems => FieldKind::Bool,
            Self::FontMultiplier => FieldKind::Float,
            Self::ListJson => FieldKind::JsonList,
            Self::ListCount => FieldKind::Int,
            Self::ReservedA | Self::ReservedB => FieldKind::Text,
        }
    }

    const fn index(self) -> usize {
        self as usize
    }

    const fn ios_key(self) -> &'static str {
        match self {
            Self::CurrentText => "currentAffirmationText",
            Self::CurrentId => "currentAffirmationId",
            Self::LastUpdate => "lastUpdateTime",
            Self::ThemeMode => "themeMode",
            Self::RotationEnabled => "rotationEnabled",
            Self::FontMultiplier => "fontSizeMultiplier",
            Self::RefreshMode => "refreshMode",
            Self::ListJson => "affirmationsList",
            Self::ListCount => "affirmationsCount",
            Self::HasItems => "hasAffirmations",
            Self::ReservedA => "reservedSlotA",
            Self::ReservedB => "reservedSlotB",
        }
    }

    const fn android_key(self) -> &'static str {
        match self {
            Self::CurrentText => "widget_current_text",
            Self::CurrentId => "widget_current_id",
            Self::LastUpdate => "widget_last_update",
            Self::ThemeMode => "widget_theme_mode",
            Self::RotationEnabled => "widget_rotation_enabled",
            Self::FontMultiplier => "widget_font_multiplier",
            Self::RefreshMode => "widget_refresh_mode",
            Self::ListJson => "widget_affirmations_json",
            Self::ListCount => "widget_affirmations_count",
            Self::HasItems => "widget_has_affirmations",
            Self::ReservedA => "widget_reserved_a",
            Self::ReservedB => "widget_reserved_b",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

/// Semantic value type of a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldKind {
    Text,
    Bool,
    Int,
    Float,
    /// ISO-8601 string.
    Timestamp,
    /// JSON-encoded array string.
    JsonList,
}

impl FieldKind {
    /// Whether `value` has the store representation of this kind.
    ///
    /// Floats must be finite.
    pub fn accepts(self, value: &StoreValue) -> bool {
        match self {
            Self::Text | Self::Timestamp | Self::JsonList => matches!(value, StoreValue::Text(_)),
            Self::Bool => matches!(value, StoreValue::Bool(_)),
            Self::Int => matches!(value, StoreValue::Int(_)),
            Self::Float => matches!(value, StoreValue::Float(x) if x.is_finite()),
        }
    }
}

/// A field with its resolved storage key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldRecord {
    pub field: Field,
    pub kind: FieldKind,
    pub key: &'static str,
}

/// Storage keys for every field on one platform.
///
/// Resolved once; lookups are array indexing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeySchema {
    platform: Platform,
    records: [FieldRecord; 12],
}

impl KeySchema {
    /// Resolves every field's key for `platform`.
    pub fn for_platform(platform: Platform) -> Self {
        let records = Field::ALL.map(|field| FieldRecord {
            field,
            kind: field.kind(),
            key: match platform {
                Platform::Ios => field.ios_key(),
                Platform::Android => field.android_key(),
            },
        });
        Self { platform, records }
    }

    pub fn platform(&self) -> Platform {
        self.platform
    }

    /// The storage key for `field`.
    pub fn key(&self, field: Field) -> &'static str {
        self.records[field.index()].key
    }

    pub fn record(&self, field: Field) -> &FieldRecord {
        &self.records[field.index()]
    }

    /// All records, in schema order.
    pub fn records(&self) -> &[FieldRecord] {
        &self.records
    }

    /// Reverse lookup from a storage key.
    pub fn field_for_key(&self, key: &str) -> Option<Field> {
        self.records.iter().find(|r| r.key == key).map(|r| r.field)
    }
}
