//! The renderer's view of the shared store.

use crate::{Affirmation, CurrentAffirmation, WidgetSettings};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Everything a renderer reads after a refresh signal.
///
/// `count` and `has_items` are cached next to the list so a renderer can
/// check emptiness without decoding JSON.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WidgetSnapshot {
    pub current: Option<CurrentAffirmation>,
    pub last_updated: Option<DateTime<Utc>>,
    pub settings: WidgetSettings,
    pub items: Vec<Affirmation>,
    pub count: i64,
    pub has_items: bool,
}

impl WidgetSnapshot {
    /// Whether the cached list fields agree with the decoded list.
    ///
    /// `has_items == (count > 0) == !items.is_empty()` and `count` equals the
    /// decoded length.
    #[must_use]
    pub fn is_consistent(&self) -> bool {
        let non_empty = !self.items.is_empty();
        self.has_items == (self.count > 0)
            && self.has_items == non_empty
            && usize::try_from(self.count).is_ok_and(|c| c == self.items.len())
    }
}
