//! Affirmation items as they travel to the widget.

use serde::{Deserialize, Serialize};

/// One entry of the widget's affirmation list.
///
/// The wire form is a JSON object with at least `id` and `text`. Extra
/// fields written by newer app versions are ignored on decode.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Affirmation {
    /// Stable identifier assigned by the repository layer.
    pub id: String,
    /// The affirmation text, UTF-8.
    pub text: String,
}

impl Affirmation {
    /// Creates a list item.
    pub fn new(id: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            text: text.into(),
        }
    }
}

/// The affirmation currently shown on the widget.
///
/// Text and id always travel together; there is no way to publish one
/// without the other.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurrentAffirmation {
    pub id: String,
    pub text: String,
}

impl CurrentAffirmation {
    /// Creates the current-item pair.
    pub fn new(id: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            text: text.into(),
        }
    }
}

impl From<&Affirmation> for CurrentAffirmation {
    fn from(item: &Affirmation) -> Self {
        Self {
            id: item.id.clone(),
            text: item.text.clone(),
        }
    }
}

/// Encodes a list into the JSON array stored under the list key.
pub fn encode_list(items: &[Affirmation]) -> crate::Result<String> {
    Ok(serde_json::to_string(items)?)
}

/// Decodes the JSON array stored under the list key.
pub fn decode_list(json: &str) -> crate::Result<Vec<Affirmation>> {
    Ok(serde_json::from_str(json)?)
}
