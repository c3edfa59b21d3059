use serde::{Deserialize, Serialize};

use crate::shared::Timestamps;

/// One key/value pair stored in a dictionary.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DictionaryItem {
    #[serde(default)]
    pub service_id: String,
    #[serde(default)]
    pub dictionary_id: String,
    pub item_key: String,
    #[serde(default)]
    pub item_value: String,
    #[serde(flatten)]
    pub timestamps: Timestamps,
}

/// Identifies a dictionary, which is addressed by id rather than by version.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DictionaryRef {
    pub service_id: String,
    pub dictionary_id: String,
}

impl DictionaryRef {
    pub fn new(service_id: impl Into<String>, dictionary_id: impl Into<String>) -> Self {
        Self {
            service_id: service_id.into(),
            dictionary_id: dictionary_id.into(),
        }
    }

    pub(crate) fn path<'a>(&'a self, rest: &[&'a str]) -> Vec<&'a str> {
        let mut segments = vec![
            "service",
            self.service_id.as_str(),
            "dictionary",
            self.dictionary_id.as_str(),
        ];
        segments.extend_from_slice(rest);
        segments
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CreateDictionaryItemInput {
    #[serde(skip)]
    pub dictionary: DictionaryRef,
    pub item_key: String,
    pub item_value: String,
}

/// Inserts or replaces the value stored under `item_key`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct UpdateDictionaryItemInput {
    #[serde(skip)]
    pub dictionary: DictionaryRef,
    #[serde(skip)]
    pub item_key: String,
    pub item_value: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BatchOperation {
    Create,
    Update,
    Upsert,
    Delete,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchDictionaryItem {
    pub op: BatchOperation,
    pub item_key: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub item_value: Option<String>,
}

/// The batch document, in the same shape as the `--file` accepted by the CLI.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchModifyDictionaryItemsInput {
    #[serde(skip)]
    pub dictionary: DictionaryRef,
    pub items: Vec<BatchDictionaryItem>,
}
