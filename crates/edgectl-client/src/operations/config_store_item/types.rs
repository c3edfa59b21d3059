use serde::{Deserialize, Serialize};

use crate::shared::Timestamps;

/// One key/value pair in an unversioned config store.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfigStoreItem {
    #[serde(default)]
    pub store_id: String,
    #[serde(rename = "item_key")]
    pub key: String,
    #[serde(rename = "item_value", default)]
    pub value: String,
    #[serde(flatten)]
    pub timestamps: Timestamps,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CreateConfigStoreItemInput {
    #[serde(skip)]
    pub store_id: String,
    #[serde(rename = "item_key")]
    pub key: String,
    #[serde(rename = "item_value")]
    pub value: String,
}

/// Changes the value under `key`. With `upsert` the item is created when missing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct UpdateConfigStoreItemInput {
    #[serde(skip)]
    pub store_id: String,
    #[serde(skip)]
    pub key: String,
    #[serde(skip)]
    pub upsert: bool,
    #[serde(rename = "item_value")]
    pub value: String,
}
