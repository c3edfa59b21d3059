use serde::{Deserialize, Serialize};

use crate::shared::{NamedRef, Timestamps, VersionRef};

/// A versioned key/value container attached to a service.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dictionary {
    pub id: String,
    #[serde(default)]
    pub service_id: String,
    #[serde(default)]
    pub service_version: u32,
    pub name: String,
    #[serde(default)]
    pub write_only: bool,
    #[serde(flatten)]
    pub timestamps: Timestamps,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DictionaryFields {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub write_only: Option<bool>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CreateDictionaryInput {
    pub version: VersionRef,
    pub fields: DictionaryFields,
}

/// Updates the dictionary `target`. `fields.name` renames it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UpdateDictionaryInput {
    pub target: NamedRef,
    pub fields: DictionaryFields,
}
