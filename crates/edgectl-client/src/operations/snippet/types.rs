use serde::{Deserialize, Serialize};

use crate::shared::{NamedRef, Timestamps, VersionRef};

/// A block of VCL inserted into the generated configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snippet {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub service_id: String,
    #[serde(default)]
    pub service_version: u32,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub priority: Option<String>,
    #[serde(default)]
    pub dynamic: bool,
    #[serde(rename = "type", default)]
    pub location: Option<String>,
    #[serde(default)]
    pub content: Option<String>,
    #[serde(flatten)]
    pub timestamps: Timestamps,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SnippetFields {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dynamic: Option<bool>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CreateSnippetInput {
    pub version: VersionRef,
    pub fields: SnippetFields,
}

/// Updates a versioned snippet. `fields.name` renames it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UpdateSnippetInput {
    pub target: NamedRef,
    pub fields: SnippetFields,
}

/// Replaces the content of a dynamic snippet, which lives outside any version.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct UpdateDynamicSnippetInput {
    #[serde(skip)]
    pub service_id: String,
    #[serde(skip)]
    pub snippet_id: String,
    pub content: String,
}
