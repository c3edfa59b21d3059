use serde::{Deserialize, Serialize};

use crate::shared::{NamedRef, Timestamps, VersionRef};

/// A health check probing a service backend.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Healthcheck {
    #[serde(default)]
    pub service_id: String,
    #[serde(default)]
    pub service_version: u32,
    pub name: String,
    #[serde(default)]
    pub comment: Option<String>,
    #[serde(default)]
    pub method: Option<String>,
    #[serde(default)]
    pub host: Option<String>,
    #[serde(default)]
    pub path: Option<String>,
    #[serde(default)]
    pub http_version: Option<String>,
    #[serde(default)]
    pub timeout: Option<u32>,
    #[serde(default)]
    pub check_interval: Option<u32>,
    #[serde(default)]
    pub expected_response: Option<u32>,
    #[serde(default)]
    pub window: Option<u32>,
    #[serde(default)]
    pub threshold: Option<u32>,
    #[serde(default)]
    pub initial: Option<u32>,
    #[serde(flatten)]
    pub timestamps: Timestamps,
}

/// The settable attributes of a health check. Only `Some` fields are sent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct HealthcheckFields {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub method: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub host: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub http_version: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timeout: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub check_interval: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expected_response: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub window: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub threshold: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub initial: Option<u32>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CreateHealthcheckInput {
    pub version: VersionRef,
    pub fields: HealthcheckFields,
}

/// Updates the health check `target`. `fields.name` renames it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UpdateHealthcheckInput {
    pub target: NamedRef,
    pub fields: HealthcheckFields,
}
