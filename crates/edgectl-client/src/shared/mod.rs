use serde::{Deserialize, Serialize};

/// A service and one of its versions.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VersionRef {
    /// Alphanumeric service id.
    pub service_id: String,
    /// Version number, always positive.
    pub service_version: u32,
}

impl VersionRef {
    /// Creates a new reference to `service_id` at `service_version`.
    pub fn new(service_id: impl Into<String>, service_version: u32) -> Self {
        Self {
            service_id: service_id.into(),
            service_version,
        }
    }

    /// Path segments for a resource collection on this version,
    /// e.g. `service/<id>/version/<n>/healthcheck`.
    pub(crate) fn path<'a>(&'a self, version: &'a str, rest: &[&'a str]) -> Vec<&'a str> {
        let mut segments = vec!["service", self.service_id.as_str(), "version", version];
        segments.extend_from_slice(rest);
        segments
    }
}

/// A named resource attached to a service version.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NamedRef {
    /// The owning service version.
    #[serde(flatten)]
    pub version: VersionRef,
    /// The resource name.
    pub name: String,
}

impl NamedRef {
    /// Creates a reference to `name` on the given version.
    pub fn new(service_id: impl Into<String>, service_version: u32, name: impl Into<String>) -> Self {
        Self {
            version: VersionRef::new(service_id, service_version),
            name: name.into(),
        }
    }
}

/// Lifecycle timestamps shared by most resources.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Timestamps {
    /// When the resource was created.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    /// When the resource was last changed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
    /// When the resource was deleted.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deleted_at: Option<String>,
}

/// The body returned by endpoints that only acknowledge a request.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Status {
    /// Usually `"ok"`.
    pub status: String,
}
