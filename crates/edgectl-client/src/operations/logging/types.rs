use serde::{Deserialize, Serialize};
use strum_macros::{EnumIter, EnumString, IntoStaticStr};

use crate::shared::{NamedRef, Timestamps, VersionRef};

/// The third-party destinations a service can stream logs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumString, EnumIter, IntoStaticStr)]
#[strum(serialize_all = "lowercase")]
pub enum LoggingKind {
    AzureBlob,
    Cloudfiles,
    Datadog,
    NewRelic,
    S3,
    Sftp,
}

impl LoggingKind {
    /// The path segment used by the API, e.g. `newrelic`.
    pub fn slug(&self) -> &'static str {
        self.into()
    }

    /// Human readable product name.
    pub const fn display_name(&self) -> &'static str {
        match self {
            LoggingKind::AzureBlob => "Azure Blob Storage",
            LoggingKind::Cloudfiles => "Cloud Files",
            LoggingKind::Datadog => "Datadog",
            LoggingKind::NewRelic => "New Relic",
            LoggingKind::S3 => "S3",
            LoggingKind::Sftp => "SFTP",
        }
    }

    /// Whether the provider writes rotated files rather than streaming events.
    pub const fn is_file_based(&self) -> bool {
        matches!(
            self,
            LoggingKind::AzureBlob | LoggingKind::Cloudfiles | LoggingKind::S3 | LoggingKind::Sftp
        )
    }
}

/// Every provider-specific attribute. Providers only use a subset, and
/// only `Some` values are sent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggingSettings {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub format_version: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub response_condition: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub placement: Option<String>,

    // file based providers
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub period: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gzip_level: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp_format: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub public_key: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub compression_codec: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_max_bytes: Option<u64>,

    // credentials and locations
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub account_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub container: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sas_token: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub access_key: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub secret_key: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bucket_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub domain: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub iam_role: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub redundancy: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub server_side_encryption: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub server_side_encryption_kms_key_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub acl: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub port: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ssh_known_hosts: Option<String>,
}

/// A logging endpoint as returned by the API.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggingEndpoint {
    #[serde(default)]
    pub service_id: String,
    #[serde(default)]
    pub service_version: u32,
    pub name: String,
    #[serde(flatten)]
    pub settings: LoggingSettings,
    #[serde(flatten)]
    pub timestamps: Timestamps,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateLoggingInput {
    pub kind: LoggingKind,
    pub version: VersionRef,
    pub name: String,
    pub settings: LoggingSettings,
}

/// Updates the endpoint `target`, renaming it when `new_name` is set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateLoggingInput {
    pub kind: LoggingKind,
    pub target: NamedRef,
    pub new_name: Option<String>,
    pub settings: LoggingSettings,
}
