use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumIter, EnumString};

use crate::shared::Timestamps;

/// Enables TLS for a domain with a custom certificate.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TlsActivation {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub certificate_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub configuration_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub domain_id: Option<String>,
    /// Related objects requested with `include`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub included: Option<serde_json::Value>,
    #[serde(flatten)]
    pub timestamps: Timestamps,
}

/// Related objects that may be embedded in a response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString, EnumIter)]
#[strum(serialize_all = "snake_case")]
pub enum TlsInclude {
    TlsCertificate,
    TlsConfiguration,
    TlsDomain,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CreateTlsActivationInput {
    pub certificate_id: String,
    pub domain_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub configuration_id: Option<String>,
}

/// Swaps the certificate used by an activation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct UpdateTlsActivationInput {
    #[serde(skip)]
    pub id: String,
    pub certificate_id: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListTlsActivationsInput {
    pub filter_certificate_id: Option<String>,
    pub filter_configuration_id: Option<String>,
    pub filter_domain_id: Option<String>,
    pub include: Option<TlsInclude>,
    pub page: Option<u32>,
    pub per_page: Option<u32>,
}
