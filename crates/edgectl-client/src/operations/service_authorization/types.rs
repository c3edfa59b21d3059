use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumIter, EnumString};

use crate::shared::Timestamps;

/// What a user may do with a service.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, Display, EnumString, EnumIter,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum Permission {
    #[default]
    Full,
    ReadOnly,
    PurgeSelect,
    PurgeAll,
}

/// Grants a user access to a service.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceAuthorization {
    pub id: String,
    #[serde(default)]
    pub service_id: String,
    #[serde(default)]
    pub user_id: String,
    #[serde(default)]
    pub permission: Permission,
    #[serde(flatten)]
    pub timestamps: Timestamps,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CreateServiceAuthorizationInput {
    pub service_id: String,
    pub user_id: String,
    pub permission: Permission,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct UpdateServiceAuthorizationInput {
    #[serde(skip)]
    pub id: String,
    pub permission: Permission,
}
