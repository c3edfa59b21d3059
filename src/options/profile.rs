use std::fmt::Display;

use clap::Parser;
use serde::Serialize;

pub const DEFAULT_PROFILE: &str = "default";

#[derive(Debug, Clone, Serialize, Parser)]
pub struct ProfileOpt {
    /// Name of configuration profile to use
    #[arg(long = "profile", default_value = DEFAULT_PROFILE, global = true)]
    #[serde(skip_serializing)]
    pub profile_name: String,
}

impl Default for ProfileOpt {
    fn default() -> Self {
        ProfileOpt {
            profile_name: DEFAULT_PROFILE.to_string(),
        }
    }
}

impl Display for ProfileOpt {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", &self.profile_name)
    }
}
