use crate::{profile::Profile, Config, HoustonProblem};
use serde::{Deserialize, Serialize};

use camino::Utf8PathBuf;
use edgectl_std::Fs;

/// Holds sensitive information regarding authentication.
#[derive(Debug, Serialize, Deserialize)]
pub struct Sensitive {
    pub api_token: String,
}

impl Sensitive {
    fn path(profile_name: &str, config: &Config) -> Utf8PathBuf {
        Profile::dir(profile_name, config).join(".sensitive")
    }

    /// Serializes to toml and saves to `<home>/profiles/<profile_name>/.sensitive`.
    pub fn save(&self, profile_name: &str, config: &Config) -> Result<(), HoustonProblem> {
        let path = Sensitive::path(profile_name, config);
        let data = toml::to_string(self)?;
        Fs::write_file(&path, data)?;
        tracing::debug!(path = %path, "saved sensitive profile data");
        Ok(())
    }

    /// Opens and deserializes `<home>/profiles/<profile_name>/.sensitive`.
    pub fn load(profile_name: &str, config: &Config) -> Result<Sensitive, HoustonProblem> {
        let path = Sensitive::path(profile_name, config);
        let contents = Fs::read_file(&path)?;
        Ok(toml::from_str(&contents)?)
    }
}
