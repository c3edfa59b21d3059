use crate::{Config, HoustonProblem};

use edgectl_std::Fs;
use serde::{Deserialize, Serialize};

/// The default control plane endpoint.
pub const DEFAULT_ENDPOINT: &str = "https://api.edgecompute.dev";

/// Global, non-profile settings stored at `<home>/config.toml`.
#[derive(Debug, Default, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Settings {
    /// Override for the control plane endpoint
    #[serde(skip_serializing_if = "Option::is_none")]
    pub endpoint: Option<String>,
}

impl Settings {
    /// Loads settings from disk. A missing file yields the defaults.
    pub fn load(config: &Config) -> Result<Settings, HoustonProblem> {
        let path = config.settings_path();
        if !path.exists() {
            tracing::debug!(path = %path, "no settings file, using defaults");
            return Ok(Settings::default());
        }
        let contents = Fs::read_file(&path)?;
        Ok(toml::from_str(&contents)?)
    }

    /// Writes settings to `<home>/config.toml`.
    pub fn save(&self, config: &Config) -> Result<(), HoustonProblem> {
        let data = toml::to_string(self)?;
        Fs::write_file(config.settings_path(), data)?;
        Ok(())
    }

    /// Raw contents of the settings file.
    pub fn raw(config: &Config) -> Result<String, HoustonProblem> {
        let path = config.settings_path();
        if !path.exists() {
            return Err(HoustonProblem::NoSettingsFound(path.to_string()));
        }
        Ok(Fs::read_file(&path)?)
    }

    /// The endpoint to use: the config override, then the settings file, then the default.
    pub fn endpoint(&self, config: &Config) -> String {
        config
            .override_endpoint
            .clone()
            .or_else(|| self.endpoint.clone())
            .unwrap_or_else(|| DEFAULT_ENDPOINT.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::{Settings, DEFAULT_ENDPOINT};
    use crate::Config;
    use assert_fs::TempDir;
    use camino::Utf8PathBuf;

    fn config(override_endpoint: Option<String>) -> (TempDir, Config) {
        let tmp = TempDir::new().unwrap();
        let home = Utf8PathBuf::try_from(tmp.path().to_path_buf()).unwrap();
        let config = Config::new(Some(&home), None, override_endpoint).unwrap();
        (tmp, config)
    }

    #[test]
    fn missing_settings_use_default_endpoint() {
        let (_tmp, config) = config(None);
        let settings = Settings::load(&config).unwrap();
        assert_eq!(settings, Settings::default());
        assert_eq!(settings.endpoint(&config), DEFAULT_ENDPOINT);
        assert!(Settings::raw(&config).is_err());
    }

    #[test]
    fn saved_endpoint_is_loaded_and_overridable() {
        let (_tmp, config) = config(None);
        let settings = Settings {
            endpoint: Some("http://localhost:4000".to_string()),
        };
        settings.save(&config).unwrap();
        let loaded = Settings::load(&config).unwrap();
        assert_eq!(loaded.endpoint(&config), "http://localhost:4000");
        assert!(Settings::raw(&config).unwrap().contains("localhost:4000"));

        let (_tmp2, overridden) = self::config(Some("http://override".to_string()));
        assert_eq!(loaded.endpoint(&overridden), "http://override");
    }
}
