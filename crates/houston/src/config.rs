use camino::{Utf8Path, Utf8PathBuf};
use directories_next::ProjectDirs;

use crate::HoustonProblem;

use std::fs;

/// Config allows end users to override default settings
/// usually determined by Houston. They are intended to
/// give library consumers a way to support environment variable
/// overrides for end users.
#[derive(Debug, Clone)]
pub struct Config {
    /// home is the path to the user's global config directory
    pub home: Utf8PathBuf,

    /// override_api_token is used for overriding the API token returned
    /// when loading a profile
    pub override_api_token: Option<String>,

    /// override_endpoint replaces the API endpoint stored in the settings file
    pub override_endpoint: Option<String>,
}

impl Config {
    /// Creates a new instance of `Config`
    pub fn new(
        override_home: Option<&impl AsRef<Utf8Path>>,
        override_api_token: Option<String>,
        override_endpoint: Option<String>,
    ) -> Result<Config, HoustonProblem> {
        let home = match override_home {
            Some(home) => {
                let home = home.as_ref();
                if home.exists() && !home.is_dir() {
                    return Err(HoustonProblem::InvalidOverrideConfigDir(home.to_string()));
                }
                home.to_path_buf()
            }
            None => {
                // Lin: /home/alice/.config/edgectl
                // Win: C:\Users\Alice\AppData\Roaming\edgectl\config
                // Mac: /Users/Alice/Library/Application Support/dev.edgectl.edgectl
                let project_dirs = ProjectDirs::from("dev", "edgectl", "edgectl")
                    .ok_or(HoustonProblem::DefaultConfigDirNotFound)?;
                Utf8PathBuf::try_from(project_dirs.config_dir().to_path_buf())?
            }
        };

        if !home.exists() {
            fs::create_dir_all(&home)
                .map_err(|_| HoustonProblem::CouldNotCreateConfigHome(home.to_string()))?;
        }

        Ok(Config {
            home,
            override_api_token,
            override_endpoint,
        })
    }

    /// Path of the global settings file.
    pub fn settings_path(&self) -> Utf8PathBuf {
        self.home.join("config.toml")
    }

    /// Path of the persisted diagnostic error log.
    pub fn error_log_path(&self) -> Utf8PathBuf {
        self.home.join("errors.log")
    }

    /// Removes all configuration files from filesystem
    pub fn clear(&self) -> Result<(), HoustonProblem> {
        tracing::debug!(home_dir = ?self.home);
        fs::remove_dir_all(&self.home)
            .map_err(|_| HoustonProblem::NoConfigFound(self.home.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::Config;
    use assert_fs::TempDir;
    use camino::Utf8PathBuf;

    #[test]
    fn it_can_clear_global_config() {
        let tmp_home = TempDir::new().unwrap();
        let home = Utf8PathBuf::try_from(tmp_home.path().join("edgectl")).unwrap();
        let config = Config::new(Some(&home), None, None).unwrap();
        assert!(config.home.exists());
        config.clear().unwrap();
        assert!(!config.home.exists());
    }

    #[test]
    fn it_rejects_a_file_as_home() {
        let tmp_home = TempDir::new().unwrap();
        let file = Utf8PathBuf::try_from(tmp_home.path().join("not-a-dir")).unwrap();
        std::fs::write(&file, "").unwrap();
        assert!(Config::new(Some(&file), None, None).is_err());
    }

    #[test]
    fn settings_and_error_log_live_in_home() {
        let tmp_home = TempDir::new().unwrap();
        let home = Utf8PathBuf::try_from(tmp_home.path().to_path_buf()).unwrap();
        let config = Config::new(Some(&home), None, None).unwrap();
        assert_eq!(config.settings_path(), home.join("config.toml"));
        assert_eq!(config.error_log_path(), home.join("errors.log"));
    }
}
