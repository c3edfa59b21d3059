mod sensitive;

use crate::{Config, HoustonProblem};
use sensitive::Sensitive;
use serde::{Deserialize, Serialize};

use camino::Utf8PathBuf;
use std::{fmt, fs};

/// Collects configuration related to a profile.
#[derive(Debug, Serialize, Deserialize)]
pub struct Profile {
    sensitive: Sensitive,
}

/// Represents all possible options in loading configuration
pub struct LoadOpts {
    /// Should sensitive config be included in the load
    pub sensitive: bool,
}

/// Represents all possible configuration options.
pub struct ProfileData {
    /// API token for the control plane
    pub api_token: Option<String>,
}

/// Struct containing info about an API token
#[derive(Debug, Clone)]
pub struct Credential {
    /// The API token itself
    pub api_token: String,

    /// The origin of the API token
    pub origin: CredentialOrigin,
}

/// Info about where the API token was retrieved
#[derive(Debug, Clone, Eq, PartialEq)]
pub enum CredentialOrigin {
    /// The credential is from an environment variable
    EnvVar,

    /// The credential is from a profile
    ConfigFile(String),
}

impl Profile {
    fn base_dir(config: &Config) -> Utf8PathBuf {
        config.home.join("profiles")
    }

    fn dir(name: &str, config: &Config) -> Utf8PathBuf {
        Profile::base_dir(config).join(name)
    }

    /// Writes an api_token to the filesystem (`<home>/profiles/<profile_name>/.sensitive`).
    pub fn set_api_token(name: &str, config: &Config, api_token: String) -> Result<(), HoustonProblem> {
        let data = ProfileData {
            api_token: Some(api_token),
        };
        Profile::save(name, config, data)?;
        Ok(())
    }

    /// Returns a credential for talking to the control plane API.
    ///
    /// Checks for the presence of an override token on the `Config`, and returns it
    /// if it finds one. Otherwise looks for credentials on the file system.
    pub fn get_credential(name: &str, config: &Config) -> Result<Credential, HoustonProblem> {
        let credential = match &config.override_api_token {
            Some(api_token) => Credential {
                api_token: api_token.to_string(),
                origin: CredentialOrigin::EnvVar,
            },
            None => {
                let opts = LoadOpts { sensitive: true };
                let profile = Profile::load(name, config, opts)?;
                Credential {
                    api_token: profile.sensitive.api_token,
                    origin: CredentialOrigin::ConfigFile(name.to_string()),
                }
            }
        };

        tracing::debug!("using API token {}", mask_token(&credential.api_token));

        Ok(credential)
    }

    /// Saves configuration options for a specific profile to the file system,
    /// splitting sensitive information into a separate file.
    pub fn save(name: &str, config: &Config, data: ProfileData) -> Result<(), HoustonProblem> {
        if let Some(api_token) = data.api_token {
            Sensitive { api_token }.save(name, config)?;
        }
        Ok(())
    }

    /// Loads and deserializes configuration from the file system for a
    /// specific profile.
    pub fn load(name: &str, config: &Config, opts: LoadOpts) -> Result<Profile, HoustonProblem> {
        if Profile::dir(name, config).exists() {
            if opts.sensitive {
                let sensitive = Sensitive::load(name, config)?;
                return Ok(Profile { sensitive });
            }
            Err(HoustonProblem::NoNonSensitiveConfigFound(name.to_string()))
        } else {
            Err(HoustonProblem::ProfileNotFound(name.to_string()))
        }
    }

    /// Deletes profile data from file system.
    pub fn delete(name: &str, config: &Config) -> Result<(), HoustonProblem> {
        let dir = Profile::dir(name, config);
        tracing::debug!(dir = %dir, "deleting profile");
        fs::remove_dir_all(dir).map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => HoustonProblem::ProfileNotFound(name.to_string()),
            _ => HoustonProblem::IoError(e),
        })
    }

    /// Lists profiles based on directories in `<home>/profiles`, sorted by name.
    pub fn list(config: &Config) -> Result<Vec<String>, HoustonProblem> {
        let profiles_dir = Profile::base_dir(config);
        let mut profiles = vec![];

        // if profiles dir doesn't exist return empty vec
        let entries = match fs::read_dir(profiles_dir) {
            Ok(entries) => entries,
            Err(_) => return Ok(profiles),
        };

        for entry in entries {
            let entry_path = Utf8PathBuf::try_from(entry?.path())?;
            if entry_path.is_dir() {
                if let Some(profile) = entry_path.file_name() {
                    tracing::debug!(?profile, "detected profile");
                    profiles.push(profile.to_string());
                }
            }
        }
        profiles.sort();
        Ok(profiles)
    }
}

impl fmt::Display for Profile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", mask_token(&self.sensitive.api_token))
    }
}

/// Masks all but the first 4 and last 4 chars of a token with `*`.
/// Tokens of 8 chars or fewer are masked entirely.
pub fn mask_token(token: &str) -> String {
    let chars: Vec<char> = token.chars().collect();
    if chars.len() <= 8 {
        return "*".repeat(chars.len());
    }
    let head: String = chars[..4].iter().collect();
    let tail: String = chars[chars.len() - 4..].iter().collect();
    format!("{}{}{}", head, "*".repeat(chars.len() - 8), tail)
}

#[cfg(test)]
mod tests {
    use super::mask_token;

    #[test]
    fn it_can_mask_tokens() {
        assert_eq!(mask_token("abcdefghijklmnop"), "abcd********mnop");
        assert_eq!(mask_token("short"), "*****");
        assert_eq!(mask_token(""), "");
    }
}
