use edgectl_client::blocking::EdgeClient;
use houston::{Config, Profile, Settings};

use crate::EdgeResult;

/// the version of edgectl currently set in `Cargo.toml`
const EDGECTL_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Everything needed to build an authenticated [`EdgeClient`].
pub struct EdgeClientConfig {
    endpoint: String,
    config: Config,
    version: String,
}

impl EdgeClientConfig {
    pub fn new(config: Config) -> EdgeResult<EdgeClientConfig> {
        let version = if cfg!(debug_assertions) {
            format!("{EDGECTL_VERSION} (dev)")
        } else {
            EDGECTL_VERSION.to_string()
        };
        let endpoint = Settings::load(&config)?.endpoint(&config);

        Ok(EdgeClientConfig {
            endpoint,
            config,
            version,
        })
    }

    pub fn get_client(&self, profile_name: &str) -> EdgeResult<EdgeClient> {
        let credential = Profile::get_credential(profile_name, &self.config)?;
        tracing::debug!(endpoint = %self.endpoint, "building API client");
        Ok(EdgeClient::new(&self.endpoint, &credential, &self.version)?)
    }
}
