//! The context every command runs against.

use camino::{Utf8Path, Utf8PathBuf};
use edgectl_client::EdgeApi;
use houston::Config;
use lazycell::LazyCell;

use crate::command::output::OutputMode;
use crate::manifest::{self, Manifest};
use crate::utils::client::EdgeClientConfig;
use crate::utils::env::{EdgeEnv, EdgeEnvKey};
use crate::utils::err_log::{ErrContext, ErrLog};
use crate::{EdgeCliError, EdgeError, EdgeResult};

/// Holds the API client, the error log, the global flags and the
/// environment. Commands receive it by reference instead of reaching for
/// globals, so tests can hand them a session backed by a mock client.
pub struct Session {
    verbose: bool,
    profile: String,
    env: EdgeEnv,
    project_dir: Utf8PathBuf,
    config: LazyCell<Config>,
    api: LazyCell<Box<dyn EdgeApi>>,
    err_log: ErrLog,
}

impl Session {
    pub fn new(verbose: bool, profile: impl Into<String>, env: EdgeEnv, project_dir: Utf8PathBuf) -> Session {
        Session {
            verbose,
            profile: profile.into(),
            env,
            project_dir,
            config: LazyCell::new(),
            api: LazyCell::new(),
            err_log: ErrLog::new(),
        }
    }

    /// Uses `api` for every remote call instead of building a client from
    /// the stored credentials.
    pub fn with_api(self, api: Box<dyn EdgeApi>) -> Session {
        if self.api.fill(api).is_err() {
            tracing::warn!("API client was already initialised");
        }
        self
    }

    pub const fn verbose(&self) -> bool {
        self.verbose
    }

    pub fn profile(&self) -> &str {
        &self.profile
    }

    pub const fn env(&self) -> &EdgeEnv {
        &self.env
    }

    pub const fn err_log(&self) -> &ErrLog {
        &self.err_log
    }

    pub fn project_dir(&self) -> &Utf8Path {
        &self.project_dir
    }

    pub fn manifest_path(&self) -> Utf8PathBuf {
        manifest::manifest_path(&self.project_dir)
    }

    /// The project manifest, if the working directory has one.
    pub fn manifest(&self) -> EdgeResult<Option<Manifest>> {
        Manifest::load_optional(&self.manifest_path())
    }

    pub fn config(&self) -> EdgeResult<&Config> {
        self.config.try_borrow_with(|| -> EdgeResult<Config> {
            let override_home = self.env.get(EdgeEnvKey::ConfigHome)?.map(Utf8PathBuf::from);
            let override_api_token = self.env.get(EdgeEnvKey::ApiToken)?;
            let override_endpoint = self.env.get(EdgeEnvKey::Endpoint)?;
            Ok(Config::new(
                override_home.as_ref(),
                override_api_token,
                override_endpoint,
            )?)
        })
    }

    pub fn api(&self) -> EdgeResult<&dyn EdgeApi> {
        let api = self.api.try_borrow_with(|| -> EdgeResult<Box<dyn EdgeApi>> {
            let client_config = EdgeClientConfig::new(self.config()?.clone())?;
            Ok(Box::new(client_config.get_client(&self.profile)?))
        })?;
        Ok(api.as_ref())
    }

    /// Picks the output mode for a command that accepts `--json`.
    /// Must be called before any remote call is made.
    pub fn output_mode(&self, json: bool) -> EdgeResult<OutputMode> {
        if self.verbose && json {
            return Err(EdgeCliError::VerboseJsonCombo.into());
        }
        Ok(OutputMode::select(self.verbose, json))
    }

    /// Records `error` in the error log and hands it back.
    pub fn record(&self, error: impl Into<EdgeError>) -> EdgeError {
        let error = error.into();
        self.err_log.add(&error);
        error
    }

    /// Records `error` with `context` in the error log and hands it back.
    pub fn record_with(&self, error: impl Into<EdgeError>, context: ErrContext) -> EdgeError {
        let error = error.into();
        self.err_log.add_with_context(&error, context);
        error
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use assert_fs::TempDir;
    use camino::Utf8PathBuf;
    use edgectl_client::MockEdgeApi;

    use super::Session;
    use crate::utils::env::{EdgeEnv, EdgeEnvKey};

    /// A session in a fresh project directory whose API is `mock`.
    /// Keep the returned directory alive for the duration of the test.
    pub(crate) fn session_with(mock: MockEdgeApi, verbose: bool) -> (Session, TempDir) {
        let dir = TempDir::new().unwrap();
        let project_dir = Utf8PathBuf::try_from(dir.path().to_path_buf()).unwrap();
        let mut env = EdgeEnv::mock();
        env.insert(EdgeEnvKey::ConfigHome, project_dir.join(".config").as_str());
        let session = Session::new(verbose, "default", env, project_dir).with_api(Box::new(mock));
        (session, dir)
    }

    pub(crate) fn output(out: Vec<u8>) -> String {
        String::from_utf8(out).unwrap()
    }
}

#[cfg(test)]
mod tests {
    use edgectl_client::MockEdgeApi;
    use speculoos::prelude::*;

    use super::testing::session_with;
    use super::*;
    use crate::EdgeErrorCode;

    #[test]
    fn verbose_and_json_together_are_rejected() {
        let (session, _dir) = session_with(MockEdgeApi::new(), true);
        let error = session.output_mode(true).unwrap_err();
        assert_that!(error.code()).is_equal_to(Some(EdgeErrorCode::E016));
        assert_that!(session.output_mode(false).unwrap()).is_equal_to(OutputMode::Verbose);
    }

    #[test]
    fn recorded_errors_land_in_the_log() {
        let (session, _dir) = session_with(MockEdgeApi::new(), false);
        let error = session.record(EdgeCliError::MissingServiceId);
        assert_that!(error.code()).is_equal_to(Some(EdgeErrorCode::E017));
        assert_that!(session.err_log().len()).is_equal_to(1);
    }

    #[test]
    fn config_home_comes_from_the_environment() {
        let dir = assert_fs::TempDir::new().unwrap();
        let home = Utf8PathBuf::try_from(dir.path().join("home")).unwrap();
        let mut env = EdgeEnv::mock();
        env.insert(EdgeEnvKey::ConfigHome, home.as_str());
        env.insert(EdgeEnvKey::ApiToken, "abcd1234efgh");
        let session = Session::new(false, "default", env, home.clone());

        let config = session.config().unwrap();
        assert_that!(config.home).is_equal_to(home);
        assert_that!(config.override_api_token).is_equal_to(Some("abcd1234efgh".to_string()));
    }

    #[test]
    fn no_manifest_means_none() {
        let (session, _dir) = session_with(MockEdgeApi::new(), false);
        assert_that!(session.manifest().unwrap()).is_none();
    }
}
