use std::collections::HashMap;
use std::{env, fmt, io};

use heck::ToShoutySnakeCase;

/// EdgeEnv allows us to mock environment variables while
/// running tests. That way we can run our tests in parallel,
/// and our local development environment will not have unintended
/// side effects on our tests.
#[derive(Debug, Clone)]
pub struct EdgeEnv {
    mock_store: Option<HashMap<String, String>>,
}

impl Default for EdgeEnv {
    fn default() -> EdgeEnv {
        EdgeEnv::new()
    }
}

impl EdgeEnv {
    /// creates a new environment variable store
    pub fn new() -> EdgeEnv {
        let mock_store = if cfg!(test) {
            Some(HashMap::new())
        } else {
            None
        };

        EdgeEnv { mock_store }
    }

    /// creates a store that never reads the process environment
    pub fn mock() -> EdgeEnv {
        EdgeEnv {
            mock_store: Some(HashMap::new()),
        }
    }

    /// returns the value of the environment variable if it exists
    pub fn get(&self, key: EdgeEnvKey) -> io::Result<Option<String>> {
        let key_str = key.to_string();
        tracing::trace!("Checking for ${}", &key_str);
        let result = match &self.mock_store {
            Some(mock_store) => mock_store.get(&key_str).map(|v| v.to_owned()),
            None => match env::var(&key_str) {
                Ok(data) => Some(data),
                Err(env::VarError::NotPresent) => None,
                Err(env::VarError::NotUnicode(_)) => {
                    return Err(io::Error::new(
                        io::ErrorKind::InvalidInput,
                        format!(
                            "The value of the environment variable \"{}\" is not valid Unicode.",
                            &key_str
                        ),
                    ));
                }
            },
        };

        if let Some(result) = &result {
            tracing::debug!("read {}", self.get_debug_value(key, result));
        } else {
            tracing::trace!("could not find ${}", &key_str);
        }

        Ok(result)
    }

    fn get_debug_value(&self, key: EdgeEnvKey, value: &str) -> String {
        let value = if let EdgeEnvKey::ApiToken = key {
            houston::mask_token(value)
        } else {
            value.to_string()
        };

        format!("environment variable ${} = {}", key, value)
    }

    /// sets a value in the mock store. The process environment is never written.
    pub fn insert(&mut self, key: EdgeEnvKey, value: &str) {
        tracing::debug!("writing {}", self.get_debug_value(key, value));
        if let Some(mock_store) = &mut self.mock_store {
            mock_store.insert(key.to_string(), value.into());
        }
    }

    /// removes a value from the mock store
    pub fn remove(&mut self, key: EdgeEnvKey) {
        tracing::debug!("removing {}", key);
        if let Some(mock_store) = &mut self.mock_store {
            mock_store.remove(&key.to_string());
        }
    }
}

/// EdgeEnvKey defines all of the environment variables
/// that are respected by edgectl. Any time a new environment variable
/// is added to the public contract, it should be defined here.
/// Each environment variable is prefixed with `EDGECTL_` and
/// the suffix is the name of the key defined here. It will automatically
/// be converted from CamelCase to SHOUTY_SNAKE_CASE.
/// For example, `EdgeEnvKey::ConfigHome.to_string()` becomes `EDGECTL_CONFIG_HOME`
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum EdgeEnvKey {
    ConfigHome,
    ApiToken,
    Endpoint,
    ServiceId,
}

impl fmt::Display for EdgeEnvKey {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        let dbg = format!("{:?}", self).to_shouty_snake_case();
        write!(fmt, "EDGECTL_{}", &dbg)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(EdgeEnvKey::ConfigHome, "EDGECTL_CONFIG_HOME")]
    #[case(EdgeEnvKey::ApiToken, "EDGECTL_API_TOKEN")]
    #[case(EdgeEnvKey::Endpoint, "EDGECTL_ENDPOINT")]
    #[case(EdgeEnvKey::ServiceId, "EDGECTL_SERVICE_ID")]
    fn it_formats_keys(#[case] key: EdgeEnvKey, #[case] expected: &str) {
        assert_eq!(key.to_string(), expected);
    }

    #[test]
    fn it_can_set_and_read_from_mock() {
        let expected_value = "hey whats the big idea anyway!??";
        let key = EdgeEnvKey::ConfigHome;
        let mut env_store = EdgeEnv::new();
        env_store.insert(key, expected_value);
        let actual_value = env_store.get(key).unwrap().unwrap();
        assert_eq!(expected_value, &actual_value)
    }

    #[test]
    fn it_can_remove_from_mock() {
        let key = EdgeEnvKey::ServiceId;
        let mut env_store = EdgeEnv::mock();
        env_store.insert(key, "abc");
        assert_eq!(env_store.get(key).unwrap().as_deref(), Some("abc"));
        env_store.remove(key);
        assert_eq!(env_store.get(key).unwrap(), None);
    }
}
