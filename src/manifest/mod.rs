//! The project manifest, `edge.toml`.

use std::collections::BTreeMap;
use std::str::FromStr;

use camino::{Utf8Path, Utf8PathBuf};
use edgectl_std::Fs;
use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumIter, EnumString, IntoStaticStr};

use crate::{EdgeCliError, EdgeError, EdgeResult};

pub const MANIFEST_FILE: &str = "edge.toml";
pub const MANIFEST_VERSION: u32 = 1;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Manifest {
    #[serde(default)]
    pub manifest_version: u32,
    pub name: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub description: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub authors: Vec<String>,
    #[serde(default)]
    pub language: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub service_id: Option<String>,
    #[serde(default, skip_serializing_if = "Scripts::is_empty")]
    pub scripts: Scripts,
    #[serde(default, skip_serializing_if = "Setup::is_empty")]
    pub setup: Setup,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scripts {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub build: Option<String>,
}

impl Scripts {
    fn is_empty(&self) -> bool {
        self.build.is_none()
    }
}

/// Resources provisioned the first time a package is deployed to a new service.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Setup {
    /// Keyed by dictionary name. A `BTreeMap` so dictionaries are always
    /// provisioned in name order.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub dictionaries: BTreeMap<String, SetupDictionary>,
}

impl Setup {
    fn is_empty(&self) -> bool {
        self.dictionaries.is_empty()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SetupDictionary {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub items: BTreeMap<String, SetupDictionaryItem>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SetupDictionaryItem {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Languages `compute build` knows a default build script for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString, EnumIter, IntoStaticStr)]
#[strum(serialize_all = "lowercase")]
pub enum Language {
    Rust,
    JavaScript,
    Go,
}

impl Language {
    /// Case-insensitive parse of a language name.
    pub fn parse(language: &str) -> EdgeResult<Language> {
        Language::from_str(&language.to_lowercase()).map_err(|_| {
            EdgeError::new(EdgeCliError::UnsupportedLanguage {
                language: language.to_string(),
            })
        })
    }

    /// The build script used when the manifest does not provide one.
    /// Every script leaves the compiled module at `bin/main.wasm`.
    pub const fn default_build_script(&self) -> &'static str {
        match self {
            Language::Rust => {
                "cargo build --bin edge-app --release --target wasm32-wasip1 && mkdir -p bin && cp target/wasm32-wasip1/release/edge-app.wasm bin/main.wasm"
            }
            Language::JavaScript => "npm exec --yes -- js-compute-runtime ./src/index.js ./bin/main.wasm",
            Language::Go => "tinygo build -target=wasi -o bin/main.wasm ./",
        }
    }
}

impl Manifest {
    pub fn new(name: impl Into<String>, language: Language) -> Self {
        Manifest {
            manifest_version: MANIFEST_VERSION,
            name: name.into(),
            language: language.to_string(),
            ..Default::default()
        }
    }

    pub fn parse(path: &Utf8Path, contents: &str) -> EdgeResult<Manifest> {
        toml::from_str(contents).map_err(|e| {
            EdgeError::new(EdgeCliError::InvalidManifest {
                path: path.to_string(),
                reason: e.to_string(),
            })
        })
    }

    /// Reads the manifest at `path`, failing when it does not exist.
    pub fn load(path: &Utf8Path) -> EdgeResult<Manifest> {
        if !path.exists() {
            return Err(EdgeCliError::ManifestNotFound {
                path: path.to_string(),
            }
            .into());
        }
        let contents = Fs::read_file(path)?;
        Manifest::parse(path, &contents)
    }

    /// Reads the manifest at `path` if there is one.
    pub fn load_optional(path: &Utf8Path) -> EdgeResult<Option<Manifest>> {
        if path.exists() {
            Manifest::load(path).map(Some)
        } else {
            Ok(None)
        }
    }

    pub fn save(&self, path: &Utf8Path) -> EdgeResult<()> {
        let contents = toml::to_string_pretty(self)?;
        Fs::write_file(path, contents)?;
        tracing::debug!(%path, "wrote manifest");
        Ok(())
    }

    pub fn language(&self) -> EdgeResult<Language> {
        Language::parse(&self.language)
    }
}

/// Where the manifest for the current project lives.
pub fn manifest_path(project_dir: &Utf8Path) -> Utf8PathBuf {
    project_dir.join(MANIFEST_FILE)
}

#[cfg(test)]
mod tests {
    use assert_fs::TempDir;
    use indoc::indoc;
    use pretty_assertions::assert_eq;
    use rstest::rstest;
    use speculoos::prelude::*;

    use super::*;
    use crate::EdgeErrorCode;

    const FULL: &str = indoc! {r#"
        manifest_version = 1
        name = "my-app"
        description = "an edge app"
        authors = ["dev@example.com"]
        language = "rust"
        service_id = "abc123"

        [scripts]
        build = "make wasm"

        [setup.dictionaries.things]
        description = "some things"

        [setup.dictionaries.things.items.b]
        value = "2"

        [setup.dictionaries.things.items.a]
        value = "1"
        description = "the first"

        [setup.dictionaries.empty]
    "#};

    fn path() -> Utf8PathBuf {
        Utf8PathBuf::from(MANIFEST_FILE)
    }

    #[test]
    fn it_parses_a_full_manifest() {
        let manifest = Manifest::parse(&path(), FULL).unwrap();
        assert_eq!(manifest.name, "my-app");
        assert_eq!(manifest.service_id.as_deref(), Some("abc123"));
        assert_eq!(manifest.scripts.build.as_deref(), Some("make wasm"));

        let names: Vec<&String> = manifest.setup.dictionaries.keys().collect();
        assert_eq!(names, vec!["empty", "things"]);
        let keys: Vec<&String> = manifest.setup.dictionaries["things"].items.keys().collect();
        assert_eq!(keys, vec!["a", "b"]);
    }

    #[test]
    fn a_minimal_manifest_has_no_setup() {
        let manifest = Manifest::parse(&path(), "name = \"x\"\nlanguage = \"go\"\n").unwrap();
        assert_that!(manifest.setup.dictionaries.len()).is_equal_to(0);
        assert_that!(manifest.service_id).is_none();
    }

    #[test]
    fn invalid_toml_is_reported() {
        let error = Manifest::parse(&path(), "name = ").unwrap_err();
        assert_that!(error.code()).is_equal_to(Some(EdgeErrorCode::E021));
    }

    #[rstest]
    #[case("rust", Language::Rust)]
    #[case("JavaScript", Language::JavaScript)]
    #[case("go", Language::Go)]
    fn languages_are_case_insensitive(#[case] input: &str, #[case] expected: Language) {
        let mut manifest = Manifest::new("x", Language::Rust);
        manifest.language = input.to_string();
        assert_that!(manifest.language().unwrap()).is_equal_to(expected);
    }

    #[test]
    fn unknown_languages_are_rejected() {
        let mut manifest = Manifest::new("x", Language::Rust);
        manifest.language = "cobol".to_string();
        let error = manifest.language().unwrap_err();
        assert_that!(error.code()).is_equal_to(Some(EdgeErrorCode::E022));
    }

    #[test]
    fn save_then_load_keeps_the_service_id() {
        let dir = TempDir::new().unwrap();
        let path = Utf8PathBuf::try_from(dir.path().join(MANIFEST_FILE)).unwrap();
        let mut manifest = Manifest::new("my-app", Language::Go);
        manifest.service_id = Some("svc".to_string());
        manifest.save(&path).unwrap();

        let loaded = Manifest::load(&path).unwrap();
        assert_eq!(loaded, manifest);
    }

    #[test]
    fn a_missing_manifest_is_optional_only_when_asked() {
        let dir = TempDir::new().unwrap();
        let path = Utf8PathBuf::try_from(dir.path().join(MANIFEST_FILE)).unwrap();
        assert_that!(Manifest::load_optional(&path).unwrap()).is_none();
        let error = Manifest::load(&path).unwrap_err();
        assert_that!(error.code()).is_equal_to(Some(EdgeErrorCode::E020));
    }
}
