use thiserror::Error;

/// Failures raised by edgectl itself rather than by one of its libraries.
#[derive(Error, Debug)]
pub enum EdgeCliError {
    #[error("invalid flag combination, --verbose and --json")]
    VerboseJsonCombo,

    #[error("could not determine a service ID")]
    MissingServiceId,

    #[error("'{value}' is not a valid service version")]
    InvalidVersion { value: String },

    #[error("service '{service_id}' has no versions")]
    NoVersions { service_id: String },

    #[error("service '{service_id}' has no active version")]
    NoActiveVersion { service_id: String },

    #[error("version {version} of service '{service_id}' does not exist")]
    VersionNotFound { service_id: String, version: u32 },

    #[error("version {version} of service '{service_id}' is {state} and cannot be changed")]
    VersionNotEditable {
        service_id: String,
        version: u32,
        state: &'static str,
    },

    #[error("could not find a project manifest at '{path}'")]
    ManifestNotFound { path: String },

    #[error("the project manifest at '{path}' is invalid: {reason}")]
    InvalidManifest { path: String, reason: String },

    #[error("unsupported language '{language}'")]
    UnsupportedLanguage { language: String },

    #[error("the build script `{script}` failed: {status}")]
    BuildFailed { script: String, status: String },

    #[error("the build script `{script}` did not finish within {seconds} seconds")]
    BuildTimeout { script: String, seconds: u64 },

    #[error("no compiled binary found at '{path}'")]
    MissingWasmBinary { path: String },

    #[error("the package at '{path}' is invalid: {reason}")]
    InvalidPackage { path: String, reason: String },

    #[error("an empty value is not allowed for either the '--key' or '--value' flags")]
    EmptyDictionaryItem,

    #[error("item key not found in file {path}")]
    EmptyBatchFile { path: String },

    #[error("could not parse batch file {path}: {reason}")]
    InvalidBatchFile { path: String, reason: String },

    #[error("internal logic error: {detail}")]
    Internal { detail: String },

    #[error("no API token was provided")]
    EmptyApiToken,

    #[error("the following required flags were not provided: {flags}")]
    MissingRequiredFlags { flags: String },
}
