mod code;
mod suggestion;

pub use code::EdgeErrorCode;
pub use suggestion::EdgeErrorSuggestion;

use edgectl_client::EdgeClientError;
use edgectl_std::EdgeStdError;
use houston::HoustonProblem;
use serde::Serialize;

use crate::error::EdgeCliError;

/// The broad class an error belongs to, which decides how it is reported.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EdgeErrorKind {
    /// Conflicting or missing flags. Reported immediately.
    UserInput,
    /// The target service or version could not be determined.
    Resolution,
    /// The control plane API failed.
    Remote,
    /// A bug in edgectl.
    Internal,
    /// Anything else, such as local I/O.
    #[default]
    Other,
}

/// Metadata contains extra information about specific errors
/// Currently this includes an optional error `Code`
/// and an optional `Suggestion`
#[derive(Default, Serialize, Debug)]
pub struct EdgeErrorMetadata {
    // skip serializing for now until we can appropriately strip color codes
    #[serde(skip_serializing)]
    pub suggestion: Option<EdgeErrorSuggestion>,
    pub code: Option<EdgeErrorCode>,

    #[serde(skip_serializing)]
    pub kind: EdgeErrorKind,

    #[serde(skip_serializing)]
    pub skip_printing_cause: bool,
}

/// `Metadata` structs can be created from an `anyhow::Error`
/// This works by downcasting the errors to their underlying types
/// and creating `Suggestion`s and `Code`s where applicable
impl From<&mut anyhow::Error> for EdgeErrorMetadata {
    fn from(error: &mut anyhow::Error) -> Self {
        use EdgeErrorCode as Code;
        use EdgeErrorKind as Kind;
        use EdgeErrorSuggestion as Suggestion;

        if let Some(client_error) = error.downcast_ref::<EdgeClientError>() {
            let (suggestion, code, kind) = match client_error {
                EdgeClientError::InvalidHeader(_) => {
                    (Some(Suggestion::CheckToken), Some(Code::E001), Kind::UserInput)
                }
                EdgeClientError::SendRequest(_) => {
                    (Some(Suggestion::CheckEndpoint), Some(Code::E002), Kind::Remote)
                }
                EdgeClientError::HandleResponse { .. } => {
                    (Some(Suggestion::SubmitIssue), Some(Code::E003), Kind::Remote)
                }
                EdgeClientError::Unauthorized { .. } => {
                    (Some(Suggestion::CheckToken), Some(Code::E004), Kind::Remote)
                }
                EdgeClientError::NotFound { .. } => (None, Some(Code::E005), Kind::Remote),
                EdgeClientError::Api { .. } => (None, Some(Code::E006), Kind::Remote),
                EdgeClientError::ServiceNotFound { name } => (
                    Some(Suggestion::CheckServiceName { name: name.clone() }),
                    Some(Code::E007),
                    Kind::Resolution,
                ),
                EdgeClientError::InvalidEndpoint { .. } => {
                    (Some(Suggestion::CheckEndpoint), Some(Code::E008), Kind::UserInput)
                }
                EdgeClientError::ReadFile { .. } => (None, Some(Code::E009), Kind::Other),
            };
            return EdgeErrorMetadata {
                suggestion,
                code,
                kind,
                skip_printing_cause: false,
            };
        }

        if let Some(houston_problem) = error.downcast_ref::<HoustonProblem>() {
            let (suggestion, code, kind) = match houston_problem {
                HoustonProblem::DefaultConfigDirNotFound
                | HoustonProblem::CouldNotCreateConfigHome(_)
                | HoustonProblem::InvalidOverrideConfigDir(_)
                | HoustonProblem::NoConfigFound(_) => {
                    (Some(Suggestion::SetConfigHome), Some(Code::E010), Kind::UserInput)
                }
                HoustonProblem::ProfileNotFound(_) => {
                    (Some(Suggestion::ListProfiles), Some(Code::E011), Kind::UserInput)
                }
                HoustonProblem::NoConfigProfiles | HoustonProblem::NoNonSensitiveConfigFound(_) => {
                    (Some(Suggestion::CreateProfile), Some(Code::E012), Kind::UserInput)
                }
                HoustonProblem::NoSettingsFound(_) => (None, Some(Code::E013), Kind::UserInput),
                HoustonProblem::PathNotUtf8(_)
                | HoustonProblem::TomlSerialization(_)
                | HoustonProblem::TomlDeserialization(_)
                | HoustonProblem::IoError(_)
                | HoustonProblem::EdgeStdError(_) => (None, Some(Code::E014), Kind::Other),
            };
            return EdgeErrorMetadata {
                suggestion,
                code,
                kind,
                skip_printing_cause: false,
            };
        }

        if let Some(EdgeStdError::EmptyFile { .. }) = error.downcast_ref::<EdgeStdError>() {
            return EdgeErrorMetadata {
                suggestion: None,
                code: Some(Code::E015),
                kind: Kind::UserInput,
                skip_printing_cause: true,
            };
        }

        if let Some(cli_error) = error.downcast_ref::<EdgeCliError>() {
            let (suggestion, code, kind) = match cli_error {
                EdgeCliError::VerboseJsonCombo => (
                    Some(Suggestion::ChooseOneOutputMode),
                    Some(Code::E016),
                    Kind::UserInput,
                ),
                EdgeCliError::MissingServiceId => (
                    Some(Suggestion::ProvideServiceId),
                    Some(Code::E017),
                    Kind::Resolution,
                ),
                EdgeCliError::InvalidVersion { .. }
                | EdgeCliError::NoVersions { .. }
                | EdgeCliError::NoActiveVersion { .. }
                | EdgeCliError::VersionNotFound { .. } => (
                    Some(Suggestion::ProvideValidVersion),
                    Some(Code::E018),
                    Kind::Resolution,
                ),
                EdgeCliError::VersionNotEditable { .. } => {
                    (Some(Suggestion::UseAutoClone), Some(Code::E019), Kind::Resolution)
                }
                EdgeCliError::ManifestNotFound { .. } => (
                    Some(Suggestion::RunInProjectDirectory),
                    Some(Code::E020),
                    Kind::UserInput,
                ),
                EdgeCliError::InvalidManifest { .. } => {
                    (Some(Suggestion::FixManifest), Some(Code::E021), Kind::UserInput)
                }
                EdgeCliError::UnsupportedLanguage { .. } => {
                    (Some(Suggestion::FixManifest), Some(Code::E022), Kind::UserInput)
                }
                EdgeCliError::BuildFailed { .. } => {
                    (Some(Suggestion::CheckBuildScript), Some(Code::E023), Kind::Other)
                }
                EdgeCliError::BuildTimeout { .. } => {
                    (Some(Suggestion::IncreaseTimeout), Some(Code::E024), Kind::Other)
                }
                EdgeCliError::MissingWasmBinary { .. } => {
                    (Some(Suggestion::CheckBuildScript), Some(Code::E025), Kind::Other)
                }
                EdgeCliError::InvalidPackage { .. } => {
                    (Some(Suggestion::RunBuildFirst), Some(Code::E026), Kind::UserInput)
                }
                EdgeCliError::EmptyDictionaryItem | EdgeCliError::EmptyBatchFile { .. } => {
                    (None, Some(Code::E027), Kind::UserInput)
                }
                EdgeCliError::Internal { .. } => {
                    (Some(Suggestion::SubmitIssue), Some(Code::E028), Kind::Internal)
                }
                EdgeCliError::EmptyApiToken => {
                    (Some(Suggestion::CreateProfile), Some(Code::E029), Kind::UserInput)
                }
                EdgeCliError::InvalidBatchFile { .. } => {
                    (None, Some(Code::E030), Kind::UserInput)
                }
                EdgeCliError::MissingRequiredFlags { .. } => {
                    (None, Some(Code::E031), Kind::UserInput)
                }
            };
            return EdgeErrorMetadata {
                suggestion,
                code,
                kind,
                skip_printing_cause: true,
            };
        }

        EdgeErrorMetadata::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case::combo(EdgeCliError::VerboseJsonCombo, EdgeErrorCode::E016, EdgeErrorKind::UserInput)]
    #[case::service(EdgeCliError::MissingServiceId, EdgeErrorCode::E017, EdgeErrorKind::Resolution)]
    #[case::internal(
        EdgeCliError::Internal { detail: "oops".to_string() },
        EdgeErrorCode::E028,
        EdgeErrorKind::Internal
    )]
    fn cli_errors_map_to_codes(
        #[case] error: EdgeCliError,
        #[case] code: EdgeErrorCode,
        #[case] kind: EdgeErrorKind,
    ) {
        let mut error = anyhow::Error::from(error);
        let metadata = EdgeErrorMetadata::from(&mut error);
        assert_eq!(metadata.code, Some(code));
        assert_eq!(metadata.kind, kind);
    }

    #[test]
    fn internal_errors_ask_for_an_issue() {
        let mut error = anyhow::Error::from(EdgeCliError::Internal {
            detail: "no progress".to_string(),
        });
        let metadata = EdgeErrorMetadata::from(&mut error);
        assert_eq!(metadata.suggestion, Some(EdgeErrorSuggestion::SubmitIssue));
    }

    #[test]
    fn remote_errors_are_remote() {
        let mut error = anyhow::Error::from(EdgeClientError::Api {
            status: 500,
            detail: "boom".to_string(),
        });
        let metadata = EdgeErrorMetadata::from(&mut error);
        assert_eq!(metadata.kind, EdgeErrorKind::Remote);
        assert_eq!(metadata.code, Some(EdgeErrorCode::E006));
    }
}
