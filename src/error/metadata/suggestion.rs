use std::fmt::{self, Display};

use edgectl_std::Style;

use crate::utils::env::EdgeEnvKey;

/// `EdgeErrorSuggestion` contains possible suggestions for remedying specific errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EdgeErrorSuggestion {
    SubmitIssue,
    CheckToken,
    CheckEndpoint,
    CheckServiceName { name: String },
    ProvideServiceId,
    ProvideValidVersion,
    UseAutoClone,
    ChooseOneOutputMode,
    CreateProfile,
    ListProfiles,
    SetConfigHome,
    RunInProjectDirectory,
    FixManifest,
    RunBuildFirst,
    CheckBuildScript,
    IncreaseTimeout,
    Adhoc(String),
}

impl Display for EdgeErrorSuggestion {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        use EdgeErrorSuggestion::*;

        let suggestion = match self {
            SubmitIssue => {
                format!(
                    "This error was unexpected! Please submit an issue with any relevant details about what you were trying to do: {}",
                    Style::Link.paint("https://github.com/edgectl/edgectl/issues/new")
                )
            }
            CheckToken => format!(
                "Check that your API token is valid. You can store a new one with {} or set {}.",
                Style::Command.paint("`edgectl config auth`"),
                Style::Command.paint(format!("${}", EdgeEnvKey::ApiToken))
            ),
            CheckEndpoint => format!(
                "Check your network connection and the endpoint in {}. It can be overridden with {}.",
                Style::Command.paint("`edgectl config show`"),
                Style::Command.paint(format!("${}", EdgeEnvKey::Endpoint))
            ),
            CheckServiceName { name } => format!(
                "No service is named {}. Check the spelling, or pass {} instead.",
                Style::Link.paint(name),
                Style::Command.paint("--service-id")
            ),
            ProvideServiceId => format!(
                "Pass {} or {}, set {}, or add a {} to your {} manifest.",
                Style::Command.paint("--service-id"),
                Style::Command.paint("--service-name"),
                Style::Command.paint(format!("${}", EdgeEnvKey::ServiceId)),
                Style::Command.paint("service_id"),
                Style::Path.paint("edge.toml")
            ),
            ProvideValidVersion => format!(
                "Specify {} as {}, {} or a positive version number that exists.",
                Style::Command.paint("--version"),
                Style::Command.paint("latest"),
                Style::Command.paint("active")
            ),
            UseAutoClone => format!(
                "Pass {} to clone the version before changing it.",
                Style::Command.paint("--autoclone")
            ),
            ChooseOneOutputMode => format!(
                "Use either {} or {}, not both.",
                Style::Command.paint("--verbose"),
                Style::Command.paint("--json")
            ),
            CreateProfile => format!(
                "Run {} to store an API token.",
                Style::Command.paint("`edgectl config auth`")
            ),
            ListProfiles => format!(
                "Run {} to see the available profiles.",
                Style::Command.paint("`edgectl config list`")
            ),
            SetConfigHome => format!(
                "Set {} to a writable directory.",
                Style::Command.paint(format!("${}", EdgeEnvKey::ConfigHome))
            ),
            RunInProjectDirectory => format!(
                "Run this command from a directory containing an {} manifest.",
                Style::Path.paint("edge.toml")
            ),
            FixManifest => format!(
                "Fix the reported problem in your {} manifest.",
                Style::Path.paint("edge.toml")
            ),
            RunBuildFirst => format!(
                "Run {} to produce a package, or pass a valid one with {}.",
                Style::Command.paint("`edgectl compute build`"),
                Style::Command.paint("--package")
            ),
            CheckBuildScript => format!(
                "Check the {} script in your {} manifest.",
                Style::Command.paint("[scripts] build"),
                Style::Path.paint("edge.toml")
            ),
            IncreaseTimeout => format!(
                "Pass a larger {} value.",
                Style::Command.paint("--timeout")
            ),
            Adhoc(msg) => msg.to_string(),
        };
        write!(formatter, "{}", &suggestion)
    }
}
