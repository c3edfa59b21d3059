use std::fmt::{self, Display};
use std::str::FromStr;

use clap::Parser;
use serde::Serialize;

use crate::EdgeCliError;

#[derive(Debug, Clone, Default, Serialize, Parser)]
pub struct ServiceOpt {
    /// Service ID. Falls back to $EDGECTL_SERVICE_ID, then to the
    /// `service_id` in edge.toml
    #[arg(long = "service-id", short = 's')]
    pub service_id: Option<String>,

    /// The name of the service
    #[arg(long = "service-name", conflicts_with = "service_id")]
    pub service_name: Option<String>,
}

/// Which version of a service a command operates on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum VersionSelector {
    /// The highest version number
    Latest,
    /// The currently active version
    Active,
    /// The active version, or the highest version number when none is
    /// active. Only used as a default, never parsed from a flag.
    ActiveOrLatest,
    Number(u32),
}

impl FromStr for VersionSelector {
    type Err = EdgeCliError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || EdgeCliError::InvalidVersion {
            value: s.to_string(),
        };
        match s.trim().to_lowercase().as_str() {
            "latest" => Ok(VersionSelector::Latest),
            "active" => Ok(VersionSelector::Active),
            other => match other.parse::<u32>() {
                Ok(0) | Err(_) => Err(invalid()),
                Ok(n) => Ok(VersionSelector::Number(n)),
            },
        }
    }
}

impl Display for VersionSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VersionSelector::Latest => write!(f, "latest"),
            VersionSelector::Active => write!(f, "active"),
            VersionSelector::ActiveOrLatest => write!(f, "active or latest"),
            VersionSelector::Number(n) => write!(f, "{n}"),
        }
    }
}

#[derive(Debug, Clone, Serialize, Parser)]
pub struct VersionOpt {
    /// 'latest', 'active', or the number of a specific version
    #[arg(long = "version", value_parser = VersionSelector::from_str)]
    pub version: VersionSelector,
}

#[derive(Debug, Clone, Default, Serialize, Parser)]
pub struct OptionalVersionOpt {
    /// 'latest', 'active', or the number of a specific version
    #[arg(long = "version", value_parser = VersionSelector::from_str)]
    pub version: Option<VersionSelector>,
}

#[derive(Debug, Clone, Default, Serialize, Parser)]
pub struct AutoCloneOpt {
    /// If the selected version is active or locked, clone it and operate
    /// on the clone instead
    #[arg(long = "autoclone")]
    pub autoclone: bool,
}

#[cfg(test)]
mod tests {
    use rstest::rstest;
    use speculoos::prelude::*;

    use super::*;

    #[rstest]
    #[case("latest", VersionSelector::Latest)]
    #[case("ACTIVE", VersionSelector::Active)]
    #[case("3", VersionSelector::Number(3))]
    #[case(" 12 ", VersionSelector::Number(12))]
    fn it_parses_version_selectors(#[case] input: &str, #[case] expected: VersionSelector) {
        assert_that!(VersionSelector::from_str(input).unwrap()).is_equal_to(expected);
    }

    #[rstest]
    #[case("0")]
    #[case("-1")]
    #[case("newest")]
    #[case("")]
    fn version_numbers_must_be_positive(#[case] input: &str) {
        assert_that!(VersionSelector::from_str(input)).is_err();
    }

    #[test]
    fn service_id_and_name_conflict() {
        #[derive(Debug, Parser)]
        struct Cmd {
            #[clap(flatten)]
            service: ServiceOpt,
        }
        let result = Cmd::try_parse_from(["cmd", "-s", "abc", "--service-name", "web"]);
        assert_that!(result).is_err();
    }
}
