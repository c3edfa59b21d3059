use std::io::Write;

use clap::Parser;
use edgectl_client::operations::logging::{LoggingKind, LoggingSettings};
use serde::Serialize;

use super::common::{set, CommonFlags, ProviderArgs};
use crate::command::output::or_empty;
use crate::EdgeResult;

#[derive(Debug, Clone, Default, Serialize, Parser)]
pub struct Datadog {
    /// The API key from your Datadog account
    #[arg(long = "auth-token")]
    auth_token: Option<String>,
    /// The region that log data will be sent to. One of US or EU. Defaults to US
    #[arg(long = "region")]
    region: Option<String>,
    #[clap(flatten)]
    common: CommonFlags,
}

impl ProviderArgs for Datadog {
    const KIND: LoggingKind = LoggingKind::Datadog;

    fn required(&self) -> Vec<(&'static str, bool)> {
        vec![("--auth-token", self.auth_token.is_some())]
    }

    fn apply(&self, settings: &mut LoggingSettings) {
        set(&mut settings.token, &self.auth_token);
        set(&mut settings.region, &self.region);
        self.common.apply(settings);
    }

    fn write_details(out: &mut dyn Write, indent: &str, settings: &LoggingSettings) -> EdgeResult<()> {
        writeln!(out, "{indent}Token: {}", or_empty(&settings.token))?;
        writeln!(out, "{indent}Region: {}", or_empty(&settings.region))?;
        Ok(())
    }
}
