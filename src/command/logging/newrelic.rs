use std::io::Write;

use clap::Parser;
use edgectl_client::operations::logging::{LoggingKind, LoggingSettings};
use serde::Serialize;

use super::common::{set, CommonFlags, ProviderArgs};
use crate::command::output::or_empty;
use crate::EdgeResult;

#[derive(Debug, Clone, Default, Serialize, Parser)]
pub struct NewRelic {
    /// The Insert API key from the Account page of your New Relic account
    #[arg(long = "key")]
    key: Option<String>,
    /// The region to which to stream logs
    #[arg(long = "region")]
    region: Option<String>,
    #[clap(flatten)]
    common: CommonFlags,
}

impl ProviderArgs for NewRelic {
    const KIND: LoggingKind = LoggingKind::NewRelic;

    fn required(&self) -> Vec<(&'static str, bool)> {
        vec![("--key", self.key.is_some())]
    }

    fn apply(&self, settings: &mut LoggingSettings) {
        set(&mut settings.token, &self.key);
        set(&mut settings.region, &self.region);
        self.common.apply(settings);
    }

    fn write_details(out: &mut dyn Write, indent: &str, settings: &LoggingSettings) -> EdgeResult<()> {
        writeln!(out, "{indent}Token: {}", or_empty(&settings.token))?;
        writeln!(out, "{indent}Region: {}", or_empty(&settings.region))?;
        Ok(())
    }
}
