use std::io::Write;

use clap::Parser;
use edgectl_client::operations::logging::{LoggingKind, LoggingSettings};
use serde::Serialize;

use super::common::{set, CommonFlags, FileFlags, ProviderArgs};
use crate::command::output::or_empty;
use crate::EdgeResult;

#[derive(Debug, Clone, Default, Serialize, Parser)]
pub struct AzureBlob {
    /// The unique Azure Blob Storage namespace in which your data objects are stored
    #[arg(long = "account-name")]
    account_name: Option<String>,
    /// The name of the Azure Blob Storage container in which to store logs
    #[arg(long = "container")]
    container: Option<String>,
    /// The Azure shared access signature providing write access to the blob service objects
    #[arg(long = "sas-token")]
    sas_token: Option<String>,
    /// The maximum size of a log file in bytes
    #[arg(long = "file-max-bytes")]
    file_max_bytes: Option<u64>,
    #[clap(flatten)]
    common: CommonFlags,
    #[clap(flatten)]
    file: FileFlags,
}

impl ProviderArgs for AzureBlob {
    const KIND: LoggingKind = LoggingKind::AzureBlob;

    fn required(&self) -> Vec<(&'static str, bool)> {
        vec![
            ("--account-name", self.account_name.is_some()),
            ("--container", self.container.is_some()),
            ("--sas-token", self.sas_token.is_some()),
        ]
    }

    fn apply(&self, settings: &mut LoggingSettings) {
        set(&mut settings.account_name, &self.account_name);
        set(&mut settings.container, &self.container);
        set(&mut settings.sas_token, &self.sas_token);
        set(&mut settings.file_max_bytes, &self.file_max_bytes);
        self.common.apply(settings);
        self.file.apply(settings);
    }

    fn write_details(out: &mut dyn Write, indent: &str, settings: &LoggingSettings) -> EdgeResult<()> {
        writeln!(out, "{indent}Account name: {}", or_empty(&settings.account_name))?;
        writeln!(out, "{indent}Container: {}", or_empty(&settings.container))?;
        writeln!(out, "{indent}SAS token: {}", or_empty(&settings.sas_token))?;
        writeln!(out, "{indent}File max bytes: {}", or_empty(&settings.file_max_bytes))?;
        Ok(())
    }
}
