use std::io::Write;

use clap::Parser;
use edgectl_client::operations::logging::{LoggingKind, LoggingSettings};
use serde::Serialize;

use super::common::{set, CommonFlags, FileFlags, ProviderArgs};
use crate::command::output::or_empty;
use crate::EdgeResult;

#[derive(Debug, Clone, Default, Serialize, Parser)]
pub struct Cloudfiles {
    /// The username for your Cloud Files account
    #[arg(long = "user")]
    user: Option<String>,
    /// Your Cloud Files account access key
    #[arg(long = "access-key")]
    access_key: Option<String>,
    /// The name of your Cloud Files container
    #[arg(long = "bucket")]
    bucket: Option<String>,
    /// The region to stream logs to. One of: DFW, ORD, IAD, LON, SYD, HKG
    #[arg(long = "region")]
    region: Option<String>,
    #[clap(flatten)]
    common: CommonFlags,
    #[clap(flatten)]
    file: FileFlags,
}

impl ProviderArgs for Cloudfiles {
    const KIND: LoggingKind = LoggingKind::Cloudfiles;

    fn required(&self) -> Vec<(&'static str, bool)> {
        vec![
            ("--user", self.user.is_some()),
            ("--access-key", self.access_key.is_some()),
            ("--bucket", self.bucket.is_some()),
        ]
    }

    fn apply(&self, settings: &mut LoggingSettings) {
        set(&mut settings.user, &self.user);
        set(&mut settings.access_key, &self.access_key);
        set(&mut settings.bucket_name, &self.bucket);
        set(&mut settings.region, &self.region);
        self.common.apply(settings);
        self.file.apply(settings);
    }

    fn write_details(out: &mut dyn Write, indent: &str, settings: &LoggingSettings) -> EdgeResult<()> {
        writeln!(out, "{indent}User: {}", or_empty(&settings.user))?;
        writeln!(out, "{indent}Access key: {}", or_empty(&settings.access_key))?;
        writeln!(out, "{indent}Bucket: {}", or_empty(&settings.bucket_name))?;
        writeln!(out, "{indent}Region: {}", or_empty(&settings.region))?;
        Ok(())
    }
}
