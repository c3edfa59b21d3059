mod azureblob;
mod cloudfiles;
mod common;
mod datadog;
mod newrelic;
mod s3;
mod sftp;

use std::io::Write;

use clap::Parser;
use serde::Serialize;

use self::common::Endpoint;
use crate::utils::session::Session;
use crate::EdgeResult;

#[derive(Debug, Serialize, Parser)]
pub struct Logging {
    #[clap(subcommand)]
    command: Command,
}

#[derive(Debug, Serialize, Parser)]
pub enum Command {
    /// Manipulate Azure Blob Storage logging endpoints
    Azureblob(Endpoint<azureblob::AzureBlob>),
    /// Manipulate Cloud Files logging endpoints
    Cloudfiles(Endpoint<cloudfiles::Cloudfiles>),
    /// Manipulate Datadog logging endpoints
    Datadog(Endpoint<datadog::Datadog>),
    /// Manipulate New Relic logging endpoints
    Newrelic(Endpoint<newrelic::NewRelic>),
    /// Manipulate S3 logging endpoints
    S3(Endpoint<s3::S3>),
    /// Manipulate SFTP logging endpoints
    Sftp(Endpoint<sftp::Sftp>),
}

impl Logging {
    pub fn run(&self, session: &Session, out: &mut dyn Write) -> EdgeResult<()> {
        match &self.command {
            Command::Azureblob(command) => command.run(session, out),
            Command::Cloudfiles(command) => command.run(session, out),
            Command::Datadog(command) => command.run(session, out),
            Command::Newrelic(command) => command.run(session, out),
            Command::S3(command) => command.run(session, out),
            Command::Sftp(command) => command.run(session, out),
        }
    }
}
