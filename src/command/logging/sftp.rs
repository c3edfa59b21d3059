use std::io::Write;

use clap::Parser;
use edgectl_client::operations::logging::{LoggingKind, LoggingSettings};
use serde::Serialize;

use super::common::{set, CommonFlags, FileFlags, ProviderArgs};
use crate::command::output::or_empty;
use crate::EdgeResult;

#[derive(Debug, Clone, Default, Serialize, Parser)]
pub struct Sftp {
    /// The hostname or IPv4 address of the SFTP server
    #[arg(long = "address")]
    address: Option<String>,
    /// The port number
    #[arg(long = "port")]
    port: Option<u32>,
    /// The username for the server
    #[arg(long = "user")]
    user: Option<String>,
    /// The password for the server. If both password and secret-key are given, the secret key is used
    #[arg(long = "password")]
    password: Option<String>,
    /// The SSH private key for the server
    #[arg(long = "secret-key")]
    secret_key: Option<String>,
    /// A list of host keys for all hosts we can connect to over SFTP
    #[arg(long = "ssh-known-hosts")]
    ssh_known_hosts: Option<String>,
    #[clap(flatten)]
    common: CommonFlags,
    #[clap(flatten)]
    file: FileFlags,
}

impl ProviderArgs for Sftp {
    const KIND: LoggingKind = LoggingKind::Sftp;

    fn required(&self) -> Vec<(&'static str, bool)> {
        vec![
            ("--address", self.address.is_some()),
            ("--user", self.user.is_some()),
            ("--ssh-known-hosts", self.ssh_known_hosts.is_some()),
        ]
    }

    fn apply(&self, settings: &mut LoggingSettings) {
        set(&mut settings.address, &self.address);
        set(&mut settings.port, &self.port);
        set(&mut settings.user, &self.user);
        set(&mut settings.password, &self.password);
        set(&mut settings.secret_key, &self.secret_key);
        set(&mut settings.ssh_known_hosts, &self.ssh_known_hosts);
        self.common.apply(settings);
        self.file.apply(settings);
    }

    fn write_details(out: &mut dyn Write, indent: &str, settings: &LoggingSettings) -> EdgeResult<()> {
        writeln!(out, "{indent}Address: {}", or_empty(&settings.address))?;
        writeln!(out, "{indent}Port: {}", or_empty(&settings.port))?;
        writeln!(out, "{indent}User: {}", or_empty(&settings.user))?;
        writeln!(out, "{indent}Password: {}", or_empty(&settings.password))?;
        writeln!(out, "{indent}Secret key: {}", or_empty(&settings.secret_key))?;
        writeln!(out, "{indent}SSH known hosts: {}", or_empty(&settings.ssh_known_hosts))?;
        Ok(())
    }
}
