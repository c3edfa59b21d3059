mod activation;

use std::io::Write;

use clap::Parser;
use serde::Serialize;

use crate::utils::session::Session;
use crate::EdgeResult;

#[derive(Debug, Serialize, Parser)]
pub struct TlsCustom {
    #[clap(subcommand)]
    command: Command,
}

#[derive(Debug, Serialize, Parser)]
pub enum Command {
    /// Enable or disable TLS on domains with custom certificates
    Activation(activation::Activation),
}

impl TlsCustom {
    pub fn run(&self, session: &Session, out: &mut dyn Write) -> EdgeResult<()> {
        match &self.command {
            Command::Activation(command) => command.run(session, out),
        }
    }
}
