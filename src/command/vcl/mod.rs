mod snippet;

use std::io::Write;

use clap::Parser;
use serde::Serialize;

use crate::utils::session::Session;
use crate::EdgeResult;

#[derive(Debug, Serialize, Parser)]
pub struct Vcl {
    #[clap(subcommand)]
    command: Command,
}

#[derive(Debug, Serialize, Parser)]
pub enum Command {
    /// Manipulate VCL snippets on a service version
    Snippet(snippet::Snippet),
}

impl Vcl {
    pub fn run(&self, session: &Session, out: &mut dyn Write) -> EdgeResult<()> {
        match &self.command {
            Command::Snippet(command) => command.run(session, out),
        }
    }
}
