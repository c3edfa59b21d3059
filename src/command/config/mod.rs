mod auth;
mod delete;
mod list;
mod show;

use std::io::{BufRead, Write};

use clap::Parser;
use serde::Serialize;

use crate::utils::session::Session;
use crate::EdgeResult;

#[derive(Debug, Serialize, Parser)]
pub struct Config {
    #[clap(subcommand)]
    command: Command,
}

#[derive(Debug, Serialize, Parser)]
pub enum Command {
    /// Authenticate a configuration profile with an API token
    Auth(auth::Auth),

    /// Delete a configuration profile
    Delete(delete::Delete),

    /// List all configuration profiles
    List(list::List),

    /// Show the global settings file
    Show(show::Show),
}

impl Config {
    pub fn run(&self, session: &Session, input: &mut dyn BufRead, out: &mut dyn Write) -> EdgeResult<()> {
        match &self.command {
            Command::Auth(command) => command.run(session, input, out),
            Command::Delete(command) => command.run(session, out),
            Command::List(command) => command.run(session, out),
            Command::Show(command) => command.run(session, out),
        }
    }
}
