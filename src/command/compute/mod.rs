mod build;
mod deploy;
mod package;
mod publish;
pub(crate) mod setup;

use std::io::{BufRead, Write};

use clap::Parser;
use edgectl_std::Progress;
use serde::Serialize;

use crate::utils::session::Session;
use crate::{EdgeError, EdgeResult};

pub use build::Build;
pub use deploy::Deploy;
pub use publish::Publish;

#[derive(Debug, Serialize, Parser)]
pub struct Compute {
    #[clap(subcommand)]
    command: Command,
}

#[derive(Debug, Serialize, Parser)]
pub enum Command {
    /// Build a package from the project in the current directory
    Build(Build),

    /// Deploy a package to a service, creating the service if needed
    Deploy(Deploy),

    /// Build and deploy a package in one step
    Publish(Publish),
}

impl Compute {
    pub fn run(&self, session: &Session, input: &mut dyn BufRead, out: &mut dyn Write) -> EdgeResult<()> {
        match &self.command {
            Command::Build(command) => command.run(session, out),
            Command::Deploy(command) => command.run(session, input, out),
            Command::Publish(command) => command.run(session, input, out),
        }
    }
}

/// Runs one remote call between a progress start and stop. A failure to
/// drive the progress indicator takes precedence over the call's error.
pub(crate) fn step<T>(
    progress: &mut dyn Progress,
    message: &str,
    call: impl FnOnce() -> anyhow::Result<T>,
) -> EdgeResult<T> {
    progress.start()?;
    progress.message(&format!("{message}..."));
    match call() {
        Ok(value) => {
            progress.stop_message(message);
            progress.stop()?;
            Ok(value)
        }
        Err(error) => {
            progress.stop_fail_message(message);
            progress.stop_fail().map_err(EdgeError::from)?;
            Err(error.into())
        }
    }
}
