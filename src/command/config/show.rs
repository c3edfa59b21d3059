use std::io::Write;

use clap::Parser;
use houston::Settings;
use serde::Serialize;

use crate::utils::session::Session;
use crate::EdgeResult;

#[derive(Debug, Serialize, Parser)]
/// Show the global settings file
pub struct Show {
    /// Print only the location of the settings file
    #[arg(long = "location", short = 'l')]
    location: bool,
}

impl Show {
    pub fn run(&self, session: &Session, out: &mut dyn Write) -> EdgeResult<()> {
        let config = session.config()?;
        if self.location {
            writeln!(out, "{}", config.settings_path())?;
            return Ok(());
        }
        let raw = Settings::raw(config)?;
        write!(out, "{raw}")?;
        if !raw.ends_with('\n') {
            writeln!(out)?;
        }
        Ok(())
    }
}
