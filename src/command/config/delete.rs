use std::io::Write;

use clap::Parser;
use edgectl_std::{print, Style};
use houston::Profile;
use serde::Serialize;

use crate::utils::session::Session;
use crate::EdgeResult;

#[derive(Debug, Serialize, Parser)]
/// Delete a configuration profile
///
/// Deleting the `default` profile makes commands run without --profile
/// fail until a new token is stored.
pub struct Delete {
    #[serde(skip_serializing)]
    name: String,
}

impl Delete {
    pub fn run(&self, session: &Session, out: &mut dyn Write) -> EdgeResult<()> {
        Profile::delete(&self.name, session.config()?)?;
        print::success(out, &format!("Deleted profile '{}'", Style::Command.paint(&self.name)))?;
        Ok(())
    }
}
