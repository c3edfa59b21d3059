use std::io::Write;

use clap::Parser;
use serde::Serialize;

use crate::error::EdgeErrorCode;
use crate::EdgeResult;

#[derive(Debug, Serialize, Parser)]
pub struct Explain {
    /// The full error code. For example, E016
    #[arg(value_name = "CODE")]
    code: EdgeErrorCode,
}

impl Explain {
    pub fn run(&self, out: &mut dyn Write) -> EdgeResult<()> {
        let explanation = self.code.explain();
        tracing::debug!(code = %self.code, "explaining error code");
        write!(out, "{}", termimad::term_text(&explanation))?;
        Ok(())
    }
}
