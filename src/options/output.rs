use clap::Parser;
use serde::Serialize;

#[derive(Debug, Clone, Default, Serialize, Parser)]
pub struct JsonOpt {
    /// Render output as JSON
    #[arg(long = "json", short = 'j')]
    pub json: bool,
}
