use std::env;
use std::io::{BufRead, Write};
use std::str::FromStr;

use camino::Utf8PathBuf;
use clap::Parser;
use serde::Serialize;
use serde_json::Value;
use timber::{Level, LEVELS};

use crate::command;
use crate::options::ProfileOpt;
use crate::utils::env::EdgeEnv;
use crate::utils::session::Session;
use crate::EdgeResult;

#[derive(Debug, Serialize, Parser)]
#[command(
    name = "edgectl",
    version,
    about = "Manage edge compute services, their versions and the resources attached to them",
    long_about = "
edgectl manages edge compute services from the command line.

To authenticate, store an API token in a profile:

    $ edgectl config auth

The most common commands from there are:

    - edgectl compute publish: Build the project in the current directory and deploy it
    - edgectl dictionary list --service-id <ID> --version active: List the dictionaries of a service
    - edgectl explain <CODE>: Explain an error code
"
)]
pub struct Edgectl {
    #[clap(subcommand)]
    pub command: Command,

    /// Specify edgectl's log level
    #[arg(long = "log", global = true, value_parser = parse_level)]
    #[serde(skip_serializing)]
    pub log_level: Option<Level>,

    /// Print detailed output, including every resolution step
    #[arg(long = "verbose", short = 'v', global = true)]
    pub verbose: bool,

    #[clap(flatten)]
    pub profile: ProfileOpt,
}

fn parse_level(value: &str) -> Result<Level, String> {
    let lowered = value.to_lowercase();
    if !LEVELS.contains(&lowered.as_str()) {
        return Err(format!("possible values: {}", LEVELS.join(", ")));
    }
    Level::from_str(&lowered).map_err(|e| e.to_string())
}

#[derive(Debug, Serialize, Parser)]
pub enum Command {
    /// Build, deploy and publish compute packages
    Compute(command::Compute),

    /// Configuration profile commands
    Config(command::Config),

    /// Manipulate healthchecks on a service version
    Healthcheck(command::Healthcheck),

    /// Manipulate dictionaries on a service version
    Dictionary(command::Dictionary),

    /// Manipulate the items of a dictionary
    DictionaryEntry(command::DictionaryEntry),

    /// Manipulate the items of a config store
    ConfigStoreEntry(command::ConfigStoreEntry),

    /// Manipulate user access to services
    ServiceAuth(command::ServiceAuth),

    /// Manipulate custom TLS certificate activations
    TlsCustom(command::TlsCustom),

    /// Manipulate VCL on a service version
    Vcl(command::Vcl),

    /// Manipulate logging endpoints on a service version
    Logging(command::Logging),

    /// Explain error codes
    Explain(command::Explain),
}

impl Edgectl {
    /// Builds the session for the current directory and process environment.
    pub fn session(&self) -> EdgeResult<Session> {
        let project_dir = Utf8PathBuf::try_from(env::current_dir()?)?;
        tracing::debug!(%project_dir, profile = %self.profile, "starting session");
        Ok(Session::new(
            self.verbose,
            self.profile.profile_name.clone(),
            EdgeEnv::new(),
            project_dir,
        ))
    }

    pub fn run(&self, session: &Session, input: &mut dyn BufRead, out: &mut dyn Write) -> EdgeResult<()> {
        match &self.command {
            Command::Compute(command) => command.run(session, input, out),
            Command::Config(command) => command.run(session, input, out),
            Command::Healthcheck(command) => command.run(session, out),
            Command::Dictionary(command) => command.run(session, out),
            Command::DictionaryEntry(command) => command.run(session, out),
            Command::ConfigStoreEntry(command) => command.run(session, out),
            Command::ServiceAuth(command) => command.run(session, out),
            Command::TlsCustom(command) => command.run(session, out),
            Command::Vcl(command) => command.run(session, out),
            Command::Logging(command) => command.run(session, out),
            Command::Explain(command) => command.run(out),
        }
    }

    /// Whether the chosen command was given `--json`, in which case a
    /// failure is printed as JSON too.
    pub fn json_requested(&self) -> bool {
        serde_json::to_value(&self.command).is_ok_and(|value| has_json_flag(&value))
    }
}

fn has_json_flag(value: &Value) -> bool {
    match value {
        Value::Object(map) => map
            .iter()
            .any(|(key, value)| (key == "json" && value == &Value::Bool(true)) || has_json_flag(value)),
        Value::Array(items) => items.iter().any(has_json_flag),
        _ => false,
    }
}
