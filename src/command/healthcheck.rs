use std::io::Write;

use clap::Parser;
use edgectl_client::operations::healthcheck::{
    CreateHealthcheckInput, Healthcheck as Check, HealthcheckFields, UpdateHealthcheckInput,
};
use edgectl_client::shared::NamedRef;
use edgectl_std::print;
use serde::Serialize;

use crate::command::output::{or_empty, write_json, write_timestamps, OutputMode};
use crate::command::target::{version_context, version_target, Access};
use crate::options::{AutoCloneOpt, JsonOpt, ServiceOpt, VersionOpt};
use crate::utils::session::Session;
use crate::utils::table;
use crate::EdgeResult;

#[derive(Debug, Serialize, Parser)]
pub struct Healthcheck {
    #[clap(subcommand)]
    command: Command,
}

#[derive(Debug, Serialize, Parser)]
pub enum Command {
    /// Create a healthcheck on a service version
    Create(Create),
    /// Delete a healthcheck on a service version
    Delete(Delete),
    /// Show detailed information about a healthcheck on a service version
    Describe(Describe),
    /// List healthchecks on a service version
    List(List),
    /// Update a healthcheck on a service version
    Update(Update),
}

impl Healthcheck {
    pub fn run(&self, session: &Session, out: &mut dyn Write) -> EdgeResult<()> {
        match &self.command {
            Command::Create(command) => command.run(session, out),
            Command::Delete(command) => command.run(session, out),
            Command::Describe(command) => command.run(session, out),
            Command::List(command) => command.run(session, out),
            Command::Update(command) => command.run(session, out),
        }
    }
}

/// The settable attributes, each sent only when given.
#[derive(Debug, Clone, Default, Serialize, Parser)]
pub struct HealthcheckOpts {
    /// A descriptive note
    #[arg(long = "comment")]
    comment: Option<String>,
    /// Which HTTP method to use
    #[arg(long = "method")]
    method: Option<String>,
    /// Which host to check
    #[arg(long = "host")]
    host: Option<String>,
    /// The path to check
    #[arg(long = "path")]
    path: Option<String>,
    /// Whether to use version 1.0 or 1.1 HTTP
    #[arg(long = "http-version")]
    http_version: Option<String>,
    /// Timeout in milliseconds
    #[arg(long = "timeout")]
    timeout: Option<u32>,
    /// How often to run the healthcheck in milliseconds
    #[arg(long = "check-interval")]
    check_interval: Option<u32>,
    /// The status code expected from the host
    #[arg(long = "expected-response")]
    expected_response: Option<u32>,
    /// The number of most recent healthcheck queries to keep
    #[arg(long = "window")]
    window: Option<u32>,
    /// How many healthchecks must succeed to be considered healthy
    #[arg(long = "threshold")]
    threshold: Option<u32>,
    /// When loading a config, the initial number of probes to be seen as OK
    #[arg(long = "initial")]
    initial: Option<u32>,
}

impl HealthcheckOpts {
    fn fields(&self, name: Option<String>) -> HealthcheckFields {
        HealthcheckFields {
            name,
            comment: self.comment.clone(),
            method: self.method.clone(),
            host: self.host.clone(),
            path: self.path.clone(),
            http_version: self.http_version.clone(),
            timeout: self.timeout,
            check_interval: self.check_interval,
            expected_response: self.expected_response,
            window: self.window,
            threshold: self.threshold,
            initial: self.initial,
        }
    }
}

#[derive(Debug, Serialize, Parser)]
pub struct Create {
    /// Healthcheck name
    #[arg(long = "name", short = 'n')]
    name: Option<String>,
    #[clap(flatten)]
    service: ServiceOpt,
    #[clap(flatten)]
    version: VersionOpt,
    #[clap(flatten)]
    autoclone: AutoCloneOpt,
    #[clap(flatten)]
    opts: HealthcheckOpts,
}

impl Create {
    pub fn run(&self, session: &Session, out: &mut dyn Write) -> EdgeResult<()> {
        let access = Access::Write {
            autoclone: self.autoclone.autoclone,
        };
        let target = version_target(session, &self.service, self.version.version, access, out)?;
        let input = CreateHealthcheckInput {
            version: target.clone(),
            fields: self.opts.fields(self.name.clone()),
        };
        let check = session
            .api()?
            .create_healthcheck(&input)
            .map_err(|e| session.record_with(e, version_context(&target)))?;
        print::success(
            out,
            &format!(
                "Created healthcheck {} (service {} version {})",
                check.name, check.service_id, check.service_version
            ),
        )?;
        Ok(())
    }
}

#[derive(Debug, Serialize, Parser)]
pub struct Delete {
    /// Healthcheck name
    #[arg(long = "name", short = 'n')]
    name: String,
    #[clap(flatten)]
    service: ServiceOpt,
    #[clap(flatten)]
    version: VersionOpt,
    #[clap(flatten)]
    autoclone: AutoCloneOpt,
}

impl Delete {
    pub fn run(&self, session: &Session, out: &mut dyn Write) -> EdgeResult<()> {
        let access = Access::Write {
            autoclone: self.autoclone.autoclone,
        };
        let target = version_target(session, &self.service, self.version.version, access, out)?;
        let named = NamedRef::new(&target.service_id, target.service_version, &self.name);
        session
            .api()?
            .delete_healthcheck(&named)
            .map_err(|e| session.record_with(e, version_context(&target)))?;
        print::success(
            out,
            &format!(
                "Deleted healthcheck {} (service {} version {})",
                self.name, target.service_id, target.service_version
            ),
        )?;
        Ok(())
    }
}

#[derive(Debug, Serialize, Parser)]
pub struct Describe {
    /// Healthcheck name
    #[arg(long = "name", short = 'n')]
    name: String,
    #[clap(flatten)]
    service: ServiceOpt,
    #[clap(flatten)]
    version: VersionOpt,
    #[clap(flatten)]
    json: JsonOpt,
}

impl Describe {
    pub fn run(&self, session: &Session, out: &mut dyn Write) -> EdgeResult<()> {
        let mode = session.output_mode(self.json.json)?;
        let target = version_target(session, &self.service, self.version.version, Access::Read, out)?;
        let named = NamedRef::new(&target.service_id, target.service_version, &self.name);
        let check = session
            .api()?
            .get_healthcheck(&named)
            .map_err(|e| session.record_with(e, version_context(&target)))?;
        if mode == OutputMode::Json {
            return write_json(out, &check);
        }
        writeln!(out)?;
        write_details(out, "", &check)
    }
}

#[derive(Debug, Serialize, Parser)]
pub struct List {
    #[clap(flatten)]
    service: ServiceOpt,
    #[clap(flatten)]
    version: VersionOpt,
    #[clap(flatten)]
    json: JsonOpt,
}

impl List {
    pub fn run(&self, session: &Session, out: &mut dyn Write) -> EdgeResult<()> {
        let mode = session.output_mode(self.json.json)?;
        let target = version_target(session, &self.service, self.version.version, Access::Read, out)?;
        let checks = session
            .api()?
            .list_healthchecks(&target)
            .map_err(|e| session.record_with(e, version_context(&target)))?;

        match mode {
            OutputMode::Json => write_json(out, &checks),
            OutputMode::Table => {
                let mut table = table::get_table(["SERVICE", "VERSION", "NAME", "METHOD", "HOST", "PATH"]);
                for check in &checks {
                    table.add_row(vec![
                        check.service_id.clone(),
                        check.service_version.to_string(),
                        check.name.clone(),
                        or_empty(&check.method),
                        or_empty(&check.host),
                        or_empty(&check.path),
                    ]);
                }
                writeln!(out, "{table}")?;
                Ok(())
            }
            OutputMode::Verbose => {
                writeln!(out, "Version: {}", target.service_version)?;
                for (i, check) in checks.iter().enumerate() {
                    writeln!(out, "\tHealthcheck {}/{}", i + 1, checks.len())?;
                    write_details(out, "\t\t", check)?;
                }
                writeln!(out)?;
                Ok(())
            }
        }
    }
}

#[derive(Debug, Serialize, Parser)]
pub struct Update {
    /// Healthcheck name
    #[arg(long = "name", short = 'n')]
    name: String,
    /// New healthcheck name
    #[arg(long = "new-name")]
    new_name: Option<String>,
    #[clap(flatten)]
    service: ServiceOpt,
    #[clap(flatten)]
    version: VersionOpt,
    #[clap(flatten)]
    autoclone: AutoCloneOpt,
    #[clap(flatten)]
    opts: HealthcheckOpts,
}

impl Update {
    pub fn run(&self, session: &Session, out: &mut dyn Write) -> EdgeResult<()> {
        let access = Access::Write {
            autoclone: self.autoclone.autoclone,
        };
        let target = version_target(session, &self.service, self.version.version, access, out)?;
        let input = UpdateHealthcheckInput {
            target: NamedRef::new(&target.service_id, target.service_version, &self.name),
            fields: self.opts.fields(self.new_name.clone()),
        };
        let check = session
            .api()?
            .update_healthcheck(&input)
            .map_err(|e| session.record_with(e, version_context(&target)))?;
        print::success(
            out,
            &format!(
                "Updated healthcheck {} (service {} version {})",
                check.name, check.service_id, check.service_version
            ),
        )?;
        Ok(())
    }
}

fn write_details(out: &mut dyn Write, indent: &str, check: &Check) -> EdgeResult<()> {
    writeln!(out, "{indent}Service ID: {}", check.service_id)?;
    writeln!(out, "{indent}Version: {}", check.service_version)?;
    writeln!(out, "{indent}Name: {}", check.name)?;
    writeln!(out, "{indent}Comment: {}", or_empty(&check.comment))?;
    writeln!(out, "{indent}Method: {}", or_empty(&check.method))?;
    writeln!(out, "{indent}Host: {}", or_empty(&check.host))?;
    writeln!(out, "{indent}Path: {}", or_empty(&check.path))?;
    writeln!(out, "{indent}HTTP version: {}", or_empty(&check.http_version))?;
    writeln!(out, "{indent}Timeout: {}", or_empty(&check.timeout))?;
    writeln!(out, "{indent}Check interval: {}", or_empty(&check.check_interval))?;
    writeln!(out, "{indent}Expected response: {}", or_empty(&check.expected_response))?;
    writeln!(out, "{indent}Window: {}", or_empty(&check.window))?;
    writeln!(out, "{indent}Threshold: {}", or_empty(&check.threshold))?;
    writeln!(out, "{indent}Initial: {}", or_empty(&check.initial))?;
    write_timestamps(out, indent, &check.timestamps)
}
