use std::fmt::Debug;
use std::io::Write;

use clap::{Args, Parser, Subcommand};
use edgectl_client::operations::logging::{
    CreateLoggingInput, LoggingEndpoint, LoggingKind, LoggingSettings, UpdateLoggingInput,
};
use edgectl_client::shared::NamedRef;
use edgectl_std::print;
use serde::Serialize;

use crate::command::output::{or_empty, write_json, write_timestamps, OutputMode};
use crate::command::target::{version_context, version_target, Access};
use crate::options::{AutoCloneOpt, JsonOpt, ServiceOpt, VersionOpt};
use crate::utils::session::Session;
use crate::utils::table;
use crate::{EdgeCliError, EdgeResult};

/// The flags that belong to one logging provider.
pub trait ProviderArgs: Args + Serialize + Debug {
    const KIND: LoggingKind;

    /// Flags a new endpoint cannot do without, paired with whether each was given.
    fn required(&self) -> Vec<(&'static str, bool)>;

    /// Copies every given flag onto `settings`.
    fn apply(&self, settings: &mut LoggingSettings);

    /// Provider specific lines of `describe` and verbose `list`.
    fn write_details(out: &mut dyn Write, indent: &str, settings: &LoggingSettings) -> EdgeResult<()>;
}

/// Flags shared by every provider.
#[derive(Debug, Clone, Default, Serialize, Parser)]
pub(crate) struct CommonFlags {
    /// Apache style log formatting
    #[arg(long = "format")]
    format: Option<String>,
    /// The version of the custom logging format used for the configured endpoint
    #[arg(long = "format-version")]
    format_version: Option<u32>,
    /// The name of an existing condition in the configured endpoint
    #[arg(long = "response-condition")]
    response_condition: Option<String>,
    /// Where in the generated VCL the logging call should be placed
    #[arg(long = "placement")]
    placement: Option<String>,
}

impl CommonFlags {
    pub(crate) fn apply(&self, settings: &mut LoggingSettings) {
        set(&mut settings.format, &self.format);
        set(&mut settings.format_version, &self.format_version);
        set(&mut settings.response_condition, &self.response_condition);
        set(&mut settings.placement, &self.placement);
    }

    pub(crate) fn write_details(out: &mut dyn Write, indent: &str, settings: &LoggingSettings) -> EdgeResult<()> {
        writeln!(out, "{indent}Format: {}", or_empty(&settings.format))?;
        writeln!(out, "{indent}Format version: {}", or_empty(&settings.format_version))?;
        writeln!(out, "{indent}Response condition: {}", or_empty(&settings.response_condition))?;
        writeln!(out, "{indent}Placement: {}", or_empty(&settings.placement))?;
        Ok(())
    }
}

/// Flags of the providers that write rotated files.
#[derive(Debug, Clone, Default, Serialize, Parser)]
pub(crate) struct FileFlags {
    /// The path to upload logs to
    #[arg(long = "path")]
    path: Option<String>,
    /// How frequently log files are finalized so they can be available for reading (in seconds)
    #[arg(long = "period")]
    period: Option<u32>,
    /// What level of gzip encoding to have when sending logs (default 0, no compression)
    #[arg(long = "gzip-level")]
    gzip_level: Option<u32>,
    /// How the message should be formatted. One of: classic (default), loggly, logplex or blank
    #[arg(long = "message-type")]
    message_type: Option<String>,
    /// strftime specified timestamp formatting (default "%Y-%m-%dT%H:%M:%S.000")
    #[arg(long = "timestamp-format")]
    timestamp_format: Option<String>,
    /// A PGP public key used to encrypt log files before they are written
    #[arg(long = "public-key")]
    public_key: Option<String>,
    /// The codec used for compression of your logs. One of: zstd, snappy or gzip
    #[arg(long = "compression-codec", conflicts_with = "gzip_level")]
    compression_codec: Option<String>,
}

impl FileFlags {
    pub(crate) fn apply(&self, settings: &mut LoggingSettings) {
        set(&mut settings.path, &self.path);
        set(&mut settings.period, &self.period);
        set(&mut settings.gzip_level, &self.gzip_level);
        set(&mut settings.message_type, &self.message_type);
        set(&mut settings.timestamp_format, &self.timestamp_format);
        set(&mut settings.public_key, &self.public_key);
        set(&mut settings.compression_codec, &self.compression_codec);
    }

    pub(crate) fn write_details(out: &mut dyn Write, indent: &str, settings: &LoggingSettings) -> EdgeResult<()> {
        writeln!(out, "{indent}Path: {}", or_empty(&settings.path))?;
        writeln!(out, "{indent}Period: {}", or_empty(&settings.period))?;
        writeln!(out, "{indent}GZip level: {}", or_empty(&settings.gzip_level))?;
        writeln!(out, "{indent}Message type: {}", or_empty(&settings.message_type))?;
        writeln!(out, "{indent}Timestamp format: {}", or_empty(&settings.timestamp_format))?;
        writeln!(out, "{indent}Public key: {}", or_empty(&settings.public_key))?;
        writeln!(out, "{indent}Compression codec: {}", or_empty(&settings.compression_codec))?;
        Ok(())
    }
}

/// Overwrites `field` only when the flag was given.
pub(crate) fn set<T: Clone>(field: &mut Option<T>, flag: &Option<T>) {
    if let Some(value) = flag {
        *field = Some(value.clone());
    }
}

/// The operations on one provider's endpoints.
#[derive(Debug, Serialize, Parser)]
pub struct Endpoint<P: ProviderArgs> {
    #[clap(subcommand)]
    command: Operation<P>,
}

#[derive(Debug, Serialize, Subcommand)]
pub enum Operation<P: ProviderArgs> {
    /// Create a logging endpoint on a service version
    Create(Create<P>),
    /// Delete a logging endpoint on a service version
    Delete(Delete),
    /// Show detailed information about a logging endpoint on a service version
    Describe(Describe),
    /// List logging endpoints on a service version
    List(List),
    /// Update a logging endpoint on a service version
    Update(Update<P>),
}

impl<P: ProviderArgs> Endpoint<P> {
    pub fn run(&self, session: &Session, out: &mut dyn Write) -> EdgeResult<()> {
        match &self.command {
            Operation::Create(command) => command.run(session, out),
            Operation::Delete(command) => command.run::<P>(session, out),
            Operation::Describe(command) => command.run::<P>(session, out),
            Operation::List(command) => command.run::<P>(session, out),
            Operation::Update(command) => command.run(session, out),
        }
    }
}

#[derive(Debug, Serialize, Parser)]
pub struct Create<P: ProviderArgs> {
    /// The name of the logging endpoint
    #[arg(long = "name", short = 'n')]
    name: String,
    #[clap(flatten)]
    provider: P,
    #[clap(flatten)]
    service: ServiceOpt,
    #[clap(flatten)]
    version: VersionOpt,
    #[clap(flatten)]
    autoclone: AutoCloneOpt,
}

impl<P: ProviderArgs> Create<P> {
    pub fn run(&self, session: &Session, out: &mut dyn Write) -> EdgeResult<()> {
        let missing: Vec<&str> = self
            .provider
            .required()
            .into_iter()
            .filter_map(|(flag, given)| (!given).then_some(flag))
            .collect();
        if !missing.is_empty() {
            let flags = missing.join(", ");
            return Err(session.record(EdgeCliError::MissingRequiredFlags { flags }));
        }

        let access = Access::Write {
            autoclone: self.autoclone.autoclone,
        };
        let target = version_target(session, &self.service, self.version.version, access, out)?;
        let mut settings = LoggingSettings::default();
        self.provider.apply(&mut settings);
        let input = CreateLoggingInput {
            kind: P::KIND,
            version: target.clone(),
            name: self.name.clone(),
            settings,
        };
        let endpoint = session
            .api()?
            .create_logging(&input)
            .map_err(|e| session.record_with(e, version_context(&target)))?;
        print::success(
            out,
            &format!(
                "Created {} logging endpoint {} (service {} version {})",
                P::KIND.display_name(),
                endpoint.name,
                endpoint.service_id,
                endpoint.service_version
            ),
        )?;
        Ok(())
    }
}

#[derive(Debug, Serialize, Parser)]
pub struct Delete {
    /// The name of the logging endpoint
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
    pub fn run<P: ProviderArgs>(&self, session: &Session, out: &mut dyn Write) -> EdgeResult<()> {
        let access = Access::Write {
            autoclone: self.autoclone.autoclone,
        };
        let target = version_target(session, &self.service, self.version.version, access, out)?;
        let named = NamedRef::new(&target.service_id, target.service_version, &self.name);
        session
            .api()?
            .delete_logging(P::KIND, &named)
            .map_err(|e| session.record_with(e, version_context(&target)))?;
        print::success(
            out,
            &format!(
                "Deleted {} logging endpoint {} (service {} version {})",
                P::KIND.display_name(),
                self.name,
                target.service_id,
                target.service_version
            ),
        )?;
        Ok(())
    }
}

#[derive(Debug, Serialize, Parser)]
pub struct Describe {
    /// The name of the logging endpoint
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
    pub fn run<P: ProviderArgs>(&self, session: &Session, out: &mut dyn Write) -> EdgeResult<()> {
        let mode = session.output_mode(self.json.json)?;
        let target = version_target(session, &self.service, self.version.version, Access::Read, out)?;
        let named = NamedRef::new(&target.service_id, target.service_version, &self.name);
        let endpoint = session
            .api()?
            .get_logging(P::KIND, &named)
            .map_err(|e| session.record_with(e, version_context(&target)))?;
        if mode == OutputMode::Json {
            return write_json(out, &endpoint);
        }
        writeln!(out)?;
        write_details::<P>(out, "", &endpoint)
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
    pub fn run<P: ProviderArgs>(&self, session: &Session, out: &mut dyn Write) -> EdgeResult<()> {
        let mode = session.output_mode(self.json.json)?;
        let target = version_target(session, &self.service, self.version.version, Access::Read, out)?;
        let endpoints = session
            .api()?
            .list_logging(P::KIND, &target)
            .map_err(|e| session.record_with(e, version_context(&target)))?;

        match mode {
            OutputMode::Json => write_json(out, &endpoints),
            OutputMode::Table => {
                let mut table = table::get_table(["SERVICE", "VERSION", "NAME"]);
                for endpoint in &endpoints {
                    table.add_row(vec![
                        endpoint.service_id.clone(),
                        endpoint.service_version.to_string(),
                        endpoint.name.clone(),
                    ]);
                }
                writeln!(out, "{table}")?;
                Ok(())
            }
            OutputMode::Verbose => {
                writeln!(out, "Version: {}", target.service_version)?;
                for (i, endpoint) in endpoints.iter().enumerate() {
                    writeln!(out, "\t{} {}/{}", P::KIND.display_name(), i + 1, endpoints.len())?;
                    write_details::<P>(out, "\t\t", endpoint)?;
                }
                writeln!(out)?;
                Ok(())
            }
        }
    }
}

#[derive(Debug, Serialize, Parser)]
pub struct Update<P: ProviderArgs> {
    /// The name of the logging endpoint
    #[arg(long = "name", short = 'n')]
    name: String,
    /// New name of the logging endpoint
    #[arg(long = "new-name")]
    new_name: Option<String>,
    #[clap(flatten)]
    provider: P,
    #[clap(flatten)]
    service: ServiceOpt,
    #[clap(flatten)]
    version: VersionOpt,
    #[clap(flatten)]
    autoclone: AutoCloneOpt,
}

impl<P: ProviderArgs> Update<P> {
    pub fn run(&self, session: &Session, out: &mut dyn Write) -> EdgeResult<()> {
        let access = Access::Write {
            autoclone: self.autoclone.autoclone,
        };
        let target = version_target(session, &self.service, self.version.version, access, out)?;
        let mut settings = LoggingSettings::default();
        self.provider.apply(&mut settings);
        let input = UpdateLoggingInput {
            kind: P::KIND,
            target: NamedRef::new(&target.service_id, target.service_version, &self.name),
            new_name: self.new_name.clone(),
            settings,
        };
        let endpoint = session
            .api()?
            .update_logging(&input)
            .map_err(|e| session.record_with(e, version_context(&target)))?;
        print::success(
            out,
            &format!(
                "Updated {} logging endpoint {} (service {} version {})",
                P::KIND.display_name(),
                endpoint.name,
                endpoint.service_id,
                endpoint.service_version
            ),
        )?;
        Ok(())
    }
}

fn write_details<P: ProviderArgs>(out: &mut dyn Write, indent: &str, endpoint: &LoggingEndpoint) -> EdgeResult<()> {
    writeln!(out, "{indent}Service ID: {}", endpoint.service_id)?;
    writeln!(out, "{indent}Version: {}", endpoint.service_version)?;
    writeln!(out, "{indent}Name: {}", endpoint.name)?;
    P::write_details(out, indent, &endpoint.settings)?;
    CommonFlags::write_details(out, indent, &endpoint.settings)?;
    if P::KIND.is_file_based() {
        FileFlags::write_details(out, indent, &endpoint.settings)?;
    }
    write_timestamps(out, indent, &endpoint.timestamps)
}
