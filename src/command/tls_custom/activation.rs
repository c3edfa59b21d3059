use std::io::Write;

use clap::Parser;
use edgectl_client::operations::tls_activation::{
    CreateTlsActivationInput, ListTlsActivationsInput, TlsActivation, TlsInclude, UpdateTlsActivationInput,
};
use edgectl_std::print;
use serde::Serialize;

use crate::command::output::{or_empty, write_json, write_timestamps, OutputMode};
use crate::options::JsonOpt;
use crate::utils::err_log::ErrContext;
use crate::utils::session::Session;
use crate::utils::table;
use crate::EdgeResult;

#[derive(Debug, Serialize, Parser)]
pub struct Activation {
    #[clap(subcommand)]
    command: Command,
}

#[derive(Debug, Serialize, Parser)]
pub enum Command {
    /// Enable TLS for a domain using a custom certificate
    Enable(Enable),
    /// Disable TLS on a domain using a custom certificate
    Disable(Disable),
    /// Show a TLS activation
    Describe(Describe),
    /// List TLS activations
    List(List),
    /// Swap the certificate used by a TLS activation
    Update(Update),
}

impl Activation {
    pub fn run(&self, session: &Session, out: &mut dyn Write) -> EdgeResult<()> {
        match &self.command {
            Command::Enable(command) => command.run(session, out),
            Command::Disable(command) => command.run(session, out),
            Command::Describe(command) => command.run(session, out),
            Command::List(command) => command.run(session, out),
            Command::Update(command) => command.run(session, out),
        }
    }
}

fn activation_context(id: &str) -> ErrContext {
    let mut context = ErrContext::new();
    context.insert("TLS Activation ID".to_string(), id.to_string());
    context
}

#[derive(Debug, Serialize, Parser)]
pub struct Enable {
    /// Alphanumeric string identifying a TLS certificate
    #[arg(long = "cert-id")]
    cert_id: String,
    /// Alphanumeric string identifying a domain
    #[arg(long = "id")]
    domain_id: String,
    /// Alphanumeric string identifying a TLS configuration
    #[arg(long = "config-id")]
    config_id: Option<String>,
}

impl Enable {
    pub fn run(&self, session: &Session, out: &mut dyn Write) -> EdgeResult<()> {
        let input = CreateTlsActivationInput {
            certificate_id: self.cert_id.clone(),
            domain_id: self.domain_id.clone(),
            configuration_id: self.config_id.clone(),
        };
        let activation = session.api()?.create_tls_activation(&input).map_err(|e| {
            let mut context = ErrContext::new();
            context.insert("TLS Certificate ID".to_string(), self.cert_id.clone());
            context.insert("TLS Domain ID".to_string(), self.domain_id.clone());
            session.record_with(e, context)
        })?;
        print::success(
            out,
            &format!(
                "Enabled TLS activation '{}' (Certificate '{}')",
                activation.id, self.cert_id
            ),
        )?;
        Ok(())
    }
}

#[derive(Debug, Serialize, Parser)]
pub struct Disable {
    /// Alphanumeric string identifying a TLS activation
    #[arg(long = "id")]
    id: String,
}

impl Disable {
    pub fn run(&self, session: &Session, out: &mut dyn Write) -> EdgeResult<()> {
        session
            .api()?
            .delete_tls_activation(&self.id)
            .map_err(|e| session.record_with(e, activation_context(&self.id)))?;
        print::success(out, &format!("Disabled TLS activation '{}'", self.id))?;
        Ok(())
    }
}

#[derive(Debug, Serialize, Parser)]
pub struct Describe {
    /// Alphanumeric string identifying a TLS activation
    #[arg(long = "id")]
    id: String,
    /// Include a related object: tls_certificate, tls_configuration or tls_domain
    #[arg(long = "include")]
    #[serde(skip_serializing)]
    include: Option<TlsInclude>,
    #[clap(flatten)]
    json: JsonOpt,
}

impl Describe {
    pub fn run(&self, session: &Session, out: &mut dyn Write) -> EdgeResult<()> {
        let mode = session.output_mode(self.json.json)?;
        let activation = session
            .api()?
            .get_tls_activation(&self.id, self.include)
            .map_err(|e| session.record_with(e, activation_context(&self.id)))?;
        if mode == OutputMode::Json {
            return write_json(out, &activation);
        }
        writeln!(out)?;
        write_details(out, "", &activation)
    }
}

#[derive(Debug, Serialize, Parser)]
pub struct List {
    /// Limit the returned activations to a specific certificate
    #[arg(long = "filter-cert")]
    filter_cert: Option<String>,
    /// Limit the returned activations to a specific TLS configuration
    #[arg(long = "filter-config")]
    filter_config: Option<String>,
    /// Limit the returned activations to a specific domain
    #[arg(long = "filter-domain")]
    filter_domain: Option<String>,
    /// Include a related object: tls_certificate, tls_configuration or tls_domain
    #[arg(long = "include")]
    #[serde(skip_serializing)]
    include: Option<TlsInclude>,
    /// Page number of the results to show
    #[arg(long = "page")]
    page: Option<u32>,
    /// Number of records per page
    #[arg(long = "per-page")]
    per_page: Option<u32>,
    #[clap(flatten)]
    json: JsonOpt,
}

impl List {
    fn input(&self) -> ListTlsActivationsInput {
        ListTlsActivationsInput {
            filter_certificate_id: self.filter_cert.clone(),
            filter_configuration_id: self.filter_config.clone(),
            filter_domain_id: self.filter_domain.clone(),
            include: self.include,
            page: self.page,
            per_page: self.per_page,
        }
    }

    pub fn run(&self, session: &Session, out: &mut dyn Write) -> EdgeResult<()> {
        let mode = session.output_mode(self.json.json)?;
        let activations = session
            .api()?
            .list_tls_activations(&self.input())
            .map_err(|e| session.record(e))?;

        match mode {
            OutputMode::Json => write_json(out, &activations),
            OutputMode::Table => {
                let mut table = table::get_table(["ID", "CERTIFICATE ID", "DOMAIN ID", "CREATED AT"]);
                for activation in &activations {
                    table.add_row(vec![
                        activation.id.clone(),
                        or_empty(&activation.certificate_id),
                        or_empty(&activation.domain_id),
                        or_empty(&activation.timestamps.created_at),
                    ]);
                }
                writeln!(out, "{table}")?;
                Ok(())
            }
            OutputMode::Verbose => {
                for activation in &activations {
                    writeln!(out)?;
                    write_details(out, "", activation)?;
                }
                Ok(())
            }
        }
    }
}

#[derive(Debug, Serialize, Parser)]
pub struct Update {
    /// Alphanumeric string identifying a TLS activation
    #[arg(long = "id")]
    id: String,
    /// Alphanumeric string identifying a TLS certificate
    #[arg(long = "cert-id")]
    cert_id: String,
}

impl Update {
    pub fn run(&self, session: &Session, out: &mut dyn Write) -> EdgeResult<()> {
        let input = UpdateTlsActivationInput {
            id: self.id.clone(),
            certificate_id: self.cert_id.clone(),
        };
        let activation = session
            .api()?
            .update_tls_activation(&input)
            .map_err(|e| session.record_with(e, activation_context(&self.id)))?;
        print::success(
            out,
            &format!(
                "Updated TLS activation certificate '{}' (previously '{}')",
                or_empty(&activation.certificate_id),
                self.id
            ),
        )?;
        Ok(())
    }
}

fn write_details(out: &mut dyn Write, indent: &str, activation: &TlsActivation) -> EdgeResult<()> {
    writeln!(out, "{indent}ID: {}", activation.id)?;
    writeln!(out, "{indent}Certificate ID: {}", or_empty(&activation.certificate_id))?;
    writeln!(out, "{indent}Configuration ID: {}", or_empty(&activation.configuration_id))?;
    writeln!(out, "{indent}Domain ID: {}", or_empty(&activation.domain_id))?;
    write_timestamps(out, indent, &activation.timestamps)
}

#[cfg(test)]
mod tests {
    use edgectl_client::MockEdgeApi;
    use rstest::rstest;
    use speculoos::prelude::*;

    use super::*;
    use crate::utils::session::testing::{output, session_with};

    #[derive(Parser)]
    struct Cli {
        #[clap(subcommand)]
        command: Command,
    }

    fn command(args: &[&str]) -> Result<Activation, clap::Error> {
        let mut argv = vec!["activation"];
        argv.extend_from_slice(args);
        Ok(Activation {
            command: Cli::try_parse_from(argv)?.command,
        })
    }

    #[rstest]
    #[case("tls_certificate", TlsInclude::TlsCertificate)]
    #[case("tls_configuration", TlsInclude::TlsConfiguration)]
    #[case("tls_domain", TlsInclude::TlsDomain)]
    fn describe_forwards_the_include(#[case] flag: &'static str, #[case] include: TlsInclude) {
        let mut mock = MockEdgeApi::new();
        mock.expect_get_tls_activation()
            .withf(move |id, i| id == "act" && *i == Some(include))
            .times(1)
            .returning(|id, _| {
                Ok(TlsActivation {
                    id: id.to_string(),
                    domain_id: Some("dom".to_string()),
                    ..Default::default()
                })
            });
        let (session, _dir) = session_with(mock, false);
        let mut out = Vec::new();
        command(&["describe", "--id", "act", "--include", flag])
            .unwrap()
            .run(&session, &mut out)
            .unwrap();
        assert_that!(output(out)).contains("\nID: act\nCertificate ID: \nConfiguration ID: \nDomain ID: dom\n");
    }

    #[test]
    fn other_includes_are_rejected() {
        assert_that!(command(&["describe", "--id", "act", "--include", "tls_subscription"]).is_err()).is_true();
    }

    #[test]
    fn list_passes_filters() {
        let mut mock = MockEdgeApi::new();
        mock.expect_list_tls_activations()
            .withf(|i| i.filter_domain_id.as_deref() == Some("dom") && i.per_page == Some(5) && i.page.is_none())
            .times(1)
            .returning(|_| Ok(vec![]));
        let (session, _dir) = session_with(mock, false);
        command(&["list", "--filter-domain", "dom", "--per-page", "5"])
            .unwrap()
            .run(&session, &mut Vec::new())
            .unwrap();
    }
}
