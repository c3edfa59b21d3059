use std::io::{BufRead, Write};
use std::thread;
use std::time::{Duration, Instant};

use anyhow::Context;
use camino::Utf8PathBuf;
use clap::Parser;
use edgectl_client::operations::service::{CreateDomainInput, CreateServiceInput, UpdateVersionInput, UploadPackageInput};
use edgectl_client::shared::VersionRef;
use edgectl_std::{print, progress, LinePrompter, Progress, Prompter, Style};
use rand::distr::Alphanumeric;
use rand::Rng;
use reqwest::redirect::Policy;
use reqwest::StatusCode;
use serde::Serialize;

use crate::command::compute::package::{package_path, validate_package};
use crate::command::compute::publish::Phase;
use crate::command::compute::setup::Dictionaries;
use crate::command::compute::step;
use crate::manifest::Manifest;
use crate::options::{OptionalVersionOpt, ServiceOpt, VersionSelector};
use crate::utils::err_log::service_context;
use crate::utils::service_details::{display_service_id, optional_service_id, target_version};
use crate::utils::session::Session;
use crate::{EdgeCliError, EdgeResult};

pub const DEFAULT_STATUS_CHECK_PATH: &str = "/";
pub const DEFAULT_STATUS_CHECK_TIMEOUT: u64 = 120;
const SERVICE_TYPE: &str = "wasm";
const DOMAIN_SUFFIX: &str = "edgecompute.app";
const STATUS_CHECK_INTERVAL: Duration = Duration::from_secs(1);
const STATUS_CHECK_REQUEST_TIMEOUT: Duration = Duration::from_secs(5);

#[derive(Debug, Clone, Serialize, Parser)]
pub struct Deploy {
    /// Path to a package tarball. Defaults to pkg/<name>.tar.gz
    #[arg(long = "package", short = 'p')]
    pub(crate) package: Option<Utf8PathBuf>,

    #[clap(flatten)]
    pub(crate) service: ServiceOpt,

    #[clap(flatten)]
    pub(crate) version: OptionalVersionOpt,

    /// The domain to route to a newly created service
    #[arg(long = "domain")]
    pub(crate) domain: Option<String>,

    /// Human-readable comment for the deployed version
    #[arg(long = "comment")]
    pub(crate) comment: Option<String>,

    /// Accept default values for every prompt
    #[arg(long = "accept-defaults")]
    pub(crate) accept_defaults: bool,

    /// Do not prompt for anything; implies default values
    #[arg(long = "non-interactive")]
    pub(crate) non_interactive: bool,

    /// Status code the availability check waits for. 0 accepts any 2xx or 3xx
    #[arg(long = "status-check-code", default_value_t = 0)]
    pub(crate) status_check_code: u16,

    /// Skip the availability check
    #[arg(long = "status-check-off")]
    pub(crate) status_check_off: bool,

    /// Path the availability check requests
    #[arg(long = "status-check-path", default_value = DEFAULT_STATUS_CHECK_PATH)]
    pub(crate) status_check_path: String,

    /// Seconds to wait for the service to become available
    #[arg(long = "status-check-timeout", default_value_t = DEFAULT_STATUS_CHECK_TIMEOUT)]
    pub(crate) status_check_timeout: u64,
}

impl Default for Deploy {
    fn default() -> Self {
        Deploy {
            package: None,
            service: ServiceOpt::default(),
            version: OptionalVersionOpt::default(),
            domain: None,
            comment: None,
            accept_defaults: false,
            non_interactive: false,
            status_check_code: 0,
            status_check_off: false,
            status_check_path: DEFAULT_STATUS_CHECK_PATH.to_string(),
            status_check_timeout: DEFAULT_STATUS_CHECK_TIMEOUT,
        }
    }
}

/// The service version a package is deployed to.
struct Target {
    service_id: String,
    version: u32,
    domain: Option<String>,
}

impl Deploy {
    pub fn run(&self, session: &Session, input: &mut dyn BufRead, out: &mut dyn Write) -> EdgeResult<()> {
        let manifest = session.manifest().map_err(|e| session.record(e))?;
        let package = self.package(session, manifest.as_ref()).map_err(|e| session.record(e))?;
        validate_package(&package).map_err(|e| session.record(e))?;

        let mut progress = progress::for_stderr();
        let target = match optional_service_id(session, &self.service)? {
            Some((service_id, source)) => {
                if session.verbose() {
                    display_service_id(out, &service_id, source)?;
                }
                self.existing_service(session, service_id, out)?
            }
            None => self.new_service(session, manifest, &package, progress.as_mut(), input, out)?,
        };

        let context = || service_context(Some(&target.service_id), Some(target.version));
        self.deploy_to(session, &target, &package, progress.as_mut())
            .map_err(|e| session.record_with(e, context()))?;

        print::success(
            out,
            &format!(
                "Deployed package (service {}, version {})",
                Style::Link.paint(&target.service_id),
                target.version
            ),
        )?;

        match (&target.domain, self.status_check_off) {
            (_, true) => {}
            (Some(domain), false) => self.check_status(domain, progress.as_mut(), out)?,
            (None, false) => print::warning(out, "The service has no domain, so its availability was not checked.")?,
        }
        Ok(())
    }

    fn package(&self, session: &Session, manifest: Option<&Manifest>) -> EdgeResult<Utf8PathBuf> {
        match (&self.package, manifest) {
            (Some(package), _) => Ok(package.clone()),
            (None, Some(manifest)) => Ok(package_path(session.project_dir(), &manifest.name)),
            (None, None) => Err(EdgeCliError::ManifestNotFound {
                path: session.manifest_path().to_string(),
            }
            .into()),
        }
    }

    const fn interactive(&self) -> bool {
        !self.accept_defaults && !self.non_interactive
    }

    fn existing_service(&self, session: &Session, service_id: String, out: &mut dyn Write) -> EdgeResult<Target> {
        let selector = self.version.version.unwrap_or(VersionSelector::ActiveOrLatest);
        let version = target_version(session, &service_id, selector, true, false, out)?;

        let version_ref = VersionRef::new(&service_id, version.number);
        let domain = if self.status_check_off {
            None
        } else {
            session
                .api()?
                .list_domains(&version_ref)
                .map_err(|e| session.record_with(e, service_context(Some(&service_id), Some(version.number))))?
                .into_iter()
                .next()
                .map(|d| d.name)
        };

        Ok(Target {
            service_id,
            version: version.number,
            domain,
        })
    }

    fn new_service(
        &self,
        session: &Session,
        mut manifest: Option<Manifest>,
        package: &Utf8PathBuf,
        progress: &mut dyn Progress,
        input: &mut dyn BufRead,
        out: &mut dyn Write,
    ) -> EdgeResult<Target> {
        let default_name = manifest
            .as_ref()
            .map(|m| m.name.clone())
            .or_else(|| package.file_stem().map(|s| s.trim_end_matches(".tar").to_string()))
            .unwrap_or_default();
        let default_domain = self.domain.clone().unwrap_or_else(generate_domain);

        let (name, domain) = if self.interactive() {
            let mut prompter = LinePrompter::new(input, out);
            prompter.note("There is no service associated with this package. A new service will be created.")?;
            prompter.blank()?;
            let name = prompter.input(&Style::Prompt.paint(format!("Service name: [{default_name}] ")))?;
            let domain = if self.domain.is_some() {
                String::new()
            } else {
                prompter.input(&Style::Prompt.paint(format!("Domain: [{default_domain}] ")))?
            };
            (name, domain)
        } else {
            (String::new(), String::new())
        };
        let name = if name.is_empty() { default_name } else { name };
        let domain = if domain.is_empty() { default_domain } else { domain };

        let api = session.api().map_err(|e| session.record(e))?;
        let service = step(progress, &format!("Creating service '{name}'"), || {
            api.create_service(&CreateServiceInput {
                name: name.clone(),
                service_type: SERVICE_TYPE.to_string(),
                comment: None,
            })
            .context("error creating service")
        })
        .map_err(|e| session.record(e))?;

        let version = service.versions.iter().map(|v| v.number).min().unwrap_or(1);
        let version_ref = VersionRef::new(&service.id, version);
        let record = |e: crate::EdgeError| session.record_with(e, service_context(Some(&service.id), Some(version)));

        step(progress, &format!("Creating domain '{domain}'"), || {
            api.create_domain(&CreateDomainInput {
                version: version_ref.clone(),
                name: domain.clone(),
                comment: None,
            })
            .context("error creating domain")
        })
        .map_err(record)?;

        if let Some(manifest) = manifest.as_mut() {
            let setup = manifest.setup.dictionaries.clone();
            let mut dictionaries =
                Dictionaries::new(api, version_ref, &setup, self.accept_defaults, self.non_interactive);
            if dictionaries.predefined() {
                let mut prompter = LinePrompter::new(input, out);
                dictionaries.configure(&mut prompter).map_err(record)?;
                dictionaries.create(Some(progress)).map_err(record)?;
            }

            manifest.service_id = Some(service.id.clone());
            manifest.save(&session.manifest_path()).map_err(record)?;
            print::info(out, "Updated edge.toml with the new service ID")?;
        }

        Ok(Target {
            service_id: service.id,
            version,
            domain: Some(domain),
        })
    }

    fn deploy_to(
        &self,
        session: &Session,
        target: &Target,
        package: &Utf8PathBuf,
        progress: &mut dyn Progress,
    ) -> EdgeResult<()> {
        let api = session.api()?;
        let version = VersionRef::new(&target.service_id, target.version);

        if let Some(comment) = &self.comment {
            step(progress, "Setting version comment", || {
                api.update_version(&UpdateVersionInput {
                    version: version.clone(),
                    comment: Some(comment.clone()),
                })
                .context("error setting version comment")
            })?;
        }

        step(progress, "Uploading package", || {
            api.upload_package(&UploadPackageInput {
                version: version.clone(),
                path: package.clone(),
            })
            .context("error uploading package")
        })?;

        step(progress, &format!("Activating version {}", target.version), || {
            api.activate_version(&version).context("error activating version")
        })?;
        Ok(())
    }

    fn check_status(&self, domain: &str, progress: &mut dyn Progress, out: &mut dyn Write) -> EdgeResult<()> {
        let path = if self.status_check_path.starts_with('/') {
            self.status_check_path.clone()
        } else {
            format!("/{}", self.status_check_path)
        };
        let url = format!("https://{domain}{path}");
        self.report_status(&url, progress, out, || {
            check_availability(
                &url,
                self.status_check_code,
                Duration::from_secs(self.status_check_timeout),
                STATUS_CHECK_INTERVAL,
            )
        })
    }

    fn report_status(
        &self,
        url: &str,
        progress: &mut dyn Progress,
        out: &mut dyn Write,
        check: impl FnOnce() -> EdgeResult<Availability>,
    ) -> EdgeResult<()> {
        progress.start()?;
        progress.message("Checking service availability...");
        let availability = match check() {
            Ok(availability) => availability,
            Err(error) => {
                progress.stop_fail_message("Service availability check failed");
                progress.stop_fail()?;
                return Err(error);
            }
        };
        match availability {
            Availability::Available(status) => {
                progress.stop_message(&format!("Service is available ({status})"));
                progress.stop()?;
                print::info(out, &format!("View this service at {}", Style::Link.paint(url)))?;
            }
            Availability::TimedOut { last } => {
                progress.stop_fail_message("Service availability check timed out");
                progress.stop_fail()?;
                let last = last.map(|s| format!(" (last status {s})")).unwrap_or_default();
                print::warning(
                    out,
                    &format!(
                        "{url} did not respond as expected within {} seconds{last}. The service may still be propagating.",
                        self.status_check_timeout
                    ),
                )?;
            }
        }
        Ok(())
    }
}

impl Phase for Deploy {
    fn name(&self) -> &'static str {
        "deploy"
    }

    fn exec(&self, session: &Session, input: &mut dyn BufRead, out: &mut dyn Write) -> EdgeResult<()> {
        self.run(session, input, out)
    }
}

fn generate_domain() -> String {
    let label: String = rand::rng()
        .sample_iter(&Alphanumeric)
        .take(12)
        .map(|c| char::from(c).to_ascii_lowercase())
        .collect();
    format!("{label}.{DOMAIN_SUFFIX}")
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Availability {
    Available(u16),
    TimedOut { last: Option<u16> },
}

fn accepts(expected: u16, status: StatusCode) -> bool {
    if expected == 0 {
        status.is_success() || status.is_redirection()
    } else {
        status.as_u16() == expected
    }
}

/// Polls `url` until it answers with `expected` (any 2xx or 3xx when
/// `expected` is 0) or `timeout` has elapsed. Redirects are not followed.
pub(crate) fn check_availability(
    url: &str,
    expected: u16,
    timeout: Duration,
    interval: Duration,
) -> EdgeResult<Availability> {
    let client = reqwest::blocking::Client::builder()
        .redirect(Policy::none())
        .timeout(STATUS_CHECK_REQUEST_TIMEOUT)
        .build()?;
    let deadline = Instant::now() + timeout;
    let mut last = None;

    loop {
        match client.get(url).send() {
            Ok(response) => {
                let status = response.status();
                tracing::debug!(%url, %status, "status check");
                last = Some(status.as_u16());
                if accepts(expected, status) {
                    return Ok(Availability::Available(status.as_u16()));
                }
            }
            Err(error) => tracing::debug!(%url, %error, "status check request failed"),
        }
        if Instant::now() + interval > deadline {
            return Ok(Availability::TimedOut { last });
        }
        thread::sleep(interval);
    }
}
