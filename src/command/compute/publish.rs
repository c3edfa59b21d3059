use std::io::{BufRead, Write};

use camino::{Utf8Path, Utf8PathBuf};
use clap::Parser;
use edgectl_std::print;
use serde::Serialize;

use crate::command::compute::build::Build;
use crate::command::compute::deploy::{Deploy, DEFAULT_STATUS_CHECK_PATH, DEFAULT_STATUS_CHECK_TIMEOUT};
use crate::command::compute::package::package_path;
use crate::options::{OptionalVersionOpt, ServiceOpt};
use crate::utils::session::Session;
use crate::EdgeResult;

/// One step of a composite command.
pub(crate) trait Phase {
    fn name(&self) -> &'static str;

    fn exec(&self, session: &Session, input: &mut dyn BufRead, out: &mut dyn Write) -> EdgeResult<()>;
}

/// Runs `phases` in order with a blank line between them. The first
/// failure stops the sequence; it is added to the error log and returned
/// as is.
pub(crate) fn exec_phases(
    session: &Session,
    phases: &[&dyn Phase],
    input: &mut dyn BufRead,
    out: &mut dyn Write,
) -> EdgeResult<()> {
    for (i, phase) in phases.iter().enumerate() {
        if i > 0 {
            print::blank(out)?;
        }
        tracing::info!(phase = phase.name(), "starting phase");
        if let Err(e) = phase.exec(session, input, out) {
            tracing::debug!(phase = phase.name(), "phase failed");
            session.err_log().add(&e);
            return Err(e);
        }
    }
    Ok(())
}

#[derive(Debug, Clone, Serialize, Parser)]
pub struct Publish {
    /// Language type. Overrides the language in edge.toml
    #[arg(long = "language")]
    language: Option<String>,

    /// Package name. Defaults to the name in edge.toml
    #[arg(long = "package-name")]
    package_name: Option<String>,

    /// Include the source code in the package
    #[arg(long = "include-source")]
    include_source: bool,

    /// Seconds to wait for the build script before giving up
    #[arg(long = "timeout")]
    timeout: Option<u64>,

    /// Path to a package tarball. Defaults to pkg/<name>.tar.gz
    #[arg(long = "package", short = 'p')]
    package: Option<Utf8PathBuf>,

    #[clap(flatten)]
    service: ServiceOpt,

    #[clap(flatten)]
    version: OptionalVersionOpt,

    /// The domain to route to a newly created service
    #[arg(long = "domain")]
    domain: Option<String>,

    /// Human-readable comment for the deployed version
    #[arg(long = "comment")]
    comment: Option<String>,

    /// Accept default values for every prompt
    #[arg(long = "accept-defaults")]
    accept_defaults: bool,

    /// Do not prompt for anything; implies default values
    #[arg(long = "non-interactive")]
    non_interactive: bool,

    /// Status code the availability check waits for. 0 accepts any 2xx or 3xx
    #[arg(long = "status-check-code", default_value_t = 0)]
    status_check_code: u16,

    /// Skip the availability check
    #[arg(long = "status-check-off")]
    status_check_off: bool,

    /// Path the availability check requests
    #[arg(long = "status-check-path", default_value = DEFAULT_STATUS_CHECK_PATH)]
    status_check_path: String,

    /// Seconds to wait for the service to become available
    #[arg(long = "status-check-timeout", default_value_t = DEFAULT_STATUS_CHECK_TIMEOUT)]
    status_check_timeout: u64,
}

impl Default for Publish {
    fn default() -> Self {
        Publish {
            language: None,
            package_name: None,
            include_source: false,
            timeout: None,
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

impl Publish {
    pub fn run(&self, session: &Session, input: &mut dyn BufRead, out: &mut dyn Write) -> EdgeResult<()> {
        let build = self.build();
        let deploy = self.deploy(session.project_dir());
        exec_phases(session, &[&build, &deploy], input, out)
    }

    /// The build phase, carrying only the flags that were given.
    fn build(&self) -> Build {
        let mut build = Build::default();
        if let Some(language) = &self.language {
            build.language = Some(language.clone());
        }
        if let Some(package_name) = &self.package_name {
            build.package_name = Some(package_name.clone());
        }
        if self.include_source {
            build.include_source = true;
        }
        if let Some(timeout) = self.timeout {
            build.timeout = Some(timeout);
        }
        build
    }

    /// The deploy phase, carrying only the flags that were given. A
    /// package name without an explicit package points deploy at the
    /// tarball the build phase writes.
    fn deploy(&self, project_dir: &Utf8Path) -> Deploy {
        let mut deploy = Deploy::default();
        match (&self.package, &self.package_name) {
            (Some(package), _) => deploy.package = Some(package.clone()),
            (None, Some(name)) => deploy.package = Some(package_path(project_dir, name)),
            (None, None) => {}
        }
        if let Some(service_id) = &self.service.service_id {
            deploy.service.service_id = Some(service_id.clone());
        }
        if let Some(service_name) = &self.service.service_name {
            deploy.service.service_name = Some(service_name.clone());
        }
        if let Some(version) = self.version.version {
            deploy.version.version = Some(version);
        }
        if let Some(domain) = &self.domain {
            deploy.domain = Some(domain.clone());
        }
        if let Some(comment) = &self.comment {
            deploy.comment = Some(comment.clone());
        }
        if self.accept_defaults {
            deploy.accept_defaults = true;
        }
        if self.non_interactive {
            deploy.non_interactive = true;
        }
        if self.status_check_code > 0 {
            deploy.status_check_code = self.status_check_code;
        }
        if self.status_check_off {
            deploy.status_check_off = true;
        }
        if self.status_check_timeout > 0 {
            deploy.status_check_timeout = self.status_check_timeout;
        }
        // always copied, it has its own default
        deploy.status_check_path = self.status_check_path.clone();
        deploy
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;

    use clap::Parser;
    use edgectl_client::operations::service::Package;
    use edgectl_client::MockEdgeApi;
    use rstest::rstest;
    use speculoos::prelude::*;

    use super::*;
    use crate::manifest::MANIFEST_FILE;
    use crate::options::VersionSelector;
    use crate::utils::service_details::tests::version;
    use crate::utils::session::testing::{output, session_with};
    use crate::{EdgeCliError, EdgeErrorCode};

    #[derive(Parser)]
    struct Harness {
        #[clap(flatten)]
        publish: Publish,
    }

    fn project() -> &'static Utf8Path {
        Utf8Path::new("/project")
    }

    fn parse(args: &[&str]) -> Publish {
        let mut argv = vec!["publish"];
        argv.extend_from_slice(args);
        Harness::parse_from(argv).publish
    }

    struct Stub {
        name: &'static str,
        fail: bool,
        calls: Cell<u32>,
    }

    impl Stub {
        fn new(name: &'static str, fail: bool) -> Self {
            Stub {
                name,
                fail,
                calls: Cell::new(0),
            }
        }
    }

    impl Phase for Stub {
        fn name(&self) -> &'static str {
            self.name
        }

        fn exec(&self, _session: &Session, _input: &mut dyn BufRead, out: &mut dyn Write) -> EdgeResult<()> {
            self.calls.set(self.calls.get() + 1);
            writeln!(out, "{}", self.name)?;
            if self.fail {
                Err(EdgeCliError::Internal {
                    detail: format!("{} broke", self.name),
                }
                .into())
            } else {
                Ok(())
            }
        }
    }

    #[test]
    fn only_given_flags_reach_the_phases() {
        let publish = parse(&["--comment", "", "--include-source", "-s", "svc", "--version", "4"]);

        let build = publish.build();
        assert_that!(build.include_source).is_true();
        assert_that!(build.language).is_none();
        assert_that!(build.timeout).is_none();

        let deploy = publish.deploy(project());
        assert_that!(deploy.comment).is_equal_to(Some(String::new()));
        assert_that!(deploy.domain).is_none();
        assert_that!(deploy.service.service_id).is_equal_to(Some("svc".to_string()));
        assert_that!(deploy.version.version).is_equal_to(Some(VersionSelector::Number(4)));
        assert_that!(deploy.accept_defaults).is_false();
    }

    #[rstest]
    #[case::default(&[], 0)]
    #[case::explicit(&["--status-check-code", "200"], 200)]
    fn status_check_code_only_propagates_when_positive(#[case] args: &[&str], #[case] expected: u16) {
        assert_that!(parse(args).deploy(project()).status_check_code).is_equal_to(expected);
    }

    #[test]
    fn status_check_settings_keep_their_defaults() {
        let deploy = parse(&[]).deploy(project());
        assert_that!(deploy.status_check_off).is_false();
        assert_that!(deploy.status_check_path).is_equal_to("/".to_string());
        assert_that!(deploy.status_check_timeout).is_equal_to(DEFAULT_STATUS_CHECK_TIMEOUT);

        let deploy = parse(&["--status-check-off", "--status-check-path", "/ready", "--status-check-timeout", "9"]).deploy(project());
        assert_that!(deploy.status_check_off).is_true();
        assert_that!(deploy.status_check_path).is_equal_to("/ready".to_string());
        assert_that!(deploy.status_check_timeout).is_equal_to(9);
    }

    #[test]
    fn a_zero_timeout_keeps_the_deploy_default() {
        let deploy = parse(&["--status-check-timeout", "0"]).deploy(project());
        assert_that!(deploy.status_check_timeout).is_equal_to(DEFAULT_STATUS_CHECK_TIMEOUT);
    }

    #[rstest]
    #[case::default(&[], None)]
    #[case::package_name(&["--package-name", "Other Name"], Some("/project/pkg/other-name.tar.gz"))]
    #[case::explicit_package(&["--package-name", "other", "-p", "dist/app.tar.gz"], Some("dist/app.tar.gz"))]
    fn deploy_uploads_the_package_the_build_wrote(#[case] args: &[&str], #[case] expected: Option<&str>) {
        let deploy = parse(args).deploy(project());
        assert_that!(deploy.package).is_equal_to(expected.map(Utf8PathBuf::from));
    }

    #[test]
    fn phases_run_in_order_with_a_separator() {
        let (session, _dir) = session_with(MockEdgeApi::new(), false);
        let (build, deploy) = (Stub::new("build", false), Stub::new("deploy", false));
        let mut out = Vec::new();

        exec_phases(&session, &[&build, &deploy], &mut "".as_bytes(), &mut out).unwrap();
        assert_that!(output(out)).is_equal_to("build\n\ndeploy\n".to_string());
        assert_that!(session.err_log().is_empty()).is_true();
    }

    #[test]
    fn the_first_failure_stops_the_sequence() {
        let (session, _dir) = session_with(MockEdgeApi::new(), false);
        let (build, deploy) = (Stub::new("build", true), Stub::new("deploy", false));

        let error = exec_phases(&session, &[&build, &deploy], &mut "".as_bytes(), &mut Vec::new()).unwrap_err();
        assert_that!(build.calls.get()).is_equal_to(1);
        assert_that!(deploy.calls.get()).is_equal_to(0);
        assert_that!(error.code()).is_equal_to(Some(EdgeErrorCode::E028));
        assert_that!(error.message()).is_equal_to("internal logic error: build broke".to_string());
        assert_that!(session.err_log().len()).is_equal_to(1);
    }

    #[test]
    fn a_failing_build_skips_the_deploy() {
        // no edge.toml in the project, and no remote calls are expected
        let (session, _dir) = session_with(MockEdgeApi::new(), false);
        let error = Publish::default()
            .run(&session, &mut "".as_bytes(), &mut Vec::new())
            .unwrap_err();
        assert_that!(error.code()).is_equal_to(Some(EdgeErrorCode::E020));
    }

    #[test]
    fn publish_builds_then_deploys_the_named_package() {
        let mut mock = MockEdgeApi::new();
        mock.expect_list_versions()
            .times(1)
            .returning(|_| Ok(vec![version(1, true, true)]));
        mock.expect_clone_version().times(1).returning(|_| Ok(version(2, false, false)));
        mock.expect_upload_package()
            .withf(|i| i.version.service_version == 2 && i.path.as_str().ends_with("pkg/other.tar.gz"))
            .times(1)
            .returning(|_| Ok(Package::default()));
        mock.expect_activate_version()
            .withf(|v| v.service_id == "svc" && v.service_version == 2)
            .times(1)
            .returning(|_| Ok(version(2, true, true)));
        mock.expect_create_service().never();

        let (session, _dir) = session_with(mock, false);
        std::fs::write(
            session.project_dir().join(MANIFEST_FILE),
            "name = \"edge-app\"\nlanguage = \"rust\"\n\n[scripts]\nbuild = \"mkdir -p bin && printf wasm > bin/main.wasm\"\n",
        )
        .unwrap();

        let publish = parse(&["--package-name", "other", "-s", "svc", "--status-check-off", "--accept-defaults"]);
        let mut out = Vec::new();
        publish.run(&session, &mut "".as_bytes(), &mut out).unwrap();

        let written = output(out);
        assert_that!(written).contains("Built package 'other' (pkg/other.tar.gz)");
        assert_that!(written).contains("Deployed package");
        assert!(!session.project_dir().join("pkg/edge-app.tar.gz").exists());
        assert_that!(session.err_log().is_empty()).is_true();
    }
}
