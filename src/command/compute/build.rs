use std::io::{BufRead, Write};
use std::process::{Command, ExitStatus, Stdio};
use std::thread;
use std::time::{Duration, Instant};

use camino::Utf8Path;
use clap::Parser;
use edgectl_std::print;
use serde::Serialize;

use crate::command::compute::package::{create_package, package_name};
use crate::command::compute::publish::Phase;
use crate::manifest::{Language, Manifest};
use crate::utils::session::Session;
use crate::{EdgeCliError, EdgeResult};

const POLL_INTERVAL: Duration = Duration::from_millis(50);

#[derive(Debug, Clone, Default, Serialize, Parser)]
pub struct Build {
    /// Language type. Overrides the language in edge.toml
    #[arg(long = "language")]
    pub(crate) language: Option<String>,

    /// Package name. Defaults to the name in edge.toml
    #[arg(long = "package-name")]
    pub(crate) package_name: Option<String>,

    /// Include the source code in the package
    #[arg(long = "include-source")]
    pub(crate) include_source: bool,

    /// Seconds to wait for the build script before giving up
    #[arg(long = "timeout")]
    pub(crate) timeout: Option<u64>,
}

impl Build {
    pub fn run(&self, session: &Session, out: &mut dyn Write) -> EdgeResult<()> {
        self.build(session, out).map_err(|e| session.record(e))
    }

    fn build(&self, session: &Session, out: &mut dyn Write) -> EdgeResult<()> {
        let manifest = Manifest::load(&session.manifest_path())?;
        let language = match &self.language {
            Some(language) => Language::parse(language)?,
            None => manifest.language()?,
        };
        let script = manifest
            .scripts
            .build
            .clone()
            .filter(|s| !s.trim().is_empty())
            .unwrap_or_else(|| language.default_build_script().to_string());
        let name = self.package_name.clone().unwrap_or_else(|| manifest.name.clone());

        print::info(out, &format!("Building package using {language} toolchain"))?;
        tracing::info!(%script, "running build script");
        // zero means no timeout
        let timeout = self.timeout.filter(|seconds| *seconds > 0);
        run_script(&script, session.project_dir(), timeout, session.verbose())?;

        let path = create_package(session.project_dir(), &name, self.include_source)?;
        print::success(
            out,
            &format!("Built package '{}' ({})", package_name(&name), relative(session.project_dir(), &path)),
        )?;
        Ok(())
    }
}

impl Phase for Build {
    fn name(&self) -> &'static str {
        "build"
    }

    fn exec(&self, session: &Session, _input: &mut dyn BufRead, out: &mut dyn Write) -> EdgeResult<()> {
        self.run(session, out)
    }
}

fn relative<'a>(root: &Utf8Path, path: &'a Utf8Path) -> &'a str {
    path.strip_prefix(root).map(|p| p.as_str()).unwrap_or(path.as_str())
}

/// Runs `script` through `sh -c` in `dir`, killing it once `timeout`
/// seconds have passed.
fn run_script(script: &str, dir: &Utf8Path, timeout: Option<u64>, verbose: bool) -> EdgeResult<()> {
    let stdout = if verbose { Stdio::inherit() } else { Stdio::null() };
    let mut child = Command::new("sh")
        .arg("-c")
        .arg(script)
        .current_dir(dir)
        .stdin(Stdio::null())
        .stdout(stdout)
        .stderr(Stdio::inherit())
        .spawn()?;

    let status: ExitStatus = match timeout {
        None => child.wait()?,
        Some(seconds) => {
            let deadline = Instant::now() + Duration::from_secs(seconds);
            loop {
                if let Some(status) = child.try_wait()? {
                    break status;
                }
                if Instant::now() >= deadline {
                    let _ = child.kill();
                    let _ = child.wait();
                    return Err(EdgeCliError::BuildTimeout {
                        script: script.to_string(),
                        seconds,
                    }
                    .into());
                }
                thread::sleep(POLL_INTERVAL);
            }
        }
    };

    if status.success() {
        Ok(())
    } else {
        Err(EdgeCliError::BuildFailed {
            script: script.to_string(),
            status: status.to_string(),
        }
        .into())
    }
}

#[cfg(test)]
mod tests {
    use edgectl_client::MockEdgeApi;
    use speculoos::prelude::*;

    use super::*;
    use crate::command::compute::package::{WASM_BINARY, PACKAGE_DIR};
    use crate::manifest::MANIFEST_FILE;
    use crate::utils::session::testing::{output, session_with};
    use crate::EdgeErrorCode;

    fn project(session: &Session, script: &str) {
        let root = session.project_dir();
        std::fs::write(
            root.join(MANIFEST_FILE),
            format!("name = \"Edge App\"\nlanguage = \"rust\"\n\n[scripts]\nbuild = \"{script}\"\n"),
        )
        .unwrap();
    }

    #[test]
    fn it_runs_the_script_and_packages_the_result() {
        let (session, _dir) = session_with(MockEdgeApi::new(), false);
        project(&session, "mkdir -p bin && printf wasm > bin/main.wasm");

        let mut out = Vec::new();
        Build::default().run(&session, &mut out).unwrap();

        assert!(session.project_dir().join(WASM_BINARY).is_file());
        assert!(session.project_dir().join(PACKAGE_DIR).join("edge-app.tar.gz").is_file());
        assert_that!(output(out)).contains("Built package 'edge-app' (pkg/edge-app.tar.gz)");
    }

    #[test]
    fn the_package_name_flag_wins() {
        let (session, _dir) = session_with(MockEdgeApi::new(), false);
        project(&session, "mkdir -p bin && printf wasm > bin/main.wasm");
        let build = Build {
            package_name: Some("Other Name".to_string()),
            ..Default::default()
        };
        build.run(&session, &mut Vec::new()).unwrap();
        assert!(session.project_dir().join("pkg/other-name.tar.gz").is_file());
    }

    #[test]
    fn a_failing_script_is_reported_and_recorded() {
        let (session, _dir) = session_with(MockEdgeApi::new(), false);
        project(&session, "exit 3");
        let error = Build::default().run(&session, &mut Vec::new()).unwrap_err();
        assert_that!(error.code()).is_equal_to(Some(EdgeErrorCode::E023));
        assert_that!(session.err_log().len()).is_equal_to(1);
    }

    #[test]
    fn a_slow_script_times_out() {
        let (session, _dir) = session_with(MockEdgeApi::new(), false);
        project(&session, "sleep 10");
        let build = Build {
            timeout: Some(1),
            ..Default::default()
        };
        let error = build.run(&session, &mut Vec::new()).unwrap_err();
        assert_that!(error.code()).is_equal_to(Some(EdgeErrorCode::E024));
    }

    #[test]
    fn a_zero_timeout_waits_for_the_script() {
        let (session, _dir) = session_with(MockEdgeApi::new(), false);
        project(&session, "sleep 1 && mkdir -p bin && printf wasm > bin/main.wasm");
        let build = Build {
            timeout: Some(0),
            ..Default::default()
        };
        build.run(&session, &mut Vec::new()).unwrap();
        assert!(session.project_dir().join("pkg/edge-app.tar.gz").is_file());
    }

    #[test]
    fn a_script_that_leaves_no_binary_is_an_error() {
        let (session, _dir) = session_with(MockEdgeApi::new(), false);
        project(&session, "true");
        let error = Build::default().run(&session, &mut Vec::new()).unwrap_err();
        assert_that!(error.code()).is_equal_to(Some(EdgeErrorCode::E025));
    }

    #[test]
    fn building_outside_a_project_fails() {
        let (session, _dir) = session_with(MockEdgeApi::new(), false);
        let error = Build::default().run(&session, &mut Vec::new()).unwrap_err();
        assert_that!(error.code()).is_equal_to(Some(EdgeErrorCode::E020));
    }

    #[test]
    fn an_unknown_language_flag_is_rejected() {
        let (session, _dir) = session_with(MockEdgeApi::new(), false);
        project(&session, "true");
        let build = Build {
            language: Some("cobol".to_string()),
            ..Default::default()
        };
        let error = build.run(&session, &mut Vec::new()).unwrap_err();
        assert_that!(error.code()).is_equal_to(Some(EdgeErrorCode::E022));
    }
}
