use std::io::{self, Write};
use std::process;

use calm_io::{stderrln, stdoutln};
use clap::Parser;
use edgectl::{Edgectl, EdgeError, EdgeResult, Session};
use serde_json::json;

fn main() {
    let app = Edgectl::parse();
    timber::init(app.log_level);
    tracing::trace!(command_structure = ?app);

    if let Err(error) = run(&app) {
        tracing::debug!(?error);
        // a closed pipe leaves nothing to report to
        let _ = if app.json_requested() {
            stdoutln!("{}", json!({ "error": error.get_json() }))
        } else {
            error.print()
        };
        process::exit(1)
    }
}

fn run(app: &Edgectl) -> EdgeResult<()> {
    let session = app.session()?;
    let stdin = io::stdin();
    let mut input = stdin.lock();
    let mut out = io::stdout().lock();

    let result = app.run(&session, &mut input, &mut out);
    out.flush()?;
    if let Err(error) = &result {
        persist_err_log(&session, error);
    }
    result
}

/// Writes the session's error log next to the profiles. Failing to do so
/// must not hide the original error.
fn persist_err_log(session: &Session, error: &EdgeError) {
    if session.err_log().is_empty() {
        session.err_log().add(error);
    }
    let path = match session.config() {
        Ok(config) => config.error_log_path(),
        Err(e) => {
            tracing::debug!(error = %e, "no config home, skipping the error log");
            return;
        }
    };
    if let Err(e) = session.err_log().persist(&path) {
        let _ = stderrln!("warning: could not write the error log to {path}: {e}");
    }
}
