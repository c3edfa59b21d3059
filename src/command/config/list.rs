use std::io::Write;

use clap::Parser;
use houston::Profile;
use serde::Serialize;

use crate::options::JsonOpt;
use crate::utils::session::Session;
use crate::EdgeResult;

#[derive(Serialize, Debug, Parser)]
/// List all configuration profiles
pub struct List {
    #[clap(flatten)]
    json: JsonOpt,
}

impl List {
    pub fn run(&self, session: &Session, out: &mut dyn Write) -> EdgeResult<()> {
        let profiles = Profile::list(session.config()?)?;
        if self.json.json {
            return crate::command::output::write_json(out, &profiles);
        }
        if profiles.is_empty() {
            writeln!(out, "No profiles found. Run `edgectl config auth` to create one.")?;
        }
        for profile in profiles {
            let marker = if profile == session.profile() { "*" } else { " " };
            writeln!(out, "{marker} {profile}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use edgectl_client::MockEdgeApi;
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::utils::session::testing::{output, session_with};

    #[test]
    fn it_marks_the_selected_profile() {
        let (session, _dir) = session_with(MockEdgeApi::new(), false);
        let config = session.config().unwrap();
        Profile::set_api_token("work", config, "token-1".to_string()).unwrap();
        Profile::set_api_token(session.profile(), config, "token-2".to_string()).unwrap();

        let mut out = Vec::new();
        List { json: JsonOpt::default() }.run(&session, &mut out).unwrap();
        assert_eq!(output(out), "* default\n  work\n");
    }
}
