use std::io::{BufRead, Write};

use clap::Parser;
use edgectl_std::{print, LinePrompter, Prompter, Style};
use houston::Profile;
use serde::Serialize;

use crate::utils::session::Session;
use crate::{EdgeCliError, EdgeResult};

#[derive(Debug, Serialize, Parser)]
/// Authenticate a configuration profile with an API token
///
/// The token is stored for the profile selected with the global
/// --profile flag, or for a profile named "default".
pub struct Auth {}

impl Auth {
    pub fn run(&self, session: &Session, input: &mut dyn BufRead, out: &mut dyn Write) -> EdgeResult<()> {
        let config = session.config()?;
        let token = {
            let mut prompter = LinePrompter::new(input, out);
            prompter.note("Create an API token in the control panel and paste it below.")?;
            prompter.input(&Style::Prompt.paint("API token: "))?
        };
        let token = validate(token)?;

        Profile::set_api_token(session.profile(), config, token)?;
        Profile::get_credential(session.profile(), config)?;
        print::success(
            out,
            &format!("Saved API token for profile '{}'", Style::Command.paint(session.profile())),
        )?;
        Ok(())
    }
}

fn validate(token: String) -> EdgeResult<String> {
    let token = token.trim().to_string();
    if token.is_empty() {
        Err(EdgeCliError::EmptyApiToken.into())
    } else {
        Ok(token)
    }
}

#[cfg(test)]
mod tests {
    use edgectl_client::MockEdgeApi;
    use houston::CredentialOrigin;
    use speculoos::prelude::*;

    use super::*;
    use crate::utils::session::testing::{output, session_with};
    use crate::EdgeErrorCode;

    #[test]
    fn it_stores_the_token_for_the_selected_profile() {
        let (session, _dir) = session_with(MockEdgeApi::new(), false);
        let mut out = Vec::new();
        Auth {}.run(&session, &mut "  secret-token \n".as_bytes(), &mut out).unwrap();

        let credential = Profile::get_credential(session.profile(), session.config().unwrap()).unwrap();
        assert_that!(credential.api_token).is_equal_to("secret-token".to_string());
        assert_that!(credential.origin).is_equal_to(CredentialOrigin::ConfigFile(session.profile().to_string()));
        assert_that!(output(out)).contains("Saved API token");
    }

    #[test]
    fn an_empty_token_is_rejected() {
        let (session, _dir) = session_with(MockEdgeApi::new(), false);
        let error = Auth {}.run(&session, &mut "\n".as_bytes(), &mut Vec::new()).unwrap_err();
        assert_that!(error.code()).is_equal_to(Some(EdgeErrorCode::E029));
    }
}
