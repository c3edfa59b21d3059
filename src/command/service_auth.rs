use std::io::Write;

use clap::Parser;
use edgectl_client::operations::service_authorization::{
    CreateServiceAuthorizationInput, Permission, ServiceAuthorization, UpdateServiceAuthorizationInput,
};
use edgectl_std::print;
use serde::Serialize;

use crate::command::output::{write_json, write_timestamps, OutputMode};
use crate::options::{JsonOpt, ServiceOpt};
use crate::utils::err_log::{service_context, ErrContext};
use crate::utils::service_details::{display_service_id, service_id};
use crate::utils::session::Session;
use crate::utils::table;
use crate::EdgeResult;

#[derive(Debug, Serialize, Parser)]
pub struct ServiceAuth {
    #[clap(subcommand)]
    command: Command,
}

#[derive(Debug, Serialize, Parser)]
pub enum Command {
    /// Grant a user access to a service
    Create(Create),
    /// Revoke a user's access to a service
    Delete(Delete),
    /// Show a service authorization
    Describe(Describe),
    /// List service authorizations
    List(List),
    /// Change the permission of a service authorization
    Update(Update),
}

impl ServiceAuth {
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

fn authorization_context(id: &str) -> ErrContext {
    let mut context = ErrContext::new();
    context.insert("Service Authorization ID".to_string(), id.to_string());
    context
}

#[derive(Debug, Serialize, Parser)]
pub struct Create {
    /// ID of the user being given access to the service
    #[arg(long = "user-id", short = 'u')]
    user_id: String,
    /// The permission the user has in relation to the service
    #[arg(long = "permission", short = 'p', default_value_t = Permission::Full)]
    #[serde(skip_serializing)]
    permission: Permission,
    #[clap(flatten)]
    service: ServiceOpt,
}

impl Create {
    pub fn run(&self, session: &Session, out: &mut dyn Write) -> EdgeResult<()> {
        let (service_id, source) = service_id(session, &self.service)?;
        if session.verbose() {
            display_service_id(out, &service_id, source)?;
        }
        let input = CreateServiceAuthorizationInput {
            service_id: service_id.clone(),
            user_id: self.user_id.clone(),
            permission: self.permission,
        };
        let authorization = session
            .api()?
            .create_service_authorization(&input)
            .map_err(|e| session.record_with(e, service_context(Some(&service_id), None)))?;
        print::success(
            out,
            &format!(
                "Created service authorization {} ({} for user {})",
                authorization.id, self.permission, self.user_id
            ),
        )?;
        Ok(())
    }
}

#[derive(Debug, Serialize, Parser)]
pub struct Delete {
    /// ID of the service authorization to delete
    #[arg(long = "id")]
    id: String,
}

impl Delete {
    pub fn run(&self, session: &Session, out: &mut dyn Write) -> EdgeResult<()> {
        session
            .api()?
            .delete_service_authorization(&self.id)
            .map_err(|e| session.record_with(e, authorization_context(&self.id)))?;
        print::success(out, &format!("Deleted service authorization {}", self.id))?;
        Ok(())
    }
}

#[derive(Debug, Serialize, Parser)]
pub struct Describe {
    /// ID of the service authorization to show
    #[arg(long = "id")]
    id: String,
    #[clap(flatten)]
    json: JsonOpt,
}

impl Describe {
    pub fn run(&self, session: &Session, out: &mut dyn Write) -> EdgeResult<()> {
        let mode = session.output_mode(self.json.json)?;
        let authorization = session
            .api()?
            .get_service_authorization(&self.id)
            .map_err(|e| session.record_with(e, authorization_context(&self.id)))?;
        if mode == OutputMode::Json {
            return write_json(out, &authorization);
        }
        write_details(out, "", &authorization)
    }
}

#[derive(Debug, Serialize, Parser)]
pub struct List {
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
    pub fn run(&self, session: &Session, out: &mut dyn Write) -> EdgeResult<()> {
        let mode = session.output_mode(self.json.json)?;
        let authorizations = session
            .api()?
            .list_service_authorizations(self.page, self.per_page)
            .map_err(|e| session.record(e))?;

        match mode {
            OutputMode::Json => write_json(out, &authorizations),
            OutputMode::Table => {
                let mut table = table::get_table(["AUTH ID", "USER ID", "SERVICE ID", "PERMISSION"]);
                for authorization in &authorizations {
                    table.add_row(vec![
                        authorization.id.clone(),
                        authorization.user_id.clone(),
                        authorization.service_id.clone(),
                        authorization.permission.to_string(),
                    ]);
                }
                writeln!(out, "{table}")?;
                Ok(())
            }
            OutputMode::Verbose => {
                for authorization in &authorizations {
                    writeln!(out)?;
                    write_details(out, "", authorization)?;
                }
                Ok(())
            }
        }
    }
}

#[derive(Debug, Serialize, Parser)]
pub struct Update {
    /// ID of the service authorization to update
    #[arg(long = "id")]
    id: String,
    /// The permission the user has in relation to the service
    #[arg(long = "permission", short = 'p')]
    #[serde(skip_serializing)]
    permission: Permission,
}

impl Update {
    pub fn run(&self, session: &Session, out: &mut dyn Write) -> EdgeResult<()> {
        let input = UpdateServiceAuthorizationInput {
            id: self.id.clone(),
            permission: self.permission,
        };
        let authorization = session
            .api()?
            .update_service_authorization(&input)
            .map_err(|e| session.record_with(e, authorization_context(&self.id)))?;
        print::success(out, &format!("Updated service authorization {}", authorization.id))?;
        Ok(())
    }
}

fn write_details(out: &mut dyn Write, indent: &str, authorization: &ServiceAuthorization) -> EdgeResult<()> {
    writeln!(out, "{indent}Auth ID: {}", authorization.id)?;
    writeln!(out, "{indent}User ID: {}", authorization.user_id)?;
    writeln!(out, "{indent}Service ID: {}", authorization.service_id)?;
    writeln!(out, "{indent}Permission: {}", authorization.permission)?;
    write_timestamps(out, indent, &authorization.timestamps)
}
