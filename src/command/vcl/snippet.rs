use std::io::Write;

use camino::Utf8Path;
use clap::Parser;
use edgectl_client::operations::snippet::{
    CreateSnippetInput, Snippet as VclSnippet, SnippetFields, UpdateDynamicSnippetInput, UpdateSnippetInput,
};
use edgectl_client::shared::NamedRef;
use edgectl_std::{print, Fs};
use serde::Serialize;

use crate::command::output::{or_empty, write_json, write_timestamps, OutputMode};
use crate::command::target::{version_context, version_target, Access};
use crate::options::{AutoCloneOpt, JsonOpt, ServiceOpt, VersionOpt};
use crate::utils::session::Session;
use crate::utils::table;
use crate::EdgeResult;

/// Where in the generated configuration a snippet is placed.
pub const LOCATIONS: [&str; 11] = [
    "init", "recv", "hash", "hit", "miss", "pass", "fetch", "error", "deliver", "log", "none",
];

#[derive(Debug, Serialize, Parser)]
pub struct Snippet {
    #[clap(subcommand)]
    command: Command,
}

#[derive(Debug, Serialize, Parser)]
pub enum Command {
    /// Create a snippet on a service version
    Create(Create),
    /// Delete a snippet from a service version
    Delete(Delete),
    /// Show a snippet, versioned or dynamic
    Describe(Describe),
    /// List the snippets on a service version
    List(List),
    /// Update a snippet, versioned or dynamic
    Update(Update),
}

impl Snippet {
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

/// `content` names a file when one exists at that path; otherwise it is
/// the VCL itself.
fn read_content(content: &str) -> EdgeResult<String> {
    let path = Utf8Path::new(content);
    if path.is_file() {
        tracing::debug!(%path, "reading snippet content from file");
        return Ok(Fs::read_file(path)?);
    }
    Ok(content.to_string())
}

#[derive(Debug, Serialize, Parser)]
pub struct Create {
    /// The name of the snippet
    #[arg(long = "name", short = 'n')]
    name: String,
    /// VCL snippet, or a path to a file holding it
    #[arg(long = "content")]
    content: String,
    /// The location in generated VCL where the snippet should be placed
    #[arg(long = "type", value_parser = LOCATIONS)]
    location: String,
    /// Priority determines execution order. Lower numbers execute first
    #[arg(long = "priority", short = 'p')]
    priority: Option<String>,
    /// Whether the snippet is dynamic, and so editable without a new version
    #[arg(long = "dynamic")]
    dynamic: bool,
    #[clap(flatten)]
    service: ServiceOpt,
    #[clap(flatten)]
    version: VersionOpt,
    #[clap(flatten)]
    autoclone: AutoCloneOpt,
}

impl Create {
    pub fn run(&self, session: &Session, out: &mut dyn Write) -> EdgeResult<()> {
        let content = read_content(&self.content).map_err(|e| session.record(e))?;
        let access = Access::Write {
            autoclone: self.autoclone.autoclone,
        };
        let target = version_target(session, &self.service, self.version.version, access, out)?;
        let input = CreateSnippetInput {
            version: target.clone(),
            fields: SnippetFields {
                name: Some(self.name.clone()),
                content: Some(content),
                location: Some(self.location.clone()),
                priority: self.priority.clone(),
                dynamic: self.dynamic.then_some(true),
            },
        };
        let snippet = session
            .api()?
            .create_snippet(&input)
            .map_err(|e| session.record_with(e, version_context(&target)))?;
        print::success(
            out,
            &format!(
                "Created VCL snippet '{}' (service: {}, version: {}, dynamic: {}, snippet id: {}, type: {}, priority: {})",
                snippet.name,
                snippet.service_id,
                snippet.service_version,
                snippet.dynamic,
                snippet.id,
                or_empty(&snippet.location),
                or_empty(&snippet.priority)
            ),
        )?;
        Ok(())
    }
}

#[derive(Debug, Serialize, Parser)]
pub struct Delete {
    /// The name of the snippet
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
            .delete_snippet(&named)
            .map_err(|e| session.record_with(e, version_context(&target)))?;
        print::success(
            out,
            &format!(
                "Deleted VCL snippet '{}' (service: {}, version: {})",
                self.name, target.service_id, target.service_version
            ),
        )?;
        Ok(())
    }
}

#[derive(Debug, Serialize, Parser)]
pub struct Describe {
    /// The name of the snippet
    #[arg(long = "name", short = 'n', required_unless_present = "snippet_id")]
    name: Option<String>,
    /// Alphanumeric string identifying a dynamic snippet
    #[arg(long = "snippet-id", requires = "dynamic")]
    snippet_id: Option<String>,
    /// Whether the snippet is dynamic
    #[arg(long = "dynamic")]
    dynamic: bool,
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
        let api = session.api()?;
        let snippet = match (&self.snippet_id, &self.name) {
            (Some(snippet_id), _) if self.dynamic => api.get_dynamic_snippet(&target.service_id, snippet_id),
            (_, Some(name)) => api.get_snippet(&NamedRef::new(&target.service_id, target.service_version, name)),
            (_, None) => {
                return Err(anyhow::anyhow!("either --name, or --dynamic with --snippet-id, is required").into())
            }
        }
        .map_err(|e| session.record_with(e, version_context(&target)))?;

        if mode == OutputMode::Json {
            return write_json(out, &snippet);
        }
        writeln!(out)?;
        write_details(out, &snippet)
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
        let snippets = session
            .api()?
            .list_snippets(&target)
            .map_err(|e| session.record_with(e, version_context(&target)))?;

        match mode {
            OutputMode::Json => write_json(out, &snippets),
            OutputMode::Table => {
                let mut table = table::get_table(["SERVICE ID", "VERSION", "NAME", "DYNAMIC", "SNIPPET ID"]);
                for snippet in &snippets {
                    table.add_row(vec![
                        snippet.service_id.clone(),
                        snippet.service_version.to_string(),
                        snippet.name.clone(),
                        snippet.dynamic.to_string(),
                        snippet.id.clone(),
                    ]);
                }
                writeln!(out, "{table}")?;
                Ok(())
            }
            OutputMode::Verbose => {
                writeln!(out, "Service Version: {}", target.service_version)?;
                for snippet in &snippets {
                    writeln!(out)?;
                    write_details(out, snippet)?;
                }
                Ok(())
            }
        }
    }
}

#[derive(Debug, Serialize, Parser)]
pub struct Update {
    /// The name of the snippet to update
    #[arg(long = "name", short = 'n', required_unless_present = "snippet_id")]
    name: Option<String>,
    /// The new name of the snippet
    #[arg(long = "new-name")]
    new_name: Option<String>,
    /// Alphanumeric string identifying a dynamic snippet
    #[arg(long = "snippet-id", requires = "dynamic")]
    snippet_id: Option<String>,
    /// Whether the snippet is dynamic. Dynamic snippets only accept --content
    #[arg(long = "dynamic")]
    dynamic: bool,
    /// VCL snippet, or a path to a file holding it
    #[arg(long = "content")]
    content: Option<String>,
    /// The location in generated VCL where the snippet should be placed
    #[arg(long = "type", value_parser = LOCATIONS)]
    location: Option<String>,
    /// Priority determines execution order. Lower numbers execute first
    #[arg(long = "priority", short = 'p')]
    priority: Option<String>,
    #[clap(flatten)]
    service: ServiceOpt,
    #[clap(flatten)]
    version: VersionOpt,
    #[clap(flatten)]
    autoclone: AutoCloneOpt,
}

impl Update {
    pub fn run(&self, session: &Session, out: &mut dyn Write) -> EdgeResult<()> {
        let content = self
            .content
            .as_deref()
            .map(read_content)
            .transpose()
            .map_err(|e| session.record(e))?;

        if let (true, Some(snippet_id)) = (self.dynamic, &self.snippet_id) {
            return self.update_dynamic(session, snippet_id, content, out);
        }

        let access = Access::Write {
            autoclone: self.autoclone.autoclone,
        };
        let target = version_target(session, &self.service, self.version.version, access, out)?;
        let name = self.name.clone().unwrap_or_default();
        let input = UpdateSnippetInput {
            target: NamedRef::new(&target.service_id, target.service_version, name),
            fields: SnippetFields {
                name: self.new_name.clone(),
                content,
                location: self.location.clone(),
                priority: self.priority.clone(),
                dynamic: None,
            },
        };
        let snippet = session
            .api()?
            .update_snippet(&input)
            .map_err(|e| session.record_with(e, version_context(&target)))?;
        print::success(
            out,
            &format!(
                "Updated VCL snippet '{}' (service: {}, version: {}, type: {}, priority: {})",
                snippet.name,
                snippet.service_id,
                snippet.service_version,
                or_empty(&snippet.location),
                or_empty(&snippet.priority)
            ),
        )?;
        Ok(())
    }

    /// Dynamic snippets live outside any version, so only the service is
    /// resolved and the version is left alone.
    fn update_dynamic(
        &self,
        session: &Session,
        snippet_id: &str,
        content: Option<String>,
        out: &mut dyn Write,
    ) -> EdgeResult<()> {
        let target = version_target(session, &self.service, self.version.version, Access::Read, out)?;
        let content = content.ok_or_else(|| anyhow::anyhow!("--content is required to update a dynamic snippet"))?;
        let input = UpdateDynamicSnippetInput {
            service_id: target.service_id.clone(),
            snippet_id: snippet_id.to_string(),
            content,
        };
        let snippet = session
            .api()?
            .update_dynamic_snippet(&input)
            .map_err(|e| session.record_with(e, version_context(&target)))?;
        print::success(
            out,
            &format!(
                "Updated dynamic VCL snippet '{}' (service: {})",
                snippet.id, target.service_id
            ),
        )?;
        Ok(())
    }
}

fn write_details(out: &mut dyn Write, snippet: &VclSnippet) -> EdgeResult<()> {
    writeln!(out, "Name: {}", snippet.name)?;
    writeln!(out, "ID: {}", snippet.id)?;
    writeln!(out, "Priority: {}", or_empty(&snippet.priority))?;
    writeln!(out, "Dynamic: {}", snippet.dynamic)?;
    writeln!(out, "Type: {}", or_empty(&snippet.location))?;
    writeln!(out, "Content: \n{}", or_empty(&snippet.content))?;
    write_timestamps(out, "", &snippet.timestamps)
}
