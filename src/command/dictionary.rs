use std::io::Write;

use clap::Parser;
use edgectl_client::operations::dictionary::{
    CreateDictionaryInput, Dictionary as Dict, DictionaryFields, UpdateDictionaryInput,
};
use edgectl_client::operations::dictionary_item::DictionaryRef;
use edgectl_client::shared::NamedRef;
use edgectl_std::print;
use serde::Serialize;

use crate::command::output::{write_json, write_timestamps, OutputMode};
use crate::command::target::{version_context, version_target, Access};
use crate::options::{AutoCloneOpt, JsonOpt, ServiceOpt, VersionOpt};
use crate::utils::session::Session;
use crate::utils::table;
use crate::EdgeResult;

#[derive(Debug, Serialize, Parser)]
pub struct Dictionary {
    #[clap(subcommand)]
    command: Command,
}

#[derive(Debug, Serialize, Parser)]
pub enum Command {
    /// Create a dictionary on a service version
    Create(Create),
    /// Delete a dictionary from a service version
    Delete(Delete),
    /// Show detailed information about a dictionary
    Describe(Describe),
    /// List dictionaries on a service version
    List(List),
    /// Rename a dictionary or change its write-only setting
    Update(Update),
}

impl Dictionary {
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

#[derive(Debug, Serialize, Parser)]
pub struct Create {
    /// Name of the dictionary
    #[arg(long = "name", short = 'n')]
    name: String,
    /// Whether to mark this dictionary as write-only
    #[arg(long = "write-only")]
    write_only: bool,
    #[clap(flatten)]
    service: ServiceOpt,
    #[clap(flatten)]
    version: VersionOpt,
    #[clap(flatten)]
    autoclone: AutoCloneOpt,
}

impl Create {
    pub fn run(&self, session: &Session, out: &mut dyn Write) -> EdgeResult<()> {
        let access = Access::Write {
            autoclone: self.autoclone.autoclone,
        };
        let target = version_target(session, &self.service, self.version.version, access, out)?;
        let input = CreateDictionaryInput {
            version: target.clone(),
            fields: DictionaryFields {
                name: Some(self.name.clone()),
                write_only: self.write_only.then_some(true),
            },
        };
        let dictionary = session
            .api()?
            .create_dictionary(&input)
            .map_err(|e| session.record_with(e, version_context(&target)))?;

        let write_only = if dictionary.write_only { "write-only " } else { "" };
        print::success(
            out,
            &format!(
                "Created {write_only}dictionary {} (id {}, service {}, version {})",
                dictionary.name, dictionary.id, target.service_id, target.service_version
            ),
        )?;
        Ok(())
    }
}

#[derive(Debug, Serialize, Parser)]
pub struct Delete {
    /// Name of the dictionary
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
            .delete_dictionary(&named)
            .map_err(|e| session.record_with(e, version_context(&target)))?;
        print::success(
            out,
            &format!(
                "Deleted dictionary {} (service {} version {})",
                self.name, target.service_id, target.service_version
            ),
        )?;
        Ok(())
    }
}

#[derive(Debug, Serialize, Parser)]
pub struct Describe {
    /// Name of the dictionary
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
    /// In verbose mode the items stored in the dictionary are listed too.
    pub fn run(&self, session: &Session, out: &mut dyn Write) -> EdgeResult<()> {
        let mode = session.output_mode(self.json.json)?;
        let target = version_target(session, &self.service, self.version.version, Access::Read, out)?;
        let api = session.api()?;
        let named = NamedRef::new(&target.service_id, target.service_version, &self.name);
        let dictionary = api
            .get_dictionary(&named)
            .map_err(|e| session.record_with(e, version_context(&target)))?;

        match mode {
            OutputMode::Json => write_json(out, &dictionary),
            OutputMode::Table => write_details(out, "", &dictionary),
            OutputMode::Verbose => {
                write_details(out, "", &dictionary)?;
                let items = api
                    .list_dictionary_items(&DictionaryRef::new(&target.service_id, &dictionary.id))
                    .map_err(|e| session.record_with(e, version_context(&target)))?;
                writeln!(out, "Items: {}", items.len())?;
                for (i, item) in items.iter().enumerate() {
                    writeln!(out, "\tItem {}/{}", i + 1, items.len())?;
                    writeln!(out, "\t\tKey: {}", item.item_key)?;
                    writeln!(out, "\t\tValue: {}", item.item_value)?;
                }
                Ok(())
            }
        }
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
        let dictionaries = session
            .api()?
            .list_dictionaries(&target)
            .map_err(|e| session.record_with(e, version_context(&target)))?;

        match mode {
            OutputMode::Json => write_json(out, &dictionaries),
            OutputMode::Table => {
                let mut table = table::get_table(["SERVICE", "VERSION", "NAME", "ID", "WRITE ONLY"]);
                for dictionary in &dictionaries {
                    table.add_row(vec![
                        dictionary.service_id.clone(),
                        dictionary.service_version.to_string(),
                        dictionary.name.clone(),
                        dictionary.id.clone(),
                        dictionary.write_only.to_string(),
                    ]);
                }
                writeln!(out, "{table}")?;
                Ok(())
            }
            OutputMode::Verbose => {
                writeln!(out, "Version: {}", target.service_version)?;
                for (i, dictionary) in dictionaries.iter().enumerate() {
                    writeln!(out, "\tDictionary {}/{}", i + 1, dictionaries.len())?;
                    write_details(out, "\t\t", dictionary)?;
                }
                writeln!(out)?;
                Ok(())
            }
        }
    }
}

#[derive(Debug, Serialize, Parser)]
pub struct Update {
    /// Old name of the dictionary
    #[arg(long = "name", short = 'n')]
    name: String,
    /// New name of the dictionary
    #[arg(long = "new-name")]
    new_name: Option<String>,
    /// Whether the dictionary should be write-only
    #[arg(long = "write-only")]
    write_only: Option<bool>,
    #[clap(flatten)]
    service: ServiceOpt,
    #[clap(flatten)]
    version: VersionOpt,
    #[clap(flatten)]
    autoclone: AutoCloneOpt,
}

impl Update {
    pub fn run(&self, session: &Session, out: &mut dyn Write) -> EdgeResult<()> {
        let access = Access::Write {
            autoclone: self.autoclone.autoclone,
        };
        let target = version_target(session, &self.service, self.version.version, access, out)?;
        let input = UpdateDictionaryInput {
            target: NamedRef::new(&target.service_id, target.service_version, &self.name),
            fields: DictionaryFields {
                name: self.new_name.clone(),
                write_only: self.write_only,
            },
        };
        let dictionary = session
            .api()?
            .update_dictionary(&input)
            .map_err(|e| session.record_with(e, version_context(&target)))?;
        print::success(
            out,
            &format!(
                "Updated dictionary {} (service {} version {})",
                dictionary.name, target.service_id, target.service_version
            ),
        )?;
        if session.verbose() {
            writeln!(out)?;
            write_details(out, "", &dictionary)?;
        }
        Ok(())
    }
}

fn write_details(out: &mut dyn Write, indent: &str, dictionary: &Dict) -> EdgeResult<()> {
    writeln!(out, "{indent}Service ID: {}", dictionary.service_id)?;
    writeln!(out, "{indent}Version: {}", dictionary.service_version)?;
    writeln!(out, "{indent}ID: {}", dictionary.id)?;
    writeln!(out, "{indent}Name: {}", dictionary.name)?;
    writeln!(out, "{indent}Write Only: {}", dictionary.write_only)?;
    write_timestamps(out, indent, &dictionary.timestamps)
}

#[cfg(test)]
mod tests {
    use edgectl_client::operations::dictionary_item::DictionaryItem;
    use edgectl_client::MockEdgeApi;
    use speculoos::prelude::*;

    use super::*;
    use crate::utils::service_details::tests::version;
    use crate::utils::session::testing::{output, session_with};

    #[derive(Parser)]
    struct Cli {
        #[clap(subcommand)]
        command: Command,
    }

    fn run(mock: MockEdgeApi, verbose: bool, args: &[&str]) -> (EdgeResult<()>, String) {
        let (session, _dir) = session_with(mock, verbose);
        let mut argv = vec!["dictionary"];
        argv.extend_from_slice(args);
        let command = Dictionary {
            command: Cli::parse_from(argv).command,
        };
        let mut out = Vec::new();
        let result = command.run(&session, &mut out);
        (result, output(out))
    }

    fn dict() -> Dict {
        Dict {
            id: "d1".to_string(),
            service_id: "svc".to_string(),
            service_version: 3,
            name: "settings".to_string(),
            write_only: true,
            ..Default::default()
        }
    }

    #[test]
    fn create_only_sends_write_only_when_given() {
        let mut mock = MockEdgeApi::new();
        mock.expect_list_versions().returning(|_| Ok(vec![version(3, false, false)]));
        mock.expect_create_dictionary()
            .withf(|i| i.fields.name.as_deref() == Some("settings") && i.fields.write_only.is_none())
            .times(1)
            .returning(|_| Ok(Dict { write_only: false, ..dict() }));

        let (result, out) = run(mock, false, &["create", "-s", "svc", "--version", "3", "-n", "settings"]);
        result.unwrap();
        assert_that!(out).contains("Created dictionary settings (id d1, service svc, version 3)");
    }

    #[test]
    fn update_can_clear_write_only() {
        let mut mock = MockEdgeApi::new();
        mock.expect_list_versions().returning(|_| Ok(vec![version(3, false, false)]));
        mock.expect_update_dictionary()
            .withf(|i| i.fields.write_only == Some(false) && i.fields.name.is_none())
            .times(1)
            .returning(|_| Ok(dict()));

        let (result, _) = run(
            mock,
            false,
            &["update", "-s", "svc", "--version", "3", "-n", "settings", "--write-only", "false"],
        );
        result.unwrap();
    }

    #[test]
    fn verbose_describe_lists_items() {
        let mut mock = MockEdgeApi::new();
        mock.expect_list_versions().returning(|_| Ok(vec![version(3, true, false)]));
        mock.expect_get_dictionary().returning(|_| Ok(dict()));
        mock.expect_list_dictionary_items()
            .withf(|d| d.dictionary_id == "d1")
            .returning(|_| {
                Ok(vec![DictionaryItem {
                    item_key: "colour".to_string(),
                    item_value: "blue".to_string(),
                    ..Default::default()
                }])
            });

        let (result, out) = run(mock, true, &["describe", "-s", "svc", "--version", "active", "-n", "settings"]);
        result.unwrap();
        assert_that!(out).contains("Write Only: true\nItems: 1\n\tItem 1/1\n\t\tKey: colour\n\t\tValue: blue\n");
    }
}
