use std::io::Write;

use clap::Parser;
use edgectl_client::operations::config_store_item::{
    ConfigStoreItem, CreateConfigStoreItemInput, UpdateConfigStoreItemInput,
};
use edgectl_std::print;
use serde::Serialize;

use crate::command::output::{write_json, write_timestamps, OutputMode};
use crate::options::JsonOpt;
use crate::utils::err_log::ErrContext;
use crate::utils::session::Session;
use crate::utils::table;
use crate::EdgeResult;

#[derive(Debug, Serialize, Parser)]
pub struct ConfigStoreEntry {
    #[clap(subcommand)]
    command: Command,
}

#[derive(Debug, Serialize, Parser)]
pub enum Command {
    /// Create a new config store item
    Create(Create),
    /// Delete a config store item
    Delete(Delete),
    /// Retrieve a single config store item
    Describe(Describe),
    /// List config store items
    List(List),
    /// Update a config store item
    Update(Update),
}

impl ConfigStoreEntry {
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

#[derive(Debug, Clone, Serialize, Parser)]
pub struct StoreOpt {
    /// Config store ID
    #[arg(long = "store-id")]
    store_id: String,
}

impl StoreOpt {
    fn context(&self, key: Option<&str>) -> ErrContext {
        let mut context = ErrContext::new();
        context.insert("Store ID".to_string(), self.store_id.clone());
        if let Some(key) = key {
            context.insert("Item Key".to_string(), key.to_string());
        }
        context
    }
}

#[derive(Debug, Serialize, Parser)]
pub struct Create {
    #[clap(flatten)]
    store: StoreOpt,
    /// Item name
    #[arg(long = "key", short = 'k')]
    key: String,
    /// Item value
    #[arg(long = "value")]
    value: String,
    #[clap(flatten)]
    json: JsonOpt,
}

impl Create {
    pub fn run(&self, session: &Session, out: &mut dyn Write) -> EdgeResult<()> {
        let input = CreateConfigStoreItemInput {
            store_id: self.store.store_id.clone(),
            key: self.key.clone(),
            value: self.value.clone(),
        };
        let item = session
            .api()?
            .create_config_store_item(&input)
            .map_err(|e| session.record_with(e, self.store.context(Some(&self.key))))?;
        if self.json.json {
            return write_json(out, &item);
        }
        print::success(
            out,
            &format!("Created config store item {} in store {}", item.key, self.store.store_id),
        )?;
        Ok(())
    }
}

#[derive(Debug, Serialize, Parser)]
pub struct Delete {
    #[clap(flatten)]
    store: StoreOpt,
    /// Item name
    #[arg(long = "key", short = 'k')]
    key: String,
}

impl Delete {
    pub fn run(&self, session: &Session, out: &mut dyn Write) -> EdgeResult<()> {
        session
            .api()?
            .delete_config_store_item(&self.store.store_id, &self.key)
            .map_err(|e| session.record_with(e, self.store.context(Some(&self.key))))?;
        print::success(
            out,
            &format!("Deleted config store item {} from store {}", self.key, self.store.store_id),
        )?;
        Ok(())
    }
}

#[derive(Debug, Serialize, Parser)]
pub struct Describe {
    #[clap(flatten)]
    store: StoreOpt,
    /// Item name
    #[arg(long = "key", short = 'k')]
    key: String,
    #[clap(flatten)]
    json: JsonOpt,
}

impl Describe {
    pub fn run(&self, session: &Session, out: &mut dyn Write) -> EdgeResult<()> {
        let mode = session.output_mode(self.json.json)?;
        let item = session
            .api()?
            .get_config_store_item(&self.store.store_id, &self.key)
            .map_err(|e| session.record_with(e, self.store.context(Some(&self.key))))?;
        if mode == OutputMode::Json {
            return write_json(out, &item);
        }
        write_item(out, "", &item)
    }
}

#[derive(Debug, Serialize, Parser)]
pub struct List {
    #[clap(flatten)]
    store: StoreOpt,
    #[clap(flatten)]
    json: JsonOpt,
}

impl List {
    pub fn run(&self, session: &Session, out: &mut dyn Write) -> EdgeResult<()> {
        let mode = session.output_mode(self.json.json)?;
        let items = session
            .api()?
            .list_config_store_items(&self.store.store_id)
            .map_err(|e| session.record_with(e, self.store.context(None)))?;

        match mode {
            OutputMode::Json => write_json(out, &items),
            OutputMode::Table => {
                let mut table = table::get_table(["STORE ID", "KEY", "VALUE"]);
                for item in &items {
                    table.add_row(vec![item.store_id.clone(), item.key.clone(), item.value.clone()]);
                }
                writeln!(out, "{table}")?;
                Ok(())
            }
            OutputMode::Verbose => {
                for (i, item) in items.iter().enumerate() {
                    writeln!(out, "Item {}/{}", i + 1, items.len())?;
                    write_item(out, "\t", item)?;
                }
                Ok(())
            }
        }
    }
}

#[derive(Debug, Serialize, Parser)]
pub struct Update {
    #[clap(flatten)]
    store: StoreOpt,
    /// Item name
    #[arg(long = "key", short = 'k')]
    key: String,
    /// Item value
    #[arg(long = "value")]
    value: String,
    /// Create the item if it does not exist
    #[arg(long = "upsert")]
    upsert: bool,
    #[clap(flatten)]
    json: JsonOpt,
}

impl Update {
    pub fn run(&self, session: &Session, out: &mut dyn Write) -> EdgeResult<()> {
        let input = UpdateConfigStoreItemInput {
            store_id: self.store.store_id.clone(),
            key: self.key.clone(),
            upsert: self.upsert,
            value: self.value.clone(),
        };
        let item = session
            .api()?
            .update_config_store_item(&input)
            .map_err(|e| session.record_with(e, self.store.context(Some(&self.key))))?;
        if self.json.json {
            return write_json(out, &item);
        }
        let verb = if self.upsert { "Upserted" } else { "Updated" };
        print::success(
            out,
            &format!("{verb} config store item {} in store {}", item.key, self.store.store_id),
        )?;
        Ok(())
    }
}

fn write_item(out: &mut dyn Write, indent: &str, item: &ConfigStoreItem) -> EdgeResult<()> {
    writeln!(out, "{indent}Store ID: {}", item.store_id)?;
    writeln!(out, "{indent}Key: {}", item.key)?;
    writeln!(out, "{indent}Value: {}", item.value)?;
    write_timestamps(out, indent, &item.timestamps)
}

#[cfg(test)]
mod tests {
    use edgectl_client::{EdgeClientError, MockEdgeApi};
    use speculoos::prelude::*;

    use super::*;
    use crate::utils::session::testing::{output, session_with};

    #[derive(Parser)]
    struct Cli {
        #[clap(subcommand)]
        command: Command,
    }

    fn command(args: &[&str]) -> ConfigStoreEntry {
        let mut argv = vec!["config-store-entry"];
        argv.extend_from_slice(args);
        ConfigStoreEntry {
            command: Cli::parse_from(argv).command,
        }
    }

    #[test]
    fn update_passes_upsert_through() {
        let mut mock = MockEdgeApi::new();
        mock.expect_update_config_store_item()
            .withf(|i| i.store_id == "st" && i.key == "k" && i.upsert && i.value == "v")
            .times(1)
            .returning(|i| {
                Ok(ConfigStoreItem {
                    store_id: i.store_id.clone(),
                    key: i.key.clone(),
                    value: i.value.clone(),
                    ..Default::default()
                })
            });
        let (session, _dir) = session_with(mock, false);
        let mut out = Vec::new();
        command(&["update", "--store-id", "st", "-k", "k", "--value", "v", "--upsert"])
            .run(&session, &mut out)
            .unwrap();
        assert_that!(output(out)).contains("Upserted config store item k in store st");
    }

    #[test]
    fn a_failed_delete_is_logged_with_the_store() {
        let mut mock = MockEdgeApi::new();
        mock.expect_delete_config_store_item().returning(|_, _| {
            Err(EdgeClientError::NotFound {
                detail: "no such item".to_string(),
            })
        });
        let (session, _dir) = session_with(mock, false);
        command(&["delete", "--store-id", "st", "-k", "gone"])
            .run(&session, &mut Vec::new())
            .unwrap_err();
        let records = session.err_log().records();
        assert_that!(records[0].context.get("Store ID")).is_equal_to(Some(&"st".to_string()));
        assert_that!(records[0].context.get("Item Key")).is_equal_to(Some(&"gone".to_string()));
    }
}
