use std::fs;
use std::io::Write;

use anyhow::Context;
use camino::Utf8PathBuf;
use clap::Parser;
use edgectl_client::operations::dictionary_item::{
    BatchModifyDictionaryItemsInput, CreateDictionaryItemInput, DictionaryItem, DictionaryRef,
    UpdateDictionaryItemInput,
};
use edgectl_std::print;
use serde::Serialize;

use crate::command::output::{write_json, write_timestamps, OutputMode};
use crate::options::{JsonOpt, ServiceOpt};
use crate::utils::err_log::service_context;
use crate::utils::service_details::{display_service_id, service_id};
use crate::utils::session::Session;
use crate::utils::table;
use crate::{EdgeCliError, EdgeResult};

#[derive(Debug, Serialize, Parser)]
pub struct DictionaryEntry {
    #[clap(subcommand)]
    command: Command,
}

#[derive(Debug, Serialize, Parser)]
pub enum Command {
    /// Add a new item to a dictionary
    Create(Create),
    /// Delete an item from a dictionary
    Delete(Delete),
    /// Show detailed information about a dictionary item
    Describe(Describe),
    /// List the items in a dictionary
    List(List),
    /// Update or insert an item, or apply a batch of changes from a file
    Update(Update),
}

impl DictionaryEntry {
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
pub struct DictionaryOpt {
    /// Dictionary ID
    #[arg(long = "dictionary-id")]
    dictionary_id: String,
    #[clap(flatten)]
    service: ServiceOpt,
}

impl DictionaryOpt {
    /// Resolves the owning service and names the dictionary within it.
    fn resolve(&self, session: &Session, out: &mut dyn Write) -> EdgeResult<DictionaryRef> {
        let (service_id, source) = service_id(session, &self.service)?;
        if session.verbose() {
            display_service_id(out, &service_id, source)?;
        }
        Ok(DictionaryRef::new(service_id, &self.dictionary_id))
    }
}

fn record(session: &Session, dictionary: &DictionaryRef, error: impl Into<crate::EdgeError>) -> crate::EdgeError {
    let mut context = service_context(Some(&dictionary.service_id), None);
    context.insert("Dictionary ID".to_string(), dictionary.dictionary_id.clone());
    session.record_with(error, context)
}

#[derive(Debug, Serialize, Parser)]
pub struct Create {
    #[clap(flatten)]
    dictionary: DictionaryOpt,
    /// Dictionary item key
    #[arg(long = "key")]
    key: String,
    /// Dictionary item value
    #[arg(long = "value")]
    value: String,
}

impl Create {
    pub fn run(&self, session: &Session, out: &mut dyn Write) -> EdgeResult<()> {
        let dictionary = self.dictionary.resolve(session, out)?;
        let input = CreateDictionaryItemInput {
            dictionary: dictionary.clone(),
            item_key: self.key.clone(),
            item_value: self.value.clone(),
        };
        let item = session
            .api()?
            .create_dictionary_item(&input)
            .map_err(|e| record(session, &dictionary, e))?;
        print::success(
            out,
            &format!(
                "Created dictionary item {} (service {}, dictionary {})",
                item.item_key, dictionary.service_id, dictionary.dictionary_id
            ),
        )?;
        Ok(())
    }
}

#[derive(Debug, Serialize, Parser)]
pub struct Delete {
    #[clap(flatten)]
    dictionary: DictionaryOpt,
    /// Dictionary item key
    #[arg(long = "key")]
    key: String,
}

impl Delete {
    pub fn run(&self, session: &Session, out: &mut dyn Write) -> EdgeResult<()> {
        let dictionary = self.dictionary.resolve(session, out)?;
        session
            .api()?
            .delete_dictionary_item(&dictionary, &self.key)
            .map_err(|e| record(session, &dictionary, e))?;
        print::success(
            out,
            &format!(
                "Deleted dictionary item {} (service {}, dictionary {})",
                self.key, dictionary.service_id, dictionary.dictionary_id
            ),
        )?;
        Ok(())
    }
}

#[derive(Debug, Serialize, Parser)]
pub struct Describe {
    #[clap(flatten)]
    dictionary: DictionaryOpt,
    /// Dictionary item key
    #[arg(long = "key")]
    key: String,
    #[clap(flatten)]
    json: JsonOpt,
}

impl Describe {
    pub fn run(&self, session: &Session, out: &mut dyn Write) -> EdgeResult<()> {
        let mode = session.output_mode(self.json.json)?;
        let dictionary = self.dictionary.resolve(session, out)?;
        let item = session
            .api()?
            .get_dictionary_item(&dictionary, &self.key)
            .map_err(|e| record(session, &dictionary, e))?;
        if mode == OutputMode::Json {
            return write_json(out, &item);
        }
        write_item(out, "", &item)
    }
}

#[derive(Debug, Serialize, Parser)]
pub struct List {
    #[clap(flatten)]
    dictionary: DictionaryOpt,
    #[clap(flatten)]
    json: JsonOpt,
}

impl List {
    pub fn run(&self, session: &Session, out: &mut dyn Write) -> EdgeResult<()> {
        let mode = session.output_mode(self.json.json)?;
        let dictionary = self.dictionary.resolve(session, out)?;
        let items = session
            .api()?
            .list_dictionary_items(&dictionary)
            .map_err(|e| record(session, &dictionary, e))?;

        match mode {
            OutputMode::Json => write_json(out, &items),
            OutputMode::Table => {
                let mut table = table::get_table(["KEY", "VALUE"]);
                for item in &items {
                    table.add_row(vec![item.item_key.clone(), item.item_value.clone()]);
                }
                writeln!(out, "{table}")?;
                Ok(())
            }
            OutputMode::Verbose => {
                writeln!(out, "Dictionary ID: {}", dictionary.dictionary_id)?;
                for (i, item) in items.iter().enumerate() {
                    writeln!(out, "\tItem {}/{}", i + 1, items.len())?;
                    write_item(out, "\t\t", item)?;
                }
                writeln!(out)?;
                Ok(())
            }
        }
    }
}

#[derive(Debug, Serialize, Parser)]
pub struct Update {
    #[clap(flatten)]
    dictionary: DictionaryOpt,
    /// Dictionary item key
    #[arg(long = "key")]
    key: Option<String>,
    /// Dictionary item value
    #[arg(long = "value")]
    value: Option<String>,
    /// Batch update JSON file
    #[arg(long = "file")]
    file: Option<Utf8PathBuf>,
}

impl Update {
    pub fn run(&self, session: &Session, out: &mut dyn Write) -> EdgeResult<()> {
        let dictionary = self.dictionary.resolve(session, out)?;
        if let Some(file) = &self.file {
            return self
                .batch_modify(session, dictionary.clone(), file, out)
                .map_err(|e| record(session, &dictionary, e));
        }

        let (key, value) = match (self.key.as_deref(), self.value.as_deref()) {
            (Some(key), Some(value)) if !key.is_empty() && !value.is_empty() => (key, value),
            _ => return Err(EdgeCliError::EmptyDictionaryItem.into()),
        };
        let input = UpdateDictionaryItemInput {
            dictionary: dictionary.clone(),
            item_key: key.to_string(),
            item_value: value.to_string(),
        };
        let item = session
            .api()?
            .update_dictionary_item(&input)
            .map_err(|e| record(session, &dictionary, e))?;
        print::success(out, &format!("Updated dictionary item (service {})", dictionary.service_id))?;
        writeln!(out)?;
        write_item(out, "", &item)
    }

    fn batch_modify(
        &self,
        session: &Session,
        dictionary: DictionaryRef,
        file: &Utf8PathBuf,
        out: &mut dyn Write,
    ) -> EdgeResult<()> {
        let contents = fs::read_to_string(file).with_context(|| format!("could not read '{file}'"))?;
        let mut input: BatchModifyDictionaryItemsInput =
            serde_json::from_str(&contents).map_err(|e| EdgeCliError::InvalidBatchFile {
                path: file.to_string(),
                reason: e.to_string(),
            })?;
        if input.items.is_empty() {
            return Err(EdgeCliError::EmptyBatchFile { path: file.to_string() }.into());
        }
        input.dictionary = dictionary;

        session.api()?.batch_modify_dictionary_items(&input)?;
        print::success(
            out,
            &format!(
                "Made {} modifications of Dictionary {} on service {}",
                input.items.len(),
                input.dictionary.dictionary_id,
                input.dictionary.service_id
            ),
        )?;
        Ok(())
    }
}

fn write_item(out: &mut dyn Write, indent: &str, item: &DictionaryItem) -> EdgeResult<()> {
    writeln!(out, "{indent}Dictionary ID: {}", item.dictionary_id)?;
    writeln!(out, "{indent}Item Key: {}", item.item_key)?;
    writeln!(out, "{indent}Item Value: {}", item.item_value)?;
    write_timestamps(out, indent, &item.timestamps)
}
