use std::collections::BTreeMap;

use anyhow::Context;
use edgectl_client::operations::dictionary::{CreateDictionaryInput, DictionaryFields};
use edgectl_client::operations::dictionary_item::{CreateDictionaryItemInput, DictionaryRef};
use edgectl_client::shared::VersionRef;
use edgectl_client::EdgeApi;
use edgectl_std::{Progress, Prompter, Style};

use crate::command::compute::step;
use crate::manifest::SetupDictionary;
use crate::{EdgeCliError, EdgeResult};

/// The value used for an item that the manifest gives no value for and
/// the user does not provide one for either.
const SETUP_FALLBACK_VALUE: &str = "example";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Unconfigured,
    Configured,
    Created,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct RequiredDictionary {
    name: String,
    items: Vec<RequiredItem>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct RequiredItem {
    key: String,
    value: String,
}

/// Provisions the `[setup.dictionaries]` declared in the manifest.
///
/// [`Dictionaries::configure`] resolves every item value, prompting when
/// interactive, and never talks to the API. [`Dictionaries::create`] then
/// creates the dictionaries and their items and never prompts.
///
/// Dictionaries are processed in name order and items in key order. The
/// first failure stops the whole run and nothing already created is rolled
/// back.
pub struct Dictionaries<'a> {
    api: &'a dyn EdgeApi,
    version: VersionRef,
    setup: &'a BTreeMap<String, SetupDictionary>,
    accept_defaults: bool,
    non_interactive: bool,
    state: State,
    required: Vec<RequiredDictionary>,
}

impl<'a> Dictionaries<'a> {
    pub fn new(
        api: &'a dyn EdgeApi,
        version: VersionRef,
        setup: &'a BTreeMap<String, SetupDictionary>,
        accept_defaults: bool,
        non_interactive: bool,
    ) -> Self {
        Dictionaries {
            api,
            version,
            setup,
            accept_defaults,
            non_interactive,
            state: State::Unconfigured,
            required: Vec::new(),
        }
    }

    /// Whether the manifest declares any dictionaries at all.
    pub fn predefined(&self) -> bool {
        !self.setup.is_empty()
    }

    const fn interactive(&self) -> bool {
        !self.accept_defaults && !self.non_interactive
    }

    pub fn configure(&mut self, prompter: &mut dyn Prompter) -> EdgeResult<()> {
        let mut required = Vec::with_capacity(self.setup.len());

        for (name, settings) in self.setup {
            if self.interactive() {
                prompter.blank()?;
                prompter.note(&format!("Configuring dictionary '{name}'"))?;
                if let Some(description) = settings.description.as_deref().filter(|d| !d.is_empty()) {
                    prompter.note(description)?;
                }
            }

            let mut items = Vec::with_capacity(settings.items.len());
            for (key, item) in &settings.items {
                let default = item
                    .value
                    .as_deref()
                    .filter(|v| !v.is_empty())
                    .unwrap_or(SETUP_FALLBACK_VALUE);

                let mut value = String::new();
                if self.interactive() {
                    prompter.blank()?;
                    prompter.note(&format!("Create a dictionary key called '{key}'"))?;
                    if let Some(description) = item.description.as_deref().filter(|d| !d.is_empty()) {
                        prompter.note(description)?;
                    }
                    prompter.blank()?;
                    value = prompter
                        .input(&Style::Prompt.paint(format!("Value: [{default}] ")))
                        .context("error reading prompt input")?;
                }
                if value.is_empty() {
                    value = default.to_string();
                }

                items.push(RequiredItem {
                    key: key.clone(),
                    value,
                });
            }

            required.push(RequiredDictionary {
                name: name.clone(),
                items,
            });
        }

        self.required = required;
        self.state = State::Configured;
        Ok(())
    }

    /// Creates everything [`Dictionaries::configure`] resolved, reporting
    /// each remote call through `progress`.
    pub fn create(&mut self, progress: Option<&mut dyn Progress>) -> EdgeResult<()> {
        let Some(progress) = progress else {
            return Err(EdgeCliError::Internal {
                detail: "no progress indicator configured for setup dictionaries".to_string(),
            }
            .into());
        };
        if self.state != State::Configured {
            return Err(EdgeCliError::Internal {
                detail: "setup dictionaries must be configured before they are created".to_string(),
            }
            .into());
        }

        for dictionary in &self.required {
            let message = format!("Creating dictionary '{}'", dictionary.name);
            let input = CreateDictionaryInput {
                version: self.version.clone(),
                fields: DictionaryFields {
                    name: Some(dictionary.name.clone()),
                    write_only: None,
                },
            };
            let created = step(progress, &message, || {
                self.api
                    .create_dictionary(&input)
                    .context("error creating dictionary")
            })?;

            let dictionary_ref = DictionaryRef::new(&self.version.service_id, &created.id);
            for item in &dictionary.items {
                let message = format!("Creating dictionary item '{}'", item.key);
                let input = CreateDictionaryItemInput {
                    dictionary: dictionary_ref.clone(),
                    item_key: item.key.clone(),
                    item_value: item.value.clone(),
                };
                step(progress, &message, || {
                    self.api
                        .create_dictionary_item(&input)
                        .context("error creating dictionary item")
                })?;
            }
        }

        self.state = State::Created;
        Ok(())
    }
}
