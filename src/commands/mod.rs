//! Operator ("janitor") command table.
//!
//! # Responsibilities
//! - Validate each `[[janitor_commands]]` entry (`id`, `name`, `action`, `argument`)
//! - Extract the named parameters of each argument template
//! - Index commands by id
//!
//! # Design Decisions
//! - A malformed entry fails the whole load
//! - Repeated ids are allowed; the last definition wins

pub mod template;

use std::collections::{BTreeMap, BTreeSet};

use serde::Serialize;

use crate::config::error::{ConfigError, ConfigResult};

const REQUIRED_FIELDS: [&str; 4] = ["id", "name", "action", "argument"];

/// A validated janitor command.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct JanitorCommand {
    pub id: String,
    pub name: String,
    pub action: String,
    /// Argument template, e.g. `"ban {target} for {reason}"`.
    pub argument: String,
    /// Distinct placeholder names found in `argument`.
    pub params: BTreeSet<String>,
    /// Any other fields of the entry, passed through.
    #[serde(flatten)]
    pub extra: toml::Table,
}

impl JanitorCommand {
    /// Validate one command entry.
    pub fn from_table(index: usize, mut table: toml::Table) -> ConfigResult<Self> {
        for field in REQUIRED_FIELDS {
            match table.get(field) {
                None => return Err(ConfigError::MissingCommandField { field }),
                Some(value) if !value.is_str() => {
                    return Err(ConfigError::InvalidCommand {
                        index,
                        reason: format!("{field} must be a string"),
                    })
                }
                Some(_) => {}
            }
        }

        let mut take = |field: &str| match table.remove(field) {
            Some(toml::Value::String(s)) => s,
            _ => String::new(),
        };
        let id = take("id");
        let name = take("name");
        let action = take("action");
        let argument = take("argument");

        let params = template::extract_params(&argument).map_err(|source| ConfigError::Template {
            command: id.clone(),
            source,
        })?;

        Ok(Self {
            id,
            name,
            action,
            argument,
            params,
            extra: table,
        })
    }
}

/// Commands indexed by id.
pub type CommandTable = BTreeMap<String, JanitorCommand>;

/// Builds a [`CommandTable`] from the `janitor_commands` value.
pub struct CommandTableBuilder;

impl CommandTableBuilder {
    /// Validate and index command definitions. No definitions yields an empty table.
    pub fn build(definitions: Option<&toml::Value>) -> ConfigResult<CommandTable> {
        let mut table = CommandTable::new();
        let Some(definitions) = definitions else {
            return Ok(table);
        };
        let entries = definitions.as_array().ok_or_else(|| ConfigError::InvalidCommand {
            index: 0,
            reason: "janitor_commands must be a list".to_string(),
        })?;

        for (index, entry) in entries.iter().enumerate() {
            let entry = entry.as_table().ok_or_else(|| ConfigError::InvalidCommand {
                index,
                reason: "expected a table".to_string(),
            })?;
            let command = JanitorCommand::from_table(index, entry.clone())?;
            tracing::debug!(id = %command.id, params = ?command.params, "Loaded janitor command");
            table.insert(command.id.clone(), command);
        }
        Ok(table)
    }
}
