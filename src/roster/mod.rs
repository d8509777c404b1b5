//! Roster files: developer accounts and player titles.
//!
//! # Format
//! ```text
//! Canonical alt1 alt2
//! OtherDev
//! ```
//! One record per line, fields separated by a single space, no quoting or
//! escaping. The first field is the canonical key, the rest are alternates.
//!
//! # Design Decisions
//! - Alternates are lowercased at parse time; matching is always case-insensitive
//! - The developer roster keeps the key's original case for display
//! - The title roster lowercases keys too
//! - Rows keep file order; a repeated key replaces the earlier row in place

use std::collections::BTreeSet;
use std::path::Path;

use crate::config::error::{ConfigError, ConfigResult};
use crate::config::loader::DocumentSource;

/// How a roster stores its canonical keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyCase {
    /// Keep the key as written (developer roster).
    Preserve,
    /// Lowercase the key (title roster).
    Lower,
}

/// One roster row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RosterEntry {
    /// Canonical key.
    pub key: String,
    /// Lowercased alternate names.
    pub alternates: BTreeSet<String>,
}

impl RosterEntry {
    /// Returns true if `lname` (already lowercased) is the key or an alternate.
    fn matches(&self, lname: &str) -> bool {
        self.key.to_lowercase() == lname || self.alternates.contains(lname)
    }
}

/// Mapping from canonical key to a set of alternate names.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Roster {
    entries: Vec<RosterEntry>,
}

impl Roster {
    /// Parse roster text.
    pub fn parse(text: &str, key_case: KeyCase) -> Result<Self, csv::Error> {
        let mut reader = csv::ReaderBuilder::new()
            .delimiter(b' ')
            .quoting(false)
            .has_headers(false)
            .flexible(true)
            .from_reader(text.as_bytes());

        let mut roster = Roster::default();
        for record in reader.records() {
            let record = record?;
            let mut fields = record.iter();
            let key = match fields.next() {
                Some(key) if !key.is_empty() => key,
                _ => {
                    tracing::debug!(line = ?record.position().map(|p| p.line()), "Skipping malformed roster row");
                    continue;
                }
            };
            let key = match key_case {
                KeyCase::Preserve => key.to_string(),
                KeyCase::Lower => key.to_lowercase(),
            };
            let alternates = fields
                .filter(|name| !name.is_empty())
                .map(str::to_lowercase)
                .collect();
            roster.insert(key, alternates);
        }
        Ok(roster)
    }

    /// Add a row, replacing any existing row with the same key (case-insensitive).
    pub fn insert(&mut self, key: String, alternates: BTreeSet<String>) {
        let lkey = key.to_lowercase();
        match self.entries.iter_mut().find(|e| e.key.to_lowercase() == lkey) {
            Some(entry) => {
                entry.key = key;
                entry.alternates = alternates;
            }
            None => self.entries.push(RosterEntry { key, alternates }),
        }
    }

    /// Rows in file order.
    pub fn entries(&self) -> &[RosterEntry] {
        &self.entries
    }

    /// Look up a row by key, case-insensitively.
    pub fn get(&self, key: &str) -> Option<&RosterEntry> {
        let lkey = key.to_lowercase();
        self.entries.iter().find(|e| e.key.to_lowercase() == lkey)
    }

    /// The canonical key of the first row listing `name` as key or alternate.
    pub fn canonical_for(&self, name: &str) -> Option<&str> {
        let lname = name.to_lowercase();
        self.entries
            .iter()
            .find(|e| e.matches(&lname))
            .map(|e| e.key.as_str())
    }

    /// Returns true if the row `key` lists `name` among its alternates.
    pub fn has_member(&self, key: &str, name: &str) -> bool {
        self.get(key)
            .is_some_and(|e| e.alternates.contains(&name.to_lowercase()))
    }

    /// Every name in the roster, keys and alternates, lowercased.
    pub fn all_names(&self) -> impl Iterator<Item = String> + '_ {
        self.entries.iter().flat_map(|e| {
            std::iter::once(e.key.to_lowercase()).chain(e.alternates.iter().cloned())
        })
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Loads roster files through a [`DocumentSource`].
#[derive(Debug, Clone, Copy)]
pub struct RosterLoader {
    key_case: KeyCase,
}

impl RosterLoader {
    /// Loader for the developer roster.
    pub fn devteam() -> Self {
        Self {
            key_case: KeyCase::Preserve,
        }
    }

    /// Loader for the player title roster.
    pub fn titles() -> Self {
        Self {
            key_case: KeyCase::Lower,
        }
    }

    /// Load the roster at `path`. No path means no roster.
    ///
    /// A configured path that cannot be read is an error.
    pub fn load(&self, source: &dyn DocumentSource, path: Option<&Path>) -> ConfigResult<Roster> {
        let Some(path) = path else {
            return Ok(Roster::default());
        };
        let text = source.read_text(path)?;
        let roster = Roster::parse(&text, self.key_case).map_err(|source| ConfigError::Roster {
            path: path.to_path_buf(),
            source,
        })?;
        tracing::debug!(path = %path.display(), rows = roster.len(), "Loaded roster");
        Ok(roster)
    }
}
