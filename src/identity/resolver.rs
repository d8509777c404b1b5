//! Admin / janitor sets and the layered username classifier.

use std::collections::HashSet;

use serde::Serialize;

use crate::config::schema::ServerSettings;
use crate::roster::Roster;

/// Lowercased admin and janitor usernames.
///
/// Invariant: `janitors ⊇ admins`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IdentitySets {
    admins: HashSet<String>,
    janitors: HashSet<String>,
}

impl IdentitySets {
    /// Build the sets from settings and the developer roster.
    pub fn from_settings(settings: &ServerSettings, devteam: &Roster) -> Self {
        let admins: HashSet<String> = settings
            .server_admins
            .iter()
            .map(|a| a.to_lowercase())
            .collect();
        let mut janitors: HashSet<String> = settings
            .server_janitors
            .iter()
            .map(|j| j.to_lowercase())
            .collect();
        janitors.extend(admins.iter().cloned());
        if settings.devs_are_server_janitors {
            janitors.extend(devteam.all_names());
        }
        Self { admins, janitors }
    }

    pub fn admins(&self) -> &HashSet<String> {
        &self.admins
    }

    pub fn janitors(&self) -> &HashSet<String> {
        &self.janitors
    }

    pub fn is_admin(&self, username: &str) -> bool {
        self.admins.contains(&username.to_lowercase())
    }

    pub fn is_janitor(&self, username: &str) -> bool {
        self.janitors.contains(&username.to_lowercase())
    }
}

/// Result kind of [`IdentityResolver::classify`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IdentityKind {
    Admin,
    Devteam,
    /// A player title, spelled as in `title_names`.
    Title(String),
    Normal,
}

impl IdentityKind {
    pub fn as_str(&self) -> &str {
        match self {
            IdentityKind::Admin => "admin",
            IdentityKind::Devteam => "devteam",
            IdentityKind::Title(title) => title,
            IdentityKind::Normal => "normal",
        }
    }
}

/// A classified username.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    pub kind: IdentityKind,
    /// Canonical developer account; set only for [`IdentityKind::Devteam`].
    pub canonical_name: Option<String>,
}

/// Client-facing classification, as sent to the web client.
///
/// `type` is `"admins"` for admins (plural), unlike [`IdentityKind::as_str`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Nerd {
    #[serde(rename = "type")]
    pub kind: String,
    pub devname: Option<String>,
}

impl From<Identity> for Nerd {
    fn from(identity: Identity) -> Self {
        let kind = match identity.kind {
            IdentityKind::Admin => "admins".to_string(),
            IdentityKind::Devteam => "devteam".to_string(),
            IdentityKind::Title(title) => title,
            IdentityKind::Normal => "normal".to_string(),
        };
        Self {
            kind,
            devname: identity.canonical_name,
        }
    }
}

/// Classifies usernames against the admin set and both rosters.
#[derive(Debug, Clone, Default)]
pub struct IdentityResolver {
    sets: IdentitySets,
    devteam: Roster,
    titles: Roster,
    title_names: Vec<String>,
}

impl IdentityResolver {
    pub fn new(sets: IdentitySets, devteam: Roster, titles: Roster, title_names: Vec<String>) -> Self {
        Self {
            sets,
            devteam,
            titles,
            title_names,
        }
    }

    /// A copy of this resolver using a freshly loaded title roster.
    pub fn with_titles(&self, titles: Roster) -> Self {
        Self {
            titles,
            ..self.clone()
        }
    }

    pub fn sets(&self) -> &IdentitySets {
        &self.sets
    }

    pub fn devteam(&self) -> &Roster {
        &self.devteam
    }

    pub fn titles(&self) -> &Roster {
        &self.titles
    }

    pub fn is_server_admin(&self, username: &str) -> bool {
        self.sets.is_admin(username)
    }

    pub fn is_server_janitor(&self, username: &str) -> bool {
        self.sets.is_janitor(username)
    }

    /// The canonical developer account for `username`, which may be an alternate.
    pub fn get_devname(&self, username: &str) -> Option<&str> {
        self.devteam.canonical_for(username)
    }

    /// The most prestigious title held by `username`.
    ///
    /// Titles are mutually exclusive for display; the last matching title
    /// in `title_names` order wins.
    pub fn player_title(&self, username: &str) -> Option<&str> {
        self.title_names
            .iter()
            .rev()
            .find(|title| self.titles.has_member(title, username))
            .map(String::as_str)
    }

    /// Classify `username`: admin, then devteam, then title, else normal.
    pub fn classify(&self, username: &str) -> Identity {
        if self.is_server_admin(username) {
            return Identity {
                kind: IdentityKind::Admin,
                canonical_name: None,
            };
        }
        if let Some(devname) = self.get_devname(username) {
            return Identity {
                kind: IdentityKind::Devteam,
                canonical_name: Some(devname.to_string()),
            };
        }
        let kind = match self.player_title(username) {
            Some(title) => IdentityKind::Title(title.to_string()),
            None => IdentityKind::Normal,
        };
        Identity {
            kind,
            canonical_name: None,
        }
    }

    /// Client-facing form of [`classify`](Self::classify).
    pub fn get_nerd(&self, username: &str) -> Nerd {
        self.classify(username).into()
    }
}
