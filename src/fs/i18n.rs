//! Localized names of the third-level containers.

use std::collections::HashMap;
use std::fmt;
use std::sync::LazyLock;

use serde::{Deserialize, Serialize};

/// Languages the backend names Inbox/Documents/Trash in.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Locale {
    #[serde(rename = "de-CH")]
    DeCh,
    #[default]
    #[serde(rename = "en-UK")]
    EnUk,
    #[serde(rename = "fr-CH")]
    FrCh,
    #[serde(rename = "it-CH")]
    ItCh,
}

impl Locale {
    pub const ALL: [Locale; 4] = [Locale::DeCh, Locale::EnUk, Locale::FrCh, Locale::ItCh];

    pub fn tag(&self) -> &'static str {
        match self {
            Locale::DeCh => "de-CH",
            Locale::EnUk => "en-UK",
            Locale::FrCh => "fr-CH",
            Locale::ItCh => "it-CH",
        }
    }

    pub fn from_tag(tag: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|l| l.tag() == tag)
    }

    /// Name of `kind` in this locale.
    pub fn name_of(&self, kind: ContainerKind) -> &'static str {
        let (_, names) = NAMES
            .iter()
            .find(|(locale, _)| locale == self)
            .unwrap_or(&NAMES[1]);
        names[kind.index()]
    }
}

/// The three fixed containers found in every box.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContainerKind {
    Inbox,
    Documents,
    Trash,
}

impl ContainerKind {
    pub const ALL: [ContainerKind; 3] = [
        ContainerKind::Inbox,
        ContainerKind::Documents,
        ContainerKind::Trash,
    ];

    fn index(&self) -> usize {
        match self {
            ContainerKind::Inbox => 0,
            ContainerKind::Documents => 1,
            ContainerKind::Trash => 2,
        }
    }

    /// Kind whose name in any locale equals `name` exactly.
    pub fn from_name(name: &str) -> Option<Self> {
        REVERSE.get(name).copied()
    }

    /// Every localized name of this kind.
    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        NAMES.iter().map(move |(_, names)| names[self.index()])
    }
}

impl fmt::Display for ContainerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ContainerKind::Inbox => "Inbox",
            ContainerKind::Documents => "Documents",
            ContainerKind::Trash => "Trash",
        };
        f.write_str(name)
    }
}

// Columns follow ContainerKind::index.
const NAMES: [(Locale, [&str; 3]); 4] = [
    (Locale::DeCh, ["Inbox", "Dokumente", "Papierkorb"]),
    (Locale::EnUk, ["Inbox", "Documents", "Trash"]),
    (Locale::FrCh, ["Inbox", "Documents", "Corbeille"]),
    (Locale::ItCh, ["Inbox", "Documenti", "Cestino"]),
];

static REVERSE: LazyLock<HashMap<&'static str, ContainerKind>> = LazyLock::new(|| {
    let mut map = HashMap::new();
    for kind in ContainerKind::ALL {
        for name in kind.names() {
            map.insert(name, kind);
        }
    }
    map
});
