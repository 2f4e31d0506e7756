//! Path → remote identifier cache.
//!
//! Keys are absolute path strings, lowercased when the session is case
//! insensitive. Values are `Option<String>`: `None` records a lookup that
//! found nothing, so the miss is not repeated. Entries never expire; callers
//! invalidate them after mutations.

use dashmap::DashMap;
use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::fs::VirtualPath;

/// How names are compared.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CaseSensitivity {
    #[default]
    Sensitive,
    Insensitive,
}

impl CaseSensitivity {
    /// Compare two names under this policy.
    pub fn matches(&self, a: &str, b: &str) -> bool {
        match self {
            CaseSensitivity::Sensitive => a == b,
            CaseSensitivity::Insensitive => a.to_lowercase() == b.to_lowercase(),
        }
    }

    /// Canonical form used for keys and name sets.
    pub fn fold(&self, value: &str) -> String {
        match self {
            CaseSensitivity::Sensitive => value.to_string(),
            CaseSensitivity::Insensitive => value.to_lowercase(),
        }
    }
}

/// Concurrent identifier cache shared by all features of a session.
#[derive(Debug, Default)]
pub struct IdCache {
    entries: DashMap<String, Option<String>>,
    case_sensitivity: CaseSensitivity,
}

impl IdCache {
    pub fn new(case_sensitivity: CaseSensitivity) -> Self {
        Self {
            entries: DashMap::new(),
            case_sensitivity,
        }
    }

    pub fn case_sensitivity(&self) -> CaseSensitivity {
        self.case_sensitivity
    }

    fn key(&self, path: &VirtualPath) -> String {
        self.case_sensitivity.fold(&path.absolute())
    }

    /// Cached entry. The outer `None` means "never looked up".
    pub fn get(&self, path: &VirtualPath) -> Option<Option<String>> {
        self.entries.get(&self.key(path)).map(|entry| entry.clone())
    }

    /// Record the identifier of `path`, or `None` for a confirmed absence.
    pub fn cache(&self, path: &VirtualPath, file_id: Option<String>) {
        trace!(path = %path, file_id = ?file_id, "cache");
        self.entries.insert(self.key(path), file_id);
    }

    /// Forget `path` so the next lookup asks the API again.
    pub fn invalidate(&self, path: &VirtualPath) {
        self.entries.remove(&self.key(path));
    }

    /// Forget `path` and everything below it.
    pub fn invalidate_tree(&self, path: &VirtualPath) {
        let key = self.key(path);
        if path.is_root() {
            self.entries.clear();
            return;
        }
        let prefix = format!("{}/", key);
        self.entries
            .retain(|candidate, _| candidate != &key && !candidate.starts_with(&prefix));
    }

    /// Forget the negative entries below `path`, keeping known identifiers.
    pub fn forget_absent_below(&self, path: &VirtualPath) {
        let prefix = format!("{}/", self.key(path).trim_end_matches('/'));
        self.entries
            .retain(|candidate, file_id| file_id.is_some() || !candidate.starts_with(&prefix));
    }

    pub fn clear(&self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
