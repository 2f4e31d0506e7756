//! Attribute records attached to listed or looked-up paths.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

/// Sentinel for unknown sizes and timestamps.
pub const UNKNOWN: i64 = -1;

/// Principal an ACL grant applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Principal {
    /// The authenticated user of the session.
    CanonicalUser,
}

/// Capabilities mirrored from the node and box policies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Role {
    CanDelete,
    CanAddChildren,
    CanListChildren,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::CanDelete => "canDelete",
            Role::CanAddChildren => "canAddChildren",
            Role::CanListChildren => "canListChildren",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Grants of roles to principals.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Acl {
    grants: BTreeMap<Principal, BTreeSet<Role>>,
}

impl Acl {
    pub fn new() -> Self {
        Self::default()
    }

    /// Grant `role` to the canonical user if `granted` holds.
    pub fn grant_if(mut self, granted: bool, role: Role) -> Self {
        if granted {
            self.grant(Principal::CanonicalUser, role);
        }
        self
    }

    pub fn grant(&mut self, principal: Principal, role: Role) {
        self.grants.entry(principal).or_default().insert(role);
    }

    /// Whether the canonical user holds `role`.
    pub fn allows(&self, role: Role) -> bool {
        self.grants
            .get(&Principal::CanonicalUser)
            .is_some_and(|roles| roles.contains(&role))
    }

    pub fn is_empty(&self) -> bool {
        self.grants.values().all(BTreeSet::is_empty)
    }
}

/// Remote metadata of one path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathAttributes {
    pub file_id: Option<String>,
    /// Size in bytes, [`UNKNOWN`] for containers.
    pub size: i64,
    /// Milliseconds since the epoch, [`UNKNOWN`] where the API has none.
    pub creation_date: i64,
    pub modification_date: i64,
    /// Web preview link.
    pub link: Option<String>,
    pub acl: Acl,
}

impl Default for PathAttributes {
    fn default() -> Self {
        Self {
            file_id: None,
            size: UNKNOWN,
            creation_date: UNKNOWN,
            modification_date: UNKNOWN,
            link: None,
            acl: Acl::default(),
        }
    }
}

impl PathAttributes {
    pub fn with_file_id(mut self, file_id: impl Into<String>) -> Self {
        self.file_id = Some(file_id.into());
        self
    }

    pub fn with_acl(mut self, acl: Acl) -> Self {
        self.acl = acl;
        self
    }

    pub fn has_timestamps(&self) -> bool {
        self.modification_date != UNKNOWN || self.creation_date != UNKNOWN
    }
}
