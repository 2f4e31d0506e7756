//! Identifiers of the synthesized third-level containers.
//!
//! Inbox, Documents and Trash are not nodes on the backend; the listing
//! endpoints are addressed by organization and box. They still need stable
//! identifiers for the cache and the attribute records, produced here.

use std::fmt;
use std::sync::Arc;

use crate::config::SchemeKind;
use crate::fs::ContainerKind;

/// Well-known identifier of every Inbox.
pub const INBOX_ID: &str = "00000000-0000-0000-0000-000000000001";
/// Well-known identifier of every Documents container.
pub const DOCUMENTS_ID: &str = "00000000-0000-0000-0000-000000000002";
/// Well-known identifier of every Trash.
pub const TRASH_ID: &str = "00000000-0000-0000-0000-000000000003";

/// Produces the identifier of a third-level container.
pub trait IdentifierScheme: Send + Sync + fmt::Debug {
    /// `name` is the localized name the container was addressed by.
    fn third_level_id(&self, box_id: &str, kind: ContainerKind, name: &str) -> String;
}

/// Fixed constants per container kind, independent of box and locale.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WellKnownScheme {
    inbox: String,
    documents: String,
    trash: String,
}

impl WellKnownScheme {
    pub fn new(
        inbox: impl Into<String>,
        documents: impl Into<String>,
        trash: impl Into<String>,
    ) -> Self {
        Self {
            inbox: inbox.into(),
            documents: documents.into(),
            trash: trash.into(),
        }
    }
}

impl Default for WellKnownScheme {
    fn default() -> Self {
        Self::new(INBOX_ID, DOCUMENTS_ID, TRASH_ID)
    }
}

impl IdentifierScheme for WellKnownScheme {
    fn third_level_id(&self, _box_id: &str, kind: ContainerKind, _name: &str) -> String {
        match kind {
            ContainerKind::Inbox => self.inbox.clone(),
            ContainerKind::Documents => self.documents.clone(),
            ContainerKind::Trash => self.trash.clone(),
        }
    }
}

/// `{box_id}_{name}`, unique across boxes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SyntheticScheme;

impl IdentifierScheme for SyntheticScheme {
    fn third_level_id(&self, box_id: &str, _kind: ContainerKind, name: &str) -> String {
        format!("{}_{}", box_id, name)
    }
}

/// Build the scheme selected in the configuration.
pub fn scheme_for(kind: SchemeKind) -> Arc<dyn IdentifierScheme> {
    match kind {
        SchemeKind::WellKnown => Arc::new(WellKnownScheme::default()),
        SchemeKind::Synthetic => Arc::new(SyntheticScheme),
    }
}
