//! Classification of paths by their position in the DeepBox hierarchy.
//!
//! ```text
//! /                                   root
//! /<organization>                     DeepBox
//! /<organization>/<box>               box
//! /<organization>/<box>/<container>   Inbox | Documents | Trash
//! /<organization>/<box>/<container>/… descendant
//! ```
//!
//! Everything here is a pure function of the path; nothing talks to the API.

use super::i18n::ContainerKind;
use super::path::VirtualPath;

/// Depth at which Inbox/Documents/Trash live.
pub const THIRD_LEVEL_DEPTH: usize = 3;

/// Exhaustive, depth-based level of a path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    Root,
    Organization,
    Box,
    ThirdLevel,
    Descendant,
}

pub fn level(path: &VirtualPath) -> Level {
    match path.depth() {
        0 => Level::Root,
        1 => Level::Organization,
        2 => Level::Box,
        THIRD_LEVEL_DEPTH => Level::ThirdLevel,
        _ => Level::Descendant,
    }
}

pub fn is_root(path: &VirtualPath) -> bool {
    path.is_root()
}

/// Organization directory.
pub fn is_deepbox(path: &VirtualPath) -> bool {
    path.is_directory() && path.depth() == 1
}

pub fn is_box(path: &VirtualPath) -> bool {
    path.is_directory() && path.depth() == 2
}

pub fn is_third_level(path: &VirtualPath) -> bool {
    path.is_directory() && path.depth() == THIRD_LEVEL_DEPTH
}

/// Organization, box or third-level directory.
pub fn is_container(path: &VirtualPath) -> bool {
    path.is_directory() && (1..=THIRD_LEVEL_DEPTH).contains(&path.depth())
}

pub fn is_inbox(path: &VirtualPath) -> bool {
    third_level_kind(path) == Some(ContainerKind::Inbox)
}

pub fn is_documents(path: &VirtualPath) -> bool {
    third_level_kind(path) == Some(ContainerKind::Documents)
}

pub fn is_trash(path: &VirtualPath) -> bool {
    third_level_kind(path) == Some(ContainerKind::Trash)
}

/// Kind of a third-level directory.
pub fn third_level_kind(path: &VirtualPath) -> Option<ContainerKind> {
    if !is_third_level(path) {
        return None;
    }
    ContainerKind::from_name(path.name())
}

/// Kind of the third-level container a path is in, the path itself included.
pub fn container_kind(path: &VirtualPath) -> Option<ContainerKind> {
    if path.depth() < THIRD_LEVEL_DEPTH {
        return None;
    }
    ContainerKind::from_name(&path.segments()[THIRD_LEVEL_DEPTH - 1])
}

/// True if the path lies strictly below a third-level container of `kind`.
pub fn is_descendant_of(path: &VirtualPath, kind: ContainerKind) -> bool {
    path.depth() > THIRD_LEVEL_DEPTH && container_kind(path) == Some(kind)
}

/// Nearest ancestor-or-self that is the root or a container.
pub fn container(path: &VirtualPath) -> VirtualPath {
    if path.is_root() || is_container(path) {
        return path.clone();
    }
    let depth = path.depth().min(THIRD_LEVEL_DEPTH);
    let mut candidate = path.ancestor(depth).unwrap_or_else(VirtualPath::root);
    // Files above the third level have no container of their own.
    while !candidate.is_root() && candidate.depth() == path.depth() {
        candidate = candidate.parent().unwrap_or_else(VirtualPath::root);
    }
    candidate
}

/// Path below the third-level container, `None` at or above that level.
pub fn key(path: &VirtualPath) -> Option<String> {
    if path.depth() <= THIRD_LEVEL_DEPTH {
        return None;
    }
    Some(path.segments()[THIRD_LEVEL_DEPTH..].join("/"))
}
