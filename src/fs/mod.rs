//! Virtual filesystem model: paths, attributes and hierarchy classification.

pub mod attributes;
pub mod classifier;
pub mod i18n;
pub mod path;

pub use attributes::{Acl, PathAttributes, Principal, Role, UNKNOWN};
pub use classifier::Level;
pub use i18n::{ContainerKind, Locale};
pub use path::{PathType, VirtualPath, normalize_name};
