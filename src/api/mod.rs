//! DeepBox API client and types.

pub mod catalog;
pub mod client;
pub mod error;
pub mod model;

#[cfg(test)]
pub(crate) mod mock;

pub use catalog::{Catalog, NodeScope};
pub use client::RestCatalog;
pub use error::ApiStatus;
pub use model::{BoxEntry, BoxPolicy, DeepBox, ListOrder, Node, NodeInfo, NodePolicy, NodeType, Page};
