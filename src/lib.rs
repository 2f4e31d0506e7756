//! # deepboxlib
//!
//! Rust connector library for the DeepBox cloud storage API.
//!
//! DeepBox organizes content in a fixed hierarchy which this crate exposes as
//! one virtual filesystem:
//!
//! ```text
//! /<organization>/<box>/{Inbox, Documents, Trash}/<folders and files>
//! ```
//!
//! ## Features
//!
//! - **Path resolution**: Map virtual paths to remote node identifiers,
//!   resolving and caching every ancestor on the way down.
//!   - Negative results are cached as well, so a missing path costs one lookup.
//!   - Container names are recognized in all supported locales
//!     (de-CH, en-UK, fr-CH, it-CH).
//! - **Listings**:
//!   - Complete, paginated directory listings with progress callbacks.
//!   - Duplicate names collapse into the most recently modified node.
//!   - Box listings show only the containers the box policy grants.
//! - **Attributes**: Identifiers, sizes, timestamps, preview links and ACLs.
//! - **Operations**: Find, delete, restore, move/rename, copy and folder
//!   creation, plus the permission checks to run before creating files.
//!
//! Authentication is not part of this crate: pass a valid OAuth bearer
//! token to [`DeepboxSession::connect`].
//!
//! ## Example: Basic Usage
//!
//! ```no_run
//! use deepboxlib::{DeepboxConfig, DeepboxSession, VirtualPath};
//!
//! # async fn example() -> deepboxlib::Result<()> {
//! let session = DeepboxSession::connect(DeepboxConfig::from_env()?, "token")?;
//!
//! // List the Documents of a box
//! let documents = VirtualPath::directory("/ACME/Box1/Documents");
//! for (path, attributes) in session.list(&documents).await? {
//!     println!("{} ({} bytes)", path, attributes.size);
//! }
//!
//! // Resolve a single path
//! let report = VirtualPath::file("/ACME/Box1/Documents/Report.pdf");
//! if let Some(node_id) = session.file_id(&report).await? {
//!     println!("{} is node {}", report, node_id);
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ## Example: Custom Catalog
//!
//! Every feature talks to the API through the [`Catalog`] trait, so a session
//! can be built over any implementation:
//!
//! ```no_run
//! use std::sync::Arc;
//!
//! use deepboxlib::{DeepboxConfig, DeepboxSession, RestCatalog};
//!
//! # fn example() -> deepboxlib::Result<()> {
//! let config = DeepboxConfig::default().with_listing_chunk_size(50);
//! let catalog = Arc::new(RestCatalog::new(&config, "token"));
//! let _session = DeepboxSession::with_catalog(config, catalog)?;
//! # Ok(())
//! # }
//! ```

pub mod api;
pub mod attributes;
pub mod cache;
pub mod config;
pub mod error;
pub mod features;
pub mod fs;
pub mod http;
pub mod listing;
mod pagination;
pub mod progress;
pub mod resolver;
pub mod session;

// Re-export commonly used types
pub use api::{Catalog, RestCatalog};
pub use attributes::AttributesFinder;
pub use cache::{CaseSensitivity, IdCache};
pub use config::{DeepboxConfig, SchemeKind};
pub use error::{DeepboxError, Result};
pub use fs::{ContainerKind, Locale, PathAttributes, PathType, VirtualPath};
pub use listing::{AttributedList, ListService};
pub use progress::{ListProgress, ListProgressCallback};
pub use resolver::{IdProvider, IdentifierScheme};
pub use session::{DeepboxSession, Features};
