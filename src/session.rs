//! Session wiring.
//!
//! A [`DeepboxSession`] owns one identifier cache and one cancellation token
//! and builds every feature around them once, at construction time.

use std::sync::Arc;

use tokio_util::sync::CancellationToken;
use tracing::debug;

use crate::api::{Catalog, RestCatalog};
use crate::attributes::AttributesFinder;
use crate::cache::IdCache;
use crate::config::DeepboxConfig;
use crate::error::Result;
use crate::features::{
    CopyFeature, DeleteFeature, DirectoryFeature, FindFeature, MoveFeature, RestoreFeature,
    TouchFeature,
};
use crate::fs::{PathAttributes, VirtualPath};
use crate::listing::{AttributedList, ListService};
use crate::resolver::{IdProvider, scheme_for};

/// Every capability of a session, sharing one cache.
#[derive(Clone)]
pub struct Features {
    pub ids: IdProvider,
    pub list: ListService,
    pub attributes: AttributesFinder,
    pub find: FindFeature,
    pub delete: DeleteFeature,
    pub restore: RestoreFeature,
    pub rename: MoveFeature,
    pub copy: CopyFeature,
    pub touch: TouchFeature,
    pub directory: DirectoryFeature,
}

impl Features {
    pub fn new(
        catalog: Arc<dyn Catalog>,
        config: Arc<DeepboxConfig>,
        cancel: CancellationToken,
    ) -> Self {
        let cache = Arc::new(IdCache::new(config.case_sensitivity));
        let ids = IdProvider::new(
            catalog,
            cache,
            scheme_for(config.identifier_scheme),
            config.listing_chunk_size,
        )
        .with_cancellation(cancel);
        let attributes = AttributesFinder::new(ids.clone(), config.clone());
        let delete = DeleteFeature::new(ids.clone());

        Self {
            list: ListService::new(ids.clone(), config),
            find: FindFeature::new(ids.clone()),
            restore: RestoreFeature::new(ids.clone()),
            rename: MoveFeature::new(ids.clone(), delete.clone()),
            copy: CopyFeature::new(ids.clone(), delete.clone()),
            touch: TouchFeature::new(ids.clone(), attributes.clone()),
            directory: DirectoryFeature::new(ids.clone(), attributes.clone()),
            delete,
            attributes,
            ids,
        }
    }
}

/// A connection to one DeepBox account.
pub struct DeepboxSession {
    config: Arc<DeepboxConfig>,
    features: Features,
    cancel: CancellationToken,
}

impl DeepboxSession {
    /// Connect to the REST API with an OAuth bearer token obtained elsewhere.
    ///
    /// # Example
    /// ```no_run
    /// use deepboxlib::{DeepboxConfig, DeepboxSession, VirtualPath};
    ///
    /// # async fn example() -> deepboxlib::Result<()> {
    /// let session = DeepboxSession::connect(DeepboxConfig::from_env()?, "token")?;
    /// for (path, attributes) in session.list(&VirtualPath::root()).await? {
    ///     println!("{} {:?}", path, attributes.file_id);
    /// }
    /// # Ok(())
    /// # }
    /// ```
    pub fn connect(config: DeepboxConfig, token: impl Into<String>) -> Result<Self> {
        config.validate()?;
        let catalog = RestCatalog::new(&config, token);
        Self::with_catalog(config, Arc::new(catalog))
    }

    /// Build a session over any [`Catalog`] implementation.
    pub fn with_catalog(config: DeepboxConfig, catalog: Arc<dyn Catalog>) -> Result<Self> {
        config.validate()?;
        debug!(
            chunk_size = config.listing_chunk_size,
            locale = config.locale.tag(),
            "session created"
        );
        let config = Arc::new(config);
        let cancel = CancellationToken::new();
        let features = Features::new(catalog, config.clone(), cancel.clone());
        Ok(Self {
            config,
            features,
            cancel,
        })
    }

    pub fn config(&self) -> &DeepboxConfig {
        &self.config
    }

    pub fn features(&self) -> &Features {
        &self.features
    }

    pub fn cache(&self) -> &Arc<IdCache> {
        self.features.ids.cache()
    }

    /// Abort every running and future paginated call of this session.
    pub fn cancel(&self) {
        self.cancel.cancel();
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancel.is_cancelled()
    }

    /// Remote identifier of `path`, `None` if it does not exist.
    pub async fn file_id(&self, path: &VirtualPath) -> Result<Option<String>> {
        self.features.ids.file_id(path).await
    }

    pub async fn list(&self, directory: &VirtualPath) -> Result<AttributedList> {
        self.features.list.list(directory).await
    }

    pub async fn attributes(&self, path: &VirtualPath) -> Result<PathAttributes> {
        self.features.attributes.find(path).await
    }
}
