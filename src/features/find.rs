//! Existence checks.

use crate::error::Result;
use crate::fs::VirtualPath;
use crate::resolver::IdProvider;

#[derive(Clone)]
pub struct FindFeature {
    ids: IdProvider,
}

impl FindFeature {
    pub fn new(ids: IdProvider) -> Self {
        Self { ids }
    }

    /// Whether `path` exists. An identifier attached to the path is ignored.
    pub async fn find(&self, path: &VirtualPath) -> Result<bool> {
        if path.is_root() {
            return Ok(true);
        }
        match self.ids.file_id(&path.clone().without_file_id()).await {
            Ok(file_id) => Ok(file_id.is_some()),
            Err(err) if err.is_not_found() => Ok(false),
            Err(err) => Err(err.for_path(path.absolute())),
        }
    }
}
