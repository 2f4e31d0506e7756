//! Restoring trashed nodes.
//!
//! The backend puts a node back where it was deleted from. That location is
//! not known locally, so a restore drops every negative cache entry of the
//! box; [`RestoreFeature::restore_as`] additionally records the restored path
//! when the caller knows it.

use tracing::debug;

use super::{require_id, require_node_path};
use crate::error::{DeepboxError, Result};
use crate::fs::classifier;
use crate::fs::{ContainerKind, VirtualPath};
use crate::resolver::IdProvider;

#[derive(Clone)]
pub struct RestoreFeature {
    ids: IdProvider,
}

impl RestoreFeature {
    pub fn new(ids: IdProvider) -> Self {
        Self { ids }
    }

    /// Restore the node at `trashed`, a path below a Trash container.
    pub async fn restore(&self, trashed: &VirtualPath) -> Result<()> {
        self.restore_node(trashed)
            .await
            .map(|_| ())
            .map_err(|err| err.for_path(trashed.absolute()))
    }

    /// Restore `trashed` and cache its identifier under `original`.
    pub async fn restore_as(&self, trashed: &VirtualPath, original: &VirtualPath) -> Result<()> {
        require_node_path(original, "restore to")?;
        if classifier::container_kind(original) == Some(ContainerKind::Trash)
            || original.ancestor(2) != trashed.ancestor(2)
        {
            return Err(DeepboxError::Unsupported(format!(
                "cannot restore {} to {}",
                trashed, original
            )));
        }
        let file_id = self
            .restore_node(trashed)
            .await
            .map_err(|err| err.for_path(trashed.absolute()))?;
        self.ids.cache().invalidate_tree(original);
        self.ids.cache_id(original, Some(file_id));
        Ok(())
    }

    async fn restore_node(&self, trashed: &VirtualPath) -> Result<String> {
        if !classifier::is_descendant_of(trashed, ContainerKind::Trash) {
            return Err(DeepboxError::Unsupported(format!("{} is not in the trash", trashed)));
        }
        let file_id = require_id(self.ids.file_id(trashed).await?, trashed)?;
        debug!(path = %trashed, file_id = %file_id, "restore");
        self.ids.catalog().restore_node(&file_id).await?;

        let cache = self.ids.cache();
        cache.invalidate_tree(trashed);
        if let Some(box_path) = trashed.ancestor(2) {
            cache.forget_absent_below(&box_path);
        }
        Ok(file_id)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::api::mock::{MockCatalog, file, folder, full_policy};
    use crate::cache::IdCache;
    use crate::features::{DeleteFeature, FindFeature};
    use crate::resolver::SyntheticScheme;

    fn fixture() -> (Arc<MockCatalog>, IdProvider) {
        let mock = MockCatalog::new();
        mock.add_deep_box("org-1", "ACME")
            .add_box("org-1", "box-1", "Box1", full_policy())
            .add_node("org-1", "box-1", ContainerKind::Documents, None, folder("f-aud", "Auditing", 1))
            .add_node("org-1", "box-1", ContainerKind::Documents, Some("f-aud"), folder("f-sub", "sub", 2))
            .add_node("org-1", "box-1", ContainerKind::Documents, Some("f-sub"), file("n-1", "Report.pdf", 1, 3));
        let mock = Arc::new(mock);
        let ids = IdProvider::new(mock.clone(), Arc::new(IdCache::default()), Arc::new(SyntheticScheme), 10);
        (mock, ids)
    }

    #[tokio::test]
    async fn test_restore_file() {
        let (mock, ids) = fixture();
        let find = FindFeature::new(ids.clone());
        let original = VirtualPath::file("/ACME/Box1/Documents/Auditing/sub/Report.pdf");
        let trashed = VirtualPath::file("/ACME/Box1/Trash/Report.pdf");

        assert!(find.find(&original).await.unwrap());
        assert!(!find.find(&trashed).await.unwrap());

        DeleteFeature::new(ids.clone())
            .delete(std::slice::from_ref(&original))
            .await
            .unwrap();
        assert!(!find.find(&original).await.unwrap());
        assert_eq!(ids.file_id(&trashed).await.unwrap().as_deref(), Some("n-1"));

        RestoreFeature::new(ids.clone()).restore(&trashed).await.unwrap();
        assert!(!mock.in_trash("n-1"));
        assert_eq!(ids.cache().get(&trashed), None);
        assert_eq!(ids.file_id(&original).await.unwrap().as_deref(), Some("n-1"));
        assert!(!find.find(&trashed).await.unwrap());
    }

    #[tokio::test]
    async fn test_restore_directory_with_content() {
        let (_mock, ids) = fixture();
        let find = FindFeature::new(ids.clone());
        let sub = VirtualPath::directory("/ACME/Box1/Documents/Auditing/sub");
        let child = VirtualPath::file("/ACME/Box1/Documents/Auditing/sub/Report.pdf");
        let trashed = VirtualPath::directory("/ACME/Box1/Trash/sub");
        let trashed_child = VirtualPath::file("/ACME/Box1/Trash/sub/Report.pdf");

        DeleteFeature::new(ids.clone())
            .delete(std::slice::from_ref(&sub))
            .await
            .unwrap();
        assert!(!find.find(&child).await.unwrap());
        assert_eq!(ids.file_id(&trashed_child).await.unwrap().as_deref(), Some("n-1"));

        RestoreFeature::new(ids.clone())
            .restore_as(&trashed, &sub)
            .await
            .unwrap();
        assert_eq!(ids.cache().get(&sub), Some(Some("f-sub".to_string())));
        assert_eq!(ids.cache().get(&trashed_child), None);
        assert_eq!(ids.file_id(&child).await.unwrap().as_deref(), Some("n-1"));
        assert!(!find.find(&trashed_child).await.unwrap());
    }

    #[tokio::test]
    async fn test_only_trashed_nodes() {
        let (mock, ids) = fixture();
        let restore = RestoreFeature::new(ids);

        let err = restore
            .restore(&VirtualPath::directory("/ACME/Box1/Documents/Auditing"))
            .await
            .unwrap_err();
        assert!(matches!(err, DeepboxError::Unsupported(_)));
        assert!(matches!(
            restore.restore(&VirtualPath::directory("/ACME/Box1/Trash")).await,
            Err(DeepboxError::Unsupported(_))
        ));
        assert!(matches!(
            restore.restore(&VirtualPath::file("/ACME/Box1/Trash/nope.txt")).await,
            Err(DeepboxError::NotFound(_))
        ));
        assert!(matches!(
            restore
                .restore_as(
                    &VirtualPath::file("/ACME/Box1/Trash/a.txt"),
                    &VirtualPath::file("/ACME/Box2/Documents/a.txt"),
                )
                .await,
            Err(DeepboxError::Unsupported(_))
        ));
        assert_eq!(mock.calls_to("restore_node"), 0);
    }
}
