//! Node deletion.

use tracing::{debug, warn};

use super::{require_id, require_node_path};
use crate::error::{DeepboxError, Result};
use crate::fs::{PathAttributes, Role, VirtualPath};
use crate::resolver::IdProvider;

#[derive(Clone)]
pub struct DeleteFeature {
    ids: IdProvider,
    purge: bool,
}

impl DeleteFeature {
    /// Deletes move nodes to the trash unless [`DeleteFeature::with_purge`] is set.
    pub fn new(ids: IdProvider) -> Self {
        Self { ids, purge: false }
    }

    pub fn with_purge(mut self, purge: bool) -> Self {
        self.purge = purge;
        self
    }

    /// Refuse to delete containers or nodes whose ACL lacks `canDelete`.
    pub fn preflight(&self, path: &VirtualPath, attributes: &PathAttributes) -> Result<()> {
        require_node_path(path, "delete")?;
        if !attributes.acl.allows(Role::CanDelete) {
            warn!(path = %path, role = %Role::CanDelete, "ACL does not include role");
            return Err(DeepboxError::AccessDenied(format!("cannot delete {}", path)));
        }
        Ok(())
    }

    /// Delete every path in order, stopping at the first failure.
    ///
    /// The cache forgets each deleted path together with everything below it.
    pub async fn delete(&self, paths: &[VirtualPath]) -> Result<()> {
        for path in paths {
            self.delete_one(path)
                .await
                .map_err(|err| err.for_path(path.absolute()))?;
        }
        Ok(())
    }

    async fn delete_one(&self, path: &VirtualPath) -> Result<()> {
        let file_id = require_id(self.ids.file_id(path).await?, path)?;
        debug!(path = %path, file_id = %file_id, purge = self.purge, "delete");
        self.ids.catalog().delete_node(&file_id, self.purge).await?;
        self.ids.cache().invalidate_tree(path);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::api::mock::{MockCatalog, file, folder, full_policy};
    use crate::cache::IdCache;
    use crate::fs::{Acl, ContainerKind};
    use crate::resolver::SyntheticScheme;

    fn fixture() -> (Arc<MockCatalog>, IdProvider) {
        let mock = MockCatalog::new();
        mock.add_deep_box("org-1", "ACME")
            .add_box("org-1", "box-1", "Box1", full_policy())
            .add_node("org-1", "box-1", ContainerKind::Documents, None, folder("f-1", "Auditing", 1))
            .add_node("org-1", "box-1", ContainerKind::Documents, Some("f-1"), file("n-1", "Report.pdf", 1, 1));
        let mock = Arc::new(mock);
        let ids = IdProvider::new(mock.clone(), Arc::new(IdCache::default()), Arc::new(SyntheticScheme), 10);
        (mock, ids)
    }

    #[tokio::test]
    async fn test_delete_forgets_cached_identifier() {
        let (mock, ids) = fixture();
        let delete = DeleteFeature::new(ids.clone());
        let path = VirtualPath::file("/ACME/Box1/Documents/Auditing/Report.pdf");

        assert_eq!(ids.file_id(&path).await.unwrap().as_deref(), Some("n-1"));
        delete.delete(std::slice::from_ref(&path)).await.unwrap();
        assert!(!mock.contains("n-1"));
        assert_eq!(ids.cache().get(&path), None);

        mock.reset_calls();
        assert_eq!(ids.file_id(&path).await.unwrap(), None);
        assert_eq!(mock.calls_to("list_files_in"), 1);
    }

    #[tokio::test]
    async fn test_delete_folder_forgets_subtree() {
        let (_mock, ids) = fixture();
        let delete = DeleteFeature::new(ids.clone());
        let child = VirtualPath::file("/ACME/Box1/Documents/Auditing/Report.pdf");
        ids.file_id(&child).await.unwrap();

        delete
            .delete(&[VirtualPath::directory("/ACME/Box1/Documents/Auditing")])
            .await
            .unwrap();
        assert_eq!(ids.cache().get(&child), None);
        assert!(ids.cache().get(&VirtualPath::directory("/ACME/Box1")).is_some());
    }

    #[tokio::test]
    async fn test_delete_missing_is_not_found() {
        let (_mock, ids) = fixture();
        let err = DeleteFeature::new(ids)
            .delete(&[VirtualPath::file("/ACME/Box1/Documents/nope.txt")])
            .await
            .unwrap_err();
        assert!(matches!(err, DeepboxError::NotFound(_)));
    }

    #[test]
    fn test_preflight() {
        let (_mock, ids) = fixture();
        let delete = DeleteFeature::new(ids).with_purge(true);
        let file = VirtualPath::file("/ACME/Box1/Documents/a.txt");

        let allowed = PathAttributes::default().with_acl(Acl::new().grant_if(true, Role::CanDelete));
        assert!(delete.preflight(&file, &allowed).is_ok());

        let denied = PathAttributes::default();
        assert!(matches!(
            delete.preflight(&file, &denied),
            Err(DeepboxError::AccessDenied(_))
        ));
        assert!(matches!(
            delete.preflight(&VirtualPath::directory("/ACME/Box1/Trash"), &allowed),
            Err(DeepboxError::AccessDenied(_))
        ));
    }
}
