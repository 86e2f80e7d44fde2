/// Cultura post service - create, list, update and delete posts and their images
use crate::db::CulturaRepository;
use crate::error::{AppError, Result};
use crate::metrics::{record_operation, UPLOAD_BYTES_TOTAL};
use crate::models::{
    describe_validation_errors, CulturaChanges, CulturaPatch, CulturaRecord, NewCultura,
    UploadedFile,
};
use crate::services::KeyedLocks;
use crate::storage::UploadStore;
use api_envelope::ContentPost;
use std::sync::Arc;
use tracing::{info, warn};
use uuid::Uuid;
use validator::Validate;

pub const NOT_FOUND_MESSAGE: &str = "Post não encontrado";
pub const DELETED_MESSAGE: &str = "Post deletado com sucesso";

pub struct CulturaService {
    repo: Arc<dyn CulturaRepository>,
    uploads: Arc<UploadStore>,
    locks: KeyedLocks<Uuid>,
}

impl CulturaService {
    pub fn new(repo: Arc<dyn CulturaRepository>, uploads: Arc<UploadStore>) -> Self {
        Self {
            repo,
            uploads,
            locks: KeyedLocks::new(),
        }
    }

    pub fn repository(&self) -> &Arc<dyn CulturaRepository> {
        &self.repo
    }

    /// Create a post. The image, if any, is written before the row and
    /// removed again when the insert fails.
    pub async fn create(
        &self,
        input: NewCultura,
        image: Option<UploadedFile>,
    ) -> Result<ContentPost> {
        if let Err(errors) = input.validate() {
            record_operation("create", "invalid");
            return Err(AppError::Validation(describe_validation_errors(&errors)));
        }

        let stored = self.store_image(image).await?;
        let record = CulturaRecord {
            title: input.title.trim().to_string(),
            description: input.description.trim().to_string(),
            image: stored.clone(),
        };

        match self.repo.insert(record).await {
            Ok(row) => {
                record_operation("create", "ok");
                info!(post_id = %row.id, has_image = row.image.is_some(), "Cultura post created");
                Ok(row.into())
            }
            Err(err) => {
                record_operation("create", "error");
                if let Some(filename) = stored {
                    self.uploads.remove(&filename).await;
                }
                Err(err)
            }
        }
    }

    /// All posts, newest first
    pub async fn list(&self) -> Result<Vec<ContentPost>> {
        let rows = self.repo.list().await?;
        record_operation("list", "ok");
        Ok(rows.into_iter().map(ContentPost::from).collect())
    }

    pub async fn get(&self, id: Uuid) -> Result<ContentPost> {
        match self.repo.find(id).await? {
            Some(row) => {
                record_operation("get", "ok");
                Ok(row.into())
            }
            None => {
                record_operation("get", "not_found");
                Err(AppError::NotFound(NOT_FOUND_MESSAGE.to_string()))
            }
        }
    }

    /// Replace the provided fields. A new image replaces the stored one and
    /// the previous file is deleted after the row is updated.
    pub async fn update(
        &self,
        id: Uuid,
        changes: CulturaChanges,
        image: Option<UploadedFile>,
    ) -> Result<ContentPost> {
        if let Err(errors) = changes.validate() {
            record_operation("update", "invalid");
            return Err(AppError::Validation(describe_validation_errors(&errors)));
        }

        let _guard = self.locks.lock(id).await;

        let Some(existing) = self.repo.find(id).await? else {
            record_operation("update", "not_found");
            return Err(AppError::NotFound(NOT_FOUND_MESSAGE.to_string()));
        };

        let stored = self.store_image(image).await?;
        let patch = CulturaPatch {
            title: changes.title.map(|title| title.trim().to_string()),
            description: changes.description.map(|desc| desc.trim().to_string()),
            image: stored.clone(),
        };

        let updated = match self.repo.update(id, patch).await {
            Ok(Some(row)) => row,
            Ok(None) => {
                if let Some(filename) = &stored {
                    self.uploads.remove(filename).await;
                }
                record_operation("update", "not_found");
                return Err(AppError::NotFound(NOT_FOUND_MESSAGE.to_string()));
            }
            Err(err) => {
                if let Some(filename) = &stored {
                    self.uploads.remove(filename).await;
                }
                record_operation("update", "error");
                return Err(err);
            }
        };

        if stored.is_some() {
            if let Some(previous) = existing.image.as_deref() {
                self.uploads.remove(previous).await;
            }
        }

        record_operation("update", "ok");
        info!(post_id = %id, image_replaced = stored.is_some(), "Cultura post updated");
        Ok(updated.into())
    }

    /// Delete a post and its image file
    pub async fn delete(&self, id: Uuid) -> Result<()> {
        let _guard = self.locks.lock(id).await;

        let Some(removed) = self.repo.delete(id).await? else {
            record_operation("delete", "not_found");
            return Err(AppError::NotFound(NOT_FOUND_MESSAGE.to_string()));
        };

        if let Some(filename) = removed.image.as_deref() {
            self.uploads.remove(filename).await;
        }

        record_operation("delete", "ok");
        info!(post_id = %id, "Cultura post deleted");
        Ok(())
    }

    async fn store_image(&self, image: Option<UploadedFile>) -> Result<Option<String>> {
        let Some(file) = image else {
            return Ok(None);
        };

        match self.uploads.save(&file.original_name, &file.bytes).await {
            Ok(filename) => {
                UPLOAD_BYTES_TOTAL.inc_by(file.bytes.len() as u64);
                Ok(Some(filename))
            }
            Err(err) => {
                warn!(original_name = %file.original_name, error = %err, "Failed to store upload");
                Err(err)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::MemoryCulturaRepository;
    use crate::models::{Cultura, CulturaPatch};
    use async_trait::async_trait;
    use tempfile::TempDir;

    fn service(dir: &TempDir) -> CulturaService {
        CulturaService::new(
            Arc::new(MemoryCulturaRepository::new()),
            Arc::new(UploadStore::new(dir.path(), 1024)),
        )
    }

    fn new_post(title: &str, description: &str) -> NewCultura {
        NewCultura {
            title: title.to_string(),
            description: description.to_string(),
        }
    }

    fn png(name: &str) -> UploadedFile {
        UploadedFile {
            original_name: name.to_string(),
            bytes: b"\x89PNG\r\n".to_vec(),
        }
    }

    fn files_in(dir: &TempDir) -> usize {
        std::fs::read_dir(dir.path()).unwrap().count()
    }

    #[tokio::test]
    async fn create_rejects_blank_fields() {
        let dir = TempDir::new().unwrap();
        let svc = service(&dir);

        for (title, description) in [("", "D"), ("T", ""), ("  ", "D"), ("T", "\n\t")] {
            let err = svc.create(new_post(title, description), None).await.unwrap_err();
            assert!(matches!(err, AppError::Validation(_)), "{title:?}/{description:?}");
        }
        assert!(svc.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn invalid_create_does_not_write_image() {
        let dir = TempDir::new().unwrap();
        let svc = service(&dir);

        let _ = svc.create(new_post("", "D"), Some(png("a.png"))).await;
        assert_eq!(files_in(&dir), 0);
    }

    #[tokio::test]
    async fn create_then_list_round_trip() {
        let dir = TempDir::new().unwrap();
        let svc = service(&dir);

        svc.create(new_post("T", "D"), None).await.unwrap();
        let posts = svc.list().await.unwrap();

        assert_eq!(posts.len(), 1);
        assert_eq!(posts[0].title, "T");
        assert_eq!(posts[0].description, "D");
        assert_eq!(posts[0].image, None);
    }

    #[tokio::test]
    async fn update_with_new_image_removes_previous_file() {
        let dir = TempDir::new().unwrap();
        let svc = service(&dir);

        let created = svc
            .create(new_post("Sarau", "Noite de poesia"), Some(png("old.png")))
            .await
            .unwrap();
        let old_file = created.image.clone().unwrap();

        let updated = svc
            .update(created.id, CulturaChanges::default(), Some(png("new.png")))
            .await
            .unwrap();
        let new_file = updated.image.clone().unwrap();

        assert_ne!(old_file, new_file);
        assert!(!dir.path().join(&old_file).exists());
        assert!(dir.path().join(&new_file).exists());
        assert_eq!(updated.title, "Sarau");
    }

    #[tokio::test]
    async fn update_without_changes_keeps_post() {
        let dir = TempDir::new().unwrap();
        let svc = service(&dir);

        let created = svc
            .create(new_post("Sarau", "Noite de poesia"), Some(png("capa.png")))
            .await
            .unwrap();
        let updated = svc
            .update(created.id, CulturaChanges::default(), None)
            .await
            .unwrap();

        assert_eq!(updated.title, created.title);
        assert_eq!(updated.description, created.description);
        assert_eq!(updated.image, created.image);
        assert_eq!(files_in(&dir), 1);
    }

    #[tokio::test]
    async fn update_unknown_id_is_not_found_and_keeps_no_file() {
        let dir = TempDir::new().unwrap();
        let svc = service(&dir);

        let err = svc
            .update(Uuid::new_v4(), CulturaChanges::default(), Some(png("x.png")))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
        assert_eq!(files_in(&dir), 0);
    }

    #[tokio::test]
    async fn delete_twice_reports_not_found() {
        let dir = TempDir::new().unwrap();
        let svc = service(&dir);

        let keep = svc.create(new_post("A", "a"), None).await.unwrap();
        let gone = svc
            .create(new_post("B", "b"), Some(png("b.png")))
            .await
            .unwrap();

        svc.delete(gone.id).await.unwrap();
        assert_eq!(files_in(&dir), 0);

        let err = svc.delete(gone.id).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));

        let remaining = svc.list().await.unwrap();
        assert_eq!(remaining.len(), 1);
        assert_eq!(remaining[0].id, keep.id);
    }

    struct FailingInsert;

    #[async_trait]
    impl CulturaRepository for FailingInsert {
        async fn insert(&self, _record: CulturaRecord) -> Result<Cultura> {
            Err(AppError::Storage("disk full".into()))
        }
        async fn list(&self) -> Result<Vec<Cultura>> {
            Ok(Vec::new())
        }
        async fn find(&self, _id: Uuid) -> Result<Option<Cultura>> {
            Ok(None)
        }
        async fn update(&self, _id: Uuid, _patch: CulturaPatch) -> Result<Option<Cultura>> {
            Ok(None)
        }
        async fn delete(&self, _id: Uuid) -> Result<Option<Cultura>> {
            Ok(None)
        }
        async fn ping(&self) -> Result<()> {
            Ok(())
        }
    }

    #[tokio::test]
    async fn failed_insert_removes_written_file() {
        let dir = TempDir::new().unwrap();
        let svc = CulturaService::new(
            Arc::new(FailingInsert),
            Arc::new(UploadStore::new(dir.path(), 1024)),
        );

        let err = svc
            .create(new_post("T", "D"), Some(png("a.png")))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Storage(_)));
        assert_eq!(files_in(&dir), 0);
    }
}
