use super::CulturaRepository;
use crate::error::Result;
use crate::models::{Cultura, CulturaPatch, CulturaRecord};
use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use uuid::Uuid;

/// In-process post store
///
/// Rows are kept in insertion order; `list` walks them backwards so posts
/// created in the same clock tick still come out newest first.
#[derive(Default)]
pub struct MemoryCulturaRepository {
    rows: RwLock<Vec<Cultura>>,
}

impl MemoryCulturaRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.rows.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.rows.read().await.is_empty()
    }
}

#[async_trait]
impl CulturaRepository for MemoryCulturaRepository {
    async fn insert(&self, record: CulturaRecord) -> Result<Cultura> {
        let now = Utc::now();
        let row = Cultura {
            id: Uuid::new_v4(),
            title: record.title,
            description: record.description,
            image: record.image,
            created_at: now,
            updated_at: now,
        };

        self.rows.write().await.push(row.clone());
        Ok(row)
    }

    async fn list(&self) -> Result<Vec<Cultura>> {
        let mut rows: Vec<Cultura> = self.rows.read().await.iter().rev().cloned().collect();
        // Stable sort keeps reverse-insertion order for equal timestamps.
        rows.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(rows)
    }

    async fn find(&self, id: Uuid) -> Result<Option<Cultura>> {
        Ok(self.rows.read().await.iter().find(|row| row.id == id).cloned())
    }

    async fn update(&self, id: Uuid, patch: CulturaPatch) -> Result<Option<Cultura>> {
        let mut rows = self.rows.write().await;
        let Some(row) = rows.iter_mut().find(|row| row.id == id) else {
            return Ok(None);
        };

        if let Some(title) = patch.title {
            row.title = title;
        }
        if let Some(description) = patch.description {
            row.description = description;
        }
        if let Some(image) = patch.image {
            row.image = Some(image);
        }
        row.updated_at = Utc::now();

        Ok(Some(row.clone()))
    }

    async fn delete(&self, id: Uuid) -> Result<Option<Cultura>> {
        let mut rows = self.rows.write().await;
        let position = rows.iter().position(|row| row.id == id);
        Ok(position.map(|index| rows.remove(index)))
    }

    async fn ping(&self) -> Result<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(title: &str) -> CulturaRecord {
        CulturaRecord {
            title: title.to_string(),
            description: format!("{} descrição", title),
            image: None,
        }
    }

    #[tokio::test]
    async fn list_is_newest_first() {
        let repo = MemoryCulturaRepository::new();
        for title in ["primeiro", "segundo", "terceiro"] {
            repo.insert(record(title)).await.unwrap();
        }

        let titles: Vec<String> = repo
            .list()
            .await
            .unwrap()
            .into_iter()
            .map(|row| row.title)
            .collect();
        assert_eq!(titles, vec!["terceiro", "segundo", "primeiro"]);
    }

    #[tokio::test]
    async fn update_keeps_unset_columns() {
        let repo = MemoryCulturaRepository::new();
        let created = repo.insert(record("sarau")).await.unwrap();

        let updated = repo
            .update(
                created.id,
                CulturaPatch {
                    description: Some("nova descrição".into()),
                    ..CulturaPatch::default()
                },
            )
            .await
            .unwrap()
            .unwrap();

        assert_eq!(updated.title, "sarau");
        assert_eq!(updated.description, "nova descrição");
        assert_eq!(updated.created_at, created.created_at);
        assert!(updated.updated_at >= created.updated_at);
    }

    #[tokio::test]
    async fn delete_twice_reports_missing() {
        let repo = MemoryCulturaRepository::new();
        let created = repo.insert(record("mostra")).await.unwrap();

        assert!(repo.delete(created.id).await.unwrap().is_some());
        assert!(repo.delete(created.id).await.unwrap().is_none());
        assert!(repo.is_empty().await);
    }

    #[tokio::test]
    async fn update_unknown_id_is_none() {
        let repo = MemoryCulturaRepository::new();
        let result = repo.update(Uuid::new_v4(), CulturaPatch::default()).await.unwrap();
        assert!(result.is_none());
    }
}
