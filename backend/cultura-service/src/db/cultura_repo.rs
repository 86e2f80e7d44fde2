use super::CulturaRepository;
use crate::error::Result;
use crate::models::{Cultura, CulturaPatch, CulturaRecord};
use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

/// PostgreSQL-backed post store (`culturas` table)
#[derive(Clone)]
pub struct PgCulturaRepository {
    pool: PgPool,
}

impl PgCulturaRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CulturaRepository for PgCulturaRepository {
    async fn insert(&self, record: CulturaRecord) -> Result<Cultura> {
        let row = sqlx::query_as::<_, Cultura>(
            r#"
            INSERT INTO culturas (id, title, description, image)
            VALUES ($1, $2, $3, $4)
            RETURNING id, title, description, image, created_at, updated_at
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(&record.title)
        .bind(&record.description)
        .bind(&record.image)
        .fetch_one(&self.pool)
        .await?;

        Ok(row)
    }

    async fn list(&self) -> Result<Vec<Cultura>> {
        let rows = sqlx::query_as::<_, Cultura>(
            r#"
            SELECT id, title, description, image, created_at, updated_at
            FROM culturas
            ORDER BY created_at DESC, id DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    async fn find(&self, id: Uuid) -> Result<Option<Cultura>> {
        let row = sqlx::query_as::<_, Cultura>(
            r#"
            SELECT id, title, description, image, created_at, updated_at
            FROM culturas
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row)
    }

    async fn update(&self, id: Uuid, patch: CulturaPatch) -> Result<Option<Cultura>> {
        let row = sqlx::query_as::<_, Cultura>(
            r#"
            UPDATE culturas
            SET title = COALESCE($2, title),
                description = COALESCE($3, description),
                image = COALESCE($4, image),
                updated_at = NOW()
            WHERE id = $1
            RETURNING id, title, description, image, created_at, updated_at
            "#,
        )
        .bind(id)
        .bind(&patch.title)
        .bind(&patch.description)
        .bind(&patch.image)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row)
    }

    async fn delete(&self, id: Uuid) -> Result<Option<Cultura>> {
        let row = sqlx::query_as::<_, Cultura>(
            r#"
            DELETE FROM culturas
            WHERE id = $1
            RETURNING id, title, description, image, created_at, updated_at
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row)
    }

    async fn ping(&self) -> Result<()> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}
