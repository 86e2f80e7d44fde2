/// Database access layer
///
/// Posts are persisted behind [`CulturaRepository`] so the service can run
/// against PostgreSQL in deployment and against the in-process store for
/// local development and tests.
pub mod cultura_repo;
pub mod memory;
pub mod pool;

pub use cultura_repo::PgCulturaRepository;
pub use memory::MemoryCulturaRepository;
pub use pool::{create_pool, run_migrations};

use crate::error::Result;
use crate::models::{Cultura, CulturaPatch, CulturaRecord};
use async_trait::async_trait;
use uuid::Uuid;

#[async_trait]
pub trait CulturaRepository: Send + Sync {
    /// Insert a post; the store assigns id and timestamps
    async fn insert(&self, record: CulturaRecord) -> Result<Cultura>;

    /// All posts, newest first
    async fn list(&self) -> Result<Vec<Cultura>>;

    async fn find(&self, id: Uuid) -> Result<Option<Cultura>>;

    /// Apply a patch; `None` when the id does not resolve
    async fn update(&self, id: Uuid, patch: CulturaPatch) -> Result<Option<Cultura>>;

    /// Remove a post, returning the removed row; `None` when the id does not resolve
    async fn delete(&self, id: Uuid) -> Result<Option<Cultura>>;

    /// Connectivity check for health endpoints
    async fn ping(&self) -> Result<()>;
}
