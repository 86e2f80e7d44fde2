/// Cultura Service Library
///
/// Backend of the FATEC Cotia app: CRUD for "Cultura" posts with image
/// upload, upload serving, and a server-side proxy for the EduAssist chat.
///
/// # Modules
///
/// - `handlers`: HTTP request handlers and route table
/// - `models`: Stored rows and validated inputs
/// - `services`: Post lifecycle, chat proxy, per-post locking
/// - `db`: Repository trait with PostgreSQL and in-memory stores
/// - `storage`: Upload files on the local filesystem
/// - `error`: Error types and handling
/// - `config`: Configuration management
/// - `metrics`: Prometheus collectors
pub mod config;
pub mod db;
pub mod error;
pub mod handlers;
pub mod metrics;
pub mod models;
pub mod services;
pub mod storage;

pub use config::Config;
pub use error::{AppError, Result};

use config::StorageBackend;
use db::CulturaRepository;
use services::{ChatProxy, CulturaService};
use std::sync::Arc;
use storage::UploadStore;

/// Shared application state handed to every handler through `web::Data`
pub struct AppState {
    pub culturas: Arc<CulturaService>,
    pub uploads: Arc<UploadStore>,
    pub chat: Arc<ChatProxy>,
    pub storage_backend: StorageBackend,
}

impl AppState {
    pub fn new(
        repo: Arc<dyn CulturaRepository>,
        uploads: UploadStore,
        chat: ChatProxy,
        storage_backend: StorageBackend,
    ) -> Self {
        let uploads = Arc::new(uploads);
        Self {
            culturas: Arc::new(CulturaService::new(repo, Arc::clone(&uploads))),
            uploads,
            chat: Arc::new(chat),
            storage_backend,
        }
    }
}
