/// Content post ("cultura") wire model
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Multipart field names accepted by `POST/PUT /api/culturas`
pub mod fields {
    pub const TITLE: &str = "titulo";
    pub const DESCRIPTION: &str = "descricao";
    pub const IMAGE: &str = "imagem";
}

/// A title/description record with an optional uploaded image.
///
/// Field names on the wire follow the mobile app (`_id`, `titulo`,
/// `descricao`, `imagem`, `createdAt`, `updatedAt`). `image` is the stored
/// filename relative to the upload root and serializes as `null` when absent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentPost {
    #[serde(rename = "_id")]
    pub id: Uuid,
    #[serde(rename = "titulo")]
    pub title: String,
    #[serde(rename = "descricao")]
    pub description: String,
    #[serde(rename = "imagem", default)]
    pub image: Option<String>,
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
    #[serde(rename = "updatedAt")]
    pub updated_at: DateTime<Utc>,
}
