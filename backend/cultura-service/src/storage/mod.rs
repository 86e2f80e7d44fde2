/// Upload storage on the local filesystem
///
/// Images are written flat under the upload root as
/// `{unix_millis}-{8 hex}-{sanitized original name}` and referenced by that
/// filename from the `imagem` column.
use crate::error::{AppError, Result};
use chrono::Utc;
use std::path::{Path, PathBuf};
use tokio::fs;
use tokio::io::AsyncWriteExt;
use tracing::{debug, info, warn};
use uuid::Uuid;

const FALLBACK_NAME: &str = "upload";
const MAX_NAME_LEN: usize = 100;

#[derive(Debug, Clone)]
pub struct UploadStore {
    root: PathBuf,
    max_bytes: usize,
}

impl UploadStore {
    pub fn new(root: impl Into<PathBuf>, max_bytes: usize) -> Self {
        Self {
            root: root.into(),
            max_bytes,
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn max_bytes(&self) -> usize {
        self.max_bytes
    }

    /// Create the upload root if it does not exist yet
    pub async fn ensure_root(&self) -> Result<()> {
        fs::create_dir_all(&self.root).await?;
        info!(root = %self.root.display(), "Upload directory ready");
        Ok(())
    }

    /// Persist an uploaded file and return the stored filename
    pub async fn save(&self, original_name: &str, bytes: &[u8]) -> Result<String> {
        if bytes.len() > self.max_bytes {
            return Err(AppError::PayloadTooLarge(format!(
                "arquivo excede o limite de {} bytes",
                self.max_bytes
            )));
        }

        let filename = stored_filename(original_name);
        let path = self.root.join(&filename);

        let mut file = fs::OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&path)
            .await?;
        if let Err(err) = write_all(&mut file, bytes).await {
            drop(file);
            self.remove(&filename).await;
            return Err(err);
        }

        debug!(filename = %filename, size = bytes.len(), "Upload stored");
        Ok(filename)
    }

    /// Delete a stored file. Missing files and I/O failures are logged, not raised.
    pub async fn remove(&self, filename: &str) {
        let Some(path) = self.resolve(filename) else {
            warn!(filename = %filename, "Refusing to remove file outside the upload root");
            return;
        };

        match fs::remove_file(&path).await {
            Ok(()) => debug!(filename = %filename, "Upload removed"),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                debug!(filename = %filename, "Upload already gone");
            }
            Err(err) => warn!(filename = %filename, error = %err, "Failed to remove upload"),
        }
    }

    /// Map a stored filename to its path, rejecting anything that is not a
    /// plain file name
    pub fn resolve(&self, filename: &str) -> Option<PathBuf> {
        let plain = !filename.is_empty()
            && filename != "."
            && filename != ".."
            && !filename.contains(['/', '\\', '\0'])
            && !filename.starts_with('.');
        plain.then(|| self.root.join(filename))
    }
}

async fn write_all(file: &mut fs::File, bytes: &[u8]) -> Result<()> {
    file.write_all(bytes).await?;
    file.flush().await?;
    Ok(())
}

/// Keep only the last path component and replace anything outside
/// `[A-Za-z0-9._-]` with `_`
pub fn sanitize_filename(original: &str) -> String {
    let last = original
        .rsplit(['/', '\\'])
        .next()
        .unwrap_or_default()
        .trim();

    let mut cleaned: String = last
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-') {
                c
            } else {
                '_'
            }
        })
        .collect();

    let trimmed = cleaned.trim_start_matches('.');
    if trimmed.len() != cleaned.len() {
        cleaned = trimmed.to_string();
    }

    if cleaned.len() > MAX_NAME_LEN {
        cleaned = cleaned.split_off(cleaned.len() - MAX_NAME_LEN);
    }

    if cleaned.is_empty() {
        FALLBACK_NAME.to_string()
    } else {
        cleaned
    }
}

/// `{unix_millis}-{8 hex}-{sanitized}`
pub fn stored_filename(original: &str) -> String {
    let millis = Utc::now().timestamp_millis();
    let nonce = Uuid::new_v4().simple().to_string();
    format!("{}-{}-{}", millis, &nonce[..8], sanitize_filename(original))
}
