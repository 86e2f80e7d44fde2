/// Cultura handlers - HTTP endpoints for post operations
///
/// Create and update take `multipart/form-data` with text fields `titulo`,
/// `descricao` and at most one file field `imagem`.
use crate::error::{AppError, Result};
use crate::models::{CulturaChanges, NewCultura, UploadedFile};
use crate::services::culturas::{DELETED_MESSAGE, NOT_FOUND_MESSAGE};
use crate::AppState;
use actix_multipart::{Field, Multipart};
use actix_web::{web, HttpResponse};
use api_envelope::post::fields;
use api_envelope::ApiResponse;
use futures_util::{StreamExt, TryStreamExt};
use uuid::Uuid;

const MAX_TEXT_FIELD_BYTES: usize = 64 * 1024;

/// Parsed multipart body
#[derive(Debug, Default)]
pub struct CulturaForm {
    pub title: Option<String>,
    pub description: Option<String>,
    pub image: Option<UploadedFile>,
}

impl CulturaForm {
    /// Read every part of the body. Unknown text fields are ignored; a file
    /// under any name but `imagem`, or a second file, is rejected.
    pub async fn read(mut payload: Multipart, max_file_bytes: usize) -> Result<Self> {
        let mut form = CulturaForm::default();

        while let Some(field) = payload.try_next().await? {
            let name = field.name().unwrap_or_default().to_string();
            let filename = field
                .content_disposition()
                .and_then(|cd| cd.get_filename())
                .map(str::to_string);

            match filename {
                Some(original_name) => {
                    if name != fields::IMAGE {
                        return Err(AppError::Validation(format!(
                            "Arquivo enviado no campo inesperado '{}'; use '{}'",
                            name,
                            fields::IMAGE
                        )));
                    }
                    if form.image.is_some() {
                        return Err(AppError::Validation(
                            "Apenas um arquivo é permitido por post".to_string(),
                        ));
                    }

                    let bytes = read_limited(field, max_file_bytes, || {
                        AppError::PayloadTooLarge(format!(
                            "arquivo excede o limite de {} bytes",
                            max_file_bytes
                        ))
                    })
                    .await?;

                    // Browsers send an empty part when no file was chosen.
                    if original_name.is_empty() && bytes.is_empty() {
                        continue;
                    }
                    form.image = Some(UploadedFile {
                        original_name,
                        bytes,
                    });
                }
                None => {
                    let bytes = read_limited(field, MAX_TEXT_FIELD_BYTES, || {
                        AppError::PayloadTooLarge(format!("campo '{}' muito grande", name))
                    })
                    .await?;
                    let value = String::from_utf8(bytes).map_err(|_| {
                        AppError::Validation(format!("campo '{}' não é UTF-8 válido", name))
                    })?;

                    match name.as_str() {
                        fields::TITLE => form.title = Some(value),
                        fields::DESCRIPTION => form.description = Some(value),
                        other => tracing::debug!(field = %other, "Ignoring unknown form field"),
                    }
                }
            }
        }

        Ok(form)
    }
}

async fn read_limited<F>(mut field: Field, limit: usize, too_large: F) -> Result<Vec<u8>>
where
    F: Fn() -> AppError,
{
    let mut buffer = Vec::new();
    while let Some(chunk) = field.next().await {
        let chunk = chunk?;
        if buffer.len() + chunk.len() > limit {
            return Err(too_large());
        }
        buffer.extend_from_slice(&chunk);
    }
    Ok(buffer)
}

fn parse_post_id(raw: &str) -> Result<Uuid> {
    Uuid::parse_str(raw).map_err(|_| AppError::NotFound(NOT_FOUND_MESSAGE.to_string()))
}

/// POST /api/culturas
pub async fn create_cultura(
    state: web::Data<AppState>,
    payload: Multipart,
) -> Result<HttpResponse> {
    let form = CulturaForm::read(payload, state.uploads.max_bytes()).await?;

    let input = NewCultura {
        title: form.title.unwrap_or_default(),
        description: form.description.unwrap_or_default(),
    };
    let post = state.culturas.create(input, form.image).await?;

    Ok(HttpResponse::Created().json(ApiResponse::ok(post)))
}

/// GET /api/culturas
pub async fn list_culturas(state: web::Data<AppState>) -> Result<HttpResponse> {
    let posts = state.culturas.list().await?;
    Ok(HttpResponse::Ok().json(ApiResponse::ok(posts)))
}

/// GET /api/culturas/{id}
pub async fn get_cultura(
    state: web::Data<AppState>,
    id: web::Path<String>,
) -> Result<HttpResponse> {
    let id = parse_post_id(&id)?;
    let post = state.culturas.get(id).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::ok(post)))
}

/// PUT /api/culturas/{id}
pub async fn update_cultura(
    state: web::Data<AppState>,
    id: web::Path<String>,
    payload: Multipart,
) -> Result<HttpResponse> {
    let id = parse_post_id(&id)?;
    let form = CulturaForm::read(payload, state.uploads.max_bytes()).await?;

    let changes = CulturaChanges {
        title: form.title,
        description: form.description,
    };
    let post = state.culturas.update(id, changes, form.image).await?;

    Ok(HttpResponse::Ok().json(ApiResponse::ok(post)))
}

/// DELETE /api/culturas/{id}
pub async fn delete_cultura(
    state: web::Data<AppState>,
    id: web::Path<String>,
) -> Result<HttpResponse> {
    let id = parse_post_id(&id)?;
    state.culturas.delete(id).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::<()>::ack(DELETED_MESSAGE)))
}
