/// Serve stored images under `/uploads/{filename}`
use crate::error::{AppError, Result};
use crate::AppState;
use actix_web::http::header;
use actix_web::{web, HttpResponse};
use std::path::Path;

/// GET /uploads/{filename}
pub async fn serve_upload(
    state: web::Data<AppState>,
    filename: web::Path<String>,
) -> Result<HttpResponse> {
    let not_found = || AppError::NotFound("Arquivo não encontrado".to_string());

    let path = state.uploads.resolve(&filename).ok_or_else(not_found)?;
    let bytes = match tokio::fs::read(&path).await {
        Ok(bytes) => bytes,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Err(not_found()),
        Err(err) => return Err(err.into()),
    };

    Ok(HttpResponse::Ok()
        .content_type(content_type_for(&path))
        .insert_header((header::CACHE_CONTROL, "public, max-age=86400"))
        .insert_header((header::X_CONTENT_TYPE_OPTIONS, "nosniff"))
        .body(bytes))
}

/// Content type from the file extension; unknown types are served as bytes
pub fn content_type_for(path: &Path) -> mime::Mime {
    let ext = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_ascii_lowercase());

    match ext.as_deref() {
        Some("png") => mime::IMAGE_PNG,
        Some("jpg") | Some("jpeg") => mime::IMAGE_JPEG,
        Some("gif") => mime::IMAGE_GIF,
        Some("bmp") => mime::IMAGE_BMP,
        Some("svg") => mime::IMAGE_SVG,
        Some("webp") => "image/webp".parse().unwrap_or(mime::APPLICATION_OCTET_STREAM),
        Some("heic") => "image/heic".parse().unwrap_or(mime::APPLICATION_OCTET_STREAM),
        _ => mime::APPLICATION_OCTET_STREAM,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn content_type_follows_extension() {
        assert_eq!(content_type_for(Path::new("a.PNG")), mime::IMAGE_PNG);
        assert_eq!(content_type_for(Path::new("a.jpeg")), mime::IMAGE_JPEG);
        assert_eq!(content_type_for(Path::new("a.webp")).essence_str(), "image/webp");
        assert_eq!(content_type_for(Path::new("a")), mime::APPLICATION_OCTET_STREAM);
    }
}
