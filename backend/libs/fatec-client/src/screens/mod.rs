/// Content screen view models
///
/// State and decisions behind the app's screens; rendering lives in the app.
/// [`menu`] lists the home entries, [`CulturaScreen`] drives the Cultura
/// posts screen and [`ListingScreen`] the read-only jobs and security
/// listings. The helpers here turn stored image names into absolute URLs.
pub mod cultura;
pub mod listing;
pub mod menu;

pub use cultura::{CulturaItem, CulturaScreen, ImageChoice, SubmitRequest, SubmitStep};
pub use listing::{cards_from_legacy, ContentCard, ListingKind, ListingScreen};
pub use menu::{Destination, MenuItem, MENU};

/// Absolute URL for an image reference.
///
/// Blank or missing references give `None`; anything starting with `http`
/// is returned unchanged; otherwise one leading slash is dropped and the
/// path is joined to `host`. Without a host the reference is returned as is.
pub fn build_image_url(host: &str, image: Option<&str>) -> Option<String> {
    let image = image.filter(|image| !image.is_empty())?;
    if image.starts_with("http") {
        return Some(image.to_string());
    }

    let host = host.strip_suffix('/').unwrap_or(host);
    let path = image.strip_prefix('/').unwrap_or(image);
    if host.is_empty() {
        Some(image.to_string())
    } else {
        Some(format!("{}/{}", host, path))
    }
}

/// Server path for a stored image. Bare filenames live under `uploads/`.
pub fn upload_path(image: &str) -> String {
    if image.starts_with("http") || image.starts_with('/') || image.starts_with("uploads/") {
        image.to_string()
    } else {
        format!("uploads/{}", image)
    }
}

/// URL for an image stored by the cultura service
pub fn stored_image_url(host: &str, image: Option<&str>) -> Option<String> {
    let path = upload_path(image.filter(|image| !image.is_empty())?);
    build_image_url(host, Some(&path))
}
