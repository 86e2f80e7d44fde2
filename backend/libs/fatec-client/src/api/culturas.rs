/// `/api/culturas` calls
use super::{failure, ApiClient};
use crate::error::ClientError;
use api_envelope::post::fields;
use api_envelope::{ApiResponse, ContentPost};
use reqwest::multipart::{Form, Part};
use std::path::Path;
use uuid::Uuid;

/// Image picked by the user, ready to upload
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageFile {
    pub filename: String,
    pub mime: String,
    pub bytes: Vec<u8>,
}

impl ImageFile {
    pub fn new(filename: impl Into<String>, bytes: Vec<u8>) -> Self {
        let filename = filename.into();
        let mime = mime_for_filename(&filename);
        Self {
            filename,
            mime,
            bytes,
        }
    }

    /// Read a picked file from disk
    pub async fn from_path(path: impl AsRef<Path>) -> std::io::Result<Self> {
        let path = path.as_ref();
        let bytes = tokio::fs::read(path).await?;
        let filename = path
            .file_name()
            .and_then(|name| name.to_str())
            .unwrap_or("imagem.jpg")
            .to_string();
        Ok(Self::new(filename, bytes))
    }
}

/// `image/{extension}`, defaulting to jpeg when the name has no extension
fn mime_for_filename(filename: &str) -> String {
    let ext = Path::new(filename)
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_ascii_lowercase());

    match ext.as_deref() {
        Some("jpg") | Some("jpeg") | None => mime::IMAGE_JPEG.to_string(),
        Some("png") => mime::IMAGE_PNG.to_string(),
        Some("gif") => mime::IMAGE_GIF.to_string(),
        Some("svg") => mime::IMAGE_SVG.to_string(),
        Some(other) => format!("image/{}", other),
    }
}

/// Fields sent on create/update
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CulturaDraft {
    pub title: String,
    pub description: String,
    pub image: Option<ImageFile>,
}

impl CulturaDraft {
    fn to_form(&self) -> Result<Form, ClientError> {
        let mut form = Form::new()
            .text(fields::TITLE, self.title.clone())
            .text(fields::DESCRIPTION, self.description.clone());

        if let Some(image) = &self.image {
            let part = Part::bytes(image.bytes.clone())
                .file_name(image.filename.clone())
                .mime_str(&image.mime)?;
            form = form.part(fields::IMAGE, part);
        }

        Ok(form)
    }
}

pub struct CulturasApi<'a> {
    client: &'a ApiClient,
}

impl<'a> CulturasApi<'a> {
    pub(crate) fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    fn collection_url(&self) -> String {
        self.client.url("culturas")
    }

    fn item_url(&self, id: Uuid) -> String {
        self.client.url(&format!("culturas/{}", id))
    }

    pub async fn list(&self) -> ApiResponse<Vec<ContentPost>> {
        let builder = self.client.http().get(self.collection_url());
        self.client.request(builder).await
    }

    pub async fn get(&self, id: Uuid) -> ApiResponse<ContentPost> {
        let builder = self.client.http().get(self.item_url(id));
        self.client.request(builder).await
    }

    pub async fn create(&self, draft: &CulturaDraft) -> ApiResponse<ContentPost> {
        let form = match draft.to_form() {
            Ok(form) => form,
            Err(err) => return failure(err),
        };
        let builder = self.client.http().post(self.collection_url()).multipart(form);
        self.client.request(builder).await
    }

    pub async fn update(&self, id: Uuid, draft: &CulturaDraft) -> ApiResponse<ContentPost> {
        let form = match draft.to_form() {
            Ok(form) => form,
            Err(err) => return failure(err),
        };
        let builder = self.client.http().put(self.item_url(id)).multipart(form);
        self.client.request(builder).await
    }

    pub async fn delete(&self, id: Uuid) -> ApiResponse<()> {
        let builder = self.client.http().delete(self.item_url(id));
        self.client.request(builder).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ClientConfig;
    use serde_json::json;
    use wiremock::matchers::{header_regex, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn post_json(id: Uuid, title: &str) -> serde_json::Value {
        json!({
            "_id": id,
            "titulo": title,
            "descricao": "Descrição",
            "imagem": null,
            "createdAt": "2025-03-01T12:00:00Z",
            "updatedAt": "2025-03-01T12:00:00Z"
        })
    }

    #[test]
    fn mime_follows_extension() {
        assert_eq!(mime_for_filename("foto.PNG"), "image/png");
        assert_eq!(mime_for_filename("foto"), "image/jpeg");
        assert_eq!(mime_for_filename("foto.webp"), "image/webp");
    }

    #[tokio::test]
    async fn list_decodes_posts() {
        let server = MockServer::start().await;
        let id = Uuid::new_v4();
        Mock::given(method("GET"))
            .and(path("/api/culturas"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({"success": true, "data": [post_json(id, "Sarau")]})),
            )
            .mount(&server)
            .await;

        let client = ApiClient::new(&ClientConfig::new(server.uri()));
        let posts = client.culturas().list().await.into_result().unwrap();
        assert_eq!(posts.len(), 1);
        assert_eq!(posts[0].id, id);
        assert_eq!(posts[0].title, "Sarau");
    }

    #[tokio::test]
    async fn create_sends_multipart() {
        let server = MockServer::start().await;
        let id = Uuid::new_v4();
        Mock::given(method("POST"))
            .and(path("/api/culturas"))
            .and(header_regex("content-type", "^multipart/form-data; boundary="))
            .respond_with(
                ResponseTemplate::new(201)
                    .set_body_json(json!({"success": true, "data": post_json(id, "Mostra")})),
            )
            .expect(1)
            .mount(&server)
            .await;

        let client = ApiClient::new(&ClientConfig::new(server.uri()));
        let draft = CulturaDraft {
            title: "Mostra".into(),
            description: "Descrição".into(),
            image: Some(ImageFile::new("capa.png", vec![1, 2, 3])),
        };
        let resp = client.culturas().create(&draft).await;
        assert!(resp.success);
        assert_eq!(resp.data.unwrap().id, id);
    }

    #[tokio::test]
    async fn delete_reads_ack() {
        let server = MockServer::start().await;
        let id = Uuid::new_v4();
        Mock::given(method("DELETE"))
            .and(path(format!("/api/culturas/{}", id)))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({"success": true, "message": "Post deletado com sucesso"})),
            )
            .mount(&server)
            .await;

        let client = ApiClient::new(&ClientConfig::new(server.uri()));
        let resp = client.culturas().delete(id).await;
        assert!(resp.success);
        assert_eq!(resp.message.as_deref(), Some("Post deletado com sucesso"));
    }
}
