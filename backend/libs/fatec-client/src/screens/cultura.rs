/// Cultura posts screen
use super::stored_image_url;
use crate::api::{ApiClient, CulturaDraft, ImageFile};
use crate::notice::Notice;
use api_envelope::ContentPost;
use tracing::{error, warn};
use uuid::Uuid;

const LOAD_FAILED: &str = "Não foi possível carregar os conteúdos";
const SAVE_FAILED: &str = "Erro ao salvar conteúdo";
const DELETE_FAILED: &str = "Erro ao excluir conteúdo";

/// A listed post with its image URL resolved against the API host
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CulturaItem {
    pub post: ContentPost,
    pub image_url: Option<String>,
}

impl CulturaItem {
    fn new(host: &str, post: ContentPost) -> Self {
        let image_url = stored_image_url(host, post.image.as_deref());
        Self { post, image_url }
    }
}

/// Image slot of the form
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum ImageChoice {
    #[default]
    None,
    /// Picked in this session, will be uploaded
    New(ImageFile),
    /// Already on the server (editing); kept unless replaced
    Existing(String),
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
struct FormState {
    editing: Option<Uuid>,
    title: String,
    description: String,
    image: ImageChoice,
}

/// Validated form contents, ready to send
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmitRequest {
    pub editing: Option<Uuid>,
    pub draft: CulturaDraft,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitStep {
    /// A submission is already in flight
    Busy,
    Rejected(Notice),
    Ready(SubmitRequest),
}

#[derive(Debug, Default)]
pub struct CulturaScreen {
    items: Vec<CulturaItem>,
    loading: bool,
    refreshing: bool,
    uploading: bool,
    form: Option<FormState>,
}

impl CulturaScreen {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn items(&self) -> &[CulturaItem] {
        &self.items
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn is_refreshing(&self) -> bool {
        self.refreshing
    }

    pub fn is_uploading(&self) -> bool {
        self.uploading
    }

    pub fn is_form_open(&self) -> bool {
        self.form.is_some()
    }

    pub fn editing(&self) -> Option<Uuid> {
        self.form.as_ref().and_then(|form| form.editing)
    }

    pub fn form_title(&self) -> &str {
        self.form.as_ref().map(|f| f.title.as_str()).unwrap_or_default()
    }

    pub fn form_description(&self) -> &str {
        self.form.as_ref().map(|f| f.description.as_str()).unwrap_or_default()
    }

    pub fn form_image(&self) -> Option<&ImageChoice> {
        self.form.as_ref().map(|f| &f.image)
    }

    /// Fetch the list. On failure the current items are kept.
    pub async fn load(&mut self, client: &ApiClient) -> Option<Notice> {
        self.loading = true;
        let resp = client.culturas().list().await;
        self.loading = false;
        self.refreshing = false;

        match resp.into_result() {
            Ok(posts) => {
                let host = client.api_host();
                self.items = posts
                    .into_iter()
                    .map(|post| CulturaItem::new(host, post))
                    .collect();
                None
            }
            Err(e) => {
                error!(error = %e, "Erro ao carregar conteúdos");
                Some(Notice::error("Erro", LOAD_FAILED))
            }
        }
    }

    /// Pull-to-refresh
    pub async fn refresh(&mut self, client: &ApiClient) -> Option<Notice> {
        self.refreshing = true;
        self.load(client).await
    }

    pub fn open_create(&mut self) {
        self.form = Some(FormState::default());
    }

    pub fn open_edit(&mut self, item: &CulturaItem) {
        self.form = Some(FormState {
            editing: Some(item.post.id),
            title: item.post.title.clone(),
            description: item.post.description.clone(),
            image: item
                .image_url
                .clone()
                .map(ImageChoice::Existing)
                .unwrap_or_default(),
        });
    }

    pub fn close_form(&mut self) {
        self.form = None;
    }

    pub fn set_title(&mut self, title: impl Into<String>) {
        if let Some(form) = self.form.as_mut() {
            form.title = title.into();
        }
    }

    pub fn set_description(&mut self, description: impl Into<String>) {
        if let Some(form) = self.form.as_mut() {
            form.description = description.into();
        }
    }

    pub fn pick_image(&mut self, image: ImageFile) {
        if let Some(form) = self.form.as_mut() {
            form.image = ImageChoice::New(image);
        }
    }

    /// Validate the form and mark the screen as uploading
    pub fn begin_submit(&mut self) -> SubmitStep {
        if self.uploading {
            return SubmitStep::Busy;
        }
        let Some(form) = self.form.as_ref() else {
            return SubmitStep::Busy;
        };

        if form.title.trim().is_empty() || form.description.trim().is_empty() {
            return SubmitStep::Rejected(Notice::warning("Preencha todos os campos!"));
        }

        let image = match &form.image {
            ImageChoice::None => {
                return SubmitStep::Rejected(Notice::warning("Selecione uma imagem!"))
            }
            ImageChoice::New(file) => Some(file.clone()),
            ImageChoice::Existing(_) => None,
        };

        self.uploading = true;
        SubmitStep::Ready(SubmitRequest {
            editing: form.editing,
            draft: CulturaDraft {
                title: form.title.clone(),
                description: form.description.clone(),
                image,
            },
        })
    }

    /// Send a validated request; on success close the form and reload
    pub async fn finish_submit(&mut self, client: &ApiClient, request: SubmitRequest) -> Notice {
        let api = client.culturas();
        let resp = match request.editing {
            Some(id) => api.update(id, &request.draft).await,
            None => api.create(&request.draft).await,
        };
        self.uploading = false;

        if !resp.success {
            warn!(error = resp.error_message(), "Resposta inesperada ao salvar conteúdo");
            return Notice::error("Erro", resp.error.unwrap_or_else(|| SAVE_FAILED.to_string()));
        }

        self.close_form();
        if let Some(notice) = self.load(client).await {
            return notice;
        }

        Notice::success(if request.editing.is_some() {
            "Conteúdo atualizado!"
        } else {
            "Conteúdo criado!"
        })
    }

    /// `None` when a submission is already in flight
    pub async fn submit(&mut self, client: &ApiClient) -> Option<Notice> {
        match self.begin_submit() {
            SubmitStep::Busy => None,
            SubmitStep::Rejected(notice) => Some(notice),
            SubmitStep::Ready(request) => Some(self.finish_submit(client, request).await),
        }
    }

    /// Title and body of the delete confirmation
    pub fn delete_prompt(item: &CulturaItem) -> (String, String) {
        (
            "Confirmar exclusão".to_string(),
            format!("Deseja excluir \"{}\"?", item.post.title),
        )
    }

    pub async fn delete(&mut self, client: &ApiClient, id: Uuid) -> Notice {
        let resp = client.culturas().delete(id).await;
        if !resp.success {
            return Notice::error("Erro", resp.error.unwrap_or_else(|| DELETE_FAILED.to_string()));
        }

        if let Some(notice) = self.load(client).await {
            return notice;
        }
        Notice::success("Conteúdo excluído!")
    }
}
