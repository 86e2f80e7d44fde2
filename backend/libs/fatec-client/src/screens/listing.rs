/// Read-only listings fed from auxiliary endpoints (jobs, security notices)
///
/// These endpoints are not guaranteed to use the standard envelope, so the
/// body is read through [`extract_data`]. A failed load is logged and the
/// current cards are kept; the screen shows no alert.
use super::{build_image_url, stored_image_url};
use crate::api::ApiClient;
use api_envelope::legacy::extract_data;
use serde_json::{Map, Value};
use tracing::{debug, error};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListingKind {
    Jobs,
    Security,
}

impl ListingKind {
    /// Path under the API base
    pub fn path(&self) -> &'static str {
        match self {
            ListingKind::Jobs => "empregos",
            ListingKind::Security => "seguranca",
        }
    }

    pub fn empty_message(&self) -> &'static str {
        match self {
            ListingKind::Jobs => "Nenhuma vaga disponível",
            ListingKind::Security => "Nenhum conteúdo disponível",
        }
    }

    /// Body text shown on a card
    pub fn card_text(&self, card: &ContentCard) -> String {
        match self {
            ListingKind::Jobs => format!(
                "{}\n\n📍 {}\n💰 {}\n🏢 {}",
                card.description,
                card.location.as_deref().unwrap_or_default(),
                card.salary.as_deref().unwrap_or_default(),
                card.company.as_deref().unwrap_or_default(),
            ),
            ListingKind::Security => card.description.clone(),
        }
    }
}

/// Card shown by the listing screens
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContentCard {
    pub id: String,
    pub title: String,
    pub description: String,
    pub image_url: Option<String>,
    /// Job listings only
    pub location: Option<String>,
    pub salary: Option<String>,
    pub company: Option<String>,
}

impl ContentCard {
    fn from_item(host: &str, item: &Map<String, Value>) -> Self {
        let text = |key: &str| item.get(key).and_then(Value::as_str);
        let owned = |key: &str| text(key).map(str::to_string);

        let id = item
            .get("_id")
            .or_else(|| item.get("id"))
            .map(|id| match id {
                Value::String(s) => s.clone(),
                other => other.to_string(),
            })
            .unwrap_or_default();

        // `imagem_url` is a path on the API host; `imagem` a stored upload
        let image_url = match text("imagem_url").filter(|url| !url.is_empty()) {
            Some(url) => build_image_url(host, Some(url)),
            None => stored_image_url(host, text("imagem")),
        };

        Self {
            id,
            title: owned("titulo").unwrap_or_default(),
            description: owned("descricao").unwrap_or_default(),
            image_url,
            location: owned("localizacao"),
            salary: owned("salario"),
            company: owned("empresa"),
        }
    }
}

/// Read cards from a response of unknown shape. Items that are not objects
/// are skipped.
pub fn cards_from_legacy(host: &str, resp: &Value) -> Vec<ContentCard> {
    extract_data(resp)
        .iter()
        .filter_map(Value::as_object)
        .map(|item| ContentCard::from_item(host, item))
        .collect()
}

#[derive(Debug)]
pub struct ListingScreen {
    kind: ListingKind,
    items: Vec<ContentCard>,
    loading: bool,
    refreshing: bool,
}

impl ListingScreen {
    pub fn new(kind: ListingKind) -> Self {
        Self {
            kind,
            items: Vec::new(),
            loading: false,
            refreshing: false,
        }
    }

    pub fn kind(&self) -> ListingKind {
        self.kind
    }

    pub fn items(&self) -> &[ContentCard] {
        &self.items
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn is_refreshing(&self) -> bool {
        self.refreshing
    }

    /// Placeholder text once a load finished with nothing to show
    pub fn empty_message(&self) -> Option<&'static str> {
        (!self.loading && self.items.is_empty()).then(|| self.kind.empty_message())
    }

    pub fn card_text(&self, card: &ContentCard) -> String {
        self.kind.card_text(card)
    }

    /// Returns whether the list was replaced
    pub async fn load(&mut self, client: &ApiClient) -> bool {
        self.loading = true;
        let resp = client.get_json(self.kind.path()).await;
        self.loading = false;
        self.refreshing = false;

        if resp.get("success").and_then(Value::as_bool) == Some(false) {
            error!(
                listing = self.kind.path(),
                error = resp.get("error").and_then(serde_json::Value::as_str).unwrap_or_default(),
                "Erro ao carregar listagem"
            );
            return false;
        }

        self.items = cards_from_legacy(client.api_host(), &resp);
        debug!(listing = self.kind.path(), count = self.items.len(), "Listagem carregada");
        true
    }

    /// Pull-to-refresh
    pub async fn refresh(&mut self, client: &ApiClient) -> bool {
        self.refreshing = true;
        self.load(client).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ClientConfig;
    use serde_json::json;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const HOST: &str = "http://10.0.2.2:3300";

    #[test]
    fn images_resolve_against_host_and_uploads() {
        let body = json!({
            "data": [
                {"id": 7, "titulo": "Vaga", "descricao": "Estágio", "imagem": "v.png"},
                {"_id": "abc", "titulo": "Aviso", "imagem_url": "/uploads/x.png", "imagem": "z.png"},
                {"_id": "ext", "imagem_url": "https://cdn.example.com/y.png"},
                {"_id": "none"},
                "ignored"
            ]
        });

        let cards = cards_from_legacy(HOST, &body);
        assert_eq!(cards.len(), 4);
        assert_eq!(cards[0].id, "7");
        assert_eq!(
            cards[0].image_url.as_deref(),
            Some("http://10.0.2.2:3300/uploads/v.png")
        );
        assert_eq!(cards[1].id, "abc");
        assert_eq!(cards[1].description, "");
        assert_eq!(
            cards[1].image_url.as_deref(),
            Some("http://10.0.2.2:3300/uploads/x.png")
        );
        assert_eq!(
            cards[2].image_url.as_deref(),
            Some("https://cdn.example.com/y.png")
        );
        assert_eq!(cards[3].image_url, None);

        assert!(cards_from_legacy(HOST, &json!({"success": false, "error": "x"})).is_empty());
    }

    #[test]
    fn job_card_text_lists_details() {
        let card = ContentCard {
            description: "Estágio em desenvolvimento".into(),
            location: Some("Cotia".into()),
            salary: Some("R$ 1.800".into()),
            company: Some("Acme".into()),
            ..ContentCard::default()
        };
        assert_eq!(
            ListingKind::Jobs.card_text(&card),
            "Estágio em desenvolvimento\n\n📍 Cotia\n💰 R$ 1.800\n🏢 Acme"
        );
        assert_eq!(
            ListingKind::Security.card_text(&card),
            "Estágio em desenvolvimento"
        );
    }

    #[tokio::test]
    async fn jobs_load_from_bare_array() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/empregos"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([
                {"_id": "1", "titulo": "Dev Jr", "descricao": "Vaga", "empresa": "Acme"}
            ])))
            .mount(&server)
            .await;
        let client = ApiClient::new(&ClientConfig::new(server.uri()));

        let mut screen = ListingScreen::new(ListingKind::Jobs);
        assert!(screen.load(&client).await);
        assert_eq!(screen.items().len(), 1);
        assert_eq!(screen.items()[0].company.as_deref(), Some("Acme"));
        assert_eq!(screen.empty_message(), None);
    }

    #[tokio::test]
    async fn failed_refresh_keeps_cards() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/seguranca"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "success": true,
                "data": [{"_id": "1", "titulo": "Golpe do Pix", "descricao": "Cuidado"}]
            })))
            .up_to_n_times(1)
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/api/seguranca"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;
        let client = ApiClient::new(&ClientConfig::new(server.uri()));

        let mut screen = ListingScreen::new(ListingKind::Security);
        assert!(screen.load(&client).await);
        assert!(!screen.refresh(&client).await);
        assert!(!screen.is_refreshing());
        assert_eq!(screen.items().len(), 1);
        assert_eq!(screen.items()[0].title, "Golpe do Pix");
    }

    #[tokio::test]
    async fn empty_listing_shows_placeholder() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/empregos"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"data": []})))
            .mount(&server)
            .await;

        let mut screen = ListingScreen::new(ListingKind::Jobs);
        screen.load(&ApiClient::new(&ClientConfig::new(server.uri()))).await;
        assert_eq!(screen.empty_message(), Some("Nenhuma vaga disponível"));
    }
}
