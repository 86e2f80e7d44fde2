/// EduAssist chat transcript and request state
///
/// ```text
/// Idle --begin_submit(non-blank)--> AwaitingReply --settle--> Idle
/// ```
///
/// At most one request is outstanding per session; submits while a reply is
/// pending, and blank submits, are ignored.
use super::backend::ChatBackend;
use super::intent::{classify, IntentLabel};
use super::prompt::system_prompt;
use crate::error::UpstreamError;
use crate::notice::Notice;
use api_envelope::{ChatCompletionRequest, WireMessage};
use chrono::{DateTime, Local, TimeZone, Utc};
use std::fmt;
use tracing::{debug, warn};

pub const GREETING: &str = "Olá! Sou o EduAssist, seu assistente para recomendação de cursos. Posso ajudar você a encontrar cursos baseados em seus interesses, objetivos de carreira ou áreas de estudo. Por onde gostaria de começar?";

pub const APOLOGY: &str =
    "Desculpe, estou com dificuldades técnicas no momento. Por favor, tente novamente mais tarde.";

pub const QUICK_ACTIONS: [&str; 4] = [
    "Cursos de programação",
    "Habilidades em demanda",
    "Cursos gratuitos",
    "Mudança de carreira",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Author {
    User,
    Assistant,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatMessage {
    pub id: u64,
    pub text: String,
    pub author: Author,
    pub timestamp: DateTime<Local>,
}

impl ChatMessage {
    pub fn is_user(&self) -> bool {
        self.author == Author::User
    }

    /// `HH:MM`
    pub fn formatted_time(&self) -> String {
        format_time(&self.timestamp)
    }

    fn to_wire(&self) -> WireMessage {
        match self.author {
            Author::User => WireMessage::user(self.text.clone()),
            Author::Assistant => WireMessage::assistant(self.text.clone()),
        }
    }
}

pub fn format_time<Tz>(timestamp: &DateTime<Tz>) -> String
where
    Tz: TimeZone,
    Tz::Offset: fmt::Display,
{
    timestamp.format("%H:%M").to_string()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Idle,
    AwaitingReply,
}

#[derive(Debug)]
pub struct ChatSession {
    messages: Vec<ChatMessage>,
    state: SessionState,
    last_id: u64,
    last_intent: Option<IntentLabel>,
}

impl Default for ChatSession {
    fn default() -> Self {
        Self::new()
    }
}

impl ChatSession {
    pub fn new() -> Self {
        let mut session = Self {
            messages: Vec::new(),
            state: SessionState::Idle,
            last_id: 0,
            last_intent: None,
        };
        session.push(Author::Assistant, GREETING.to_string());
        session
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    /// Input box and send button are enabled only while idle
    pub fn input_enabled(&self) -> bool {
        self.state == SessionState::Idle
    }

    pub fn last_intent(&self) -> Option<IntentLabel> {
        self.last_intent
    }

    pub fn quick_actions(&self) -> &'static [&'static str] {
        &QUICK_ACTIONS
    }

    /// Append the user's message and build the outbound request.
    ///
    /// Returns `None` (and changes nothing) for blank input or while a reply
    /// is pending.
    pub fn begin_submit(&mut self, text: &str) -> Option<ChatCompletionRequest> {
        let text = text.trim();
        if text.is_empty() || self.state != SessionState::Idle {
            return None;
        }

        let intent = classify(text);
        self.last_intent = Some(intent);
        debug!(intent = %intent, "Chat message classified");

        let mut wire = Vec::with_capacity(self.messages.len() + 2);
        wire.push(WireMessage::system(system_prompt(intent)));
        wire.extend(self.messages.iter().map(ChatMessage::to_wire));
        wire.push(WireMessage::user(text));

        self.push(Author::User, text.to_string());
        self.state = SessionState::AwaitingReply;

        Some(ChatCompletionRequest::new(wire))
    }

    /// Record the outcome of the pending request and return to idle.
    ///
    /// On failure the apology is appended and a notice for the UI returned.
    /// Ignored when no request is pending.
    pub fn settle(&mut self, outcome: Result<String, UpstreamError>) -> Option<Notice> {
        if self.state != SessionState::AwaitingReply {
            return None;
        }
        self.state = SessionState::Idle;

        match outcome {
            Ok(reply) => {
                self.push(Author::Assistant, reply);
                None
            }
            Err(err) => {
                warn!(error = %err, "Erro ao enviar mensagem");
                self.push(Author::Assistant, APOLOGY.to_string());
                Some(notice_for(&err))
            }
        }
    }

    /// `begin_submit`, the backend call and `settle` in one step
    pub async fn send<B>(&mut self, backend: &B, text: &str) -> Option<Notice>
    where
        B: ChatBackend + ?Sized,
    {
        let request = self.begin_submit(text)?;
        let outcome = backend.complete(request).await;
        self.settle(outcome)
    }

    /// Back to the greeting alone
    pub fn clear(&mut self) {
        self.messages.clear();
        self.last_intent = None;
        self.push(Author::Assistant, GREETING.to_string());
    }

    fn push(&mut self, author: Author, text: String) {
        let id = self.next_id();
        self.messages.push(ChatMessage {
            id,
            text,
            author,
            timestamp: Local::now(),
        });
    }

    /// Current time in milliseconds, bumped past the previous id when the
    /// clock has not advanced
    fn next_id(&mut self) -> u64 {
        let now = u64::try_from(Utc::now().timestamp_millis()).unwrap_or(0);
        let id = now.max(self.last_id + 1);
        self.last_id = id;
        id
    }
}

fn notice_for(err: &UpstreamError) -> Notice {
    match err.status() {
        Some(401) => Notice::error(
            "Erro de Autenticação",
            "Chave da API inválida. Verifique as configurações.",
        ),
        Some(404) => Notice::error(
            "Erro de Conexão",
            "Endpoint não encontrado. Verifique a URL da API.",
        ),
        _ => Notice::error("Erro", err.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use api_envelope::ChatRole;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct CountingBackend {
        calls: AtomicUsize,
        reply: Result<String, u16>,
    }

    impl CountingBackend {
        fn replying(text: &str) -> Self {
            Self {
                calls: AtomicUsize::new(0),
                reply: Ok(text.to_string()),
            }
        }

        fn failing(status: u16) -> Self {
            Self {
                calls: AtomicUsize::new(0),
                reply: Err(status),
            }
        }
    }

    #[async_trait]
    impl ChatBackend for CountingBackend {
        async fn complete(&self, _request: ChatCompletionRequest) -> Result<String, UpstreamError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            match &self.reply {
                Ok(text) => Ok(text.clone()),
                Err(status) => Err(UpstreamError::Status {
                    status: *status,
                    body: String::new(),
                }),
            }
        }
    }

    #[test]
    fn starts_with_greeting() {
        let session = ChatSession::new();
        assert_eq!(session.messages().len(), 1);
        assert_eq!(session.messages()[0].text, GREETING);
        assert!(!session.messages()[0].is_user());
        assert!(session.input_enabled());
    }

    #[tokio::test]
    async fn blank_submit_is_a_no_op() {
        let backend = CountingBackend::replying("nunca");
        let mut session = ChatSession::new();

        assert!(session.send(&backend, "   \n").await.is_none());
        assert!(session.begin_submit("").is_none());

        assert_eq!(backend.calls.load(Ordering::SeqCst), 0);
        assert_eq!(session.state(), SessionState::Idle);
        assert_eq!(session.messages().len(), 1);
    }

    #[test]
    fn only_one_request_outstanding() {
        let mut session = ChatSession::new();
        let request = session.begin_submit("Qual curso tem mais empregos?").unwrap();

        assert_eq!(session.state(), SessionState::AwaitingReply);
        assert!(!session.input_enabled());
        assert!(session.begin_submit("outra pergunta").is_none());
        assert_eq!(session.last_intent(), Some(IntentLabel::Employment));

        // system, greeting, user
        assert_eq!(request.messages.len(), 3);
        assert_eq!(request.messages[0].role, ChatRole::System);
        assert!(request.messages[0].content.contains("(employment)"));
        assert_eq!(request.messages[1], WireMessage::assistant(GREETING));
        assert_eq!(request.messages[2], WireMessage::user("Qual curso tem mais empregos?"));
    }

    #[tokio::test]
    async fn reply_is_appended_and_history_grows() {
        let backend = CountingBackend::replying("Recomendo Ciência de Dados.");
        let mut session = ChatSession::new();

        assert!(session.send(&backend, "Cursos de programação").await.is_none());
        assert_eq!(session.state(), SessionState::Idle);
        let texts: Vec<&str> = session.messages().iter().map(|m| m.text.as_str()).collect();
        assert_eq!(texts, vec![GREETING, "Cursos de programação", "Recomendo Ciência de Dados."]);

        let request = session.begin_submit("E gestão?").unwrap();
        assert_eq!(request.messages.len(), 5);
    }

    #[tokio::test]
    async fn failure_appends_apology_and_notice() {
        let backend = CountingBackend::failing(401);
        let mut session = ChatSession::new();

        let notice = session.send(&backend, "Oi").await.unwrap();
        assert_eq!(notice.title, "Erro de Autenticação");
        assert_eq!(session.messages().last().unwrap().text, APOLOGY);
        assert!(session.input_enabled());

        let backend = CountingBackend::failing(500);
        let notice = session.send(&backend, "Oi de novo").await.unwrap();
        assert_eq!(notice.title, "Erro");
        assert!(notice.message.contains("500"));
    }

    #[test]
    fn settle_without_pending_request_is_ignored() {
        let mut session = ChatSession::new();
        assert!(session.settle(Ok("solto".into())).is_none());
        assert_eq!(session.messages().len(), 1);
    }

    #[test]
    fn ids_strictly_increase() {
        let mut session = ChatSession::new();
        for i in 0..20 {
            session.begin_submit(&format!("pergunta {}", i)).unwrap();
            session.settle(Ok("resposta".into()));
        }
        let ids: Vec<u64> = session.messages().iter().map(|m| m.id).collect();
        assert!(ids.windows(2).all(|pair| pair[0] < pair[1]));
    }

    #[test]
    fn clear_resets_to_greeting() {
        let mut session = ChatSession::new();
        session.begin_submit("Oi").unwrap();
        session.settle(Ok("Olá".into()));
        session.clear();

        assert_eq!(session.messages().len(), 1);
        assert_eq!(session.messages()[0].text, GREETING);
        assert!(session.last_intent().is_none());
    }

    #[test]
    fn time_is_hours_and_minutes() {
        let ts = Utc.with_ymd_and_hms(2025, 3, 1, 9, 5, 42).unwrap();
        assert_eq!(format_time(&ts), "09:05");
        assert_eq!(QUICK_ACTIONS.len(), 4);
    }
}
