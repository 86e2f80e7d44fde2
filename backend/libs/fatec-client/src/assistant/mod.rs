/// EduAssist chat assistant
///
/// - `intent`: ordered keyword rules that label the user's question
/// - `prompt`: system prompt with the course catalog and detected topic
/// - `session`: transcript and Idle/AwaitingReply state machine
/// - `backend`: the `ChatBackend` seam and its HTTP implementation
pub mod backend;
pub mod intent;
pub mod prompt;
pub mod session;

pub use backend::{ChatBackend, HttpChatBackend};
pub use intent::{classify, IntentLabel};
pub use prompt::system_prompt;
pub use session::{Author, ChatMessage, ChatSession, SessionState, APOLOGY, GREETING, QUICK_ACTIONS};
