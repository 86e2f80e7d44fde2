//! # API Envelope
//!
//! Wire types shared by `cultura-service` and `fatec-client`.
//!
//! Every JSON response produced by the service uses one envelope shape,
//! `{success, data?, error?, message?}`, modelled by [`ApiResponse`]. Clients
//! decode that single shape; the tolerant multi-shape decoding that older
//! endpoints required is isolated in [`legacy`].
//!
//! ## Modules
//!
//! - `envelope`: the standard response envelope
//! - `post`: the content post ("cultura") DTO and multipart field names
//! - `chat`: chat-completion request/response shapes used by the chat proxy
//! - `legacy`: best-effort extraction for endpoints outside the standard envelope

pub mod chat;
pub mod envelope;
pub mod legacy;
pub mod post;

pub use chat::{
    ChatChoice, ChatChoiceMessage, ChatCompletionRequest, ChatCompletionResponse, ChatRole,
    ChatUsage, WireMessage,
};
pub use envelope::ApiResponse;
pub use post::ContentPost;
