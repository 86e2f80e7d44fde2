//! # FATEC Client
//!
//! Everything the FATEC Cotia app does besides drawing pixels:
//!
//! - `config`: API host resolution per platform, timeouts
//! - `api`: HTTP client whose calls always resolve to an [`ApiResponse`]
//! - `screens`: home menu, Cultura list/form, jobs and security listings
//! - `catalog`: the FATEC Cotia course catalog
//! - `assistant`: EduAssist chat session, intent classification, chat backend
//! - `theme`: light/dark preference, palettes and the fade animation
//! - `notice`: user-facing alert messages
//!
//! A UI layer owns one [`ApiClient`], one [`ThemeContext`] and one
//! [`ChatSession`] per chat window, and drives them from user events.
//!
//! [`ApiResponse`]: api_envelope::ApiResponse

pub mod api;
pub mod assistant;
pub mod catalog;
pub mod config;
pub mod error;
pub mod notice;
pub mod screens;
pub mod theme;

pub use api::ApiClient;
pub use assistant::{ChatBackend, ChatSession, HttpChatBackend, IntentLabel};
pub use config::{ClientConfig, Platform};
pub use error::{ClientError, ThemeStoreError, UpstreamError};
pub use notice::{Notice, NoticeLevel};
pub use theme::{ThemeContext, ThemeMode};
