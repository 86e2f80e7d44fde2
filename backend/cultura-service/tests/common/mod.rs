#![allow(dead_code)]

use actix_web::web;
use cultura_service::config::{ChatConfig, StorageBackend};
use cultura_service::db::MemoryCulturaRepository;
use cultura_service::services::ChatProxy;
use cultura_service::storage::UploadStore;
use cultura_service::AppState;
use std::sync::Arc;
use tempfile::TempDir;

pub const BOUNDARY: &str = "----culturaTestBoundary7MA4YWxk";

pub enum Part<'a> {
    Text(&'a str, &'a str),
    File {
        name: &'a str,
        filename: &'a str,
        content_type: &'a str,
        bytes: &'a [u8],
    },
}

/// Encode `parts` as `multipart/form-data`, returning the content type and body
pub fn multipart_body(parts: &[Part<'_>]) -> (String, Vec<u8>) {
    let mut body = Vec::new();
    for part in parts {
        body.extend_from_slice(format!("--{}\r\n", BOUNDARY).as_bytes());
        match part {
            Part::Text(name, value) => {
                body.extend_from_slice(
                    format!("Content-Disposition: form-data; name=\"{}\"\r\n\r\n", name)
                        .as_bytes(),
                );
                body.extend_from_slice(value.as_bytes());
            }
            Part::File {
                name,
                filename,
                content_type,
                bytes,
            } => {
                body.extend_from_slice(
                    format!(
                        "Content-Disposition: form-data; name=\"{}\"; filename=\"{}\"\r\nContent-Type: {}\r\n\r\n",
                        name, filename, content_type
                    )
                    .as_bytes(),
                );
                body.extend_from_slice(bytes);
            }
        }
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{}--\r\n", BOUNDARY).as_bytes());

    (format!("multipart/form-data; boundary={}", BOUNDARY), body)
}

pub fn chat_config(base_url: &str, api_key: &str) -> ChatConfig {
    ChatConfig {
        base_url: base_url.to_string(),
        api_key: api_key.to_string(),
        model: "test-model".to_string(),
        timeout_secs: 5,
        app_title: "EduAssist App".to_string(),
    }
}

/// State over the in-memory store with uploads under `dir`
pub fn memory_state(dir: &TempDir, max_upload_bytes: usize, chat: ChatConfig) -> web::Data<AppState> {
    let chat = ChatProxy::new(chat).expect("chat proxy");
    web::Data::new(AppState::new(
        Arc::new(MemoryCulturaRepository::new()),
        UploadStore::new(dir.path(), max_upload_bytes),
        chat,
        StorageBackend::Memory,
    ))
}
