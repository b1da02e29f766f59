//! Transport abstraction for the remote APIs.
//!
//! Stores only see the [`Transport`] trait, so they can be built against the
//! real HTTP client or an in-memory stand-in.

pub mod client;

pub use client::HttpTransport;

use crate::error::ApiError;
use async_trait::async_trait;
use serde_json::Value;

/// One file part of a multipart request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilePart {
    pub field: String,
    pub file_name: String,
    pub content_type: mime::Mime,
    pub bytes: Vec<u8>,
}

/// A multipart form body, kept transport-neutral until it is sent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MultipartPayload {
    pub fields: Vec<(String, String)>,
    pub files: Vec<FilePart>,
}

impl MultipartPayload {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a text field.
    pub fn text(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.fields.push((name.into(), value.into()));
        self
    }

    /// Append a file part.
    pub fn file(mut self, part: FilePart) -> Self {
        self.files.push(part);
        self
    }

    /// Value of the first text field with this name.
    pub fn field(&self, name: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    /// First file part submitted under this field name.
    pub fn file_part(&self, name: &str) -> Option<&FilePart> {
        self.files.iter().find(|part| part.field == name)
    }
}

/// Trait for API transports.
///
/// Paths are relative to the transport's base URL. Both methods resolve to the
/// decoded JSON body of a 2xx response, or an [`ApiError`] otherwise.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Issue a GET with the given query parameters.
    async fn get(&self, path: &str, query: &[(&str, String)]) -> Result<Value, ApiError>;

    /// Issue a multipart POST.
    async fn post_multipart(&self, path: &str, payload: MultipartPayload)
        -> Result<Value, ApiError>;
}
