//! reqwest-backed transport.

use super::{MultipartPayload, Transport};
use crate::app_config::HttpConfig;
use crate::error::ApiError;
use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use serde_json::Value;
use std::time::Duration;
use url::Url;

/// HTTP transport pointed at one base URL.
#[derive(Clone)]
pub struct HttpTransport {
    client: reqwest::Client,
    base_url: Url,
}

impl HttpTransport {
    /// Build a transport for `base_url`.
    ///
    /// Fails if the URL is empty, unparseable, or not http/https.
    pub fn new(base_url: &str, http: &HttpConfig) -> Result<Self, ApiError> {
        if base_url.trim().is_empty() {
            return Err(ApiError::Config("base URL is not configured".to_string()));
        }

        let base_url = Url::parse(base_url.trim())?;
        match base_url.scheme() {
            "http" | "https" => {}
            other => {
                return Err(ApiError::Config(format!(
                    "unsupported URL scheme: {}",
                    other
                )))
            }
        }

        let mut builder = reqwest::Client::builder().user_agent(http.user_agent.clone());
        if http.timeout_secs > 0 {
            builder = builder.timeout(Duration::from_secs(http.timeout_secs));
        }
        let client = builder
            .build()
            .map_err(|e| ApiError::Config(format!("failed to create HTTP client: {}", e)))?;

        log::debug!("HttpTransport initialized for {}", base_url);
        Ok(Self { client, base_url })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Resolve a path against the base URL, keeping any base path prefix.
    ///
    /// `Url::join` would drop the last base segment for paths with a leading
    /// slash, so the two are concatenated instead.
    fn endpoint(&self, path: &str) -> Result<Url, ApiError> {
        let base = self.base_url.as_str().trim_end_matches('/');
        let path = path.trim_start_matches('/');
        Ok(Url::parse(&format!("{}/{}", base, path))?)
    }

    async fn read_json(response: reqwest::Response) -> Result<Value, ApiError> {
        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(ApiError::Status {
                status: status.as_u16(),
                message: message.trim().to_string(),
            });
        }

        let body = response.bytes().await?;
        if body.is_empty() {
            return Ok(Value::Null);
        }
        Ok(serde_json::from_slice(&body)?)
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn get(&self, path: &str, query: &[(&str, String)]) -> Result<Value, ApiError> {
        let mut url = self.endpoint(path)?;
        if !query.is_empty() {
            let mut pairs = url.query_pairs_mut();
            for (key, value) in query {
                pairs.append_pair(key, value);
            }
        }

        log::debug!("GET {}", url.path());
        let response = self.client.get(url).send().await?;
        Self::read_json(response).await
    }

    async fn post_multipart(
        &self,
        path: &str,
        payload: MultipartPayload,
    ) -> Result<Value, ApiError> {
        let url = self.endpoint(path)?;

        let mut form = Form::new();
        for (name, value) in payload.fields {
            form = form.text(name, value);
        }
        for file in payload.files {
            let part = Part::bytes(file.bytes)
                .file_name(file.file_name)
                .mime_str(file.content_type.as_ref())
                .map_err(|e| ApiError::Config(format!("invalid attachment type: {}", e)))?;
            form = form.part(file.field, part);
        }

        log::debug!("POST multipart {}", url.path());
        let response = self.client.post(url).multipart(form).send().await?;
        Self::read_json(response).await
    }
}
