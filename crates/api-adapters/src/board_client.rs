//! # Board API client
//! reqwest implementation of the `BoardApi` port against the JSON:API
//! endpoints of the board service.

use std::time::Duration;

use async_trait::async_trait;
use domains::document::BoardSnapshot;
use domains::error::ApiError;
use domains::models::{BoardInclude, CommentRef, PostDraft, PostRef};
use domains::ports::BoardApi;
use reqwest::header::{ACCEPT, CONTENT_TYPE};
use reqwest::{Client, Method, RequestBuilder, Response, StatusCode};
use secrecy::{ExposeSecret, SecretString};
use serde_json::Value;
use tracing::{debug, info};

use crate::dto::{comment_document, created_id, post_document};
use crate::retry::{retry_api, RetryConfig};

pub const DEFAULT_BASE_URL: &str = "https://api.padlet.dev/v1";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);
pub const API_KEY_HEADER: &str = "X-API-KEY";
pub const JSON_API: &str = "application/vnd.api+json";

/// Longest server error text kept in an `ApiError`.
const MAX_ERROR_TEXT: usize = 200;

#[derive(Debug)]
pub struct PadletClient {
    http: Client,
    base_url: String,
    api_key: SecretString,
    retry: RetryConfig,
}

impl PadletClient {
    pub fn new(base_url: &str, api_key: SecretString, timeout: Duration) -> Result<Self, ApiError> {
        let http = Client::builder()
            .timeout(timeout)
            .user_agent(concat!("artmap/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| ApiError::Transport(e.to_string()))?;
        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key,
            retry: RetryConfig::default(),
        })
    }

    /// Retry policy for reads. Writes are never retried.
    pub fn with_retry(mut self, retry: RetryConfig) -> Self {
        self.retry = retry;
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        self.http
            .request(method, format!("{}{}", self.base_url, path))
            .header(API_KEY_HEADER, self.api_key.expose_secret())
            .header(ACCEPT, JSON_API)
            .header(CONTENT_TYPE, JSON_API)
    }

    async fn post_json(&self, path: &str, document: &Value) -> Result<Value, ApiError> {
        send(self.request(Method::POST, path).body(document.to_string())).await
    }
}

async fn send(request: RequestBuilder) -> Result<Value, ApiError> {
    let response = request.send().await.map_err(transport_error)?;
    read_json(response).await
}

async fn read_json(response: Response) -> Result<Value, ApiError> {
    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(ApiError::Status {
            status: status.as_u16(),
            message: error_message(status, &body),
        });
    }
    response.json::<Value>().await.map_err(|e| {
        if e.is_timeout() {
            ApiError::Timeout(e.to_string())
        } else {
            ApiError::Decode(e.to_string())
        }
    })
}

fn transport_error(err: reqwest::Error) -> ApiError {
    if err.is_timeout() {
        ApiError::Timeout(err.to_string())
    } else if let Some(status) = err.status() {
        ApiError::Status {
            status: status.as_u16(),
            message: err.to_string(),
        }
    } else {
        ApiError::Transport(err.to_string())
    }
}

/// Best human-readable text for a failed response: the first JSON:API
/// error's `detail` or `title`, else the raw body, else the reason phrase.
fn error_message(status: StatusCode, body: &str) -> String {
    let from_document = serde_json::from_str::<Value>(body).ok().and_then(|doc| {
        let first = doc.get("errors")?.get(0)?;
        first
            .get("detail")
            .or_else(|| first.get("title"))
            .and_then(Value::as_str)
            .map(str::to_string)
    });
    let text = from_document.unwrap_or_else(|| body.trim().to_string());
    if text.is_empty() {
        return status.canonical_reason().unwrap_or("request failed").to_string();
    }
    text.chars().take(MAX_ERROR_TEXT).collect()
}

#[async_trait]
impl BoardApi for PadletClient {
    async fn fetch_board(&self, board_id: &str, include: BoardInclude) -> Result<BoardSnapshot, ApiError> {
        let path = format!("/boards/{board_id}");
        let raw = retry_api(&self.retry, "fetch_board", || {
            let mut request = self.request(Method::GET, &path);
            if let Some(value) = include.query_value() {
                request = request.query(&[("include", value)]);
            }
            send(request)
        })
        .await?;

        let snapshot = BoardSnapshot::from_value(raw).map_err(|e| ApiError::Decode(e.to_string()))?;
        debug!(board_id, included = snapshot.document.included.len(), "board fetched");
        Ok(snapshot)
    }

    async fn create_post(&self, board_id: &str, draft: &PostDraft) -> Result<PostRef, ApiError> {
        let response = self
            .post_json(&format!("/boards/{board_id}/posts"), &post_document(draft))
            .await?;
        let id = created_id(&response)?;
        info!(board_id, post_id = %id, "post created");
        Ok(PostRef { id })
    }

    async fn create_comment(&self, post_id: &str, html_content: &str) -> Result<CommentRef, ApiError> {
        let response = self
            .post_json(&format!("/posts/{post_id}/comments"), &comment_document(html_content))
            .await?;
        let id = created_id(&response)?;
        info!(post_id, comment_id = %id, "comment created");
        Ok(CommentRef { id })
    }
}
