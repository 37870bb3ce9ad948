//! In-process stand-in for the board service's JSON:API.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::extract::{Path, Query, State};
use axum::http::{HeaderMap, StatusCode};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::{json, Value};

pub const FAKE_API_KEY: &str = "test-key";

/// One request as the fake server saw it.
#[derive(Debug, Clone, PartialEq)]
pub struct SeenRequest {
    pub path: String,
    pub api_key: Option<String>,
    pub content_type: Option<String>,
    pub query: HashMap<String, String>,
    pub body: Value,
}

#[derive(Debug, Default)]
struct Inner {
    board: Value,
    /// Requests still to be answered with 503
    unavailable: AtomicUsize,
    /// Delay before every answer
    delay: Mutex<Option<Duration>>,
    seen: Mutex<Vec<SeenRequest>>,
    created: AtomicUsize,
}

#[derive(Debug, Clone, Default)]
pub struct FakeBoard {
    inner: Arc<Inner>,
}

impl FakeBoard {
    pub fn new(board: Value) -> Self {
        Self {
            inner: Arc::new(Inner {
                board,
                ..Default::default()
            }),
        }
    }

    /// Answers the next `n` requests with 503.
    pub fn fail_next(self, n: usize) -> Self {
        self.inner.unavailable.store(n, Ordering::SeqCst);
        self
    }

    pub fn delay(self, delay: Duration) -> Self {
        if let Ok(mut slot) = self.inner.delay.lock() {
            *slot = Some(delay);
        }
        self
    }

    pub fn seen(&self) -> Vec<SeenRequest> {
        self.inner.seen.lock().map(|s| s.clone()).unwrap_or_default()
    }

    /// Serves the fake on an ephemeral local port; returns the API base URL.
    pub async fn spawn(&self) -> std::io::Result<String> {
        let app = Router::new()
            .route("/v1/boards/{id}", get(fetch_board))
            .route("/v1/boards/{id}/posts", post(create_post))
            .route("/v1/posts/{id}/comments", post(create_comment))
            .with_state(self.clone());
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await?;
        let addr = listener.local_addr()?;
        tokio::spawn(async move {
            let _ = axum::serve(listener, app).await;
        });
        Ok(format!("http://{addr}/v1"))
    }

    /// Records the request and decides on the failure answer, if any.
    async fn admit(&self, request: SeenRequest) -> Result<(), (StatusCode, Json<Value>)> {
        let authorized = request.api_key.as_deref() == Some(FAKE_API_KEY);
        if let Ok(mut seen) = self.inner.seen.lock() {
            seen.push(request);
        }
        let delay = self.inner.delay.lock().ok().and_then(|d| *d);
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }
        if !authorized {
            return Err(error(StatusCode::UNAUTHORIZED, "Invalid API key"));
        }
        let unavailable = self
            .inner
            .unavailable
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
            .is_ok();
        if unavailable {
            return Err(error(StatusCode::SERVICE_UNAVAILABLE, "try again later"));
        }
        Ok(())
    }

    fn next_id(&self, kind: &str) -> String {
        format!("{kind}-{}", self.inner.created.fetch_add(1, Ordering::SeqCst) + 1)
    }
}

fn error(status: StatusCode, detail: &str) -> (StatusCode, Json<Value>) {
    (status, Json(json!({ "errors": [{ "status": status.as_u16().to_string(), "detail": detail }] })))
}

fn seen(path: String, headers: &HeaderMap, query: HashMap<String, String>, body: &str) -> SeenRequest {
    let header = |name: &str| headers.get(name).and_then(|v| v.to_str().ok()).map(str::to_string);
    SeenRequest {
        path,
        api_key: header("x-api-key"),
        content_type: header("content-type"),
        query,
        body: serde_json::from_str(body).unwrap_or(Value::Null),
    }
}

async fn fetch_board(
    State(fake): State<FakeBoard>,
    Path(id): Path<String>,
    Query(query): Query<HashMap<String, String>>,
    headers: HeaderMap,
) -> Result<Json<Value>, (StatusCode, Json<Value>)> {
    fake.admit(seen(format!("/boards/{id}"), &headers, query, "")).await?;
    Ok(Json(fake.inner.board.clone()))
}

async fn create_post(
    State(fake): State<FakeBoard>,
    Path(id): Path<String>,
    headers: HeaderMap,
    body: String,
) -> Result<(StatusCode, Json<Value>), (StatusCode, Json<Value>)> {
    fake.admit(seen(format!("/boards/{id}/posts"), &headers, HashMap::new(), &body)).await?;
    let post_id = fake.next_id("post");
    Ok((StatusCode::CREATED, Json(json!({ "data": { "id": post_id, "type": "post" } }))))
}

async fn create_comment(
    State(fake): State<FakeBoard>,
    Path(id): Path<String>,
    headers: HeaderMap,
    body: String,
) -> Result<(StatusCode, Json<Value>), (StatusCode, Json<Value>)> {
    fake.admit(seen(format!("/posts/{id}/comments"), &headers, HashMap::new(), &body)).await?;
    let comment_id = fake.next_id("comment");
    Ok((StatusCode::CREATED, Json(json!({ "data": { "id": comment_id, "type": "comment" } }))))
}
