// tests/common/mod.rs
//! In-memory upstream for integration tests.

#![allow(dead_code)]

use reqwest::StatusCode;
use serde_json::{json, Value};
use std::sync::Mutex;
use std::time::Duration;
use swapi_bridge::{AppError, CatalogSource, UpstreamErrorCode, UpstreamRequest};

type Responder = Box<dyn Fn(&UpstreamRequest) -> Result<Value, AppError> + Send + Sync>;

/// A `CatalogSource` that answers from a closure and remembers every
/// request it was asked, in order.
pub struct ScriptedSource {
    respond: Responder,
    delay: Option<Duration>,
    requests: Mutex<Vec<String>>,
}

impl ScriptedSource {
    pub fn new<F>(respond: F) -> Self
    where
        F: Fn(&UpstreamRequest) -> Result<Value, AppError> + Send + Sync + 'static,
    {
        Self {
            respond: Box::new(respond),
            delay: None,
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Answers every request with the same body.
    pub fn fixed(body: Value) -> Self {
        Self::new(move |_| Ok(body.clone()))
    }

    /// Sleeps before answering each request.
    pub fn with_delay(self, delay: Duration) -> Self {
        Self {
            delay: Some(delay),
            ..self
        }
    }

    pub fn requests(&self) -> Vec<String> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait::async_trait]
impl CatalogSource for ScriptedSource {
    async fn get_json(&self, request: &UpstreamRequest) -> Result<Value, AppError> {
        self.requests.lock().unwrap().push(request.to_string());
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        (self.respond)(request)
    }
}

/// The page number a paged request asked for.
pub fn requested_page(request: &UpstreamRequest) -> u32 {
    request
        .query
        .iter()
        .find(|(key, _)| key == "page")
        .and_then(|(_, value)| value.parse().ok())
        .expect("request should carry a page parameter")
}

/// A cursor-paged body holding one person named after the page, always
/// pointing at a next page.
pub fn endless_people_page(page: u32) -> Value {
    json!({
        "total_records": 100_000,
        "total_pages": 1_000,
        "previous": null,
        "next": format!("https://www.swapi.tech/api/people?page={}&limit=100", page + 1),
        "results": [{"uid": page.to_string(), "name": format!("Person {}", page)}]
    })
}

pub fn status_error(status: StatusCode, url: &str) -> AppError {
    AppError::UpstreamStatus {
        code: UpstreamErrorCode::from_http_status(status.as_u16()),
        status,
        url: url.to_string(),
    }
}

pub fn fixture(name: &str) -> Value {
    let path = format!(
        "{}/tests/fixtures/upstream/{}",
        env!("CARGO_MANIFEST_DIR"),
        name
    );
    let text = std::fs::read_to_string(&path).expect("fixture should exist");
    serde_json::from_str(&text).expect("fixture should be valid JSON")
}
