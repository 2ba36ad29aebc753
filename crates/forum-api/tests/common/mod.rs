#![allow(dead_code)]

use std::sync::Arc;

use axum::{
    body::{to_bytes, Body},
    http::{Request, StatusCode},
    Router,
};
use serde_json::Value;
use tower::ServiceExt;

use forum_api::{build_router, config::Config, state::AppState};
use forum_persist::{
    Comment, NewComment, NewThread, PersistClientBuilder, PersistenceClient,
    SqlitePersistenceClient, Thread,
};

const TEST_CONFIG: &str = r#"
    [server]
    host = "127.0.0.1"
    port = 0

    [cors]
    enabled = false
    origins = []

    [database]
    url = "sqlite::memory:"
    max_connections = 1

    [logging]
    level = "debug"
    format = "pretty"
"#;

pub struct TestApp {
    pub router: Router,
    pub persist: Arc<SqlitePersistenceClient>,
}

pub async fn spawn_app() -> TestApp {
    let config: Config = toml::from_str(TEST_CONFIG).expect("test config");
    let persist = Arc::new(
        PersistClientBuilder::new()
            .database_url(&config.database.url)
            .build()
            .await
            .expect("in-memory database"),
    );

    let state = Arc::new(AppState::new(config, persist.clone()));

    TestApp {
        router: build_router(state),
        persist,
    }
}

impl TestApp {
    pub async fn request(&self, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let builder = Request::builder().method(method).uri(uri);
        let request = match body {
            Some(json) => builder
                .header("content-type", "application/json")
                .body(Body::from(json.to_string())),
            None => builder.body(Body::empty()),
        }
        .unwrap_or_else(|err| panic!("failed to build request: {err}"));

        self.send(request).await
    }

    pub async fn send(&self, request: Request<Body>) -> (StatusCode, Value) {
        let response = match self.router.clone().oneshot(request).await {
            Ok(response) => response,
            Err(err) => panic!("router request failed: {err}"),
        };

        let status = response.status();
        let bytes = match to_bytes(response.into_body(), 1024 * 1024).await {
            Ok(bytes) => bytes,
            Err(err) => panic!("failed to read response body: {err}"),
        };

        let json = if bytes.is_empty() {
            Value::Null
        } else {
            match serde_json::from_slice(&bytes) {
                Ok(value) => value,
                Err(err) => panic!("response body is not JSON: {err}"),
            }
        };

        (status, json)
    }

    pub async fn get(&self, uri: &str) -> (StatusCode, Value) {
        self.request("GET", uri, None).await
    }

    pub async fn post(&self, uri: &str, body: Value) -> (StatusCode, Value) {
        self.request("POST", uri, Some(body)).await
    }

    pub async fn put(&self, uri: &str, body: Value) -> (StatusCode, Value) {
        self.request("PUT", uri, Some(body)).await
    }

    pub async fn patch(&self, uri: &str, body: Value) -> (StatusCode, Value) {
        self.request("PATCH", uri, Some(body)).await
    }

    pub async fn delete(&self, uri: &str) -> (StatusCode, Value) {
        self.request("DELETE", uri, None).await
    }

    /// Insert a thread directly through the persistence layer
    pub async fn seed_thread(&self, title: &str, body: &str) -> Thread {
        self.persist
            .create_thread(NewThread {
                title: title.to_string(),
                body: body.to_string(),
            })
            .await
            .expect("seed thread")
    }

    /// Insert a thread with `count` comments and return both
    pub async fn seed_thread_with_comments(&self, count: usize) -> (Thread, Vec<Comment>) {
        let thread = self.seed_thread("seeded", "thread").await;
        let mut comments = Vec::with_capacity(count);
        for i in 0..count {
            let comment = self
                .persist
                .create_comment(thread.id, NewComment { body: format!("comment {i}") })
                .await
                .expect("seed comment");
            comments.push(comment);
        }
        (thread, comments)
    }
}
