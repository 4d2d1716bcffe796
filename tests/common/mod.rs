use axum::{
    Router,
    body::{Body, to_bytes},
    http::{Request, Response},
};
use serde_json::Value;
use std::{
    fs,
    path::PathBuf,
    time::{SystemTime, UNIX_EPOCH},
};
use tower::ServiceExt;

use items_api::Database;
use items_api::router::{ApiState, api_router};

/// Router over a fresh SQLite file; the file is removed on drop.
pub struct TestApp {
    pub app: Router,
    pub db: Database,
    path: PathBuf,
}

impl TestApp {
    pub async fn spawn(label: &str) -> Self {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("system time before UNIX_EPOCH")
            .as_nanos();

        let mut path = std::env::temp_dir();
        path.push(format!(
            "items-api-{}-{}-{}.sqlite",
            label,
            std::process::id(),
            nanos
        ));

        let database_url = format!("sqlite:{}", path.display());
        let db = Database::connect(&database_url)
            .await
            .expect("failed to open test database");
        let app = api_router(ApiState::new(&db));
        Self { app, db, path }
    }

    pub async fn send(&self, method: &str, uri: &str, body: Option<Value>) -> Response<Body> {
        self.send_raw(method, uri, body.map(|json| json.to_string()))
            .await
    }

    /// Like `send`, but the body text goes out exactly as given.
    pub async fn send_raw(&self, method: &str, uri: &str, body: Option<String>) -> Response<Body> {
        let builder = Request::builder().method(method).uri(uri);
        let request = match body {
            Some(text) => builder
                .header("content-type", "application/json")
                .body(Body::from(text)),
            None => builder.body(Body::empty()),
        }
        .expect("failed to build request");

        self.app
            .clone()
            .oneshot(request)
            .await
            .expect("request failed")
    }
}

impl Drop for TestApp {
    fn drop(&mut self) {
        let _ = fs::remove_file(&self.path);
    }
}

pub async fn body_bytes(resp: Response<Body>) -> Vec<u8> {
    to_bytes(resp.into_body(), usize::MAX)
        .await
        .expect("failed to read response body")
        .to_vec()
}

pub async fn body_json(resp: Response<Body>) -> Value {
    let bytes = body_bytes(resp).await;
    serde_json::from_slice(&bytes).expect("response body was not json")
}
