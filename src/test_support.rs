// stub upstream: a real axum server on a loopback port that answers every
// POST with a fixed status and body and records what it saw

use axum::body::Bytes;
use axum::extract::{RawQuery, State};
use axum::http::{header, HeaderMap, StatusCode};
use axum::routing::post;
use axum::Router;
use std::sync::{Arc, Mutex};
use tokio::net::TcpListener;

#[derive(Debug, Clone)]
pub struct CapturedRequest {
    pub query: Option<String>,
    pub content_type: Option<String>,
    pub body: String,
}

#[derive(Clone)]
struct StubState {
    status: StatusCode,
    body: &'static str,
    seen: Arc<Mutex<Vec<CapturedRequest>>>,
}

pub struct StubUpstream {
    pub url: String,
    seen: Arc<Mutex<Vec<CapturedRequest>>>,
}

impl StubUpstream {
    pub fn captured(&self) -> Vec<CapturedRequest> {
        self.seen.lock().unwrap().clone()
    }
}

async fn stub_handler(
    State(state): State<StubState>,
    RawQuery(query): RawQuery,
    headers: HeaderMap,
    body: Bytes,
) -> (StatusCode, [(header::HeaderName, &'static str); 1], &'static str) {

    let content_type = headers
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);

    state.seen.lock().unwrap().push(CapturedRequest {
        query,
        content_type,
        body: String::from_utf8_lossy(&body).into_owned(),
    });

    (state.status, [(header::CONTENT_TYPE, "application/json")], state.body)

}

pub async fn spawn_stub(status: StatusCode, body: &'static str) -> StubUpstream {

    let seen = Arc::new(Mutex::new(Vec::new()));
    let state = StubState { status, body, seen: seen.clone() };

    let app = Router::new()
        .route("/generate", post(stub_handler))
        .with_state(state);

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    StubUpstream { url: format!("http://{}/generate", addr), seen }

}

// loopback port that was free a moment ago, so connecting is refused
pub async fn unused_local_url() -> String {

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{}/generate", addr)

}
