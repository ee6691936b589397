//! Shared harness for gateway tests: programmable upstream stubs that record
//! every request they receive.

#![allow(dead_code)]

use std::future::Future;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::{
    body::Body,
    http::{header, HeaderMap, Method, Request, StatusCode, Uri},
    response::Response,
    Router,
};
use http_body_util::BodyExt;
use todo_gateway::{router, ApiVariant, AppState, Upstream};
use tokio::net::TcpListener;

/// One request as seen by the stub upstream.
#[derive(Debug, Clone)]
pub struct RecordedCall {
    pub method: String,
    pub uri: String,
    pub content_type: Option<String>,
    pub body: String,
}

pub struct StubUpstream {
    pub addr: SocketAddr,
    calls: Arc<Mutex<Vec<RecordedCall>>>,
}

impl StubUpstream {
    pub fn url(&self) -> String {
        format!("http://{}", self.addr)
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().unwrap().clone()
    }

    /// Number of recorded calls matching method and path-and-query.
    pub fn count(&self, method: &str, uri: &str) -> usize {
        self.calls()
            .iter()
            .filter(|c| c.method == method && c.uri == uri)
            .count()
    }
}

/// Start a stub upstream on a random port. `handler` decides status and body.
pub async fn start_programmable_upstream<F, Fut>(handler: F) -> StubUpstream
where
    F: Fn(RecordedCall) -> Fut + Clone + Send + Sync + 'static,
    Fut: Future<Output = (u16, String)> + Send + 'static,
{
    let calls = Arc::new(Mutex::new(Vec::new()));
    let recorded = calls.clone();

    let app = Router::new().fallback(
        move |method: Method, uri: Uri, headers: HeaderMap, body: String| {
            let recorded = recorded.clone();
            let handler = handler.clone();
            async move {
                let call = RecordedCall {
                    method: method.to_string(),
                    uri: uri.to_string(),
                    content_type: headers
                        .get(header::CONTENT_TYPE)
                        .and_then(|v| v.to_str().ok())
                        .map(str::to_string),
                    body,
                };
                recorded.lock().unwrap().push(call.clone());
                let (status, body) = handler(call).await;
                (StatusCode::from_u16(status).unwrap(), body)
            }
        },
    );

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move { axum::serve(listener, app).await });

    StubUpstream { addr, calls }
}

/// Stub upstream that always answers with the same status and body.
pub async fn start_fixed_upstream(status: u16, body: &str) -> StubUpstream {
    let body = body.to_string();
    start_programmable_upstream(move |_| {
        let body = body.clone();
        async move { (status, body) }
    })
    .await
}

/// Start the real mock todo service on a random port.
pub async fn start_mock_server() -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(mock_server::run(listener));
    addr
}

/// Gateway router pointed at `base_url`.
pub fn gateway(base_url: &str, variant: ApiVariant) -> Router {
    gateway_with_connect_timeout(base_url, variant, Duration::from_secs(2))
}

pub fn gateway_with_connect_timeout(base_url: &str, variant: ApiVariant, timeout: Duration) -> Router {
    let upstream = Upstream::new(Some(timeout)).unwrap();
    router(AppState::new(base_url, upstream, variant))
}

pub fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

pub fn post_json(uri: &str, body: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

pub fn post_text(uri: &str, body: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "text/plain")
        .body(Body::from(body.to_string()))
        .unwrap()
}

pub async fn body_json<T: serde::de::DeserializeOwned>(response: Response) -> T {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

pub async fn body_string(response: Response) -> String {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    String::from_utf8(bytes.to_vec()).unwrap()
}
