//! Router-level tests: built-in endpoints, limits and a real socket.

use std::net::SocketAddr;
use std::time::Duration;

use axum::{
    body::Body,
    extract::ConnectInfo,
    http::{header, Method, Request, StatusCode},
    routing::{get, post},
    Router,
};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};
use tokio_util::sync::CancellationToken;
use tower::util::ServiceExt;

use api_ingress::{serve_listener, ApiIngress, ApiIngressConfig};

fn ingress(config: ApiIngressConfig) -> ApiIngress {
    ApiIngress::new(config)
}

async fn echo_len(body: String) -> String {
    body.len().to_string()
}

async fn slow() -> &'static str {
    tokio::time::sleep(Duration::from_secs(5)).await;
    "late"
}

async fn peer(ConnectInfo(addr): ConnectInfo<SocketAddr>) -> String {
    addr.ip().to_string()
}

#[tokio::test]
async fn index_and_health_are_served() {
    let app = ingress(ApiIngressConfig::default()).build_router(Router::new());

    let resp = app
        .clone()
        .oneshot(Request::builder().uri("/index").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    // Went through the middleware stack
    let rid = resp
        .headers()
        .get("x-request-id")
        .expect("x-request-id on /index reply")
        .to_str()
        .unwrap();
    assert!(!rid.is_empty());
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX).await.unwrap();
    let json: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(json, serde_json::json!({ "message": "success" }));

    let resp = app
        .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX).await.unwrap();
    let json: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(json["status"], "ok");
}

#[tokio::test]
async fn oversized_bodies_are_rejected() {
    let config = ApiIngressConfig {
        body_limit_bytes: 16,
        ..Default::default()
    };
    let app = ingress(config).build_router(Router::new().route("/echo", post(echo_len)));

    let small = app
        .clone()
        .oneshot(
            Request::builder()
                .method(Method::POST)
                .uri("/echo")
                .body(Body::from("tiny"))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(small.status(), StatusCode::OK);

    let big = app
        .oneshot(
            Request::builder()
                .method(Method::POST)
                .uri("/echo")
                .header(header::CONTENT_LENGTH, "64")
                .body(Body::from("x".repeat(64)))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(big.status(), StatusCode::PAYLOAD_TOO_LARGE);
}

#[tokio::test]
async fn slow_handlers_time_out() {
    let config = ApiIngressConfig {
        request_timeout_secs: 1,
        ..Default::default()
    };
    let app = ingress(config).build_router(Router::new().route("/slow", get(slow)));

    let resp = app
        .oneshot(Request::builder().uri("/slow").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::REQUEST_TIMEOUT);
}

#[tokio::test]
async fn cors_headers_only_when_enabled() {
    let preflight = || {
        Request::builder()
            .method(Method::OPTIONS)
            .uri("/index")
            .header(header::ORIGIN, "http://example.com")
            .header(header::ACCESS_CONTROL_REQUEST_METHOD, "GET")
            .body(Body::empty())
            .unwrap()
    };

    let enabled = ingress(ApiIngressConfig {
        cors_enabled: true,
        ..Default::default()
    })
    .build_router(Router::new());
    let resp = enabled.oneshot(preflight()).await.unwrap();
    assert!(resp
        .headers()
        .contains_key(header::ACCESS_CONTROL_ALLOW_ORIGIN));

    let disabled = ingress(ApiIngressConfig::default()).build_router(Router::new());
    let resp = disabled.oneshot(preflight()).await.unwrap();
    assert!(!resp
        .headers()
        .contains_key(header::ACCESS_CONTROL_ALLOW_ORIGIN));
}

#[tokio::test]
async fn serves_over_tcp_with_peer_address_and_stops_on_cancel() {
    let app = ingress(ApiIngressConfig::default())
        .build_router(Router::new().route("/peer", get(peer)));

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let cancel = CancellationToken::new();
    let server = tokio::spawn(serve_listener(listener, app, cancel.clone()));

    let mut stream = TcpStream::connect(addr).await.unwrap();
    stream
        .write_all(b"GET /peer HTTP/1.1\r\nHost: localhost\r\nConnection: close\r\n\r\n")
        .await
        .unwrap();
    let mut raw = String::new();
    stream.read_to_string(&mut raw).await.unwrap();
    assert!(raw.starts_with("HTTP/1.1 200"), "{raw}");
    assert!(raw.ends_with("127.0.0.1"), "{raw}");
    assert!(raw.to_ascii_lowercase().contains("x-request-id:"));

    cancel.cancel();
    let result = tokio::time::timeout(Duration::from_secs(5), server)
        .await
        .expect("server stops after cancel")
        .unwrap();
    assert!(result.is_ok());
}
