use axum::{
    body::Body,
    extract::Extension,
    http::{Request, StatusCode},
    response::Json,
    routing::get,
    Router,
};
use serde_json::{json, Value};
use tower::util::ServiceExt; // for `oneshot`

use api_ingress::request_id::XRequestId;
use api_ingress::{ApiIngress, ApiIngressConfig};

fn test_app() -> Router {
    let routes = Router::new().route("/echo", get(echo_handler));
    ApiIngress::new(ApiIngressConfig::default()).build_router(routes)
}

async fn echo_handler(Extension(XRequestId(request_id)): Extension<XRequestId>) -> Json<Value> {
    Json(json!({ "request_id": request_id }))
}

async fn body_json(resp: axum::response::Response) -> Value {
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn generates_request_id_when_missing() {
    let response = test_app()
        .oneshot(Request::builder().uri("/echo").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let header = response
        .headers()
        .get("x-request-id")
        .and_then(|v| v.to_str().ok())
        .map(str::to_owned)
        .expect("x-request-id should be generated");
    assert!(!header.is_empty());

    // Handlers see the same id that is echoed back
    let json = body_json(response).await;
    assert_eq!(json["request_id"], header);
}

#[tokio::test]
async fn preserves_incoming_request_id() {
    let response = test_app()
        .oneshot(
            Request::builder()
                .uri("/echo")
                .header("x-request-id", "abc-123")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(
        response
            .headers()
            .get("x-request-id")
            .and_then(|v| v.to_str().ok()),
        Some("abc-123")
    );
    assert_eq!(body_json(response).await["request_id"], "abc-123");
}

#[tokio::test]
async fn request_id_is_attached_to_not_found_replies() {
    let response = test_app()
        .oneshot(
            Request::builder()
                .uri("/nope")
                .header("x-request-id", "missing-route")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(
        response
            .headers()
            .get("x-request-id")
            .and_then(|v| v.to_str().ok()),
        Some("missing-route")
    );
    let json = body_json(response).await;
    assert_eq!(json["code"], -1);
    assert_eq!(json["error"], "ROUTE_NOT_FOUND");
}
