use axum::{http::StatusCode, response::Json};
use serde_json::{json, Value};

/// `GET /index`
pub async fn index() -> Json<Value> {
    Json(json!({ "message": "success" }))
}

/// `GET /health`
pub async fn health_check() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

/// Unknown routes answer in the same envelope as the user endpoints.
pub async fn not_found() -> (StatusCode, Json<Value>) {
    (
        StatusCode::NOT_FOUND,
        Json(json!({ "code": -1, "msg": "not found", "error": "ROUTE_NOT_FOUND" })),
    )
}
