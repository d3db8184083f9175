/*
 * Responsibility
 * - GET /api/v1/health (疎通用)
 * - 依存先の probe はしない (プロセスが応答できるか、のみ)
 */
use axum::{Json, http::StatusCode, response::IntoResponse};
use chrono::Utc;
use serde_json::json;

pub async fn health() -> impl IntoResponse {
    (
        StatusCode::OK,
        Json(json!({
            "service": "sport-performance-api",
            "status": "ok",
            "time": Utc::now().to_rfc3339(),
        })),
    )
}
