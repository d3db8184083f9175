//! Error body finalization.
//!
//! `AppError::into_response` only knows the code and message; the wire format
//! also carries the request path and a correlation id. This middleware sees
//! both sides of the exchange, so it rebuilds error bodies as
//! `{ error, message, path, correlationId }`.
//!
//! Must sit *inside* the header/CORS layers so they still decorate the
//! rebuilt response.

use axum::{
    Json, Router,
    body::Body,
    http::{HeaderName, Request},
    middleware::{self, Next},
    response::{IntoResponse, Response},
};
use uuid::Uuid;

use crate::error::{ErrorParts, ErrorResponse};

pub fn apply(router: Router) -> Router {
    router.layer(middleware::from_fn(error_context))
}

async fn error_context(req: Request<Body>, next: Next) -> Response {
    let path = req.uri().path().to_owned();

    // SetRequestIdLayer fills this in before us; the fallback only fires for
    // requests that bypass the outer stack (tests hitting a bare router).
    let header = HeaderName::from_static("x-correlation-id");
    let correlation_id = req
        .headers()
        .get(&header)
        .and_then(|v| v.to_str().ok())
        .filter(|v| !v.trim().is_empty())
        .map(ToOwned::to_owned)
        .unwrap_or_else(|| Uuid::new_v4().to_string());

    let mut res = next.run(req).await;

    if let Some(parts) = res.extensions_mut().remove::<ErrorParts>() {
        let status = res.status();
        let body = ErrorResponse {
            error: parts.code,
            message: parts.message,
            path,
            correlation_id,
        };
        return (status, Json(body)).into_response();
    }

    res
}
