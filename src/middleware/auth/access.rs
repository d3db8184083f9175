//! Access token (JWT) 検証 → AuthCtx を extensions に入れる
//!
//! - `Authorization: Bearer <jwt>` を検証し、claims を AuthCtx に展開する
//! - JWT の署名 + iss/aud/exp/leeway は AccessTokenVerifier 側で実施
//! - jti が user_session 上で active (未失効・未期限切れ) であることも要求する
//!   (DB 側で revoke すればトークンを即時無効化できる)

use axum::{
    Router,
    body::Body,
    extract::State,
    http::{Request, header},
    middleware::{self, Next},
    response::Response,
};
use chrono::Utc;

use crate::api::v1::extractors::AuthCtx;
use crate::error::AppError;
use crate::repos::session_repo;
use crate::state::AppState;

/// 認証が必要な Router 部分にこの middleware を適用する。
///
/// 例：
/// ```ignore
/// let protected = Router::new().route("/me", get(me));
/// let protected = middleware::auth::access::apply(protected, state.clone());
/// ```
pub fn apply(router: Router<AppState>, state: AppState) -> Router<AppState> {
    // axum 0.8 の from_fn は State extractor を受け取れないため、`from_fn_with_state` で明示的に state を渡す
    router.layer(middleware::from_fn_with_state(state, access_middleware))
}

async fn access_middleware(
    State(state): State<AppState>,
    mut req: Request<Body>,
    next: Next,
) -> Result<Response, AppError> {
    let auth = req
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .ok_or(AppError::Unauthorized)?;

    let token = auth.strip_prefix("Bearer ").ok_or(AppError::Unauthorized)?;

    let verified = match state.auth.verify_verified(token) {
        Ok(verified) => verified,
        Err(err) => {
            tracing::warn!(error = ?err, "access token verification failed");
            return Err(AppError::Unauthorized);
        }
    };

    // Session gate: the jti must still be live. Fail closed on store errors.
    let active = session_repo::is_active(&state.db, verified.jti, Utc::now())
        .await
        .map_err(|err| {
            tracing::warn!(error = ?err, "session store failure during access check");
            AppError::Unauthorized
        })?;

    if !active {
        tracing::warn!(user_id = verified.user_id, jti = %verified.jti, "access token has no active session");
        return Err(AppError::Unauthorized);
    }

    let auth_ctx = AuthCtx::new(
        verified.user_id,
        verified.user_number,
        verified.email,
        verified.role,
        verified.academy_number,
    );

    // middleware → extractor への受け渡し
    req.extensions_mut().insert(auth_ctx);

    Ok(next.run(req).await)
}
