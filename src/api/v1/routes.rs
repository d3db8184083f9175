/*
 * Responsibility
 * - v1 の URL 構造を定義
 * - /health, /auth, /me, /academies, /invites を merge
 * - Bearer が必要な範囲は route 群を分けて middleware::auth::access で包む
 */
use axum::{
    Router,
    routing::{get, post},
};

use crate::middleware;
use crate::state::AppState;

use crate::api::v1::handlers::{
    academies::{create_academy, my_academy},
    auth::{logout, request_otp, verify_otp},
    health::health,
    invites::{accept_invite, create_invite, get_invite},
    users::me,
};

pub fn routes(state: AppState) -> Router<AppState> {
    let public = Router::new()
        .route("/health", get(health))
        .route("/auth/otp/request", post(request_otp))
        .route("/auth/otp/verify", post(verify_otp))
        .route("/invites/{token}", get(get_invite))
        .route("/invites/{token}/accept", post(accept_invite));

    let protected = Router::new()
        .route("/auth/logout", post(logout))
        .route("/me", get(me))
        .route("/academies", post(create_academy))
        .route("/academies/me", get(my_academy))
        .route("/invites", post(create_invite));

    public.merge(middleware::auth::access::apply(protected, state))
}
