/*
 * Responsibility
 * - middleware の公開インターフェース (re-export)
 * - apply(router, ...) 形式で app.rs から適用する
 */
pub mod auth;
pub mod cors;
pub mod error_context;
pub mod http;
pub mod security_headers;
