/*!
 * Web front-end (server-rendered)
 *
 * Responsibility:
 * - / (landing) と /health (health page) の静的ページ
 * - 共通レイアウト (title / meta description) の適用
 *
 * API とは独立した薄い層。状態は持たず、毎回同じ markup を返す。
 */
mod pages;

pub use pages::routes;
