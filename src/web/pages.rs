use axum::{Router, response::Html, routing::get};

use crate::state::AppState;

const LAYOUT_TEMPLATE: &str = include_str!("../../templates/layout.html");
const LANDING_TEMPLATE: &str = include_str!("../../templates/landing.html");
const HEALTH_TEMPLATE: &str = include_str!("../../templates/health.html");

pub const SITE_TITLE: &str = "Sport Performance Analysis";
pub const SITE_DESCRIPTION: &str = "Sport Performance Analysis Application";

/// Wrap page content in the shared document shell.
///
/// The wrapper only adds the head metadata; content passes through unchanged.
pub fn render_layout(content: &str) -> String {
    LAYOUT_TEMPLATE
        .replace("{{TITLE}}", SITE_TITLE)
        .replace("{{DESCRIPTION}}", SITE_DESCRIPTION)
        .replace("{{CONTENT}}", content)
}

pub fn render_landing() -> String {
    render_layout(LANDING_TEMPLATE)
}

pub fn render_health() -> String {
    render_layout(HEALTH_TEMPLATE)
}

async fn landing() -> Html<String> {
    Html(render_landing())
}

async fn health_page() -> Html<String> {
    Html(render_health())
}

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(landing))
        .route("/health", get(health_page))
}

#[cfg(test)]
#[path = "pages_test.rs"]
mod tests;
