use super::*;

#[test]
fn landing_contains_title_welcome_and_health_link() {
    let html = render_landing();
    assert!(html.contains("Sport Performance Analysis"));
    assert!(html.contains("Welcome to the application"));
    assert!(html.contains(r#"<a href="/health">"#));
    assert!(html.contains("Check Health"));
}

#[test]
fn health_page_reports_constant_ok_status() {
    let html = render_health();
    assert!(html.contains("Health Check"));
    assert!(html.contains("Status:"));
    assert!(html.contains("OK"));
    assert!(html.contains("Web application is running successfully"));
}

#[test]
fn pages_are_identical_across_renders() {
    assert_eq!(render_landing(), render_landing());
    assert_eq!(render_health(), render_health());
}

#[test]
fn layout_sets_metadata_and_passes_content_through() {
    let html = render_layout("<p>nested content</p>");
    assert!(html.contains("<title>Sport Performance Analysis</title>"));
    assert!(html.contains(r#"content="Sport Performance Analysis Application""#));
    assert!(html.contains("<p>nested content</p>"));
    assert!(!html.contains("{{TITLE}}"));
    assert!(!html.contains("{{DESCRIPTION}}"));
    assert!(!html.contains("{{CONTENT}}"));
}
