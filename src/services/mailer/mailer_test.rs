use super::*;

#[test]
fn template_injects_code_and_purpose() {
    let html = render_otp_email("123456", "login");
    assert!(html.contains("123456"));
    assert!(html.contains("login"));
    assert!(!html.contains("{{CODE}}"));
    assert!(!html.contains("{{PURPOSE}}"));
}

#[test]
fn subject_names_the_purpose() {
    assert_eq!(subject_for("login"), "Your verification code (login)");
}

#[tokio::test]
async fn log_mailer_always_succeeds() {
    let mailer = LogMailer;
    assert_eq!(mailer.backend_name(), "log");
    mailer
        .send_otp("test@example.com", "123456", "login")
        .await
        .unwrap();
}
