use super::*;
use chrono::Duration as ChronoDuration;
use uuid::Uuid;

fn invite(used: bool, expired: bool) -> InviteRow {
    let now = Utc::now();
    InviteRow {
        id: Uuid::new_v4(),
        token: generate_token(),
        academy_number: 987654321,
        email: "invitee@example.com".to_string(),
        role: "PLAYER".to_string(),
        expires_at: if expired {
            now - ChronoDuration::hours(1)
        } else {
            now + ChronoDuration::hours(24)
        },
        used_at: used.then_some(now - ChronoDuration::minutes(5)),
        created_at: now - ChronoDuration::hours(1),
    }
}

#[test]
fn token_is_80_url_safe_chars() {
    let token = generate_token();
    assert_eq!(token.len(), 80);
    assert!(
        token
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
    );
}

#[test]
fn tokens_are_unique() {
    assert_ne!(generate_token(), generate_token());
}

#[test]
fn invite_url_joins_base_and_token() {
    assert_eq!(
        invite_url("http://localhost:3000", "abc"),
        "http://localhost:3000/invite/abc"
    );
    // trailing slash on the base must not double up
    assert_eq!(
        invite_url("https://app.example.com/", "abc"),
        "https://app.example.com/invite/abc"
    );
}

#[test]
fn open_invite_passes() {
    assert!(ensure_open(&invite(false, false), Utc::now()).is_ok());
}

#[test]
fn used_invite_is_rejected() {
    let err = ensure_open(&invite(true, false), Utc::now()).unwrap_err();
    assert_eq!(err.code(), "INVALID_INVITE");
    assert!(err.to_string().contains("already been used"));
}

#[test]
fn expired_invite_is_rejected() {
    let err = ensure_open(&invite(false, true), Utc::now()).unwrap_err();
    assert_eq!(err.code(), "INVALID_INVITE");
    assert!(err.to_string().contains("expired"));
}
