use super::*;

fn request(role: &str, expires_in_hours: i64) -> InviteRequest {
    InviteRequest {
        academy_number: 987654321,
        email: "invitee@example.com".to_string(),
        role: role.to_string(),
        expires_in_hours,
    }
}

#[test]
fn invitable_roles_pass() {
    for role in ["ACADEMY_ADMIN", "COACH", "PLAYER"] {
        assert!(request(role, 24).validate().is_ok());
    }
}

#[test]
fn super_admin_cannot_be_invited() {
    assert!(request("SUPER_ADMIN", 24).validate().is_err());
}

#[test]
fn unknown_role_is_rejected() {
    assert!(request("REFEREE", 24).validate().is_err());
    assert!(request("", 24).validate().is_err());
}

#[test]
fn expiry_must_be_positive() {
    assert!(request("PLAYER", 0).validate().is_err());
    assert!(request("PLAYER", -5).validate().is_err());
}
