use super::*;

#[test]
fn parse_round_trips_every_role() {
    for role in [
        AppRole::SuperAdmin,
        AppRole::AcademyAdmin,
        AppRole::Coach,
        AppRole::Player,
    ] {
        assert_eq!(AppRole::parse(role.as_str()), Some(role));
    }
}

#[test]
fn parse_rejects_unknown_values() {
    assert_eq!(AppRole::parse(""), None);
    assert_eq!(AppRole::parse("player"), None);
    assert_eq!(AppRole::parse("ADMIN"), None);
}

#[test]
fn admin_roles_are_super_admin_and_academy_admin() {
    assert!(AppRole::SuperAdmin.is_admin());
    assert!(AppRole::AcademyAdmin.is_admin());
    assert!(!AppRole::Coach.is_admin());
    assert!(!AppRole::Player.is_admin());
}

#[test]
fn super_admin_is_not_invitable() {
    assert!(!AppRole::SuperAdmin.is_invitable());
    assert!(AppRole::AcademyAdmin.is_invitable());
    assert!(AppRole::Coach.is_invitable());
    assert!(AppRole::Player.is_invitable());
}

#[test]
fn serializes_as_screaming_snake_case() {
    assert_eq!(
        serde_json::to_string(&AppRole::AcademyAdmin).unwrap(),
        "\"ACADEMY_ADMIN\""
    );
}
