use super::*;

#[test]
fn email_shape_check_accepts_plain_addresses() {
    assert!(validate_email("user@example.com").is_ok());
    assert!(validate_email("  user@example.com  ").is_ok());
}

#[test]
fn email_shape_check_rejects_bad_shapes() {
    assert!(validate_email("").is_err());
    assert!(validate_email("user").is_err());
    assert!(validate_email("@example.com").is_err());
    assert!(validate_email("user@").is_err());
    assert!(validate_email("a@b@c").is_err());
}

#[test]
fn otp_request_requires_purpose() {
    let req = OtpRequest {
        email: "user@example.com".to_string(),
        purpose: "  ".to_string(),
    };
    assert!(req.validate().is_err());
}

#[test]
fn otp_verify_requires_six_digits() {
    let base = |otp: &str| OtpVerifyRequest {
        email: "user@example.com".to_string(),
        purpose: "login".to_string(),
        otp: otp.to_string(),
    };
    assert!(base("123456").validate().is_ok());
    assert!(base("12345").validate().is_err());
    assert!(base("1234567").validate().is_err());
    assert!(base("12345a").validate().is_err());
}
