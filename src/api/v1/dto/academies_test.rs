use super::*;

fn request(name: &str, logo_url: Option<&str>, primary_color: Option<&str>) -> AcademyRequest {
    AcademyRequest {
        name: name.to_string(),
        logo_url: logo_url.map(str::to_string),
        primary_color: primary_color.map(str::to_string),
    }
}

#[test]
fn name_is_required() {
    assert!(request("", None, None).validate().is_err());
    assert!(request("   ", None, None).validate().is_err());
    assert!(request("Test Academy", None, None).validate().is_ok());
}

#[test]
fn logo_url_must_parse_when_present() {
    assert!(
        request("A", Some("https://example.com/logo.png"), None)
            .validate()
            .is_ok()
    );
    assert!(request("A", Some("not a url"), None).validate().is_err());
}

#[test]
fn primary_color_accepts_short_and_long_hex() {
    assert!(request("A", None, Some("#112233")).validate().is_ok());
    assert!(request("A", None, Some("#abc")).validate().is_ok());
    assert!(request("A", None, Some("112233")).validate().is_err());
    assert!(request("A", None, Some("#11223")).validate().is_err());
    assert!(request("A", None, Some("#gggggg")).validate().is_err());
}
