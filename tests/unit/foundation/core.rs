use super::*;

#[test]
fn parses_hex_with_and_without_hash() {
    assert_eq!(Rgb::from_hex("fc91ad").unwrap(), Rgb::new(0xfc, 0x91, 0xad));
    assert_eq!(Rgb::from_hex("#FC91AD").unwrap(), Rgb::new(0xfc, 0x91, 0xad));
}

#[test]
fn rejects_malformed_hex() {
    for bad in ["zzzzzz", "fff", "#12345", "1234567", "", " fc91ad", "##fc91ad", "fc91a+"] {
        let err = Rgb::from_hex(bad).unwrap_err();
        assert!(matches!(err, AvatarError::Config(_)), "{bad:?} -> {err}");
    }
}

#[test]
fn hex_formatting_is_lowercase_and_display_has_hash() {
    let c = Rgb::new(0xAB, 0x01, 0xFF);
    assert_eq!(c.to_hex(), "ab01ff");
    assert_eq!(c.to_string(), "#ab01ff");
}

#[test]
fn hsl_primaries_and_grey() {
    assert_eq!(Rgb::from_hsl(0.0, 1.0, 0.5), Rgb::new(255, 0, 0));
    assert_eq!(Rgb::from_hsl(120.0, 1.0, 0.5), Rgb::new(0, 255, 0));
    assert_eq!(Rgb::from_hsl(240.0, 1.0, 0.5), Rgb::new(0, 0, 255));
    assert_eq!(Rgb::from_hsl(360.0, 1.0, 0.5), Rgb::new(255, 0, 0));
    assert_eq!(Rgb::from_hsl(42.0, 0.0, 0.5), Rgb::new(128, 128, 128));
}

#[test]
fn serde_uses_hex_strings() {
    let c: Rgb = serde_json::from_value(serde_json::json!("#00ff80")).unwrap();
    assert_eq!(c, Rgb::new(0, 255, 128));
    assert_eq!(serde_json::to_value(c).unwrap(), serde_json::json!("00ff80"));
    assert!(serde_json::from_value::<Rgb>(serde_json::json!("nope")).is_err());
}

#[test]
fn shape_follows_rounded_flag() {
    assert_eq!(Shape::from_rounded(true), Shape::Circle);
    assert_eq!(Shape::from_rounded(false), Shape::Square);
}
