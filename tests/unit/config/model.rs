use super::*;

#[test]
fn defaults_match_admin_defaults() {
    let cfg = AvatarConfig::default();
    assert!(cfg.active);
    assert!(cfg.rounded);
    assert_eq!(cfg.letters, 2);
    assert!(!cfg.bold);
    assert!(cfg.uppercase);
    assert_eq!(cfg.method, ColorMethod::Auto);
    assert_eq!(cfg.fixed_color, "fc91ad");
    assert!(cfg.color_palette.is_empty());
    assert_eq!(cfg.shape(), Shape::Circle);
    cfg.validate().unwrap();
}

#[test]
fn validate_rejects_letter_count_out_of_range() {
    for letters in [0, 3, 9] {
        let cfg = AvatarConfig {
            letters,
            ..AvatarConfig::default()
        };
        assert!(matches!(cfg.validate(), Err(AvatarError::Config(_))));
    }
}

#[test]
fn validate_checks_only_the_selected_method() {
    let cfg = AvatarConfig {
        fixed_color: "zzzzzz".to_string(),
        color_palette: vec!["nope".to_string()],
        ..AvatarConfig::default()
    };
    cfg.validate().unwrap();

    let fixed = AvatarConfig {
        method: ColorMethod::Fixed,
        ..cfg.clone()
    };
    assert!(matches!(fixed.validate(), Err(AvatarError::Config(_))));

    let random = AvatarConfig {
        method: ColorMethod::Random,
        ..cfg
    };
    assert!(matches!(random.validate(), Err(AvatarError::Config(_))));
}

#[test]
fn random_requires_non_empty_palette() {
    let cfg = AvatarConfig {
        method: ColorMethod::Random,
        ..AvatarConfig::default()
    };
    let err = cfg.validate().unwrap_err();
    assert!(err.to_string().contains("non-empty"));
}

#[test]
fn from_json_fills_defaults_and_validates() {
    let cfg =
        AvatarConfig::from_json_str(r##"{"method":"fixed","fixed_color":"#00FF00"}"##).unwrap();
    assert_eq!(cfg.method, ColorMethod::Fixed);
    assert_eq!(cfg.letters, 2);

    assert!(AvatarConfig::from_json_str(r#"{"method":"sometimes"}"#).is_err());
    assert!(AvatarConfig::from_json_str(r#"{"letters":5}"#).is_err());
}

#[test]
fn method_spelling_round_trips() {
    for m in [ColorMethod::Auto, ColorMethod::Fixed, ColorMethod::Random] {
        assert_eq!(ColorMethod::parse(m.as_str()), Some(m));
    }
    assert_eq!(ColorMethod::parse("AUTO"), None);
}
