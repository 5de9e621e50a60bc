use super::*;
use crate::config::model::ColorMethod;

fn base() -> (UserIdentity, AvatarConfig, RenderSettings) {
    (
        UserIdentity::from_email("jane@example.com"),
        AvatarConfig::default(),
        RenderSettings::default(),
    )
}

#[test]
fn fingerprint_is_deterministic() {
    let (id, cfg, settings) = base();
    assert_eq!(
        fingerprint_request(&id, &cfg, &settings),
        fingerprint_request(&id, &cfg, &settings)
    );
}

#[test]
fn fingerprint_changes_with_any_input() {
    let (id, cfg, settings) = base();
    let reference = fingerprint_request(&id, &cfg, &settings);

    let renamed = UserIdentity {
        first_name: Some("Jane".to_string()),
        ..id.clone()
    };
    assert_ne!(fingerprint_request(&renamed, &cfg, &settings), reference);

    let bold = AvatarConfig {
        bold: true,
        ..cfg.clone()
    };
    assert_ne!(fingerprint_request(&id, &bold, &settings), reference);

    let random = AvatarConfig {
        method: ColorMethod::Random,
        ..cfg.clone()
    };
    assert_ne!(fingerprint_request(&id, &random, &settings), reference);

    let png = RenderSettings {
        format: ImageFormat::Png,
        ..settings.clone()
    };
    assert_ne!(fingerprint_request(&id, &cfg, &png), reference);

    let bigger = RenderSettings {
        size: 128,
        ..settings
    };
    assert_ne!(fingerprint_request(&id, &cfg, &bigger), reference);
}

#[test]
fn palette_boundaries_do_not_alias() {
    let (id, cfg, settings) = base();
    let a = AvatarConfig {
        color_palette: vec!["aabbcc".to_string(), "ddeeff".to_string()],
        ..cfg.clone()
    };
    let b = AvatarConfig {
        color_palette: vec!["aabbccddeeff".to_string()],
        ..cfg
    };
    assert_ne!(
        fingerprint_request(&id, &a, &settings),
        fingerprint_request(&id, &b, &settings)
    );
}
