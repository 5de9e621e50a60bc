use super::*;

fn renderer(format: ImageFormat, size: u32) -> AvatarRenderer {
    AvatarRenderer::with_fontdb(
        RenderSettings {
            format,
            size,
            ..RenderSettings::default()
        },
        Arc::new(usvg::fontdb::Database::new()),
    )
    .unwrap()
}

#[test]
fn size_bounds_are_enforced() {
    for size in [0, MIN_SIZE - 1, MAX_SIZE + 1] {
        let err = AvatarRenderer::new(RenderSettings {
            size,
            ..RenderSettings::default()
        })
        .err()
        .unwrap();
        assert!(matches!(err, AvatarError::Config(_)));
    }
    AvatarRenderer::new(RenderSettings {
        size: MIN_SIZE,
        ..RenderSettings::default()
    })
    .unwrap();
}

#[test]
fn blank_font_family_is_rejected() {
    let settings = RenderSettings {
        font_family: "  ".to_string(),
        ..RenderSettings::default()
    };
    assert!(settings.validate().is_err());
}

#[test]
fn svg_render_is_deterministic() {
    let r = renderer(ImageFormat::Svg, 96);
    let a = r.render("JD", Rgb::new(1, 2, 3), Rgb::WHITE, Shape::Circle, true).unwrap();
    let b = r.render("JD", Rgb::new(1, 2, 3), Rgb::WHITE, Shape::Circle, true).unwrap();
    assert_eq!(a, b);
    let text = String::from_utf8(a).unwrap();
    assert!(text.contains(r##"fill="#ffffff""##));
}

fn system_renderer(size: u32) -> Option<AvatarRenderer> {
    let no_dirs: [std::path::PathBuf; 0] = [];
    let db = raster::build_fontdb(&no_dirs);
    if db.len() == 0 {
        return None;
    }
    let settings = RenderSettings {
        format: ImageFormat::Png,
        size,
        ..RenderSettings::default()
    };
    Some(AvatarRenderer::with_fontdb(settings, db).unwrap())
}

#[test]
fn png_without_fonts_is_a_render_error() {
    let r = renderer(ImageFormat::Png, 48);
    let err = r
        .render("AB", Rgb::new(0x33, 0x66, 0x99), Rgb::WHITE, Shape::Circle, false)
        .unwrap_err();
    assert!(matches!(err, AvatarError::Render(_)));

    // SVG output leaves font lookup to the viewer.
    renderer(ImageFormat::Svg, 48)
        .render("AB", Rgb::new(0x33, 0x66, 0x99), Rgb::WHITE, Shape::Circle, false)
        .unwrap();
}

#[test]
fn png_render_is_deterministic_and_shaped() {
    let Some(r) = system_renderer(48) else {
        return;
    };
    let bg = Rgb::new(0x33, 0x66, 0x99);

    let circle = r.render("A", bg, Rgb::WHITE, Shape::Circle, false).unwrap();
    assert_eq!(circle, r.render("A", bg, Rgb::WHITE, Shape::Circle, false).unwrap());
    let img = image::load_from_memory(&circle).unwrap().to_rgba8();
    assert_eq!(img.dimensions(), (48, 48));
    assert_eq!(img.get_pixel(0, 0).0[3], 0);
    assert_eq!(img.get_pixel(24, 2).0, [0x33, 0x66, 0x99, 255]);

    let square = r.render("A", bg, Rgb::WHITE, Shape::Square, false).unwrap();
    let img = image::load_from_memory(&square).unwrap().to_rgba8();
    assert_eq!(img.get_pixel(0, 0).0, [0x33, 0x66, 0x99, 255]);
}

#[test]
fn png_letters_show_in_the_middle() {
    let Some(r) = system_renderer(96) else {
        return;
    };
    let png = r
        .render("HW", Rgb::WHITE, Rgb::BLACK, Shape::Square, true)
        .unwrap();
    let img = image::load_from_memory(&png).unwrap().to_rgba8();

    let inked = (24..72)
        .flat_map(|y| (16..80).map(move |x| (x, y)))
        .filter(|&(x, y)| img.get_pixel(x, y).0[0] < 64)
        .count();
    assert!(inked > 50, "only {inked} dark pixels near the center");

    for (x, y) in [(2, 2), (93, 2), (2, 93), (93, 93)] {
        assert_eq!(img.get_pixel(x, y).0, [255, 255, 255, 255]);
    }
}

#[test]
fn format_metadata() {
    assert_eq!(ImageFormat::Svg.mime_type(), "image/svg+xml");
    assert_eq!(ImageFormat::Png.mime_type(), "image/png");
    assert_eq!(ImageFormat::Png.extension(), "png");
    assert_eq!(ImageFormat::default(), ImageFormat::Svg);
}
