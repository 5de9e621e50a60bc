use std::io::Cursor;
use std::path::Path;
use std::sync::Arc;

use anyhow::Context;

use crate::foundation::error::{AvatarError, AvatarResult};

/// Font database shared by every PNG render of one renderer.
pub(crate) fn build_fontdb(font_dirs: &[impl AsRef<Path>]) -> Arc<usvg::fontdb::Database> {
    let mut db = usvg::fontdb::Database::new();
    db.load_system_fonts();
    for dir in font_dirs {
        load_fonts_from_dir(&mut db, dir.as_ref());
    }
    tracing::debug!(faces = db.len(), "loaded avatar fonts");
    Arc::new(db)
}

fn load_fonts_from_dir(db: &mut usvg::fontdb::Database, dir: &Path) {
    let Ok(rd) = std::fs::read_dir(dir) else {
        tracing::warn!(dir = %dir.display(), "font directory not readable");
        return;
    };

    for entry in rd.flatten() {
        let path = entry.path();
        if !path.is_file() {
            continue;
        }
        let Some(ext) = path.extension().and_then(|s| s.to_str()) else {
            continue;
        };
        let ext = ext.to_ascii_lowercase();
        if ext != "ttf" && ext != "otf" && ext != "ttc" {
            continue;
        }
        if let Err(e) = db.load_font_file(&path) {
            tracing::warn!(path = %path.display(), error = %e, "skipping unreadable font");
        }
    }
}

/// Rasterize an avatar SVG into a `size`x`size` PNG.
///
/// Fails when no font in `fontdb` could turn the letters into outlines; the shape alone is
/// never served.
pub(crate) fn rasterize_svg_to_png(
    svg: &str,
    size: u32,
    fontdb: Arc<usvg::fontdb::Database>,
) -> AvatarResult<Vec<u8>> {
    let faces = fontdb.len();
    let tree = parse_svg(svg, fontdb)?;
    if !has_drawn_text(tree.root()) {
        return Err(AvatarError::render(format!(
            "no font could draw the avatar letters ({faces} font faces loaded)"
        )));
    }
    tree_to_png(&tree, size)
}

pub(crate) fn parse_svg(
    svg: &str,
    fontdb: Arc<usvg::fontdb::Database>,
) -> AvatarResult<usvg::Tree> {
    let opts = usvg::Options {
        fontdb,
        ..Default::default()
    };
    usvg::Tree::from_str(svg, &opts)
        .map_err(|e| AvatarError::render(format!("parse avatar svg: {e}")))
}

// usvg drops text it cannot shape, and keeps text nodes whose glyphs have no outlines empty.
fn has_drawn_text(group: &usvg::Group) -> bool {
    group.children().iter().any(|node| match node {
        usvg::Node::Text(text) => !text.flattened().children().is_empty(),
        usvg::Node::Group(g) => has_drawn_text(g),
        _ => false,
    })
}

pub(crate) fn tree_to_png(tree: &usvg::Tree, size: u32) -> AvatarResult<Vec<u8>> {
    let mut pixmap = resvg::tiny_skia::Pixmap::new(size, size)
        .ok_or_else(|| AvatarError::render("failed to allocate avatar pixmap"))?;

    let sx = (size as f32) / tree.size().width();
    let sy = (size as f32) / tree.size().height();
    let xform = resvg::tiny_skia::Transform::from_scale(sx, sy);
    resvg::render(tree, xform, &mut pixmap.as_mut());

    let mut rgba = pixmap.data().to_vec();
    demultiply_rgba8_in_place(&mut rgba);

    let img = image::RgbaImage::from_raw(size, size, rgba)
        .ok_or_else(|| AvatarError::render("pixmap size does not match avatar size"))?;
    let mut buf = Vec::new();
    image::DynamicImage::ImageRgba8(img)
        .write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Png)
        .context("encode avatar png")?;
    Ok(buf)
}

// tiny-skia pixmaps are premultiplied; PNG wants straight alpha.
fn demultiply_rgba8_in_place(rgba: &mut [u8]) {
    for px in rgba.chunks_exact_mut(4) {
        let a = px[3] as u16;
        if a == 0 || a == 255 {
            continue;
        }
        for c in &mut px[..3] {
            *c = ((*c as u16 * 255 + a / 2) / a).min(255) as u8;
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/raster.rs"]
mod tests;
