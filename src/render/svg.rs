use crate::foundation::core::{Rgb, Shape};
use crate::foundation::error::{AvatarError, AvatarResult};

/// Inputs of one avatar drawing.
#[derive(Clone, Copy, Debug)]
pub(crate) struct SvgAvatar<'a> {
    pub(crate) letters: &'a str,
    pub(crate) background: Rgb,
    pub(crate) foreground: Rgb,
    pub(crate) shape: Shape,
    pub(crate) bold: bool,
    pub(crate) size: u32,
    pub(crate) font_family: &'a str,
}

/// Font size as a share of the canvas: one letter is drawn larger than two.
fn font_size_px(size: u32, letter_count: usize) -> u32 {
    let ratio = if letter_count > 1 { 0.40 } else { 0.45 };
    ((f64::from(size) * ratio).round() as u32).max(1)
}

/// Build the avatar SVG document.
///
/// Output depends only on the inputs, and all coordinates are integers or halves, so equal
/// inputs give byte-identical documents.
pub(crate) fn build_svg(a: &SvgAvatar<'_>) -> AvatarResult<String> {
    if a.letters.is_empty() {
        return Err(AvatarError::render("cannot draw an avatar without letters"));
    }
    if let Some(c) = a.letters.chars().find(|c| c.is_control()) {
        return Err(AvatarError::render(format!(
            "letters contain unsupported control character U+{:04X}",
            u32::from(c)
        )));
    }

    let size = a.size;
    let center = f64::from(size) / 2.0;
    let fill = format!("#{}", a.background.to_hex());
    let shape = match a.shape {
        Shape::Circle => format!(r#"<circle cx="{center}" cy="{center}" r="{center}" fill="{fill}"/>"#),
        Shape::Square => format!(r#"<rect width="{size}" height="{size}" fill="{fill}"/>"#),
    };
    let weight = if a.bold { "bold" } else { "normal" };
    let font_size = font_size_px(size, a.letters.chars().count());

    Ok(format!(
        concat!(
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{size}" height="{size}" viewBox="0 0 {size} {size}">"#,
            "{shape}",
            r##"<text x="{center}" y="{center}" fill="#{fg}" font-family="{family}" font-size="{font_size}" font-weight="{weight}" text-anchor="middle" dominant-baseline="central">{letters}</text>"##,
            "</svg>",
        ),
        size = size,
        shape = shape,
        center = center,
        fg = a.foreground.to_hex(),
        family = escape_xml(a.font_family),
        font_size = font_size,
        weight = weight,
        letters = escape_xml(a.letters),
    ))
}

fn escape_xml(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
#[path = "../../tests/unit/render/svg.rs"]
mod tests;
