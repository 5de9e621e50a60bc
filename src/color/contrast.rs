use crate::foundation::core::Rgb;

/// Relative luminance above which black letters contrast better than white ones.
///
/// This is where `(L + 0.05) / 0.05 == 1.05 / (L + 0.05)`, so the chosen foreground always
/// reaches at least `sqrt(21)` (about 4.58:1) against any background.
pub const LUMINANCE_THRESHOLD: f64 = 0.179_128_784_747_792;

/// sRGB relative luminance in `0.0..=1.0` (WCAG 2 definition).
pub fn relative_luminance(c: Rgb) -> f64 {
    fn channel(v: u8) -> f64 {
        let v = f64::from(v) / 255.0;
        if v <= 0.039_28 {
            v / 12.92
        } else {
            ((v + 0.055) / 1.055).powf(2.4)
        }
    }

    0.2126 * channel(c.r) + 0.7152 * channel(c.g) + 0.0722 * channel(c.b)
}

/// WCAG contrast ratio between two colors, in `1.0..=21.0`.
pub fn contrast_ratio(a: Rgb, b: Rgb) -> f64 {
    let la = relative_luminance(a);
    let lb = relative_luminance(b);
    let (hi, lo) = if la >= lb { (la, lb) } else { (lb, la) };
    (hi + 0.05) / (lo + 0.05)
}

/// Black on bright backgrounds, white on dark ones.
pub fn foreground_for(background: Rgb) -> Rgb {
    if relative_luminance(background) > LUMINANCE_THRESHOLD {
        Rgb::BLACK
    } else {
        Rgb::WHITE
    }
}

#[cfg(test)]
#[path = "../../tests/unit/color/contrast.rs"]
mod tests;
