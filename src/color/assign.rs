use crate::config::model::{AvatarConfig, ColorMethod};
use crate::foundation::core::Rgb;
use crate::foundation::error::AvatarResult;
use crate::foundation::hash::stable_hash;
use crate::identity::resolver::UserIdentity;

/// Saturation used for `auto` backgrounds.
pub const AUTO_SATURATION: f64 = 0.55;
/// Lightness used for `auto` backgrounds.
pub const AUTO_LIGHTNESS: f64 = 0.60;

/// Pick the background color for `identity` according to `config.method`.
///
/// `auto` and `random` are both stable per user: they hash [`UserIdentity::key`], so a user
/// keeps their color across requests and restarts. An identity with every field blank hashes
/// as the empty string.
pub fn assign_background(identity: &UserIdentity, config: &AvatarConfig) -> AvatarResult<Rgb> {
    let key = identity.key().unwrap_or_default();
    let key: &str = &key;
    match config.method {
        ColorMethod::Fixed => Rgb::from_hex(&config.fixed_color),
        ColorMethod::Random => {
            let palette = config.palette()?;
            let idx = (stable_hash(key) % palette.len() as u64) as usize;
            Ok(palette[idx])
        }
        ColorMethod::Auto => Ok(auto_color(key)),
    }
}

/// Hue from the key hash, saturation and lightness fixed so every user gets an equally
/// prominent color.
pub fn auto_color(key: &str) -> Rgb {
    let hue = (stable_hash(key) % 360) as f64;
    Rgb::from_hsl(hue, AUTO_SATURATION, AUTO_LIGHTNESS)
}

#[cfg(test)]
#[path = "../../tests/unit/color/assign.rs"]
mod tests;
