use crate::config::model::AvatarConfig;
use crate::foundation::hash::StableHasher;
use crate::identity::resolver::UserIdentity;
use crate::render::{ImageFormat, RenderSettings};

/// Stable 128-bit cache key of one avatar request.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct AvatarFingerprint {
    /// High 64 bits.
    pub hi: u64,
    /// Low 64 bits.
    pub lo: u64,
}

/// Fingerprint everything that can change the rendered bytes.
///
/// All identity fields are hashed, not only the identity key: the letters come from the
/// names, so two users sharing an email but not a name must not share an entry.
/// `font_dirs` is left out since it only matters when fonts are loaded.
pub fn fingerprint_request(
    identity: &UserIdentity,
    config: &AvatarConfig,
    settings: &RenderSettings,
) -> AvatarFingerprint {
    let mut h = StableHasher::new();

    h.write_opt_str(identity.first_name.as_deref());
    h.write_opt_str(identity.last_name.as_deref());
    h.write_opt_str(identity.nickname.as_deref());
    h.write_opt_str(identity.display_name.as_deref());
    h.write_opt_str(identity.username.as_deref());
    h.write_opt_str(identity.email.as_deref());

    h.write_bool(config.active);
    h.write_bool(config.rounded);
    h.write_u8(config.letters);
    h.write_bool(config.bold);
    h.write_bool(config.uppercase);
    h.write_str(config.method.as_str());
    h.write_str(&config.fixed_color);
    h.write_u64(config.color_palette.len() as u64);
    for c in &config.color_palette {
        h.write_str(c);
    }

    h.write_u8(match settings.format {
        ImageFormat::Svg => 0,
        ImageFormat::Png => 1,
    });
    h.write_u32(settings.size);
    h.write_str(&settings.font_family);

    let v = h.finish128();
    AvatarFingerprint {
        hi: (v >> 64) as u64,
        lo: v as u64,
    }
}

#[cfg(test)]
#[path = "../../tests/unit/service/fingerprint.rs"]
mod tests;
