use serde::{Deserialize, Serialize};

use crate::foundation::core::{Rgb, Shape};
use crate::foundation::error::{AvatarError, AvatarResult};

/// Background color for `fixed` mode when none is configured.
pub const DEFAULT_FIXED_COLOR: &str = "fc91ad";

/// How the background color is chosen.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorMethod {
    /// Derived from a stable hash of the user's identity key.
    #[default]
    Auto,
    /// The same configured color for every user.
    Fixed,
    /// An entry of the configured palette, picked per user.
    Random,
}

impl ColorMethod {
    /// Option value spelling (`auto`, `fixed`, `random`).
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Auto => "auto",
            Self::Fixed => "fixed",
            Self::Random => "random",
        }
    }

    /// Parse an option value; anything else is `None`.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "auto" => Some(Self::Auto),
            "fixed" => Some(Self::Fixed),
            "random" => Some(Self::Random),
            _ => None,
        }
    }
}

/// Avatar settings as configured by an administrator.
///
/// The engine expects an already-sanitized value (see [`AvatarConfig::from_options`] for the
/// host-side sanitizer). [`AvatarConfig::validate`] rejects anything malformed instead of
/// coercing it.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct AvatarConfig {
    /// Whether letter avatars are enabled at all.
    pub active: bool,
    /// Circle when true, square otherwise.
    pub rounded: bool,
    /// Number of letters to draw (1 or 2).
    pub letters: u8,
    /// Bold letter weight.
    pub bold: bool,
    /// Uppercase the letters.
    pub uppercase: bool,
    /// Background selection method.
    pub method: ColorMethod,
    /// `rrggbb` color used by [`ColorMethod::Fixed`].
    pub fixed_color: String,
    /// `rrggbb` colors used by [`ColorMethod::Random`].
    pub color_palette: Vec<String>,
}

impl Default for AvatarConfig {
    fn default() -> Self {
        Self {
            active: true,
            rounded: true,
            letters: 2,
            bold: false,
            uppercase: true,
            method: ColorMethod::Auto,
            fixed_color: DEFAULT_FIXED_COLOR.to_string(),
            color_palette: Vec::new(),
        }
    }
}

impl AvatarConfig {
    /// Shape implied by [`AvatarConfig::rounded`].
    pub fn shape(&self) -> Shape {
        Shape::from_rounded(self.rounded)
    }

    /// Check the invariants the engine relies on.
    ///
    /// Only the color settings used by the selected method are checked, so a stale palette
    /// does not break `auto` mode.
    pub fn validate(&self) -> AvatarResult<()> {
        if !(1..=2).contains(&self.letters) {
            return Err(AvatarError::config(format!(
                "letters must be 1 or 2, got {}",
                self.letters
            )));
        }
        match self.method {
            ColorMethod::Auto => {}
            ColorMethod::Fixed => {
                Rgb::from_hex(&self.fixed_color)?;
            }
            ColorMethod::Random => {
                self.palette()?;
            }
        }
        Ok(())
    }

    /// Parsed palette; fails on an empty palette or any malformed entry.
    pub fn palette(&self) -> AvatarResult<Vec<Rgb>> {
        if self.color_palette.is_empty() {
            return Err(AvatarError::config(
                "random color method requires a non-empty color palette",
            ));
        }
        self.color_palette
            .iter()
            .map(|c| Rgb::from_hex(c))
            .collect()
    }

    /// Load a config from JSON. Missing fields take their defaults; the result is validated.
    pub fn from_json_str(s: &str) -> AvatarResult<Self> {
        let cfg: Self = serde_json::from_str(s)
            .map_err(|e| AvatarError::config(format!("invalid avatar config json: {e}")))?;
        cfg.validate()?;
        Ok(cfg)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/config/model.rs"]
mod tests;
