pub(crate) mod raster;
pub(crate) mod svg;

use std::path::PathBuf;
use std::sync::{Arc, OnceLock};

use serde::{Deserialize, Serialize};

use crate::foundation::core::{Rgb, Shape};
use crate::foundation::error::{AvatarError, AvatarResult};

/// Smallest accepted avatar edge in pixels.
pub const MIN_SIZE: u32 = 16;
/// Largest accepted avatar edge in pixels.
pub const MAX_SIZE: u32 = 2048;

/// Encoded output format.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImageFormat {
    /// Resolution-independent SVG document.
    #[default]
    Svg,
    /// Raster PNG with straight alpha.
    Png,
}

impl ImageFormat {
    /// MIME type to serve the bytes with.
    pub fn mime_type(self) -> &'static str {
        match self {
            Self::Svg => "image/svg+xml",
            Self::Png => "image/png",
        }
    }

    /// Conventional file extension.
    pub fn extension(self) -> &'static str {
        match self {
            Self::Svg => "svg",
            Self::Png => "png",
        }
    }
}

/// Output settings shared by every avatar a renderer draws.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderSettings {
    /// Output format.
    pub format: ImageFormat,
    /// Edge length in pixels.
    pub size: u32,
    /// CSS font-family list used for the letters.
    pub font_family: String,
    /// Extra directories scanned for `.ttf`/`.otf`/`.ttc` files (PNG output only).
    pub font_dirs: Vec<PathBuf>,
}

impl Default for RenderSettings {
    fn default() -> Self {
        Self {
            format: ImageFormat::Svg,
            size: 96,
            font_family: "Helvetica, Arial, sans-serif".to_string(),
            font_dirs: Vec::new(),
        }
    }
}

impl RenderSettings {
    /// Check size bounds and font family.
    pub fn validate(&self) -> AvatarResult<()> {
        if !(MIN_SIZE..=MAX_SIZE).contains(&self.size) {
            return Err(AvatarError::config(format!(
                "avatar size must be within {MIN_SIZE}..={MAX_SIZE}, got {}",
                self.size
            )));
        }
        if self.font_family.trim().is_empty() {
            return Err(AvatarError::config("font family must be non-empty"));
        }
        Ok(())
    }
}

/// Draws resolved avatars into encoded bytes.
///
/// Rendering does no file I/O. The font database for PNG output is loaded on first use and
/// reused afterwards.
pub struct AvatarRenderer {
    settings: RenderSettings,
    fontdb: OnceLock<Arc<usvg::fontdb::Database>>,
}

impl AvatarRenderer {
    /// Create a renderer after validating `settings`.
    pub fn new(settings: RenderSettings) -> AvatarResult<Self> {
        settings.validate()?;
        Ok(Self {
            settings,
            fontdb: OnceLock::new(),
        })
    }

    /// Create a renderer that uses `fontdb` instead of scanning system fonts.
    pub fn with_fontdb(
        settings: RenderSettings,
        fontdb: Arc<usvg::fontdb::Database>,
    ) -> AvatarResult<Self> {
        let renderer = Self::new(settings)?;
        let _ = renderer.fontdb.set(fontdb);
        Ok(renderer)
    }

    /// Output settings.
    pub fn settings(&self) -> &RenderSettings {
        &self.settings
    }

    /// Draw `letters` centered on a `shape` filled with `background`.
    ///
    /// Equal inputs always produce byte-identical output. PNG output fails with
    /// [`AvatarError::Render`] when no loaded font can draw `letters`.
    #[tracing::instrument(skip(self), fields(format = ?self.settings.format, size = self.settings.size))]
    pub fn render(
        &self,
        letters: &str,
        background: Rgb,
        foreground: Rgb,
        shape: Shape,
        bold: bool,
    ) -> AvatarResult<Vec<u8>> {
        let doc = svg::build_svg(&svg::SvgAvatar {
            letters,
            background,
            foreground,
            shape,
            bold,
            size: self.settings.size,
            font_family: &self.settings.font_family,
        })?;

        match self.settings.format {
            ImageFormat::Svg => Ok(doc.into_bytes()),
            ImageFormat::Png => {
                let fontdb = self
                    .fontdb
                    .get_or_init(|| raster::build_fontdb(&self.settings.font_dirs))
                    .clone();
                raster::rasterize_svg_to_png(&doc, self.settings.size, fontdb)
            }
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/renderer.rs"]
mod tests;
