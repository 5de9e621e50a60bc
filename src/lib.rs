//! Letter avatars: placeholder profile pictures made of one or two letters on a colored shape.
//!
//! The engine maps a user identity plus an administrator's configuration to an image.
//!
//! # Pipeline overview
//!
//! 1. **Letters**: [`resolve_letters`] walks the identity fallback chain
//!    (first + last name, nickname, display name, username, email local part).
//! 2. **Background**: [`assign_background`] picks a color per [`ColorMethod`]
//!    (`auto` hashes the identity key into a hue, `fixed` uses one color, `random` picks a
//!    palette entry per user).
//! 3. **Foreground**: [`foreground_for`] picks black or white, whichever contrasts more.
//! 4. **Render**: [`AvatarRenderer`] draws an SVG document and optionally rasterizes it to PNG.
//!
//! [`AvatarService`] runs the whole pipeline and can cache results by request fingerprint.
//!
//! Design constraints:
//!
//! - **No unsafe**: `unsafe` is forbidden in this crate.
//! - **Deterministic**: equal inputs give byte-identical output, across processes and
//!   platforms, so avatars can be cached by content.
//! - **No ambient state**: configuration is an explicit [`AvatarConfig`] value; hosts that
//!   store loosely typed options can build one with [`AvatarConfig::from_options`].
//!
//! ```
//! use letter_avatar::{AvatarConfig, AvatarService, AvatarServiceOpts, UserIdentity};
//!
//! let service = AvatarService::new(AvatarServiceOpts::default())?;
//! let avatar = service.get_avatar(
//!     &UserIdentity::from_names("Ada", "Lovelace"),
//!     &AvatarConfig::default(),
//! )?;
//! assert_eq!(avatar.resolved.letters, "AL");
//! assert_eq!(avatar.mime_type(), "image/svg+xml");
//! # Ok::<(), letter_avatar::AvatarError>(())
//! ```
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod color;
mod config;
mod foundation;
mod identity;
mod render;
mod service;

pub use color::assign::{AUTO_LIGHTNESS, AUTO_SATURATION, assign_background, auto_color};
pub use color::contrast::{
    LUMINANCE_THRESHOLD, contrast_ratio, foreground_for, relative_luminance,
};
pub use config::model::{AvatarConfig, ColorMethod, DEFAULT_FIXED_COLOR};
pub use config::options::{
    AVATAR_OPTIONS, OptionDefault, OptionKind, OptionSpec, OptionValue, option_spec,
    parse_color_list,
};
pub use foundation::core::{Rgb, Shape};
pub use foundation::error::{AvatarError, AvatarResult};
pub use foundation::hash::stable_hash;
pub use identity::resolver::{UserIdentity, resolve_letters};
pub use render::{AvatarRenderer, ImageFormat, MAX_SIZE, MIN_SIZE, RenderSettings};
pub use service::avatar::{
    Avatar, AvatarService, AvatarServiceOpts, ResolvedAvatar, resolve_avatar,
};
pub use service::cache::{AvatarCacheOpts, CacheStats};
pub use service::fingerprint::{AvatarFingerprint, fingerprint_request};
