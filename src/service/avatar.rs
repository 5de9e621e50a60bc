use std::sync::Arc;

use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::color::assign::assign_background;
use crate::color::contrast::foreground_for;
use crate::config::model::AvatarConfig;
use crate::foundation::core::{Rgb, Shape};
use crate::foundation::error::{AvatarError, AvatarResult};
use crate::identity::resolver::{UserIdentity, resolve_letters};
use crate::render::{AvatarRenderer, ImageFormat, RenderSettings};
use crate::service::cache::{AvatarCache, AvatarCacheOpts, CacheStats};
use crate::service::fingerprint::fingerprint_request;

/// What an avatar looks like, before it is drawn.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ResolvedAvatar {
    /// One or two letters.
    pub letters: String,
    /// Shape fill color.
    pub background: Rgb,
    /// Letter color.
    pub foreground: Rgb,
    /// Canvas shape.
    pub shape: Shape,
}

/// A drawn avatar, ready to serve.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Avatar {
    /// Descriptor the bytes were drawn from.
    pub resolved: ResolvedAvatar,
    /// Encoding of `bytes`.
    pub format: ImageFormat,
    /// Encoded image.
    pub bytes: Arc<[u8]>,
}

impl Avatar {
    /// MIME type of [`Avatar::bytes`].
    pub fn mime_type(&self) -> &'static str {
        self.format.mime_type()
    }
}

/// Resolve letters and colors for `identity`.
///
/// Validates `config` but does not look at [`AvatarConfig::active`].
pub fn resolve_avatar(
    identity: &UserIdentity,
    config: &AvatarConfig,
) -> AvatarResult<ResolvedAvatar> {
    config.validate()?;
    let letters = resolve_letters(identity, config.letters, config.uppercase)?;
    let background = assign_background(identity, config)?;
    Ok(ResolvedAvatar {
        letters,
        background,
        foreground: foreground_for(background),
        shape: config.shape(),
    })
}

/// Construction options for [`AvatarService`].
#[derive(Clone, Debug, Default)]
pub struct AvatarServiceOpts {
    /// Output settings.
    pub render: RenderSettings,
    /// Enable the result cache.
    pub cache: Option<AvatarCacheOpts>,
}

/// Entry point for hosts: identity + config in, servable avatar out.
///
/// The service is `Send + Sync`; share one instance across threads.
pub struct AvatarService {
    renderer: AvatarRenderer,
    cache: Option<AvatarCache>,
}

impl AvatarService {
    /// Create a service. Fails if the render settings are invalid.
    pub fn new(opts: AvatarServiceOpts) -> AvatarResult<Self> {
        let renderer = AvatarRenderer::new(opts.render)?;
        Ok(Self::with_renderer(renderer, opts.cache))
    }

    /// Create a service around an existing renderer.
    pub fn with_renderer(renderer: AvatarRenderer, cache: Option<AvatarCacheOpts>) -> Self {
        Self {
            renderer,
            cache: cache.map(AvatarCache::new),
        }
    }

    /// Output settings of the underlying renderer.
    pub fn render_settings(&self) -> &RenderSettings {
        self.renderer.settings()
    }

    /// Resolve without drawing. Fails with [`AvatarError::Disabled`] when inactive.
    pub fn resolve(
        &self,
        identity: &UserIdentity,
        config: &AvatarConfig,
    ) -> AvatarResult<ResolvedAvatar> {
        if !config.active {
            return Err(AvatarError::Disabled);
        }
        resolve_avatar(identity, config)
    }

    /// Resolve and draw an avatar, consulting the cache when enabled.
    #[tracing::instrument(skip_all, fields(method = config.method.as_str()))]
    pub fn get_avatar(
        &self,
        identity: &UserIdentity,
        config: &AvatarConfig,
    ) -> AvatarResult<Avatar> {
        if !config.active {
            return Err(AvatarError::Disabled);
        }
        config.validate()?;

        match &self.cache {
            Some(cache) => {
                let key = fingerprint_request(identity, config, self.renderer.settings());
                cache.get_or_try_insert_with(key, || self.draw(identity, config))
            }
            None => self.draw(identity, config),
        }
    }

    /// [`AvatarService::get_avatar`] for many identities, in parallel on the rayon pool.
    ///
    /// Results are in input order; one failure does not affect the others.
    pub fn get_avatars(
        &self,
        identities: &[UserIdentity],
        config: &AvatarConfig,
    ) -> Vec<AvatarResult<Avatar>> {
        identities
            .par_iter()
            .map(|identity| self.get_avatar(identity, config))
            .collect()
    }

    /// Cache counters, if the cache is enabled.
    pub fn cache_stats(&self) -> Option<CacheStats> {
        self.cache.as_ref().map(AvatarCache::stats)
    }

    /// Drop every cached avatar. Call after the configuration changes.
    pub fn invalidate_cache(&self) {
        if let Some(cache) = &self.cache {
            cache.clear();
            tracing::debug!("avatar cache invalidated");
        }
    }

    fn draw(&self, identity: &UserIdentity, config: &AvatarConfig) -> AvatarResult<Avatar> {
        let resolved = resolve_avatar(identity, config)?;
        let bytes = self.renderer.render(
            &resolved.letters,
            resolved.background,
            resolved.foreground,
            resolved.shape,
            config.bold,
        )?;
        Ok(Avatar {
            resolved,
            format: self.renderer.settings().format,
            bytes: Arc::from(bytes),
        })
    }
}

#[cfg(test)]
#[path = "../../tests/unit/service/avatar.rs"]
mod tests;
