/// Convenience result type used across the avatar engine.
pub type AvatarResult<T> = Result<T, AvatarError>;

/// Top-level error taxonomy used by engine APIs.
///
/// None of these are transient: the engine does no I/O, so callers should pick a fallback
/// (for example a generic placeholder image) instead of retrying.
#[derive(thiserror::Error, Debug)]
pub enum AvatarError {
    /// No usable letters could be derived from the identity.
    #[error("identity error: {0}")]
    Identity(String),

    /// Invalid or missing configuration value (fixed color, palette, letter count, size).
    #[error("config error: {0}")]
    Config(String),

    /// Avatar generation was invoked while the feature is switched off.
    #[error("letter avatars are disabled")]
    Disabled,

    /// Image synthesis or encoding failed.
    #[error("render error: {0}")]
    Render(String),

    /// Wrapped lower-level error from dependencies.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl AvatarError {
    /// Build an [`AvatarError::Identity`] value.
    pub fn identity(msg: impl Into<String>) -> Self {
        Self::Identity(msg.into())
    }

    /// Build an [`AvatarError::Config`] value.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Build an [`AvatarError::Render`] value.
    pub fn render(msg: impl Into<String>) -> Self {
        Self::Render(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
