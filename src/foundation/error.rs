/// Convenience result alias used across the crate.
pub type LensResult<T> = Result<T, LensError>;

/// Error taxonomy for lens placement and rendering.
///
/// None of these are fatal to a host: every failure degrades to "lens not shown".
#[derive(thiserror::Error, Debug)]
pub enum LensError {
    /// A size passed to cover-fit or surface construction was non-positive or non-finite.
    #[error("invalid dimension: {0}")]
    InvalidDimension(String),

    /// The operation needs a source image and none has been set yet.
    #[error("source image not ready")]
    ImageNotReady,

    /// The drawing surface is missing, empty, or its pixel buffer does not match its size.
    #[error("render target unavailable: {0}")]
    RenderTargetUnavailable(String),

    /// Configuration failed validation.
    #[error("validation error: {0}")]
    Validation(String),

    /// Image decoding or SVG rasterization failed.
    #[error("asset error: {0}")]
    Asset(String),

    /// Wrapped foreign error.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl LensError {
    /// Build an [`LensError::InvalidDimension`].
    pub fn invalid_dimension(msg: impl Into<String>) -> Self {
        Self::InvalidDimension(msg.into())
    }

    /// Build an [`LensError::RenderTargetUnavailable`].
    pub fn target_unavailable(msg: impl Into<String>) -> Self {
        Self::RenderTargetUnavailable(msg.into())
    }

    /// Build an [`LensError::Validation`].
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build an [`LensError::Asset`].
    pub fn asset(msg: impl Into<String>) -> Self {
        Self::Asset(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
