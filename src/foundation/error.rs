/// Convenience result type used across framekit.
pub type FramekitResult<T> = Result<T, FramekitError>;

/// Top-level error taxonomy used by engine APIs.
///
/// No variant here is fatal to a running editor: catalog records that fail
/// validation are dropped, missing assets degrade to placeholders, and only
/// the operation that failed is abandoned.
#[derive(thiserror::Error, Debug)]
pub enum FramekitError {
    /// Invalid user-provided or catalog data.
    #[error("validation error: {0}")]
    Validation(String),

    /// A template or user image failed to fetch or decode.
    #[error("asset load error: {0}")]
    AssetLoad(String),

    /// A user-supplied file is not a decodable image.
    #[error("upload error: {0}")]
    Upload(String),

    /// Export serialization failed; no partial output is produced.
    #[error("export error: {0}")]
    Export(String),

    /// Internal compositor failure (surface/buffer mismatch).
    #[error("render error: {0}")]
    Render(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl FramekitError {
    /// Build a [`FramekitError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`FramekitError::AssetLoad`] value.
    pub fn asset_load(msg: impl Into<String>) -> Self {
        Self::AssetLoad(msg.into())
    }

    /// Build a [`FramekitError::Upload`] value.
    pub fn upload(msg: impl Into<String>) -> Self {
        Self::Upload(msg.into())
    }

    /// Build a [`FramekitError::Export`] value.
    pub fn export(msg: impl Into<String>) -> Self {
        Self::Export(msg.into())
    }

    /// Build a [`FramekitError::Render`] value.
    pub fn render(msg: impl Into<String>) -> Self {
        Self::Render(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
