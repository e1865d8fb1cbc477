//! Error types.
//!
//! Two families of failure exist:
//!
//! - Startup failures ([`StartupError`]) abort the program before the frame
//!   loop begins. They cover backend bring-up, configuration and asset loading.
//! - Per-frame failures ([`DrawError`]) are returned by individual draw calls.
//!   The render pass logs them and keeps drawing the rest of the frame.

use thiserror::Error;

/// Failure while (re)loading a [`Texture`](crate::resources::texture::Texture).
///
/// After any of these the texture is left empty.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LoadError {
    /// The image file is missing or could not be decoded.
    #[error("failed to decode image {path}: {reason}")]
    DecodeFailed { path: String, reason: String },

    /// The text could not be rasterized by the backend.
    #[error("failed to rasterize text {text:?}: {reason}")]
    RasterizeFailed { text: String, reason: String },

    /// The backend refused to create a texture from the decoded pixels.
    #[error("failed to upload {what} to the backend: {reason}")]
    UploadFailed { what: String, reason: String },
}

/// Failure of a single draw call.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DrawError {
    /// The texture holds no backend handle (never loaded, or a reload failed).
    #[error("texture is empty")]
    EmptyTexture,

    /// The backend rejected the draw call.
    #[error("backend rejected draw call: {0}")]
    Backend(String),
}

/// Failure while reading the INI configuration.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {reason}")]
    Read { path: String, reason: String },

    #[error("failed to write config file {path}: {reason}")]
    Write { path: String, reason: String },

    #[error("invalid value for [{section}] {key}: {reason}")]
    Invalid {
        section: String,
        key: String,
        reason: String,
    },
}

/// Fatal failure before the frame loop starts.
#[derive(Error, Debug)]
pub enum StartupError {
    /// Backend, window or device bring-up failed.
    #[error("initialization failure: {0}")]
    Initialization(String),

    /// A startup asset could not be loaded.
    #[error("failed to load asset '{asset}': {source}")]
    AssetLoad { asset: String, source: LoadError },

    #[error(transparent)]
    Config(#[from] ConfigError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_asset_load_message_names_asset_and_cause() {
        let err = StartupError::AssetLoad {
            asset: "sprite".into(),
            source: LoadError::DecodeFailed {
                path: "img/missing.png".into(),
                reason: "file not found".into(),
            },
        };
        let msg = err.to_string();
        assert!(msg.contains("sprite"));
        assert!(msg.contains("img/missing.png"));
        assert!(msg.contains("file not found"));
    }

    #[test]
    fn test_config_error_converts_into_startup_error() {
        let err: StartupError = ConfigError::Invalid {
            section: "window".into(),
            key: "width".into(),
            reason: "not a number".into(),
        }
        .into();
        assert!(matches!(err, StartupError::Config(_)));
        assert_eq!(
            err.to_string(),
            "invalid value for [window] width: not a number"
        );
    }
}
