//! Common error type for the robot face player.

/// Result alias that carries the crate's [`FaceError`] type.
pub type Result<T> = std::result::Result<T, FaceError>;

/// Errors raised by the expression player.
#[derive(Debug, thiserror::Error)]
pub enum FaceError {
    /// Fatal startup problem: missing expressions directory or an empty
    /// library. Playback must not start when this is returned.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// SDL window, renderer, or presentation failure.
    #[error("Display error: {0}")]
    Display(String),

    /// I/O error while scanning the expressions directory.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
