use std::path::PathBuf;
use std::time::Duration;

/// Built-in expressions directory, relative to the working directory.
pub const DEFAULT_EXPRESSIONS_DIR: &str = "expressions";

/// Expression resumed when no request is pending at a loop boundary.
pub const DEFAULT_EXPRESSION_NAME: &str = "blank";

/// How long each animation frame is held before advancing.
pub const DEFAULT_FRAME_DELAY_MS: u64 = 80;

/// Application options that can be set via the command line.
#[derive(Debug, Clone)]
pub struct Options {
    /// Directory containing one subdirectory per expression.
    pub expressions_dir: PathBuf,
    /// Requested default expression name. Falls back to the
    /// lexicographically first loaded expression if absent.
    pub default_expression: String,
    /// Delay between animation frames.
    pub frame_delay: Duration,
    /// Run in a window instead of fullscreen (development aid).
    pub windowed: bool,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            expressions_dir: PathBuf::from(DEFAULT_EXPRESSIONS_DIR),
            default_expression: DEFAULT_EXPRESSION_NAME.to_string(),
            frame_delay: Duration::from_millis(DEFAULT_FRAME_DELAY_MS),
            windowed: false,
        }
    }
}
