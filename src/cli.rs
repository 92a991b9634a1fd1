use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;

use crate::config::Options;

/// Robot face expression player
#[derive(Parser, Debug, Default)]
#[command(name = "robot-face")]
#[command(version)]
#[command(about = "Full-screen animated robot face expression player", long_about = None)]
pub struct Cli {
    /// Directory containing expression subfolders
    #[arg(short, long, value_name = "DIR")]
    pub path: Option<PathBuf>,

    /// Name of the default (idle) expression
    #[arg(short, long, value_name = "NAME")]
    pub default_expression: Option<String>,

    /// Delay between animation frames in milliseconds
    #[arg(short, long, value_name = "MS")]
    pub frame_delay: Option<u64>,

    /// Run in a window instead of fullscreen
    #[arg(long)]
    pub windowed: bool,
}

impl Cli {
    /// Merge command line arguments over the built-in option defaults.
    pub fn merge_into_options(&self, mut opts: Options) -> Options {
        if let Some(ref path) = self.path {
            opts.expressions_dir = path.clone();
        }
        if let Some(ref name) = self.default_expression {
            opts.default_expression = name.clone();
        }
        if let Some(ms) = self.frame_delay {
            opts.frame_delay = Duration::from_millis(ms);
        }
        if self.windowed {
            opts.windowed = true;
        }
        opts
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{DEFAULT_EXPRESSION_NAME, DEFAULT_FRAME_DELAY_MS};

    #[test]
    fn test_defaults_pass_through() {
        let cli = Cli::default();
        let opts = cli.merge_into_options(Options::default());
        assert_eq!(opts.expressions_dir, PathBuf::from("expressions"));
        assert_eq!(opts.default_expression, DEFAULT_EXPRESSION_NAME);
        assert_eq!(opts.frame_delay, Duration::from_millis(DEFAULT_FRAME_DELAY_MS));
        assert!(!opts.windowed);
    }

    #[test]
    fn test_arguments_override_defaults() {
        let cli = Cli {
            path: Some(PathBuf::from("/srv/faces")),
            default_expression: Some("idle".to_string()),
            frame_delay: Some(40),
            windowed: true,
        };
        let opts = cli.merge_into_options(Options::default());
        assert_eq!(opts.expressions_dir, PathBuf::from("/srv/faces"));
        assert_eq!(opts.default_expression, "idle");
        assert_eq!(opts.frame_delay, Duration::from_millis(40));
        assert!(opts.windowed);
    }

    #[test]
    fn test_parse_short_flags() {
        let cli = Cli::parse_from(["robot-face", "-p", "faces", "-d", "calm", "-f", "120"]);
        assert_eq!(cli.path, Some(PathBuf::from("faces")));
        assert_eq!(cli.default_expression, Some("calm".to_string()));
        assert_eq!(cli.frame_delay, Some(120));
    }
}
