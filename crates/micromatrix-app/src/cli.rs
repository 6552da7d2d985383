use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use micromatrix_game::PlatformMode;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum PlatformArg {
    /// Keyboard and mouse: backspace on an empty cell steps back.
    #[default]
    Pointer,
    /// On-screen keyboard: backspace only clears the focused cell.
    Touch,
}

impl From<PlatformArg> for PlatformMode {
    fn from(arg: PlatformArg) -> Self {
        match arg {
            PlatformArg::Pointer => Self::Pointer,
            PlatformArg::Touch => Self::Touch,
        }
    }
}

/// Play Micromatrix crosswords in the terminal.
#[derive(Debug, Clone, Parser)]
#[command(author, version, about)]
pub struct Args {
    /// JSON list of `{"clue", "answer"}` objects. Defaults to the built-in words.
    #[arg(long, value_name = "FILE")]
    pub words: Option<PathBuf>,

    /// Pre-generated layout JSON. Repeatable; `new` cycles through them.
    #[arg(long = "layout", value_name = "FILE")]
    pub layouts: Vec<PathBuf>,

    /// Input contract of the device.
    #[arg(long, value_name = "MODE", default_value = "pointer")]
    pub platform: PlatformArg,

    /// Where to keep the win streak. Without it the streak is not saved.
    #[arg(long, value_name = "PATH")]
    pub streak_file: Option<PathBuf>,

    /// Log at debug level regardless of `RUST_LOG`.
    #[arg(long)]
    pub debug: bool,
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory as _;

    use super::*;

    #[test]
    fn test_args_definition() {
        Args::command().debug_assert();
    }

    #[test]
    fn test_parse_args() {
        let args = Args::try_parse_from([
            "micromatrix",
            "--layout",
            "a.json",
            "--layout",
            "b.json",
            "--platform",
            "touch",
        ])
        .unwrap();
        assert_eq!(args.layouts.len(), 2);
        assert_eq!(PlatformMode::from(args.platform), PlatformMode::Touch);
        assert!(args.words.is_none());
        assert!(!args.debug);
    }
}
