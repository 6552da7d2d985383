use std::io::{self, BufRead, Write};

use micromatrix_codec::CodecError;
use micromatrix_game::SessionOptions;

use crate::{
    action::Action,
    action_handler,
    builtin,
    cli::Args,
    layout_source::{self, LayoutSource, LoadError},
    persistence::{StoreError, StreakStore},
    state::AppState,
    view,
};

/// Errors that prevent the app from starting.
#[derive(Debug, derive_more::Display, derive_more::Error, derive_more::From)]
pub enum AppError {
    #[display("{_0}")]
    Load(#[from] LoadError),
    #[display("{_0}")]
    Store(#[from] StoreError),
    #[display("invalid word list: {_0}")]
    Catalog(#[from] CodecError),
}

#[derive(Debug)]
pub struct MicromatrixApp {
    state: AppState,
}

impl MicromatrixApp {
    pub fn new(args: &Args) -> Result<Self, AppError> {
        let words = match &args.words {
            Some(path) => layout_source::load_words(path)?,
            None => builtin::words(),
        };
        let source = LayoutSource::from_files(&args.layouts, builtin::generator())?;
        let streak = match &args.streak_file {
            Some(path) => StreakStore::open(path)?,
            None => StreakStore::in_memory(),
        };
        let options = SessionOptions {
            platform_mode: args.platform.into(),
        };
        let state = AppState::new(words, source, options, streak)?;
        Ok(Self { state })
    }

    #[must_use]
    pub const fn state(&self) -> &AppState {
        &self.state
    }

    /// Reads commands line by line until `quit` or end of input.
    pub fn run<R, W>(&mut self, input: R, mut output: W) -> io::Result<()>
    where
        R: BufRead,
        W: Write,
    {
        self.draw(&mut output)?;
        writeln!(output, "type `help` for commands")?;
        for line in input.lines() {
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }
            let action = match line.parse::<Action>() {
                Ok(action) => action,
                Err(err) => {
                    writeln!(output, "error: {err}")?;
                    continue;
                }
            };
            let effect = action_handler::handle(&mut self.state, action);
            if effect.redraw {
                self.draw(&mut output)?;
            }
            for message in &effect.messages {
                writeln!(output, "{message}")?;
            }
            if effect.quit {
                break;
            }
        }
        output.flush()
    }

    fn draw<W: Write>(&self, output: &mut W) -> io::Result<()> {
        let text = view::render(&self.state.session, self.state.streak.streak());
        write!(output, "{text}")
    }
}

#[cfg(test)]
mod tests {
    use clap::Parser as _;

    use super::*;

    fn run_script(args: &[&str], script: &str) -> (MicromatrixApp, String) {
        let args = Args::try_parse_from(std::iter::once("micromatrix").chain(args.iter().copied()))
            .unwrap();
        let mut app = MicromatrixApp::new(&args).unwrap();
        let mut output = Vec::new();
        app.run(script.as_bytes(), &mut output).unwrap();
        (app, String::from_utf8(output).unwrap())
    }

    #[test]
    fn test_run_reports_errors_and_quits() {
        let (app, output) = run_script(&[], "bogus\nfocus 2 0\nquit\ntype 2 0 x\n");
        assert!(output.contains("error: unknown command `bogus`"), "{output}");
        assert!(output.contains("1. Runtime for JS"), "{output}");
        assert_eq!(app.state().session.letters().filled_count(), 0);
    }

    #[test]
    fn test_streak_file_is_written_on_solve() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("streak.json");
        let path_arg = path.to_str().unwrap();
        let script = "\
type 2 0 node
type 5 0 react
focus 1 1
type 0 1 gogl
type 5 2 aws
click 0 2
type ithub
";
        let (app, output) = run_script(&["--streak-file", path_arg], script);
        assert!(app.state().session.is_solved());
        assert!(output.contains("Solved! Win streak: 1"), "{output}");
        assert_eq!(StreakStore::open(&path).unwrap().streak(), 1);
    }

    #[test]
    fn test_missing_words_file_fails() {
        let args = Args::try_parse_from(["micromatrix", "--words", "/nonexistent/words.json"]).unwrap();
        assert!(matches!(
            MicromatrixApp::new(&args),
            Err(AppError::Load(LoadError::Io { .. }))
        ));
    }
}
