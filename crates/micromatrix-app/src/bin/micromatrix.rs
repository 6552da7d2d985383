//! Micromatrix terminal application.
//!
//! Reads line commands from standard input; run with `help` for the list.

use std::{io, process::ExitCode};

use clap::Parser as _;
use micromatrix_app::{app::MicromatrixApp, cli::Args};

fn main() -> ExitCode {
    better_panic::install();

    let args = Args::parse();
    let mut logger = env_logger::Builder::from_default_env();
    if args.debug {
        logger.filter_level(log::LevelFilter::Debug);
    }
    logger.init();

    log::info!("starting micromatrix {}", env!("CARGO_PKG_VERSION"));

    let mut app = match MicromatrixApp::new(&args) {
        Ok(app) => app,
        Err(err) => {
            eprintln!("micromatrix: {err}");
            return ExitCode::FAILURE;
        }
    };

    let stdin = io::stdin();
    let stdout = io::stdout();
    if let Err(err) = app.run(stdin.lock(), stdout.lock()) {
        eprintln!("micromatrix: {err}");
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}
