//! `deskmate` executable.

use clap::Parser;
use deskmate_cli::{repl, AppConfig, Cli, Session};
use deskmate_core::{init_logging, FileStore};
use log::{error, info};
use std::io;
use std::process::ExitCode;

fn main() -> ExitCode {
    let cli = Cli::parse();
    let config = match AppConfig::resolve(&cli) {
        Ok(config) => config,
        Err(err) => {
            eprintln!("deskmate: {err}");
            return ExitCode::FAILURE;
        }
    };
    if !config.color {
        colored::control::set_override(false);
    }
    if let Err(err) = init_logging(&config.log_level, &config.log_dir) {
        eprintln!("deskmate: logging disabled: {err}");
    }

    let store = FileStore::new(&config.data_dir);
    let mut session = Session::load(&store);
    info!(
        "event=session_start module=cli status=ok contacts={} notes={}",
        session.book().len(),
        session.notes().len()
    );

    let stdin = io::stdin();
    let mut stdout = io::stdout();
    let loop_result = repl::run(&mut session, stdin.lock(), &mut stdout);
    if let Err(err) = &loop_result {
        error!("event=repl_stop module=cli status=error error={err}");
    }

    match session.save(&store) {
        Ok(()) if loop_result.is_ok() => ExitCode::SUCCESS,
        Ok(()) => ExitCode::FAILURE,
        Err(err) => {
            eprintln!("deskmate: failed to save data: {err}");
            ExitCode::FAILURE
        }
    }
}
