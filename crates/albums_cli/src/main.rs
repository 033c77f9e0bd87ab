//! Album catalog CLI entry point.
//!
//! # Responsibility
//! - Load configuration, start logging and open the record store.
//! - Run the startup demo query, then read and execute one command.
//!
//! # Invariants
//! - Every error is fatal: it is logged, printed to stderr, and the process
//!   exits with a non-zero code.
//! - The store is closed explicitly on the success path.

use albums_core::command::prompt::read_line;
use albums_core::{
    format_albums, init_logging_from, open_store, AlbumRepository, AppConfig, CommandError,
    Dispatcher, Prompter,
};
use log::{error, info};
use std::error::Error;
use std::io::{self, Write};
use std::process::ExitCode;

const DEMO_ARTIST: &str = "John Coltrane";

fn main() -> ExitCode {
    let config = match AppConfig::from_env() {
        Ok(config) => config,
        Err(err) => {
            eprintln!("configuration error: {err}");
            return ExitCode::FAILURE;
        }
    };

    if let Err(err) = init_logging_from(&config.log) {
        eprintln!("logging disabled: {err}");
    }

    match run(&config) {
        Ok(()) => {
            info!("event=app_exit module=cli status=ok");
            ExitCode::SUCCESS
        }
        Err(err) => {
            error!("event=app_exit module=cli status=error error={err}");
            eprintln!("{err}");
            ExitCode::FAILURE
        }
    }
}

fn run(config: &AppConfig) -> Result<(), Box<dyn Error>> {
    let store = open_store(&config.store)?;
    println!("Connected!");

    let albums = store.albums_by_artist(DEMO_ARTIST)?;
    println!("Albums: {}", format_albums(&albums));

    println!("Please enter a command (search, get, add):");
    io::stdout().flush()?;

    let mut input = io::stdin().lock();
    let line = read_line(&mut input)
        .map_err(|err| CommandError::Input(format!("failed to read command: {err}")))?
        .ok_or_else(|| CommandError::Input("input ended before a command was entered".to_string()))?;

    let dispatcher = Dispatcher::new(store);
    let mut prompter = Prompter::new(input, io::stdout());
    let output = dispatcher.dispatch_line(&line, &mut prompter)?;
    println!("You do love typing: {output}");

    dispatcher.into_repo().close()?;
    Ok(())
}
