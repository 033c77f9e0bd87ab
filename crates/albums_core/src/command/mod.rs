//! Command-line dispatch over the album store.
//!
//! # Responsibility
//! - Tokenize one input line into a verb and arguments.
//! - Route `get`, `search` and `add` to the record store.
//! - Produce one human-readable result string per command.
//!
//! # Invariants
//! - Argument parsing completes before any store round trip.
//! - Store failures are propagated, never reported as success.

use crate::model::album::{format_albums, AlbumId};
use crate::repo::album_repo::{AlbumRepository, StoreError};
use log::info;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::io::{BufRead, Write};

pub mod prompt;

pub use prompt::Prompter;

pub const VERB_GET: &str = "get";
pub const VERB_SEARCH: &str = "search";
pub const VERB_ADD: &str = "add";

pub type CommandResult<T> = Result<T, CommandError>;

#[derive(Debug)]
pub enum CommandError {
    /// Malformed numeric input (command argument or prompted field).
    Parse(String),
    /// Reading interactive input failed or ended early.
    Input(String),
    UnrecognizedCommand(String),
    Store(StoreError),
}

impl Display for CommandError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Parse(message) => write!(f, "{message}"),
            Self::Input(message) => write!(f, "{message}"),
            Self::UnrecognizedCommand(verb) => write!(f, "unrecognized command `{verb}`"),
            Self::Store(err) => write!(f, "{err}"),
        }
    }
}

impl Error for CommandError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Store(err) => Some(err),
            _ => None,
        }
    }
}

impl From<StoreError> for CommandError {
    fn from(value: StoreError) -> Self {
        Self::Store(value)
    }
}

/// Parsed command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Get(AlbumId),
    /// Artist name rejoined from the argument tokens with single spaces.
    Search(String),
    Add,
}

/// Parses one command line.
///
/// # Errors
/// - `CommandError::Parse` when `get` has a missing or non-integer id.
/// - `CommandError::UnrecognizedCommand` for any other verb, including an
///   empty line.
pub fn parse_command(line: &str) -> CommandResult<Command> {
    let tokens: Vec<&str> = line.split_whitespace().collect();
    let Some((verb, args)) = tokens.split_first() else {
        return Err(CommandError::UnrecognizedCommand(String::new()));
    };

    match *verb {
        VERB_GET => {
            let raw = args
                .first()
                .ok_or_else(|| CommandError::Parse("get requires an album id".to_string()))?;
            let id = raw
                .parse::<AlbumId>()
                .map_err(|_| CommandError::Parse(format!("invalid album id `{raw}`")))?;
            Ok(Command::Get(id))
        }
        VERB_SEARCH => Ok(Command::Search(args.join(" "))),
        VERB_ADD => Ok(Command::Add),
        other => Err(CommandError::UnrecognizedCommand(other.to_string())),
    }
}

/// Executes commands against an owned record store.
pub struct Dispatcher<R: AlbumRepository> {
    repo: R,
}

impl<R: AlbumRepository> Dispatcher<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    pub fn repo(&self) -> &R {
        &self.repo
    }

    /// Returns the store, e.g. to close it explicitly.
    pub fn into_repo(self) -> R {
        self.repo
    }

    /// Parses and executes one input line.
    pub fn dispatch_line<I, W>(
        &self,
        line: &str,
        prompter: &mut Prompter<I, W>,
    ) -> CommandResult<String>
    where
        I: BufRead,
        W: Write,
    {
        let command = parse_command(line)?;
        self.execute(&command, prompter)
    }

    /// Executes a parsed command; `add` collects its record via `prompter`.
    pub fn execute<I, W>(
        &self,
        command: &Command,
        prompter: &mut Prompter<I, W>,
    ) -> CommandResult<String>
    where
        I: BufRead,
        W: Write,
    {
        match command {
            Command::Get(id) => {
                info!("event=command module=command verb=get id={id}");
                let album = self.repo.album_by_id(*id)?;
                Ok(format!("Successfully retrieved album with ID {id}: {album}"))
            }
            Command::Search(name) => {
                info!("event=command module=command verb=search");
                let albums = self.repo.albums_by_artist(name)?;
                Ok(format!(
                    "Successfully found albums for artist {name}: {}",
                    format_albums(&albums)
                ))
            }
            Command::Add => {
                info!("event=command module=command verb=add");
                let album = prompter.prompt_new_album()?;
                let id = self.repo.add_album(&album)?;
                Ok(format!("Successfully added album, id is {id}"))
            }
        }
    }
}
