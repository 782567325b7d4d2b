use minesweeper_core::Coord2;
use thiserror::Error;

use crate::coords::{ParseCoordsError, parse_coords};

pub const HELP: &str = "\
Commands:
  open <cell>    (o) open a cell, a bare <cell> does the same
  flag <cell>    (f) flag a cell
  unflag <cell>  (u) remove a flag
  toggle <cell>  (t) flag or unflag a cell
  mines          show where the mines are
  restart        start a new game
  help           show this message
  quit           leave
Cells are a column letter and a row number, ex: a3";

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Command {
    Open(Coord2),
    Flag(Coord2),
    Unflag(Coord2),
    Toggle(Coord2),
    Mines,
    Restart,
    Help,
    Quit,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CommandError {
    #[error("Unknown command `{0}`, type `help` for the list of commands")]
    Unknown(String),
    #[error("`{0}` needs a cell, ex: {0} a3")]
    MissingCell(String),
    #[error("Too many arguments for `{0}`")]
    TooManyArguments(String),
    #[error(transparent)]
    Coords(#[from] ParseCoordsError),
}

impl Command {
    /// `Ok(None)` for a blank line.
    pub fn parse(line: &str, size: Coord2) -> Result<Option<Self>, CommandError> {
        let mut words = line.split_whitespace();
        let Some(name) = words.next() else {
            return Ok(None);
        };
        let argument = words.next();
        if words.next().is_some() {
            return Err(CommandError::TooManyArguments(name.to_owned()));
        }

        let cell = |make: fn(Coord2) -> Command| -> Result<Option<Command>, CommandError> {
            let argument = argument.ok_or_else(|| CommandError::MissingCell(name.to_owned()))?;
            Ok(Some(make(parse_coords(argument, size)?)))
        };
        let bare = |command: Command| -> Result<Option<Command>, CommandError> {
            match argument {
                Some(_) => Err(CommandError::TooManyArguments(name.to_owned())),
                None => Ok(Some(command)),
            }
        };

        match name.to_ascii_lowercase().as_str() {
            "open" | "o" => cell(Command::Open),
            "flag" | "f" => cell(Command::Flag),
            "unflag" | "u" => cell(Command::Unflag),
            "toggle" | "t" => cell(Command::Toggle),
            "mines" => bare(Command::Mines),
            "restart" | "reset" => bare(Command::Restart),
            "help" | "?" => bare(Command::Help),
            "quit" | "exit" | "q" => bare(Command::Quit),
            _ if argument.is_none() => match parse_coords(name, size) {
                Ok(coords) => Ok(Some(Command::Open(coords))),
                Err(_) => Err(CommandError::Unknown(name.to_owned())),
            },
            _ => Err(CommandError::Unknown(name.to_owned())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SIZE: Coord2 = (10, 10);

    #[test]
    fn parses_commands_and_aliases() {
        assert_eq!(Command::parse("open a3", SIZE), Ok(Some(Command::Open((0, 2)))));
        assert_eq!(Command::parse("F j10", SIZE), Ok(Some(Command::Flag((9, 9)))));
        assert_eq!(Command::parse("u 2b", SIZE), Ok(Some(Command::Unflag((1, 1)))));
        assert_eq!(Command::parse("t c1", SIZE), Ok(Some(Command::Toggle((2, 0)))));
        assert_eq!(Command::parse("  restart ", SIZE), Ok(Some(Command::Restart)));
        assert_eq!(Command::parse("q", SIZE), Ok(Some(Command::Quit)));
    }

    #[test]
    fn bare_cell_means_open() {
        assert_eq!(Command::parse("e5", SIZE), Ok(Some(Command::Open((4, 4)))));
    }

    #[test]
    fn blank_line_is_nothing() {
        assert_eq!(Command::parse("   ", SIZE), Ok(None));
    }

    #[test]
    fn reports_bad_input() {
        assert_eq!(
            Command::parse("dig a3", SIZE),
            Err(CommandError::Unknown("dig".into()))
        );
        assert_eq!(
            Command::parse("flag", SIZE),
            Err(CommandError::MissingCell("flag".into()))
        );
        assert_eq!(
            Command::parse("open z9", SIZE),
            Err(CommandError::Coords(ParseCoordsError::InvalidColumn { last: 'j' }))
        );
        assert_eq!(
            Command::parse("mines a1", SIZE),
            Err(CommandError::TooManyArguments("mines".into()))
        );
        assert_eq!(
            Command::parse("xyz", SIZE),
            Err(CommandError::Unknown("xyz".into()))
        );
    }
}
