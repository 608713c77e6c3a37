use std::str::FromStr;

use minefield_core::{Coord, Coord2};
use thiserror::Error;

pub const HELP: &str = "\
Commands:
  r ROW COL   reveal a cell (also: reveal)
  f ROW COL   toggle a flag (also: flag)
  n           start a new game (also: new)
  h           show this help (also: help)
  q           quit (also: quit)";

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Command {
    Reveal(Coord2),
    Flag(Coord2),
    New,
    Help,
    Quit,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseCommandError {
    #[error("Empty command")]
    Empty,
    #[error("Unknown command {0:?}, type h for help")]
    Unknown(String),
    #[error("Expected ROW and COL after {0:?}")]
    MissingCoords(String),
    #[error("Invalid coordinate {0:?}")]
    InvalidCoord(String),
    #[error("Unexpected trailing input {0:?}")]
    Trailing(String),
}

fn parse_coords<'a>(
    verb: &str,
    mut args: impl Iterator<Item = &'a str>,
) -> Result<Coord2, ParseCommandError> {
    let mut next_coord = || {
        let arg = args
            .next()
            .ok_or_else(|| ParseCommandError::MissingCoords(verb.to_string()))?;
        arg.parse::<Coord>()
            .map_err(|_| ParseCommandError::InvalidCoord(arg.to_string()))
    };
    let row = next_coord()?;
    let col = next_coord()?;
    if let Some(extra) = args.next() {
        return Err(ParseCommandError::Trailing(extra.to_string()));
    }
    Ok((row, col))
}

impl FromStr for Command {
    type Err = ParseCommandError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let mut words = line.split_whitespace();
        let verb = words.next().ok_or(ParseCommandError::Empty)?;
        let command = match verb.to_ascii_lowercase().as_str() {
            "r" | "reveal" => return parse_coords(verb, words).map(Command::Reveal),
            "f" | "flag" => return parse_coords(verb, words).map(Command::Flag),
            "n" | "new" => Command::New,
            "h" | "help" | "?" => Command::Help,
            "q" | "quit" | "exit" => Command::Quit,
            _ => return Err(ParseCommandError::Unknown(verb.to_string())),
        };
        match words.next() {
            Some(extra) => Err(ParseCommandError::Trailing(extra.to_string())),
            None => Ok(command),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_moves() {
        assert_eq!("r 3 4".parse::<Command>(), Ok(Command::Reveal((3, 4))));
        assert_eq!("  FLAG 0   9 ".parse::<Command>(), Ok(Command::Flag((0, 9))));
    }

    #[test]
    fn keeps_negative_coords_for_the_board_to_reject() {
        assert_eq!("reveal -1 0".parse::<Command>(), Ok(Command::Reveal((-1, 0))));
    }

    #[test]
    fn parses_simple_commands() {
        assert_eq!("n".parse::<Command>(), Ok(Command::New));
        assert_eq!("help".parse::<Command>(), Ok(Command::Help));
        assert_eq!("q".parse::<Command>(), Ok(Command::Quit));
    }

    #[test]
    fn rejects_malformed_input() {
        assert_eq!("".parse::<Command>(), Err(ParseCommandError::Empty));
        assert_eq!(
            "dig 1 1".parse::<Command>(),
            Err(ParseCommandError::Unknown("dig".into()))
        );
        assert_eq!(
            "r 1".parse::<Command>(),
            Err(ParseCommandError::MissingCoords("r".into()))
        );
        assert_eq!(
            "f a 1".parse::<Command>(),
            Err(ParseCommandError::InvalidCoord("a".into()))
        );
        assert_eq!(
            "r 1 2 3".parse::<Command>(),
            Err(ParseCommandError::Trailing("3".into()))
        );
        assert_eq!(
            "q now".parse::<Command>(),
            Err(ParseCommandError::Trailing("now".into()))
        );
    }
}
