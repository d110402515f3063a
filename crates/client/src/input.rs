//! Text command parsing.
use mystery_core::{CardinalDirection, Position};
use mystery_runtime::Command;
use thiserror::Error;

/// One line of player input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Input {
    Session(Command),
    Look,
    Status,
    Journal,
    Help,
    Quit,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("type a command, or 'help'")]
    Empty,

    #[error("unknown command '{0}', try 'help'")]
    Unknown(String),

    #[error("'{command}' needs {argument}")]
    MissingArgument {
        command: &'static str,
        argument: &'static str,
    },

    #[error("'{0}' is not a number")]
    InvalidNumber(String),

    #[error("'{0}' is not a direction")]
    InvalidDirection(String),
}

pub const HELP: &str = "\
Commands:
  north|south|east|west (n/s/e/w)   step or turn; face an exit mat to leave the room
  click <x> <y>                     walk to a tile, talk to a suspect or pick up a clue
  tick [n]                          let time pass
  end                               finish the current interview
  accuse <name>                     name the murderer
  look                              draw the room
  status                            show the session as JSON
  journal                           list collected clues
  quit                              leave the game";

/// Parses a line of input. Keywords are case-insensitive.
pub fn parse(line: &str) -> Result<Input, ParseError> {
    let mut words = line.split_whitespace();
    let Some(head) = words.next() else {
        return Err(ParseError::Empty);
    };
    let keyword = head.to_ascii_lowercase();

    let input = match keyword.as_str() {
        "n" | "north" | "s" | "south" | "e" | "east" | "w" | "west" => {
            Input::Session(Command::Move(direction(&keyword)?))
        }
        "go" | "move" => {
            let word = words.next().ok_or(ParseError::MissingArgument {
                command: "go",
                argument: "a direction",
            })?;
            Input::Session(Command::Move(direction(word)?))
        }
        "click" => {
            let missing = ParseError::MissingArgument {
                command: "click",
                argument: "x and y",
            };
            let x = number::<i32>(words.next().ok_or(missing.clone())?)?;
            let y = number::<i32>(words.next().ok_or(missing)?)?;
            Input::Session(Command::Click(Position::new(x, y)))
        }
        "tick" | "wait" => {
            let count = words.next().map(number::<u32>).transpose()?.unwrap_or(1);
            Input::Session(Command::Tick(count))
        }
        "end" | "bye" => Input::Session(Command::EndInterview),
        "accuse" => {
            let name = words.collect::<Vec<_>>().join(" ");
            if name.is_empty() {
                return Err(ParseError::MissingArgument {
                    command: "accuse",
                    argument: "a name",
                });
            }
            Input::Session(Command::Accuse(name))
        }
        "look" | "l" => Input::Look,
        "status" => Input::Status,
        "journal" | "j" => Input::Journal,
        "help" | "?" => Input::Help,
        "quit" | "exit" | "q" => Input::Quit,
        _ => return Err(ParseError::Unknown(head.to_string())),
    };
    Ok(input)
}

fn direction(word: &str) -> Result<CardinalDirection, ParseError> {
    let full = match word.to_ascii_lowercase().as_str() {
        "n" => "north",
        "s" => "south",
        "e" => "east",
        "w" => "west",
        _ => word,
    };
    full.parse()
        .map_err(|_| ParseError::InvalidDirection(word.to_string()))
}

fn number<T: std::str::FromStr>(word: &str) -> Result<T, ParseError> {
    word.parse()
        .map_err(|_| ParseError::InvalidNumber(word.to_string()))
}
