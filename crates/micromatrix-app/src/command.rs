//! Line command parsing.

use std::{num::ParseIntError, str::FromStr};

use micromatrix_core::{MoveDirection, Position};
use micromatrix_game::Key;

use crate::action::Action;

/// Help text listing every command.
pub const HELP: &str = "\
commands:
  focus X Y            focus a cell (0-based column and row)
  click X Y            click a cell; click a crossing cell twice to switch direction
  type [X Y] TEXT      type letters, starting at X Y or the focused cell
  key [X Y] NAME       press backspace, up, down, left, right or enter
  check                flag wrong letters
  new                  start a new puzzle
  show                 redraw the grid
  help                 show this help
  quit                 exit";

/// Errors produced while parsing a command line.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum CommandError {
    #[display("empty command")]
    Empty,
    #[display("unknown command `{name}` (try `help`)")]
    UnknownCommand { name: String },
    #[display("`{command}` expects {expected}")]
    MissingArgument {
        command: &'static str,
        expected: &'static str,
    },
    #[display("`{command}` takes no more than {max} arguments")]
    TooManyArguments { command: &'static str, max: usize },
    #[display("invalid coordinate `{value}`: {source}")]
    InvalidCoordinate {
        value: String,
        source: ParseIntError,
    },
    #[display("unknown key `{name}`")]
    UnknownKey { name: String },
}

impl FromStr for Action {
    type Err = CommandError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let mut words = line.split_whitespace();
        let Some(name) = words.next() else {
            return Err(CommandError::Empty);
        };
        let args = words.collect::<Vec<_>>();

        let action = match name.to_ascii_lowercase().as_str() {
            "focus" => Self::Focus(parse_position("focus", &args)?),
            "click" => Self::Click(parse_position("click", &args)?),
            "type" => {
                let (at, rest) = split_position(&args)?;
                if rest.is_empty() {
                    return Err(CommandError::MissingArgument {
                        command: "type",
                        expected: "letters to type",
                    });
                }
                Self::Type {
                    at,
                    text: rest.concat(),
                }
            }
            "key" => {
                let (at, rest) = split_position(&args)?;
                let key = match rest {
                    [] => {
                        return Err(CommandError::MissingArgument {
                            command: "key",
                            expected: "a key name",
                        });
                    }
                    [name] => parse_key(name)?,
                    _ => {
                        return Err(CommandError::TooManyArguments {
                            command: "key",
                            max: 3,
                        });
                    }
                };
                Self::Key { at, key }
            }
            "check" => no_args("check", &args, Self::Check)?,
            "new" => no_args("new", &args, Self::NewPuzzle)?,
            "show" => no_args("show", &args, Self::Show)?,
            "help" | "?" => Self::Help,
            "quit" | "exit" => Self::Quit,
            _ => {
                return Err(CommandError::UnknownCommand {
                    name: name.to_owned(),
                });
            }
        };
        Ok(action)
    }
}

fn no_args(command: &'static str, args: &[&str], action: Action) -> Result<Action, CommandError> {
    if args.is_empty() {
        Ok(action)
    } else {
        Err(CommandError::TooManyArguments { command, max: 0 })
    }
}

fn parse_coordinate(value: &str) -> Result<usize, CommandError> {
    value
        .parse()
        .map_err(|source| CommandError::InvalidCoordinate {
            value: value.to_owned(),
            source,
        })
}

fn parse_position(command: &'static str, args: &[&str]) -> Result<Position, CommandError> {
    match args {
        [x, y] => Ok(Position::new(parse_coordinate(x)?, parse_coordinate(y)?)),
        [_, _, _, ..] => Err(CommandError::TooManyArguments { command, max: 2 }),
        _ => Err(CommandError::MissingArgument {
            command,
            expected: "a column and a row",
        }),
    }
}

/// Splits an optional leading `X Y` pair off the arguments.
fn split_position<'a, 'b>(
    args: &'a [&'b str],
) -> Result<(Option<Position>, &'a [&'b str]), CommandError> {
    match args {
        [x, y, rest @ ..] if x.bytes().all(|b| b.is_ascii_digit()) => Ok((
            Some(Position::new(parse_coordinate(x)?, parse_coordinate(y)?)),
            rest,
        )),
        _ => Ok((None, args)),
    }
}

fn parse_key(name: &str) -> Result<Key, CommandError> {
    let key = match name.to_ascii_lowercase().as_str() {
        "backspace" | "bs" => Key::Backspace,
        "enter" | "next" => Key::Enter,
        "up" => Key::Arrow(MoveDirection::Up),
        "down" => Key::Arrow(MoveDirection::Down),
        "left" => Key::Arrow(MoveDirection::Left),
        "right" => Key::Arrow(MoveDirection::Right),
        _ => {
            return Err(CommandError::UnknownKey {
                name: name.to_owned(),
            });
        }
    };
    Ok(key)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_cell_commands() {
        assert_eq!(
            "focus 2 3".parse::<Action>(),
            Ok(Action::Focus(Position::new(2, 3)))
        );
        assert_eq!(
            "CLICK 0 1".parse::<Action>(),
            Ok(Action::Click(Position::new(0, 1)))
        );
        assert!(matches!(
            "click 1".parse::<Action>(),
            Err(CommandError::MissingArgument { .. })
        ));
        assert!(matches!(
            "click a 1".parse::<Action>(),
            Err(CommandError::InvalidCoordinate { .. })
        ));
    }

    #[test]
    fn test_parse_type() {
        assert_eq!(
            "type cat".parse::<Action>(),
            Ok(Action::Type {
                at: None,
                text: "cat".to_owned()
            })
        );
        assert_eq!(
            "type 0 1 go og".parse::<Action>(),
            Ok(Action::Type {
                at: Some(Position::new(0, 1)),
                text: "goog".to_owned()
            })
        );
        assert!(matches!(
            "type 0 1".parse::<Action>(),
            Err(CommandError::MissingArgument { .. })
        ));
    }

    #[test]
    fn test_parse_key() {
        assert_eq!(
            "key backspace".parse::<Action>(),
            Ok(Action::Key {
                at: None,
                key: Key::Backspace
            })
        );
        assert_eq!(
            "key 4 2 Left".parse::<Action>(),
            Ok(Action::Key {
                at: Some(Position::new(4, 2)),
                key: Key::Arrow(MoveDirection::Left)
            })
        );
        assert_eq!(
            "key tab".parse::<Action>(),
            Err(CommandError::UnknownKey {
                name: "tab".to_owned()
            })
        );
    }

    #[test]
    fn test_parse_simple_commands() {
        assert_eq!("check".parse::<Action>(), Ok(Action::Check));
        assert_eq!("new".parse::<Action>(), Ok(Action::NewPuzzle));
        assert_eq!("  quit ".parse::<Action>(), Ok(Action::Quit));
        assert_eq!("".parse::<Action>(), Err(CommandError::Empty));
        assert!(matches!(
            "check now".parse::<Action>(),
            Err(CommandError::TooManyArguments { .. })
        ));
        assert!(matches!(
            "solve".parse::<Action>(),
            Err(CommandError::UnknownCommand { .. })
        ));
    }
}
