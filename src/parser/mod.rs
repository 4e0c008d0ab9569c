pub mod default;

use thiserror::Error;

use crate::ast::{FinalCommand, ParsedCommand};
use crate::finalizer;

/// An exec node fails to parse once it reaches this many words.
pub const MAX_ARGS: usize = 10;

pub trait Parser {
    fn parse(&mut self) -> Result<ParsedCommand, ParseError>;
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("missing file for redirection")]
    MissingRedirectTarget { pos: usize },
    #[error("syntax - missing )")]
    MissingParen { pos: usize },
    #[error("leftovers: {0}")]
    Leftovers(String),
    #[error("syntax")]
    Syntax { pos: usize },
    #[error("too many args")]
    TooManyArgs,
}

impl ParseError {
    /// The text a worker prints before giving up on the line.
    pub fn diagnostic(&self) -> String {
        match self {
            ParseError::Leftovers(_) => format!("{self}\nsyntax"),
            _ => self.to_string(),
        }
    }
}

/// Parses and finalizes one command line.
pub fn parse_line(src: &str) -> Result<FinalCommand, ParseError> {
    let parsed = default::DefaultParser::new(src).parse()?;
    Ok(finalizer::finalize(parsed, src))
}
