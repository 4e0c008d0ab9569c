mod lexer;
mod token;

pub use lexer::{Lexer, is_symbol, is_whitespace};
pub use token::{Span, Token, TokenKind};
