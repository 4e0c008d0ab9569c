pub mod ast;
pub mod builtin;
pub mod config;
pub mod error;
pub mod executor;
pub mod finalizer;
pub mod flags;
pub mod io;
pub mod lexer;
pub mod logging;
pub mod parser;
pub mod prompt;
pub mod record;
pub mod repl;
pub mod session;
