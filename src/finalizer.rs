use crate::ast::{Command, FinalCommand, ParsedCommand};

/// Materializes every word and redirection target of a parsed tree as an owned string.
/// The parsed tree is consumed, so a tree can be finalized only once, and nothing in the
/// result borrows from `src`.
pub fn finalize(cmd: ParsedCommand, src: &str) -> FinalCommand {
    match cmd {
        Command::Exec { words } => Command::Exec {
            words: words.iter().map(|w| w.text(src).to_string()).collect(),
        },
        Command::Redirect { cmd, file, mode, fd } => Command::Redirect {
            cmd: Box::new(finalize(*cmd, src)),
            file: file.text(src).to_string(),
            mode,
            fd,
        },
        Command::Pipe(left, right) => {
            Command::Pipe(Box::new(finalize(*left, src)), Box::new(finalize(*right, src)))
        }
        Command::List(left, right) => {
            Command::List(Box::new(finalize(*left, src)), Box::new(finalize(*right, src)))
        }
        Command::Background(cmd) => Command::Background(Box::new(finalize(*cmd, src))),
    }
}
