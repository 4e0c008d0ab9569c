use std::os::unix::io::RawFd;

use crate::lexer::Span;

pub const STDIN: RawFd = libc::STDIN_FILENO;
pub const STDOUT: RawFd = libc::STDOUT_FILENO;

/// One parsed command line. `W` is the word representation: `Span` straight out of the
/// parser, `String` once the tree has been finalized.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command<W> {
    Exec {
        words: Vec<W>,
    },
    Redirect {
        cmd: Box<Command<W>>,
        file: W,
        mode: OpenMode,
        fd: RawFd,
    },
    Pipe(Box<Command<W>>, Box<Command<W>>),
    List(Box<Command<W>>, Box<Command<W>>),
    Background(Box<Command<W>>),
}

pub type ParsedCommand = Command<Span>;
pub type FinalCommand = Command<String>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OpenMode {
    Read,
    // `>` and `>>` both land here: the file is created if missing, never truncated
    // and never opened for append.
    WriteCreate,
}

impl<W> Command<W> {
    pub fn exec(words: Vec<W>) -> Self {
        Command::Exec { words }
    }

    pub fn redirect(cmd: Command<W>, file: W, mode: OpenMode, fd: RawFd) -> Self {
        Command::Redirect {
            cmd: Box::new(cmd),
            file,
            mode,
            fd,
        }
    }

    pub fn pipe(left: Command<W>, right: Command<W>) -> Self {
        Command::Pipe(Box::new(left), Box::new(right))
    }

    pub fn list(left: Command<W>, right: Command<W>) -> Self {
        Command::List(Box::new(left), Box::new(right))
    }

    pub fn background(cmd: Command<W>) -> Self {
        Command::Background(Box::new(cmd))
    }
}
