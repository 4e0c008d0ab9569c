mod commands;
mod manager;

use std::io;

use thiserror::Error;

pub use commands::{CdCommand, HelpCommand, PathCommand, VersionCommand};
pub use manager::{BuiltinCommand, BuiltinManager, BuiltinStatus};

#[derive(Debug, Error)]
pub enum BuiltinError {
    #[error("cd requires a path")]
    CdMissingPath,
    #[error("cannot cd {path}")]
    CdFailed {
        path: String,
        #[source]
        source: io::Error,
    },
    #[error("usage {0}")]
    Usage(&'static str),
    #[error(transparent)]
    Io(#[from] io::Error),
}
