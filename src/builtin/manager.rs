use std::collections::HashMap;
use std::io::Write;

use log::debug;

use crate::builtin::BuiltinError;
use crate::builtin::commands::{CdCommand, HelpCommand, PathCommand, VersionCommand};
use crate::lexer::is_whitespace;
use crate::session::Session;

pub trait BuiltinCommand {
    fn name(&self) -> &'static str;
    /// `rest` is the trimmed text after the command word.
    fn run(&self, rest: &str, session: &mut Session, out: &mut dyn Write)
    -> Result<(), BuiltinError>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuiltinStatus {
    Handled,
    NotHandled,
}

pub struct BuiltinManager {
    commands: HashMap<String, Box<dyn BuiltinCommand>>,
}

impl Default for BuiltinManager {
    fn default() -> Self {
        Self::new()
    }
}

impl BuiltinManager {
    pub fn new() -> Self {
        let mut mgr = BuiltinManager {
            commands: HashMap::new(),
        };
        mgr.register(Box::new(CdCommand));
        mgr.register(Box::new(HelpCommand));
        mgr.register(Box::new(VersionCommand { name: "version" }));
        mgr.register(Box::new(VersionCommand { name: "--version" }));
        mgr.register(Box::new(PathCommand));
        mgr
    }

    pub fn register(&mut self, cmd: Box<dyn BuiltinCommand>) {
        self.commands.insert(cmd.name().to_string(), cmd);
    }

    pub fn is_builtin(&self, name: &str) -> bool {
        self.commands.contains_key(name)
    }

    /// Runs `line` if its leading word names a built-in. A blank line counts as handled.
    /// Errors also mean the line was handled; the caller only reports them.
    pub fn dispatch(
        &self,
        line: &str,
        session: &mut Session,
        out: &mut dyn Write,
    ) -> Result<BuiltinStatus, BuiltinError> {
        let line = trim(line);
        if line.is_empty() {
            return Ok(BuiltinStatus::Handled);
        }
        let (name, rest) = split_first_word(line);
        let Some(cmd) = self.commands.get(name) else {
            return Ok(BuiltinStatus::NotHandled);
        };
        debug!("builtin {name}");
        cmd.run(rest, session, out)?;
        Ok(BuiltinStatus::Handled)
    }
}

pub(crate) fn trim(s: &str) -> &str {
    s.trim_matches(|c: char| c.is_ascii() && is_whitespace(c as u8))
}

/// Splits off the first blank-delimited word; the remainder is trimmed.
pub(crate) fn split_first_word(s: &str) -> (&str, &str) {
    match s.find(|c: char| c.is_ascii() && is_whitespace(c as u8)) {
        Some(at) => (&s[..at], trim(&s[at..])),
        None => (s, ""),
    }
}
