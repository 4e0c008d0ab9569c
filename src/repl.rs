use std::io::{self, Read, Write};

use log::debug;

use crate::builtin::{BuiltinManager, BuiltinStatus};
use crate::config::Config;
use crate::error::ShellError;
use crate::executor::{ExecError, Executor, SearchPath, Sys};
use crate::io::InputHandler;
use crate::parser;
use crate::prompt::ShellPrompt;
use crate::session::Session;

/// The long-lived interpreter: built-ins run here, everything else in a worker process.
pub struct Shell<S: Sys> {
    sys: S,
    session: Session,
    builtins: BuiltinManager,
    prompt: ShellPrompt,
    line_max: usize,
}

impl<S: Sys> Shell<S> {
    pub fn new(sys: S, session: Session, config: &Config) -> Self {
        Shell {
            sys,
            session,
            builtins: BuiltinManager::new(),
            prompt: ShellPrompt::new(&config.prompt),
            line_max: config.line_max,
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn sys(&self) -> &S {
        &self.sys
    }

    /// Reads and runs lines until end of input.
    pub fn run(
        &mut self,
        input: &mut dyn Read,
        out: &mut dyn Write,
        err: &mut dyn Write,
    ) -> Result<(), ShellError> {
        loop {
            self.prompt.show_prompt(self.session.json, out, err)?;
            let line = match InputHandler::read_line(input, self.line_max) {
                Ok(Some(line)) => line,
                Ok(None) => break,
                Err(e) if e.kind() == io::ErrorKind::InvalidData => {
                    writeln!(err, "hello: {}", e)?;
                    continue;
                }
                Err(e) => return Err(e.into()),
            };
            self.run_line(&line, out, err)?;
        }
        Ok(())
    }

    pub fn run_line(
        &mut self,
        line: &str,
        out: &mut dyn Write,
        err: &mut dyn Write,
    ) -> Result<(), ShellError> {
        match self.builtins.dispatch(line, &mut self.session, out) {
            Ok(BuiltinStatus::Handled) => return Ok(()),
            Ok(BuiltinStatus::NotHandled) => {}
            Err(e) => {
                writeln!(err, "hello: {}", e)?;
                return Ok(());
            }
        }

        // The worker inherits whatever is still buffered.
        out.flush()?;
        err.flush()?;

        let path = &self.session.search_path;
        let worker = self
            .sys
            .spawn(&mut |sys: &mut dyn Sys| run_worker(line, sys, path))
            .map_err(ExecError::ForkError)?;
        debug!("worker {worker} for {line:?}");
        let reaped = self.sys.wait().map_err(ExecError::WaitError)?;
        debug!("reaped {reaped}");
        Ok(())
    }
}

/// Body of a worker process: parse, finalize, execute. Returns the exit status.
pub fn run_worker(line: &str, sys: &mut dyn Sys, search_path: &SearchPath) -> i32 {
    let cmd = match parser::parse_line(line) {
        Ok(cmd) => cmd,
        Err(e) => {
            eprintln!("{}", e.diagnostic());
            return 1;
        }
    };
    Executor::new(sys, search_path).run(&cmd)
}
