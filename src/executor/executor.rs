use std::os::unix::io::RawFd;

use log::{debug, warn};
use nix::errno::Errno;
use nix::unistd::Pid;
use thiserror::Error;

use crate::ast::{Command, FinalCommand, OpenMode, STDIN, STDOUT};
use crate::executor::path_resolver::SearchPath;
use crate::executor::sys::Sys;

/// Status a process exits with after interpreting its subtree.
pub type ExecStatus = Result<i32, ExecError>;

pub const STATUS_NOT_FOUND: i32 = 127;

#[derive(Debug, Error)]
pub enum ExecError {
    #[error("exec {0} failed")]
    CommandNotFound(String),
    #[error("open {0} failed")]
    RedirectError(String),
    #[error("cannot bind descriptor {fd}: {source}")]
    Descriptor { fd: RawFd, source: Errno },
    #[error("pipe")]
    PipeError(#[source] Errno),
    #[error("fork")]
    ForkError(#[source] Errno),
    #[error("wait")]
    WaitError(#[source] Errno),
}

impl ExecError {
    pub fn status(&self) -> i32 {
        match self {
            ExecError::CommandNotFound(_) => STATUS_NOT_FOUND,
            _ => 1,
        }
    }

    /// The line a process prints before giving up. Only a failed program lookup
    /// names the shell.
    pub fn diagnostic(&self) -> String {
        match self {
            ExecError::CommandNotFound(_) => format!("hello: {self}"),
            _ => self.to_string(),
        }
    }
}

/// Interprets a finalized tree in whichever process owns it. Every path through
/// `run` ends with the status the current process has to exit with, unless a program
/// image replaced the process first.
pub struct Executor<'a> {
    sys: &'a mut dyn Sys,
    search_path: &'a SearchPath,
}

impl<'a> Executor<'a> {
    pub fn new(sys: &'a mut dyn Sys, search_path: &'a SearchPath) -> Self {
        Executor { sys, search_path }
    }

    pub fn run(&mut self, cmd: &FinalCommand) -> i32 {
        let result = self.exec(cmd);
        finish(result)
    }

    pub fn exec(&mut self, cmd: &FinalCommand) -> ExecStatus {
        match cmd {
            Command::Exec { words } => self.exec_program(words),
            Command::Redirect {
                cmd: inner,
                file,
                mode,
                fd,
            } => {
                self.redirect(file, *mode, *fd)?;
                self.exec(inner)
            }
            Command::Pipe(left, right) => self.exec_pipe(left, right),
            Command::List(left, right) => self.exec_list(left, right),
            Command::Background(inner) => self.exec_background(inner),
        }
    }

    fn exec_program(&mut self, words: &[String]) -> ExecStatus {
        let Some(program) = words.first() else {
            return Ok(0);
        };
        for candidate in self.search_path.candidates(program) {
            let errno = self.sys.exec(&candidate, words);
            debug!("exec {candidate}: {errno}");
        }
        Err(ExecError::CommandNotFound(program.clone()))
    }

    fn redirect(&mut self, file: &str, mode: OpenMode, fd: RawFd) -> Result<(), ExecError> {
        // The target may already be closed.
        let _ = self.sys.close(fd);
        let opened = self
            .sys
            .open(file, mode)
            .map_err(|_| ExecError::RedirectError(file.to_string()))?;
        if opened != fd {
            self.sys
                .dup2(opened, fd)
                .map_err(|source| ExecError::Descriptor { fd, source })?;
            let _ = self.sys.close(opened);
        }
        Ok(())
    }

    fn exec_pipe(&mut self, left: &FinalCommand, right: &FinalCommand) -> ExecStatus {
        let (read, write) = self.sys.pipe().map_err(ExecError::PipeError)?;
        let path = self.search_path;

        self.sys
            .spawn(&mut |sys: &mut dyn Sys| {
                Executor::new(sys, path).run_connected(left, write, STDOUT, read)
            })
            .map_err(ExecError::ForkError)?;
        self.sys
            .spawn(&mut |sys: &mut dyn Sys| {
                Executor::new(sys, path).run_connected(right, read, STDIN, write)
            })
            .map_err(ExecError::ForkError)?;

        for fd in [read, write] {
            if let Err(e) = self.sys.close(fd) {
                warn!("close {fd}: {e}");
            }
        }
        self.wait_child()?;
        self.wait_child()?;
        Ok(0)
    }

    // Left side runs in a child; the right side continues in this process.
    fn exec_list(&mut self, left: &FinalCommand, right: &FinalCommand) -> ExecStatus {
        self.spawn(left)?;
        self.wait_child()?;
        self.exec(right)
    }

    fn exec_background(&mut self, inner: &FinalCommand) -> ExecStatus {
        let pid = self.spawn(inner)?;
        debug!("background {pid}");
        Ok(0)
    }

    fn spawn(&mut self, cmd: &FinalCommand) -> Result<Pid, ExecError> {
        let path = self.search_path;
        self.sys
            .spawn(&mut |sys: &mut dyn Sys| Executor::new(sys, path).run(cmd))
            .map_err(ExecError::ForkError)
    }

    fn wait_child(&mut self) -> Result<Pid, ExecError> {
        self.sys.wait().map_err(ExecError::WaitError)
    }

    /// Binds `end` to `target`, drops the pipe end this side does not use, then runs `cmd`.
    fn run_connected(
        &mut self,
        cmd: &FinalCommand,
        end: RawFd,
        target: RawFd,
        unused: RawFd,
    ) -> i32 {
        let result = self.connect(end, target, unused).and_then(|_| self.exec(cmd));
        finish(result)
    }

    fn connect(&mut self, end: RawFd, target: RawFd, unused: RawFd) -> Result<(), ExecError> {
        let _ = self.sys.close(unused);
        self.sys
            .dup2(end, target)
            .map_err(|source| ExecError::Descriptor { fd: target, source })?;
        let _ = self.sys.close(end);
        Ok(())
    }
}

fn finish(result: ExecStatus) -> i32 {
    match result {
        Ok(status) => status,
        Err(e) => {
            eprintln!("{}", e.diagnostic());
            e.status()
        }
    }
}
