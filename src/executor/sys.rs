use std::ffi::CString;
use std::io::{self, Write};
use std::os::unix::io::{IntoRawFd, RawFd};
use std::process;

use log::debug;
use nix::errno::Errno;
use nix::fcntl::{self, OFlag};
use nix::sys::stat::Mode;
use nix::sys::wait;
use nix::unistd::{self, ForkResult, Pid};

use crate::ast::OpenMode;

/// Process primitives the interpreter is built on. Descriptors are plain numbers so that
/// redirections can target a specific slot of the descriptor table.
pub trait Sys {
    /// Runs `body` in a new process, which terminates with the status `body` returns.
    /// The caller gets the id of that process back.
    fn spawn(&mut self, body: &mut dyn FnMut(&mut dyn Sys) -> i32) -> Result<Pid, Errno>;

    /// Replaces the current process image. Returns only when that failed.
    fn exec(&mut self, path: &str, argv: &[String]) -> Errno;

    /// Returns `(read_end, write_end)`.
    fn pipe(&mut self) -> Result<(RawFd, RawFd), Errno>;

    fn dup2(&mut self, src: RawFd, dst: RawFd) -> Result<(), Errno>;

    fn close(&mut self, fd: RawFd) -> Result<(), Errno>;

    fn open(&mut self, path: &str, mode: OpenMode) -> Result<RawFd, Errno>;

    /// Blocks until any child of the current process terminates.
    fn wait(&mut self) -> Result<Pid, Errno>;
}

pub struct NixSys;

impl Sys for NixSys {
    fn spawn(&mut self, body: &mut dyn FnMut(&mut dyn Sys) -> i32) -> Result<Pid, Errno> {
        // SAFETY: the interpreter runs a single thread, so the child starts from a
        // consistent heap and only interprets its subtree before exec or exit.
        match unsafe { unistd::fork() }? {
            ForkResult::Parent { child } => Ok(child),
            ForkResult::Child => {
                let status = body(self);
                let _ = io::stdout().flush();
                process::exit(status)
            }
        }
    }

    fn exec(&mut self, path: &str, argv: &[String]) -> Errno {
        let Ok(c_path) = CString::new(path) else {
            return Errno::EINVAL;
        };
        let c_argv: Result<Vec<CString>, _> =
            argv.iter().map(|a| CString::new(a.as_str())).collect();
        let Ok(c_argv) = c_argv else {
            return Errno::EINVAL;
        };
        match unistd::execv(&c_path, &c_argv) {
            Ok(never) => match never {},
            Err(errno) => errno,
        }
    }

    fn pipe(&mut self) -> Result<(RawFd, RawFd), Errno> {
        let (read, write) = unistd::pipe()?;
        Ok((read.into_raw_fd(), write.into_raw_fd()))
    }

    fn dup2(&mut self, src: RawFd, dst: RawFd) -> Result<(), Errno> {
        unistd::dup2(src, dst).map(|_| ())
    }

    fn close(&mut self, fd: RawFd) -> Result<(), Errno> {
        unistd::close(fd)
    }

    fn open(&mut self, path: &str, mode: OpenMode) -> Result<RawFd, Errno> {
        let flags = match mode {
            OpenMode::Read => OFlag::O_RDONLY,
            OpenMode::WriteCreate => OFlag::O_WRONLY | OFlag::O_CREAT,
        };
        let perm = Mode::S_IRUSR | Mode::S_IWUSR | Mode::S_IRGRP | Mode::S_IROTH;
        fcntl::open(path, flags, perm)
    }

    fn wait(&mut self) -> Result<Pid, Errno> {
        let status = wait::wait()?;
        debug!("reaped {:?}", status);
        status.pid().ok_or(Errno::ECHILD)
    }
}
