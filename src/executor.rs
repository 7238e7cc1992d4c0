//! Child-side execution of a classified command.
//!
//! Everything in this module runs in a freshly forked child and ends either
//! in a successful exec or in `_exit`. Failures here are reported on stderr
//! and are deliberately unrecoverable: a child that cannot become the program
//! it was forked for is not useful to keep alive.

use std::ffi::CString;
use std::fmt::Display;
use std::fs::OpenOptions;
use std::os::fd::{AsRawFd, OwnedFd, RawFd};
use std::os::unix::fs::OpenOptionsExt;
use std::panic::Location;

use nix::errno::Errno;
use nix::sys::signal::{signal, SigHandler, Signal};
use nix::unistd::{self, ForkResult};

use crate::command::Command;

/// Interrupt disposition a child starts its program under.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Interrupt {
    /// Restore the default action, overriding the shell's own ignore policy.
    Default,
    /// Keep SIGINT ignored, shielding background commands from the keyboard.
    Ignore,
}

/// Exit status for a program that could not be found.
const NOT_FOUND: i32 = 127;
/// Exit status for every other child-side failure.
const CANNOT_EXEC: i32 = 126;

/// Run the executor matching `command`. Never returns.
pub fn run(command: &Command, interrupt: Interrupt) -> ! {
    let handler = match interrupt {
        Interrupt::Default => SigHandler::SigDfl,
        Interrupt::Ignore => SigHandler::SigIgn,
    };
    if let Err(errno) = unsafe { signal(Signal::SIGINT, handler) } {
        fail("sigaction", errno);
    }

    match command {
        Command::Regular { argv } | Command::Background { argv } => exec_program(argv),
        Command::Pipeline { left, right } => run_pipeline(left, right),
        Command::RedirectIn { argv, path } => run_redirect_in(argv, path),
        Command::RedirectOut { argv, path } => run_redirect_out(argv, path),
    }
}

/// Connect two commands with a pipe and exec both.
///
/// The current process forks once more: the new process becomes the reader
/// (right command, stdin from the pipe) and this one becomes the writer (left
/// command, stdout into the pipe). Each side drops the pipe end it does not
/// use before duplicating its own; a stale write end held by the reader would
/// keep it from ever seeing end-of-stream.
fn run_pipeline(left: &[String], right: &[String]) -> ! {
    let (read_end, write_end) = match unistd::pipe() {
        Ok(ends) => ends,
        Err(errno) => fail("pipe", errno),
    };
    match unsafe { unistd::fork() } {
        Err(errno) => fail("fork", errno),
        Ok(ForkResult::Child) => {
            drop(write_end);
            replace_stream(read_end, libc::STDIN_FILENO);
            exec_program(right)
        }
        Ok(ForkResult::Parent { .. }) => {
            drop(read_end);
            replace_stream(write_end, libc::STDOUT_FILENO);
            exec_program(left)
        }
    }
}

fn run_redirect_in(argv: &[String], path: &str) -> ! {
    match OpenOptions::new().read(true).open(path) {
        Ok(file) => replace_stream(file.into(), libc::STDIN_FILENO),
        Err(err) => fail("open", err),
    }
    exec_program(argv)
}

fn run_redirect_out(argv: &[String], path: &str) -> ! {
    let opened = OpenOptions::new()
        .append(true)
        .create(true)
        .mode(0o644)
        .open(path);
    match opened {
        Ok(file) => replace_stream(file.into(), libc::STDOUT_FILENO),
        Err(err) => fail("open", err),
    }
    exec_program(argv)
}

/// Duplicate `fd` onto a standard stream and close the original.
fn replace_stream(fd: OwnedFd, stream: RawFd) {
    if let Err(errno) = unistd::dup2(fd.as_raw_fd(), stream) {
        fail("dup2", errno);
    }
    drop(fd);
}

/// Replace this process image with the program named by `argv[0]`, resolved
/// through `PATH`. Only returns control on failure, which is terminal.
fn exec_program(argv: &[String]) -> ! {
    let cstrings: Result<Vec<CString>, _> =
        argv.iter().map(|arg| CString::new(arg.as_str())).collect();
    let cargv = match cstrings {
        Ok(v) => v,
        Err(err) => fail("exec", err),
    };
    let Some(program) = cargv.first() else {
        eprintln!("dsh: empty command");
        exit_child(CANNOT_EXEC);
    };

    let errno = match unistd::execvp(program, &cargv) {
        Err(errno) => errno,
        Ok(never) => match never {},
    };
    if errno == Errno::ENOENT {
        eprintln!("dsh: command not found: {}", argv[0]);
        exit_child(NOT_FOUND);
    }
    eprintln!("dsh: exec {}: {}", argv[0], errno);
    exit_child(CANNOT_EXEC)
}

/// Report a failed operation with its source location, then terminate.
#[track_caller]
fn fail(operation: &str, err: impl Display) -> ! {
    let location = Location::caller();
    eprintln!(
        "dsh: {} failed at {}:{}: {}",
        operation,
        location.file(),
        location.line(),
        err
    );
    exit_child(CANNOT_EXEC)
}

/// Leave without unwinding; the child shares the parent's runtime state and
/// must not run its destructors or exit hooks.
fn exit_child(status: i32) -> ! {
    unsafe { libc::_exit(status) }
}
