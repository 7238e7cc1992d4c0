//! Launching a classified command and synchronizing with it.

use nix::errno::Errno;
use nix::sys::signal::{signal, SigHandler, Signal};
use nix::sys::wait::waitpid;
use nix::unistd::{self, ForkResult, Pid};
use tracing::debug;

use crate::command::{classify, Command};
use crate::error::DispatchError;
use crate::executor::{self, Interrupt};

/// The value [`process_arglist`] yields once a command has been launched.
///
/// It only signals that dispatching completed; the launched command's own
/// success or failure is visible through its stderr and exit status, never
/// through this value.
pub const DISPATCH_OK: i32 = 1;

/// Classify and execute one token sequence.
///
/// Exactly one child process is forked per call, whichever form matches. For
/// a background command the call returns as soon as the child is running; for
/// every other form it returns after the child has terminated. Errors from
/// this function are fatal to the shell.
pub fn process_arglist(tokens: &[String]) -> Result<i32, DispatchError> {
    let command = classify(tokens);
    debug!(?command, "classified");
    dispatch(&command)
}

fn dispatch(command: &Command) -> Result<i32, DispatchError> {
    // A foreground child must be interruptible from the keyboard even though
    // the shell itself ignores SIGINT; a background child must not be.
    let interrupt = if command.is_background() {
        Interrupt::Ignore
    } else {
        Interrupt::Default
    };

    match unsafe { unistd::fork() }.map_err(|errno| DispatchError::new("fork", errno))? {
        ForkResult::Child => executor::run(command, interrupt),
        ForkResult::Parent { child } => {
            debug!(pid = child.as_raw(), "launched");
            if command.is_background() {
                // The shell never reaps background children; ignoring SIGCHLD
                // from here on lets the kernel discard them as they exit.
                unsafe { signal(Signal::SIGCHLD, SigHandler::SigIgn) }
                    .map_err(|errno| DispatchError::new("sigaction", errno))?;
            } else {
                await_child(child)?;
            }
            Ok(DISPATCH_OK)
        }
    }
}

/// Block until the foreground child terminates.
///
/// An interrupted wait and a missing child both mean there is nothing left to
/// wait for; only other failures are errors.
fn await_child(child: Pid) -> Result<(), DispatchError> {
    match waitpid(child, None) {
        Ok(_) => Ok(()),
        Err(Errno::EINTR | Errno::ECHILD) => Ok(()),
        Err(errno) => Err(DispatchError::new("waitpid", errno)),
    }
}
