use std::ffi::CString;

use nix::errno::Errno;
use nix::libc;
use nix::sys::signal::Signal;
use nix::sys::wait::{waitpid, WaitPidFlag, WaitStatus};
use nix::unistd::{execvp, fork, write, ForkResult, Pid};
use tracing::{debug, info};

use crate::error::LaunchError;
use crate::tokenize::TokenList;

/// Whether the shell should read another line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Continuation {
    Continue,
    Stop,
}

/// The terminal state of a child process.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChildStatus {
    Exited(i32),
    Signaled(Signal),
}

/// Forks, replaces the child's image with `argv[0]` (looked up in `PATH`)
/// and blocks until the child exits or is killed.
pub fn run_external_command(argv: &TokenList) -> Result<ChildStatus, LaunchError> {
    let args = argv.to_argv()?;
    let Some(program) = args.first() else {
        unreachable!("run_external_command called without a command");
    };

    // SAFETY: the child only calls execvp, write and _exit before it either
    // becomes the new program or terminates.
    match unsafe { fork() }.map_err(LaunchError::Fork)? {
        ForkResult::Child => exec_child(program, &args),
        ForkResult::Parent { child } => {
            info!("spawned {} as {}", program.to_string_lossy(), child);
            wait_for_child(child)
        }
    }
}

fn exec_child(program: &CString, args: &[CString]) -> ! {
    let err = match execvp(program, args) {
        Ok(infallible) => match infallible {},
        Err(err) => err,
    };

    let stderr = std::io::stderr();
    let message: [&[u8]; 5] = [
        b"lsh: ",
        program.as_bytes(),
        b": ",
        err.desc().as_bytes(),
        b"\n",
    ];
    for part in message {
        let _ = write(&stderr, part);
    }

    // SAFETY: _exit skips atexit handlers and stdio flushing, which belong
    // to the parent.
    unsafe { libc::_exit(libc::EXIT_FAILURE) }
}

/// Waits until `pid` exits or is killed, ignoring stop and continue events.
pub fn wait_for_child(pid: Pid) -> Result<ChildStatus, LaunchError> {
    loop {
        match waitpid(pid, Some(WaitPidFlag::WUNTRACED)) {
            Ok(WaitStatus::Exited(_, status)) => {
                debug!("{} exited with {}", pid, status);
                return Ok(ChildStatus::Exited(status));
            }
            Ok(WaitStatus::Signaled(_, signal, _)) => {
                debug!("{} was killed by {}", pid, signal);
                return Ok(ChildStatus::Signaled(signal));
            }
            Ok(status) => debug!("{}: ignoring {:?}", pid, status),
            Err(Errno::EINTR) => continue,
            Err(err) => return Err(LaunchError::Wait(err)),
        }
    }
}
