use std::collections::TryReserveError;
use std::ffi::NulError;
use std::io;

use nix::errno::Errno;
use thiserror::Error;

/// Errors that end the session. Everything else is reported and the loop
/// keeps going.
#[derive(Debug, Error)]
pub enum ShellError {
    #[error("allocation error")]
    Allocation(#[from] TryReserveError),
    #[error("{0}")]
    Io(#[from] io::Error),
}

#[derive(Debug, Error)]
pub enum LaunchError {
    #[error("{0}: argument contains a nul byte")]
    InvalidArgument(String, #[source] NulError),
    #[error("fork: {0}")]
    Fork(#[source] Errno),
    #[error("waitpid: {0}")]
    Wait(#[source] Errno),
}
