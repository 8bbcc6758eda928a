use std::io::Write;
use std::net::{SocketAddrV4, TcpStream};
use std::os::fd::AsRawFd;
use std::time::Duration;

use anyhow::Context;
use nix::unistd::dup2;
use tracing::info;

/// Connects to `addr` and makes the connection our stdin, stdout and stderr.
/// The returned stream must stay alive for the rest of the session.
pub fn connect(addr: SocketAddrV4, send_timeout: u64) -> anyhow::Result<TcpStream> {
    let timeout = (send_timeout > 0).then(|| Duration::from_secs(send_timeout));

    let stream = match timeout {
        Some(timeout) => TcpStream::connect_timeout(&addr.into(), timeout),
        None => TcpStream::connect(addr),
    }
    .with_context(|| format!("cannot connect to {addr}"))?;
    stream
        .set_write_timeout(timeout)
        .context("cannot set send timeout")?;
    info!("connected to {}", addr);

    let mut stdout = std::io::stdout();
    writeln!(stdout, "Connected to {addr}")?;
    stdout.flush()?;

    let fd = stream.as_raw_fd();
    for target in 0..=2 {
        dup2(fd, target).with_context(|| format!("cannot redirect fd {target}"))?;
    }

    Ok(stream)
}
