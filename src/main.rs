use std::io::{self, Write};
use std::net::SocketAddrV4;
use std::process::ExitCode;

use argh::FromArgs;
use tracing::debug;
use tracing_subscriber::{self, fmt, prelude::*, EnvFilter};

use error::ShellError;
use shell::{Exit, Shell};

mod builtins;
mod error;
mod eval;
mod process;
mod reader;
mod remote;
mod shell;
mod tokenize;

/// Stephen Brennan's LSH: type program names and arguments, and hit enter.
#[derive(FromArgs, Debug)]
struct Args {
    /// connect stdin, stdout and stderr to an IPv4 server, e.g. 127.0.0.1:4444
    #[argh(option, short = 'c')]
    connect: Option<SocketAddrV4>,

    /// send timeout for --connect in seconds, 0 to disable (default: 8)
    #[argh(option, short = 't', default = "8")]
    send_timeout: u64,
}

fn main() -> ExitCode {
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(io::stderr))
        .with(EnvFilter::from_default_env())
        .init();

    let args: Args = argh::from_env();
    debug!("args: {:?}", args);

    // Keeps the socket open for as long as the shell runs.
    let _connection = match args.connect {
        Some(addr) => match remote::connect(addr, args.send_timeout) {
            Ok(stream) => Some(stream),
            Err(err) => {
                eprintln!("lsh: {err:#}");
                return ExitCode::FAILURE;
            }
        },
        None => None,
    };

    let mut shell = Shell::new(io::stdin(), io::stdout(), io::stderr());
    finish(shell.run(), &mut io::stderr())
}

/// Maps the end of the session to our exit code. A fatal error is reported
/// once, on `stderr`.
fn finish(result: Result<Exit, ShellError>, stderr: &mut dyn Write) -> ExitCode {
    match result {
        Ok(exit) => {
            debug!("shell finished: {:?}", exit);
            ExitCode::SUCCESS
        }
        Err(err) => {
            debug!("fatal: {:?}", err);
            let _ = writeln!(stderr, "lsh: {err}");
            ExitCode::FAILURE
        }
    }
}
