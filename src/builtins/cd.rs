use std::io::Write;

use nix::unistd::chdir;
use tracing::{debug, warn};

use super::{BuiltinCommand, BuiltinCommandContext};
use crate::process::Continuation;

pub struct Cd;

impl BuiltinCommand for Cd {
    fn run(&self, ctx: &mut BuiltinCommandContext) -> Continuation {
        let Some(dir) = ctx.argv.get(1) else {
            report(ctx.stderr, format_args!("lsh: expected argument to \"cd\""));
            return Continuation::Continue;
        };

        match chdir(dir.as_os_str()) {
            Ok(()) => debug!("cd: now in {:?}", dir),
            Err(err) => report(
                ctx.stderr,
                format_args!("lsh: cd: {}: {}", dir.to_string_lossy(), err.desc()),
            ),
        }

        Continuation::Continue
    }
}

fn report(stderr: &mut dyn Write, message: std::fmt::Arguments) {
    if let Err(err) = writeln!(stderr, "{message}") {
        warn!("cd: failed to write diagnostic: {}", err);
    }
}
