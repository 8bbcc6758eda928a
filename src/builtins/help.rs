use std::io::{self, Write};

use tracing::warn;

use super::{builtin_names, BuiltinCommand, BuiltinCommandContext};
use crate::process::Continuation;

pub struct Help;

impl Help {
    fn print(out: &mut dyn Write) -> io::Result<()> {
        writeln!(out, "Stephen Brennan's LSH")?;
        writeln!(out, "Type program names and arguments, and hit enter.")?;
        writeln!(out, "The following are built in:")?;
        for name in builtin_names() {
            writeln!(out, "  {name}")?;
        }
        writeln!(out, "Use the man command for information on other programs.")?;
        out.flush()
    }
}

impl BuiltinCommand for Help {
    fn run(&self, ctx: &mut BuiltinCommandContext) -> Continuation {
        if let Err(err) = Self::print(ctx.stdout) {
            warn!("help: failed to write: {}", err);
        }

        Continuation::Continue
    }
}
