use std::io::{Read, Write};

use tracing::{debug, info};

use crate::builtins::num_builtins;
use crate::error::ShellError;
use crate::eval::eval;
use crate::process::Continuation;
use crate::reader::{LineReader, ReadLine};
use crate::tokenize::split_line;

pub const PROMPT: &str = "> ";

/// Why the loop ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Exit {
    /// The `exit` builtin.
    Requested,
    /// The input stream closed.
    EndOfInput,
}

pub struct Shell<I, O, E> {
    reader: LineReader<I>,
    stdout: O,
    stderr: E,
}

impl<I: Read, O: Write, E: Write> Shell<I, O, E> {
    pub fn new(input: I, stdout: O, stderr: E) -> Self {
        debug!("{} builtins registered", num_builtins());
        Self {
            reader: LineReader::new(input),
            stdout,
            stderr,
        }
    }

    /// Prompts, reads, splits and runs commands until `exit` or end of
    /// input. Errors returned from here are fatal.
    pub fn run(&mut self) -> Result<Exit, ShellError> {
        loop {
            self.stdout.write_all(PROMPT.as_bytes())?;
            self.stdout.flush()?;

            let line = match self.reader.read_line()? {
                ReadLine::Line(line) => line,
                ReadLine::Eof => {
                    info!("end of input");
                    return Ok(Exit::EndOfInput);
                }
            };
            let tokens = split_line(&line)?;
            drop(line);

            if eval(&tokens, &mut self.stdout, &mut self.stderr) == Continuation::Stop {
                info!("exit requested");
                return Ok(Exit::Requested);
            }
        }
    }

    #[cfg(test)]
    fn into_output(self) -> (O, E) {
        (self.stdout, self.stderr)
    }
}
