use std::collections::TryReserveError;
use std::io::{self, Read};

use tracing::debug;

use crate::error::ShellError;

/// Initial capacity of a line, and the step it grows by.
pub const LINE_BUFSIZE: usize = 1024;

/// One unparsed line of input, without its terminating newline.
#[derive(Debug)]
pub struct Line {
    buf: Vec<u8>,
}

impl Line {
    pub fn new() -> Result<Self, ShellError> {
        let mut buf = Vec::new();
        buf.try_reserve_exact(LINE_BUFSIZE)?;
        Ok(Self { buf })
    }

    /// Appends a byte, growing by `LINE_BUFSIZE` so that there is always
    /// room for one more byte past the end.
    pub fn push(&mut self, byte: u8) -> Result<(), ShellError> {
        if self.buf.len() + 1 >= self.buf.capacity() {
            self.grow()?;
        }

        self.buf.push(byte);
        Ok(())
    }

    fn grow(&mut self) -> Result<(), TryReserveError> {
        let additional = self.buf.capacity() + LINE_BUFSIZE - self.buf.len();
        self.buf.try_reserve_exact(additional)
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.buf
    }

    pub fn len(&self) -> usize {
        self.buf.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    #[cfg(test)]
    pub fn capacity(&self) -> usize {
        self.buf.capacity()
    }
}

#[derive(Debug)]
pub enum ReadLine {
    Line(Line),
    Eof,
}

/// Reads lines from a byte stream one byte at a time.
pub struct LineReader<R> {
    input: R,
}

impl<R: Read> LineReader<R> {
    pub fn new(input: R) -> Self {
        Self { input }
    }

    pub fn read_line(&mut self) -> Result<ReadLine, ShellError> {
        let mut line = Line::new()?;
        let mut byte = [0u8; 1];

        loop {
            match self.input.read(&mut byte) {
                Ok(0) => {
                    if !line.is_empty() {
                        debug!("discarding {} bytes at end of input", line.len());
                    }
                    return Ok(ReadLine::Eof);
                }
                Ok(_) if byte[0] == b'\n' => return Ok(ReadLine::Line(line)),
                Ok(_) => line.push(byte[0])?,
                Err(err) if err.kind() == io::ErrorKind::Interrupted => continue,
                Err(err) => return Err(err.into()),
            }
        }
    }
}
