use std::ffi::OsString;
use std::io::Write;

use thiserror::Error;

use crate::process::Continuation;

mod cd;
mod exit;
mod help;

pub trait BuiltinCommand: Sync {
    fn run(&self, ctx: &mut BuiltinCommandContext) -> Continuation;
}

pub struct BuiltinCommandContext<'a> {
    pub argv: &'a [OsString],
    pub stdout: &'a mut dyn Write,
    pub stderr: &'a mut dyn Write,
}

#[derive(Debug, Error)]
pub enum BuiltinCommandError {
    #[error("command not found")]
    NotFound,
}

static BUILTINS: &[(&str, &dyn BuiltinCommand)] = &[
    ("cd", &cd::Cd),
    ("help", &help::Help),
    ("exit", &exit::Exit),
];

pub fn builtin_command(name: &str) -> Result<&'static dyn BuiltinCommand, BuiltinCommandError> {
    BUILTINS
        .iter()
        .find(|(builtin, _)| *builtin == name)
        .map(|(_, command)| *command)
        .ok_or(BuiltinCommandError::NotFound)
}

pub fn builtin_names() -> impl Iterator<Item = &'static str> {
    BUILTINS.iter().map(|(name, _)| *name)
}

pub fn num_builtins() -> usize {
    BUILTINS.len()
}
