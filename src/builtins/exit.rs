use super::{BuiltinCommand, BuiltinCommandContext};
use crate::process::Continuation;

pub struct Exit;

impl BuiltinCommand for Exit {
    fn run(&self, _: &mut BuiltinCommandContext) -> Continuation {
        Continuation::Stop
    }
}
