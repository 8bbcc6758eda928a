use std::io::Write;

use tracing::{debug, warn};

use crate::builtins::{builtin_command, BuiltinCommandContext, BuiltinCommandError};
use crate::process::{run_external_command, Continuation};
use crate::tokenize::TokenList;

/// Runs one command line: a builtin in-process, or an external program
/// that we wait for. Only a builtin can stop the loop.
pub fn eval(tokens: &TokenList, stdout: &mut dyn Write, stderr: &mut dyn Write) -> Continuation {
    let Some(program) = tokens.program() else {
        debug!("empty command");
        return Continuation::Continue;
    };

    match program.to_str().map(builtin_command) {
        Some(Ok(command)) => {
            debug!("builtin: {:?}", tokens.as_slice());
            return command.run(&mut BuiltinCommandContext {
                argv: tokens.as_slice(),
                stdout,
                stderr,
            });
        }
        Some(Err(BuiltinCommandError::NotFound)) | None => (),
    }

    debug!("argv: {:?}", tokens.as_slice());
    // Buffered output has to reach the terminal before the child's.
    if let Err(err) = stdout.flush() {
        warn!("failed to flush stdout: {}", err);
    }

    match run_external_command(tokens) {
        Ok(status) => debug!("{:?}: {:?}", program, status),
        Err(err) => {
            if let Err(err) = writeln!(stderr, "lsh: {err}") {
                warn!("failed to report launch error: {}", err);
            }
        }
    }

    Continuation::Continue
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;
    use std::ffi::OsString;
    use std::os::unix::ffi::OsStringExt;

    fn run(argv: &[&str]) -> (Continuation, String, String) {
        let mut stdout = Vec::<u8>::new();
        let mut stderr = Vec::<u8>::new();
        let status = eval(&TokenList::from(argv), &mut stdout, &mut stderr);
        (
            status,
            String::from_utf8(stdout).unwrap(),
            String::from_utf8(stderr).unwrap(),
        )
    }

    #[test]
    fn empty_command_continues() {
        assert_eq!(run(&[]), (Continuation::Continue, String::new(), String::new()));
    }

    #[rstest]
    #[case(&["exit"])]
    #[case(&["exit", "ignored", "args"])]
    fn exit_stops(#[case] argv: &[&str]) {
        assert_eq!(run(argv).0, Continuation::Stop);
    }

    #[test]
    fn help_lists_builtins() {
        let (status, stdout, _) = run(&["help"]);
        assert_eq!(status, Continuation::Continue);
        for name in ["cd", "help", "exit"] {
            assert!(stdout.contains(&format!("  {name}\n")), "missing {name}");
        }
    }

    #[test]
    fn cd_without_argument_reports_usage() {
        let (status, _, stderr) = run(&["cd"]);
        assert_eq!(status, Continuation::Continue);
        assert_eq!(stderr, "lsh: expected argument to \"cd\"\n");
    }

    #[rstest]
    #[case(&["true"])]
    #[case(&["false"])]
    #[case(&["sh", "-c", "exit 42"])]
    #[case(&["sh", "-c", "kill -KILL $$"])]
    #[case(&["__nonexistent_binary__"])]
    fn external_commands_continue(#[case] argv: &[&str]) {
        assert_eq!(run(argv).0, Continuation::Continue);
    }

    #[test]
    fn program_that_is_not_utf8_is_launched() {
        let mut stdout = Vec::<u8>::new();
        let mut stderr = Vec::<u8>::new();
        let mut tokens = TokenList::default();
        tokens.push(OsString::from_vec(b"__caf\xe9__".to_vec())).unwrap();

        let status = eval(&tokens, &mut stdout, &mut stderr);

        assert_eq!(status, Continuation::Continue);
        assert_eq!(stderr, b"");
    }

    #[test]
    fn launch_errors_are_reported() {
        let (status, _, stderr) = run(&["echo", "a\0b"]);
        assert_eq!(status, Continuation::Continue);
        assert_eq!(stderr, "lsh: a\0b: argument contains a nul byte\n");
    }
}
