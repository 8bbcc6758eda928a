use std::ffi::{CString, OsStr, OsString};
use std::os::unix::ffi::{OsStrExt, OsStringExt};

use crate::error::{LaunchError, ShellError};
use crate::reader::Line;

/// Initial capacity of a token list, and the step it grows by.
pub const TOKEN_BUFSIZE: usize = 64;

/// Space, tab, carriage return, newline and bell.
const DELIMITERS: &[u8] = b" \t\r\n\x07";

/// The words of one command line, in order. Tokens are owned copies of the
/// input bytes, so the list stays valid after the line it came from is
/// dropped.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct TokenList {
    tokens: Vec<OsString>,
}

impl TokenList {
    pub fn push(&mut self, token: OsString) -> Result<(), ShellError> {
        if self.tokens.len() == self.tokens.capacity() {
            let additional = self.tokens.capacity() + TOKEN_BUFSIZE - self.tokens.len();
            self.tokens.try_reserve_exact(additional)?;
        }

        self.tokens.push(token);
        Ok(())
    }

    /// The first token, if any.
    pub fn program(&self) -> Option<&OsStr> {
        self.tokens.first().map(OsString::as_os_str)
    }

    pub fn as_slice(&self) -> &[OsString] {
        &self.tokens
    }

    #[cfg(test)]
    pub fn capacity(&self) -> usize {
        self.tokens.capacity()
    }

    /// Converts the tokens into an argument vector for `execvp`.
    pub fn to_argv(&self) -> Result<Vec<CString>, LaunchError> {
        self.tokens
            .iter()
            .map(|token| {
                CString::new(token.as_bytes()).map_err(|err| {
                    LaunchError::InvalidArgument(token.to_string_lossy().into_owned(), err)
                })
            })
            .collect()
    }
}

#[cfg(test)]
impl From<&[&str]> for TokenList {
    fn from(tokens: &[&str]) -> Self {
        Self {
            tokens: tokens.iter().map(OsString::from).collect(),
        }
    }
}

/// Splits a line on runs of delimiters. No quoting, no escapes, and no
/// decoding: tokens keep the exact input bytes.
pub fn split_line(line: &Line) -> Result<TokenList, ShellError> {
    let mut tokens = TokenList::default();
    tokens.tokens.try_reserve_exact(TOKEN_BUFSIZE)?;

    for word in line
        .as_bytes()
        .split(|b| DELIMITERS.contains(b))
        .filter(|word| !word.is_empty())
    {
        tokens.push(OsString::from_vec(word.to_vec()))?;
    }

    Ok(tokens)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    fn line(input: impl AsRef<[u8]>) -> Line {
        let mut line = Line::new().unwrap();
        for &b in input.as_ref() {
            line.push(b).unwrap();
        }
        line
    }

    fn words(tokens: &TokenList) -> Vec<&str> {
        tokens.as_slice().iter().map(|t| t.to_str().unwrap()).collect()
    }

    #[rstest]
    #[case("ls", &["ls"])]
    #[case("  ls   -la  ", &["ls", "-la"])]
    #[case("echo\thello\r\nworld", &["echo", "hello", "world"])]
    #[case("a\x07b", &["a", "b"])]
    #[case("echo 'hello world'", &["echo", "'hello", "world'"])]
    #[case("echo \"$HOME\" a|b", &["echo", "\"$HOME\"", "a|b"])]
    #[case("", &[])]
    #[case("   ", &[])]
    #[case(" \t\r\x07 ", &[])]
    fn splits_on_delimiters(#[case] input: &str, #[case] expected: &[&str]) {
        let tokens = split_line(&line(input)).unwrap();
        assert_eq!(words(&tokens), expected);
    }

    #[test]
    fn keeps_bytes_that_are_not_utf8() {
        let tokens = split_line(&line(b"cat caf\xe9.txt")).unwrap();
        let argv = tokens.to_argv().unwrap();

        assert_eq!(tokens.as_slice()[1].as_bytes(), b"caf\xe9.txt");
        assert_eq!(argv[1].as_bytes(), b"caf\xe9.txt");
    }

    #[test]
    fn program_need_not_be_utf8() {
        let tokens = split_line(&line(b"\xff\xfe -x")).unwrap();
        assert_eq!(tokens.program().map(OsStr::as_bytes), Some(&b"\xff\xfe"[..]));
    }

    #[test]
    fn many_tokens_grow_the_list() {
        let input = (0..200).map(|i| i.to_string()).collect::<Vec<_>>().join(" ");
        let tokens = split_line(&line(&input)).unwrap();

        assert_eq!(tokens.as_slice().len(), 200);
        assert!(tokens.capacity() >= 4 * TOKEN_BUFSIZE);
        assert_eq!(tokens.program(), Some(OsStr::new("0")));
        assert_eq!(tokens.as_slice()[199].as_os_str(), OsStr::new("199"));
    }

    #[test]
    fn tokens_outlive_the_line() {
        let line = line("cd /tmp");
        let tokens = split_line(&line).unwrap();
        drop(line);
        assert_eq!(words(&tokens), vec!["cd", "/tmp"]);
    }

    #[test]
    fn empty_list_has_no_command() {
        let tokens = split_line(&line("")).unwrap();
        assert!(tokens.as_slice().is_empty());
        assert_eq!(tokens.program(), None);
    }

    #[test]
    fn argv_rejects_nul() {
        let tokens = split_line(&line("echo a\0b")).unwrap();
        assert!(matches!(
            tokens.to_argv(),
            Err(LaunchError::InvalidArgument(arg, _)) if arg == "a\0b"
        ));
    }

    #[test]
    fn argv_keeps_program_as_argument_zero() {
        let tokens = TokenList::from(&["ls", "-la"][..]);
        let argv = tokens.to_argv().unwrap();
        assert_eq!(argv, vec![CString::new("ls").unwrap(), CString::new("-la").unwrap()]);
    }
}
