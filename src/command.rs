//! Classification of a token sequence into one of the five command forms.

/// A classified command line, carrying only the data its executor needs.
///
/// Argument vectors borrow from the token sequence; control tokens never
/// appear in them. `Regular` is the fallback for any sequence in which no
/// control token sits at a recognized position, so a stray `&` in the middle
/// of a line (or a `<` that is not second-to-last) is passed to the program
/// as a literal argument.
#[derive(Debug, PartialEq, Eq)]
pub enum Command<'a> {
    /// No recognized control token; the whole sequence is the argv.
    Regular { argv: &'a [String] },
    /// Trailing `&`; the argv excludes it.
    Background { argv: &'a [String] },
    /// A `|` splitting the sequence into two argvs.
    Pipeline {
        left: &'a [String],
        right: &'a [String],
    },
    /// `<` at the second-to-last position; stdin comes from `path`.
    RedirectIn { argv: &'a [String], path: &'a str },
    /// `>>` at the second-to-last position; stdout appends to `path`.
    RedirectOut { argv: &'a [String], path: &'a str },
}

impl Command<'_> {
    /// True for forms the shell does not wait on.
    pub fn is_background(&self) -> bool {
        matches!(self, Command::Background { .. })
    }
}

/// Classify a token sequence with a single left-to-right scan.
///
/// At each index the four structural checks are tested in a fixed priority
/// order: `&` at the last index, `|` at any index, `<` at `count-2`, `>>` at
/// `count-2`. The first check that matches decides the form. Because `&` can
/// only match at the very end, a `|` earlier in the sequence wins over a
/// trailing `&`, which then reaches the right-hand command as a literal
/// argument. Exactly one form is ever selected per call.
pub fn classify(tokens: &[String]) -> Command<'_> {
    let count = tokens.len();
    for (i, token) in tokens.iter().enumerate() {
        if i + 1 == count && token == "&" {
            return Command::Background {
                argv: &tokens[..i],
            };
        }
        if token == "|" {
            return Command::Pipeline {
                left: &tokens[..i],
                right: &tokens[i + 1..],
            };
        }
        if i + 2 == count && token == "<" {
            return Command::RedirectIn {
                argv: &tokens[..i],
                path: &tokens[i + 1],
            };
        }
        if i + 2 == count && token == ">>" {
            return Command::RedirectOut {
                argv: &tokens[..i],
                path: &tokens[i + 1],
            };
        }
    }
    Command::Regular { argv: tokens }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn toks(line: &str) -> Vec<String> {
        crate::lexer::tokenize(line)
    }

    #[test]
    fn plain_command_is_regular() {
        let t = toks("echo hi");
        assert_eq!(classify(&t), Command::Regular { argv: &t[..] });
    }

    #[test]
    fn trailing_ampersand_is_background_and_stripped() {
        let t = toks("sleep 5 &");
        match classify(&t) {
            Command::Background { argv } => assert_eq!(argv, ["sleep", "5"]),
            other => panic!("expected background, got {:?}", other),
        }
    }

    #[test]
    fn pipe_splits_into_two_argvs() {
        let t = toks("ls | wc -l");
        match classify(&t) {
            Command::Pipeline { left, right } => {
                assert_eq!(left, ["ls"]);
                assert_eq!(right, ["wc", "-l"]);
            }
            other => panic!("expected pipeline, got {:?}", other),
        }
    }

    #[test]
    fn input_redirect_at_second_to_last() {
        let t = toks("wc -l < notes.txt");
        match classify(&t) {
            Command::RedirectIn { argv, path } => {
                assert_eq!(argv, ["wc", "-l"]);
                assert_eq!(path, "notes.txt");
            }
            other => panic!("expected input redirect, got {:?}", other),
        }
    }

    #[test]
    fn append_redirect_at_second_to_last() {
        let t = toks("echo hi >> log.txt");
        match classify(&t) {
            Command::RedirectOut { argv, path } => {
                assert_eq!(argv, ["echo", "hi"]);
                assert_eq!(path, "log.txt");
            }
            other => panic!("expected append redirect, got {:?}", other),
        }
    }

    #[test]
    fn earlier_pipe_beats_trailing_ampersand() {
        let t = toks("echo hi | cat &");
        match classify(&t) {
            Command::Pipeline { left, right } => {
                assert_eq!(left, ["echo", "hi"]);
                // The `&` is no longer structural and reaches `cat` verbatim.
                assert_eq!(right, ["cat", "&"]);
            }
            other => panic!("expected pipeline, got {:?}", other),
        }
    }

    #[test]
    fn redirect_followed_by_ampersand_is_background() {
        // `<` is pushed off the second-to-last slot by the `&`, so only the
        // background check matches and the redirection tokens stay in argv.
        let t = toks("wc -l < notes.txt &");
        match classify(&t) {
            Command::Background { argv } => {
                assert_eq!(argv, ["wc", "-l", "<", "notes.txt"]);
            }
            other => panic!("expected background, got {:?}", other),
        }
    }

    #[test]
    fn mid_sequence_ampersand_is_literal() {
        let t = toks("echo a & b");
        assert_eq!(classify(&t), Command::Regular { argv: &t[..] });
    }

    #[test]
    fn misplaced_redirect_is_literal() {
        let t = toks("echo >> a b");
        assert_eq!(classify(&t), Command::Regular { argv: &t[..] });
    }

    #[test]
    fn pipe_first_match_wins_over_later_redirect() {
        let t = toks("cat | sort < notes.txt");
        match classify(&t) {
            Command::Pipeline { left, right } => {
                assert_eq!(left, ["cat"]);
                assert_eq!(right, ["sort", "<", "notes.txt"]);
            }
            other => panic!("expected pipeline, got {:?}", other),
        }
    }

    #[test]
    fn lone_ampersand_is_background_with_empty_argv() {
        let t = toks("&");
        match classify(&t) {
            Command::Background { argv } => assert!(argv.is_empty()),
            other => panic!("expected background, got {:?}", other),
        }
    }

    #[test]
    fn empty_sequence_is_regular() {
        let t: Vec<String> = vec![];
        assert_eq!(classify(&t), Command::Regular { argv: &t[..] });
    }
}
