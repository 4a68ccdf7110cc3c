/// The command name accepted at the interactive prompt.
pub const TRACE_COMMAND: &str = "tracert";

/// The message shown for an unrecognised line.
pub const USAGE: &str = "usage: tracert <host>";

/// A parsed interactive command line.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum Command<'a> {
    /// A blank line.
    Empty,
    /// Leave the prompt.
    Exit,
    /// Trace the route to the given host.
    Trace(&'a str),
    /// Anything else.
    Usage,
}

/// Parse one line of input.
///
/// The line is split on whitespace. A trace needs exactly two tokens, the
/// first of which is `tracert` in any case.
#[must_use]
pub fn parse(line: &str) -> Command<'_> {
    let tokens = line.split_whitespace().collect::<Vec<_>>();
    match tokens.as_slice() {
        [] => Command::Empty,
        [word] if word.eq_ignore_ascii_case("exit") || word.eq_ignore_ascii_case("quit") => {
            Command::Exit
        }
        [command, host] if command.eq_ignore_ascii_case(TRACE_COMMAND) => Command::Trace(host),
        _ => Command::Usage,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case("", Command::Empty)]
    #[test_case("   \t ", Command::Empty)]
    #[test_case("exit", Command::Exit)]
    #[test_case("  QUIT ", Command::Exit)]
    #[test_case("tracert example.com", Command::Trace("example.com"))]
    #[test_case("  TraceRT   10.0.0.1  ", Command::Trace("10.0.0.1"))]
    #[test_case("tracert", Command::Usage)]
    #[test_case("tracert a b", Command::Usage)]
    #[test_case("ping example.com", Command::Usage)]
    #[test_case("example.com", Command::Usage)]
    #[test_case("exit now", Command::Usage)]
    fn test_parse(line: &str, expected: Command<'_>) {
        assert_eq!(expected, parse(line));
    }
}
