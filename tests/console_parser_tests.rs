//! Tokenizer tests: quoting, escapes, token limits

use uart_console::console::parser::parse_line;
use uart_console::{ConsoleError, MAX_ARGS};

/// Tokenize `line` and collect every token, command name included
fn tokens(line: &str) -> Result<Vec<String>, ConsoleError> {
    let mut buf = line.as_bytes().to_vec();
    let cmd = parse_line(&mut buf)?;
    Ok((0..cmd.len()).map(|i| cmd.token(i).unwrap_or("?").to_string()).collect())
}

#[test]
fn test_parse_simple_command() {
    assert_eq!(tokens("help").unwrap(), ["help"]);
}

#[test]
fn test_parse_command_with_args() {
    assert_eq!(tokens("set wpm 25").unwrap(), ["set", "wpm", "25"]);
}

#[test]
fn test_parse_collapses_spaces() {
    assert_eq!(tokens("  show   keyer*  ").unwrap(), ["show", "keyer*"]);
}

#[test]
fn test_parse_blank_line() {
    let mut buf = *b"     ";
    let cmd = parse_line(&mut buf).unwrap();
    assert!(cmd.is_empty());
    assert_eq!(cmd.command(), None);
    assert_eq!(cmd.arg_count(), 0);

    let mut empty: [u8; 0] = [];
    assert!(parse_line(&mut empty).unwrap().is_empty());
}

#[test]
fn test_parse_quotes_and_escapes() {
    assert_eq!(tokens(r#"cmd "a b" c\ d"#).unwrap(), ["cmd", "a b", "c d"]);
}

#[test]
fn test_parse_empty_quote_is_an_argument() {
    let mut buf = *br#"say """#;
    let cmd = parse_line(&mut buf).unwrap();
    assert_eq!(cmd.arg_count(), 1);
    assert_eq!(cmd.arg(0), Some(""));
}

#[test]
fn test_parse_empty_quote_between_args() {
    assert_eq!(tokens(r#"f a "" b"#).unwrap(), ["f", "a", "", "b"]);
}

#[test]
fn test_parse_text_glued_to_empty_quote() {
    assert_eq!(tokens(r#"f ""abc"#).unwrap(), ["f", "", "abc"]);
}

#[test]
fn test_parse_quote_mid_token_is_literal() {
    assert_eq!(tokens(r#"a"b c""#).unwrap(), [r#"a"b"#, r#"c""#]);
}

#[test]
fn test_parse_escaped_quote_and_backslash() {
    assert_eq!(tokens(r#"say \"x\""#).unwrap(), ["say", r#""x""#]);
    assert_eq!(tokens(r"path a\\b").unwrap(), ["path", r"a\b"]);
}

#[test]
fn test_parse_escape_inside_quotes() {
    assert_eq!(tokens(r#"say "a \" b""#).unwrap(), ["say", r#"a " b"#]);
}

#[test]
fn test_parse_unclosed_quote() {
    assert_eq!(tokens(r#"say "unterminated"#), Err(ConsoleError::UnclosedQuote));
}

#[test]
fn test_parse_trailing_backslash() {
    assert_eq!(tokens(r"say abc\"), Err(ConsoleError::TrailingBackslash));
}

#[test]
fn test_parse_token_limit() {
    let at_limit = vec!["x"; MAX_ARGS].join(" ");
    assert_eq!(tokens(&at_limit).unwrap().len(), MAX_ARGS);

    let over_limit = vec!["x"; MAX_ARGS + 1].join(" ");
    assert_eq!(tokens(&over_limit), Err(ConsoleError::TooManyArguments));
}

#[test]
fn test_parse_args_view() {
    let mut buf = *b"echo one two";
    let cmd = parse_line(&mut buf).unwrap();
    assert_eq!(cmd.command(), Some("echo"));

    let args = cmd.args();
    assert_eq!(args.len(), 2);
    assert_eq!(args.get(0), Some("one"));
    assert_eq!(args.get(2), None);
    assert_eq!(args.iter().collect::<Vec<_>>(), ["one", "two"]);
}

#[test]
fn test_parse_command_only_has_no_args() {
    let mut buf = *b"version";
    let cmd = parse_line(&mut buf).unwrap();
    assert!(cmd.args().is_empty());
    assert_eq!(cmd.arg(0), None);
}
