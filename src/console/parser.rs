//! Command line tokenizer
//!
//! Splits a committed line in place into a command name and arguments.
//!
//! Grammar:
//! - spaces separate tokens
//! - `"..."` opened after whitespace groups spaces into one token
//! - `""` is an empty argument, distinct from no argument
//! - `\x` keeps `x` literally (`\ `, `\"`, `\\`)
//!
//! Three passes over the buffer: mark separators, strip escape
//! backslashes, collect token ranges. Tokens are ranges into the compacted
//! buffer, handed out as `&str` once the buffer is no longer mutated.

use core::ops::Range;

use crate::config::MAX_ARGS;
use super::ConsoleError;

/// Token separator written over spaces and quotes in pass 1
const SEPARATOR: u8 = 0x00;

/// Closing quote of an empty `""` in pass 1. Input is limited to 7-bit
/// bytes before it reaches the line, so this never collides with text.
const EMPTY_QUOTE: u8 = 0xFF;

/// Token ranges of one line
type TokenRanges = heapless::Vec<Range<usize>, MAX_ARGS>;

/// Tokenized line: command name plus arguments
#[derive(Debug, Clone)]
pub struct ParsedCommand<'a> {
    buf: &'a [u8],
    tokens: TokenRanges,
}

impl<'a> ParsedCommand<'a> {
    /// Command name (first token), `None` for a blank line
    pub fn command(&self) -> Option<&'a str> {
        self.token(0)
    }

    /// Token by index, 0 being the command name
    pub fn token(&self, idx: usize) -> Option<&'a str> {
        self.tokens.get(idx).map(|r| token_str(self.buf, r))
    }

    /// Get argument by index (0-based, command name excluded)
    pub fn arg(&self, idx: usize) -> Option<&'a str> {
        self.token(idx + 1)
    }

    /// Arguments after the command name
    pub fn args(&self) -> Args<'_> {
        Args {
            buf: self.buf,
            tokens: self.tokens.get(1..).unwrap_or(&[]),
        }
    }

    /// Number of arguments, command name excluded
    pub fn arg_count(&self) -> usize {
        self.tokens.len().saturating_sub(1)
    }

    /// Number of tokens, command name included
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    /// True for a blank line
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }
}

/// Read-only view of a command's arguments
#[derive(Debug, Clone, Copy)]
pub struct Args<'a> {
    buf: &'a [u8],
    tokens: &'a [Range<usize>],
}

impl<'a> Args<'a> {
    /// Number of arguments
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    /// True when the command was given no arguments
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Argument by index
    pub fn get(&self, idx: usize) -> Option<&'a str> {
        self.tokens.get(idx).map(|r| token_str(self.buf, r))
    }

    /// Arguments in order
    pub fn iter(&self) -> impl Iterator<Item = &'a str> + 'a {
        let buf = self.buf;
        self.tokens.iter().map(move |r| token_str(buf, r))
    }
}

/// Tokenize a committed line in place.
///
/// `line` holds exactly the committed bytes and is rewritten. Returns
/// `Ok` with zero tokens for a blank line.
pub fn parse_line(line: &mut [u8]) -> Result<ParsedCommand<'_>, ConsoleError> {
    mark_separators(line)?;
    let len = remove_backslashes(line);
    let tokens = collect_tokens(&mut line[..len])?;
    let buf: &[u8] = line;
    Ok(ParsedCommand { buf: &buf[..len], tokens })
}

/// Pass 1: overwrite unquoted, unescaped spaces and the quotes themselves
/// with `SEPARATOR`.
fn mark_separators(line: &mut [u8]) -> Result<(), ConsoleError> {
    let mut quote_start: Option<usize> = None;
    let mut backslash = false;
    let mut last_was_whitespace = true;

    for i in 0..line.len() {
        let c = line[i];
        if backslash {
            last_was_whitespace = false;
            backslash = false;
        } else if c == b'\\' {
            last_was_whitespace = false;
            backslash = true;
        } else if let Some(start) = quote_start {
            last_was_whitespace = false;
            if c == b'"' {
                line[i] = if i - start == 1 { EMPTY_QUOTE } else { SEPARATOR };
                line[start] = SEPARATOR;
                quote_start = None;
            }
        } else if c == b'"' && last_was_whitespace {
            line[i] = SEPARATOR;
            quote_start = Some(i);
            last_was_whitespace = false;
        } else if c == b' ' {
            last_was_whitespace = true;
            line[i] = SEPARATOR;
        } else {
            last_was_whitespace = false;
        }
    }

    if quote_start.is_some() {
        return Err(ConsoleError::UnclosedQuote);
    }
    if backslash {
        return Err(ConsoleError::TrailingBackslash);
    }
    Ok(())
}

/// Pass 2: drop every backslash that escaped the byte after it.
///
/// Returns the compacted length.
fn remove_backslashes(line: &mut [u8]) -> usize {
    let mut tail = 0;
    let mut just_removed = false;
    for head in 0..line.len() {
        if just_removed || line[head] != b'\\' {
            line[tail] = line[head];
            tail += 1;
            just_removed = false;
        } else {
            just_removed = true;
        }
    }
    tail
}

/// Pass 3: each separator-to-text transition starts a token.
fn collect_tokens(line: &mut [u8]) -> Result<TokenRanges, ConsoleError> {
    let mut tokens = TokenRanges::new();
    let mut i = 0;

    while i < line.len() {
        if line[i] == SEPARATOR {
            i += 1;
            continue;
        }

        let range = if line[i] == EMPTY_QUOTE {
            // `""`: the marker becomes a separator, anything glued after it
            // starts a token of its own
            let at = i;
            line[at] = SEPARATOR;
            i += 1;
            at..at
        } else {
            let start = i;
            while i < line.len() && line[i] != SEPARATOR {
                i += 1;
            }
            start..i
        };

        tokens
            .push(range)
            .map_err(|_| ConsoleError::TooManyArguments)?;
    }

    Ok(tokens)
}

fn token_str<'a>(buf: &'a [u8], range: &Range<usize>) -> &'a str {
    buf.get(range.clone())
        .and_then(|b| core::str::from_utf8(b).ok())
        .unwrap_or("")
}
