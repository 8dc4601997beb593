//! Tab completion tests

use core::fmt::Write;

use uart_console::console::Completer;
use uart_console::{Args, CommandDescriptor};

fn noop(_args: &Args<'_>, _out: &mut dyn Write) {}

const HOSTS: &[CommandDescriptor<'static>] = &[
    CommandDescriptor::new("hello", "Say hello", Some(0), &noop),
    CommandDescriptor::new("help", "List commands", Some(0), &noop),
    CommandDescriptor::new("host", "Host name", Some(0), &noop),
];

const NO_HELP: &[CommandDescriptor<'static>] = &[
    CommandDescriptor::new("hello", "Say hello", Some(0), &noop),
    CommandDescriptor::new("host", "Host name", Some(0), &noop),
];

fn completer(commands: &[CommandDescriptor<'_>], prefix: &str) -> Completer {
    let mut c = Completer::new(commands.len());
    c.set_prefix_len(prefix.len());
    c
}

#[test]
fn test_complete_cycles_in_table_order() {
    let mut c = completer(HOSTS, "h");
    let mut seen = Vec::new();
    let mut line = b"h".to_vec();
    for _ in 0..4 {
        let name = c.complete(&line, HOSTS).unwrap();
        seen.push(name);
        line = name.as_bytes().to_vec();
    }
    assert_eq!(seen, ["hello", "help", "host", "hello"]);
    assert_eq!(c.prefix_len(), 1);
}

#[test]
fn test_complete_offers_help_after_commands() {
    let mut c = completer(NO_HELP, "h");
    let seen: Vec<_> = (0..4).map(|_| c.complete(b"h", NO_HELP).unwrap()).collect();
    assert_eq!(seen, ["hello", "host", "help", "hello"]);
}

#[test]
fn test_complete_narrow_prefix() {
    let mut c = completer(HOSTS, "ho");
    assert_eq!(c.complete(b"ho", HOSTS), Some("host"));
    assert_eq!(c.complete(b"host", HOSTS), Some("host"));
    assert_eq!(c.last_index(), 2);
}

#[test]
fn test_complete_no_match() {
    let mut c = completer(HOSTS, "z");
    assert_eq!(c.complete(b"z", HOSTS), None);
}

#[test]
fn test_complete_exact_name_has_nothing_to_add() {
    let mut c = completer(HOSTS, "host");
    assert_eq!(c.complete(b"host", HOSTS), None);
    assert_eq!(c.last_index(), 2);
}

#[test]
fn test_complete_empty_prefix_matches_everything() {
    let mut c = completer(NO_HELP, "");
    assert_eq!(c.complete(b"", NO_HELP), Some("hello"));
    assert_eq!(c.complete(b"hello", NO_HELP), Some("host"));
    assert_eq!(c.complete(b"host", NO_HELP), Some("help"));
}

#[test]
fn test_complete_empty_table() {
    let mut c = completer(&[], "he");
    assert_eq!(c.complete(b"he", &[]), Some("help"));
    assert_eq!(c.complete(b"help", &[]), Some("help"));
}

#[test]
fn test_new_completer_starts_at_first_command() {
    let mut c = Completer::new(HOSTS.len());
    c.set_prefix_len(1);
    assert_eq!(c.complete(b"h", HOSTS), Some("hello"));
}

#[test]
fn test_reset_restarts_cycle() {
    let mut c = completer(HOSTS, "h");
    c.complete(b"h", HOSTS);
    c.complete(b"hello", HOSTS);

    c.reset(HOSTS.len());
    assert_eq!(c.prefix_len(), 0);
    c.set_prefix_len(1);
    assert_eq!(c.complete(b"h", HOSTS), Some("hello"));
}
