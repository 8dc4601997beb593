//! History ring tests

use uart_console::console::{History, Recall};
use uart_console::HISTORY_LINES;

fn entries<const N: usize>(history: &History<N>) -> Vec<String> {
    history.iter().map(|e| String::from_utf8_lossy(e).into_owned()).collect()
}

#[test]
fn test_history_empty() {
    let mut history = History::<HISTORY_LINES>::new();
    assert!(history.is_empty());
    assert_eq!(history.previous(b""), Recall::Unchanged);
    assert_eq!(history.next(), Recall::Unchanged);
    assert_eq!(history.marker(), None);
}

#[test]
fn test_history_push_and_recall() {
    let mut history = History::<HISTORY_LINES>::new();
    history.push(b"help");
    history.push(b"show wpm");

    // Navigate back
    assert_eq!(history.previous(b""), Recall::Entry(b"show wpm"));
    assert_eq!(history.marker(), Some(0));
    assert_eq!(history.previous(b""), Recall::Entry(b"help"));
    assert_eq!(history.previous(b""), Recall::Unchanged); // stays at oldest
    assert_eq!(history.marker(), Some(1));

    // Navigate forward
    assert_eq!(history.next(), Recall::Entry(b"show wpm"));
    assert_eq!(history.next(), Recall::Live);
    assert_eq!(history.next(), Recall::Unchanged);
}

#[test]
fn test_history_skips_blank_and_repeats() {
    let mut history = History::<HISTORY_LINES>::new();
    assert!(history.push(b"a"));
    assert!(!history.push(b"a"));
    assert!(!history.push(b""));
    assert!(!history.push(b"   "));
    assert!(history.push(b"b"));
    assert!(history.push(b"a")); // only the newest entry is compared

    assert_eq!(entries(&history), ["a", "b", "a"]);
}

#[test]
fn test_history_keeps_live_line() {
    let mut history = History::<HISTORY_LINES>::new();
    history.push(b"one");

    // The draft is stored on the first step back and skipped over
    assert_eq!(history.previous(b"draft"), Recall::Entry(b"one"));
    assert_eq!(history.marker(), Some(1));
    assert_eq!(history.next(), Recall::Entry(b"draft"));
    assert_eq!(history.next(), Recall::Live);
    assert_eq!(entries(&history), ["draft", "one"]);
}

#[test]
fn test_history_live_repeat_not_stored() {
    let mut history = History::<HISTORY_LINES>::new();
    history.push(b"one");

    assert_eq!(history.previous(b"one"), Recall::Entry(b"one"));
    assert_eq!(history.marker(), Some(0));
    assert_eq!(history.len(), 1);
}

#[test]
fn test_history_wraparound() {
    let mut history = History::<HISTORY_LINES>::new();
    for i in 0..HISTORY_LINES + 2 {
        history.push(format!("cmd {}", i).as_bytes());
    }

    assert_eq!(history.len(), HISTORY_LINES);
    let expected: Vec<String> = (2..HISTORY_LINES + 2).rev().map(|i| format!("cmd {}", i)).collect();
    assert_eq!(entries(&history), expected);

    // Walk all the way back: the two oldest lines are gone
    let mut oldest = None;
    while let Recall::Entry(e) = history.previous(b"") {
        oldest = Some(String::from_utf8_lossy(e).into_owned());
    }
    assert_eq!(oldest.as_deref(), Some("cmd 2"));
    assert_eq!(history.marker(), Some(HISTORY_LINES - 1));
}

#[test]
fn test_history_reset_nav() {
    let mut history = History::<4>::new();
    history.push(b"x");
    history.previous(b"");
    history.reset_nav();
    assert_eq!(history.marker(), None);
    assert_eq!(history.next(), Recall::Unchanged);
}

#[test]
fn test_history_single_slot() {
    let mut history = History::<1>::new();
    history.push(b"a");

    // No room for the draft, the stored line is shown instead
    assert_eq!(history.previous(b"draft"), Recall::Entry(b"a"));
    assert_eq!(history.previous(b"draft"), Recall::Unchanged);
    assert_eq!(history.next(), Recall::Live);
    assert_eq!(entries(&history), ["a"]);
}

#[test]
fn test_history_disabled() {
    let mut history = History::<0>::new();
    assert!(!history.is_enabled());
    assert!(!history.push(b"a"));
    assert_eq!(history.previous(b"a"), Recall::Unchanged);
    assert_eq!(history.next(), Recall::Unchanged);
    assert_eq!(history.get(0), None);
}
