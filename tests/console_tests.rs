//! Byte-level console tests: line assembly, echo, prompts

use std::cell::Cell;
use std::rc::Rc;

use fms_console::Console;

fn console_with_status() -> (Console, Rc<Cell<usize>>) {
    let mut console = Console::new("TEST", None);
    let calls = Rc::new(Cell::new(0usize));
    let counter = calls.clone();
    console.register("status", "Show status", 0, 0, move |rsp, _args| {
        counter.set(counter.get() + 1);
        rsp.respond("status", "ok", true);
    });
    (console, calls)
}

#[test]
fn test_feed_dispatches_on_cr() {
    let (mut console, calls) = console_with_status();
    let mut out = Vec::new();

    console.feed(b"status\r", &mut out);

    assert_eq!(calls.get(), 1);
    let text = String::from_utf8(out).unwrap();
    assert!(text.contains("\"command\":\"status\""));
    assert!(text.ends_with("TEST> "));
}

#[test]
fn test_feed_byte_at_a_time() {
    let (mut console, calls) = console_with_status();
    let mut out = Vec::new();

    for &b in b"status\r" {
        console.feed(&[b], &mut out);
    }

    assert_eq!(calls.get(), 1);
}

#[test]
fn test_crlf_is_one_terminator() {
    let (mut console, calls) = console_with_status();
    let mut out = Vec::new();

    console.feed(b"status\r\n", &mut out);

    assert_eq!(calls.get(), 1);
    let text = String::from_utf8(out).unwrap();
    assert_eq!(text.matches("TEST> ").count(), 1, "no double prompt after CRLF");
}

#[test]
fn test_bare_cr_reprints_prompt() {
    let (mut console, calls) = console_with_status();
    let mut out = Vec::new();

    console.feed(b"\r", &mut out);

    assert_eq!(calls.get(), 0);
    assert_eq!(String::from_utf8(out).unwrap(), "\r\nTEST> ");
}

#[test]
fn test_crlf_on_empty_buffer_is_silent() {
    let (mut console, _) = console_with_status();
    let mut out = Vec::new();

    console.feed(b"\r\n", &mut out);

    assert!(out.is_empty());
}

#[test]
fn test_echo_on_writes_input_back() {
    let (mut console, _) = console_with_status();
    let mut out = Vec::new();

    console.feed(b"hi", &mut out);

    assert_eq!(out, b"hi");
}

#[test]
fn test_echo_off_is_silent() {
    let (mut console, _) = console_with_status();
    console.set_echo(false);
    let mut out = Vec::new();

    console.feed(b"hi", &mut out);

    assert!(out.is_empty());
}

#[test]
fn test_backspace_edits_buffer() {
    let (mut console, calls) = console_with_status();
    let mut out = Vec::new();

    console.feed(b"statux\x08s\r", &mut out);

    assert_eq!(calls.get(), 1, "edited line should dispatch 'status'");
}

#[test]
fn test_backspace_erase_sequence_with_echo() {
    let (mut console, _) = console_with_status();
    let mut out = Vec::new();

    console.feed(b"a\x08", &mut out);

    assert_eq!(out, b"a\x08 \x08");
}

#[test]
fn test_backspace_silent_without_echo() {
    let (mut console, _) = console_with_status();
    console.set_echo(false);
    let mut out = Vec::new();

    console.feed(b"a\x08", &mut out);

    assert!(out.is_empty(), "silent edit when echo is off");
}

#[test]
fn test_backspace_on_empty_buffer_writes_nothing() {
    let (mut console, _) = console_with_status();
    let mut out = Vec::new();

    console.feed(b"\x08\x7f", &mut out);

    assert!(out.is_empty());
}

#[test]
fn test_control_characters_ignored() {
    let (mut console, calls) = console_with_status();
    let mut out = Vec::new();

    console.feed(b"\x01\x02sta\x03tus\r", &mut out);

    assert_eq!(calls.get(), 1);
}

#[test]
fn test_banner_unlocked() {
    let (mut console, _) = console_with_status();
    let mut out = Vec::new();

    console.start(&mut out);

    let text = String::from_utf8(out).unwrap();
    assert!(text.contains("TEST v"));
    assert!(text.contains("Type 'help' for commands."));
    assert!(text.ends_with("TEST> "));
}

#[test]
fn test_banner_locked_shows_login_hint() {
    let mut console = Console::new("TEST", Some("secret"));
    let mut out = Vec::new();

    console.start(&mut out);

    let text = String::from_utf8(out).unwrap();
    assert!(text.contains("Please login with 'login <password>'"));
    assert!(!text.ends_with("TEST> "));
}

#[test]
fn test_custom_prompt() {
    let (mut console, _) = console_with_status();
    console.set_prompt("pump# ");
    let mut out = Vec::new();

    console.feed(b"\r", &mut out);

    assert_eq!(String::from_utf8(out).unwrap(), "\r\npump# ");
}

#[test]
fn test_echo_toggle_twice_round_trips() {
    let (mut console, _) = console_with_status();
    assert!(console.echo_enabled());

    let mut out = Vec::new();
    console.run_line("echo", &mut out).unwrap();
    assert!(!console.echo_enabled());
    assert!(String::from_utf8(out).unwrap().contains("Echo disabled"));

    let mut out = Vec::new();
    console.run_line("echo", &mut out).unwrap();
    assert!(console.echo_enabled());
    assert!(String::from_utf8(out).unwrap().contains("Echo enabled"));
}

#[test]
fn test_echo_explicit_on_off() {
    let (mut console, _) = console_with_status();

    let mut out = Vec::new();
    console.run_line("echo off", &mut out).unwrap();
    assert!(!console.echo_enabled());

    let mut out = Vec::new();
    console.run_line("echo on", &mut out).unwrap();
    assert!(console.echo_enabled());
}

#[test]
fn test_echo_invalid_argument() {
    let (mut console, _) = console_with_status();
    let mut out = Vec::new();

    console.run_line("echo loud", &mut out).unwrap();

    assert_eq!(
        String::from_utf8(out).unwrap(),
        "{\"command\":\"echo\",\"result\":\"Invalid argument. Use 'on' or 'off'\",\"success\":false}\r\n"
    );
    assert!(console.echo_enabled(), "invalid argument leaves echo unchanged");
}

#[test]
fn test_help_renders_table() {
    let (mut console, _) = console_with_status();
    let mut out = Vec::new();

    console.run_line("help", &mut out).unwrap();

    let text = String::from_utf8(out).unwrap();
    assert!(text.contains("| Command"));
    assert!(text.contains("| help"));
    assert!(text.contains("| status"));
    assert!(text.contains("Show available commands"));
    assert!(text.starts_with("+"));
}

#[test]
fn test_help_rejects_arguments() {
    let (mut console, _) = console_with_status();
    let mut out = Vec::new();

    let result = console.run_line("help me", &mut out);

    assert!(result.is_err());
    assert!(String::from_utf8(out).unwrap().contains("Too many arguments"));
}

#[test]
fn test_streamed_response_end_to_end() {
    let mut console = Console::new("TEST", None);
    console.register("list", "List files", 0, 0, |rsp, _args| {
        rsp.begin_stream();
        rsp.part("\"files\":[");
        rsp.part("{\"name\":\"a\",\"size\":1}");
        rsp.part("]");
        rsp.end_stream();
    });

    let mut out = Vec::new();
    console.feed(b"list\r", &mut out);

    let text = String::from_utf8(out).unwrap();
    assert!(text.contains("{\"files\":[{\"name\":\"a\",\"size\":1}]}\r\n"));
}

#[test]
fn test_locked_console_byte_path() {
    let mut console = Console::new("TEST", Some("secret"));
    let mut out = Vec::new();

    console.feed(b"status\r", &mut out);
    let text = String::from_utf8(out).unwrap();
    assert!(text.contains("Please login with 'login <password>'"));

    let mut out = Vec::new();
    console.feed(b"login secret\r", &mut out);
    assert!(String::from_utf8(out).unwrap().contains("Login successful"));
    assert!(console.is_authenticated());
}
