//! JSON response encoding
//!
//! Responses are formatted by hand rather than through a serializer:
//! the protocol emits either one small object per command or a
//! caller-driven stream of fragments that never lives in memory at
//! once. Write failures degrade to silence instead of aborting the
//! session.

use std::io::Write;
use std::thread;

/// Escape a string for embedding in a JSON value.
///
/// Quote, backslash and the named control characters get two-character
/// escapes; any other control character becomes `\u00xx`.
pub fn escape_json(input: &str) -> String {
    let mut out = String::with_capacity(input.len() + 10);
    for c in input.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\u{08}' => out.push_str("\\b"),
            '\u{0c}' => out.push_str("\\f"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if (c as u32) < 0x20 => {
                out.push_str(&format!("\\u{:04x}", c as u32));
            }
            c => out.push(c),
        }
    }
    out
}

/// A value equal to a JSON keyword or starting with a digit or minus
/// sign is emitted verbatim without quotes.
fn is_literal(value: &str) -> bool {
    if value == "true" || value == "false" || value == "null" {
        return true;
    }
    matches!(value.bytes().next(), Some(b'0'..=b'9') | Some(b'-'))
}

/// Format an ordered field list as a JSON object.
pub fn format_json(fields: &[(&str, String)]) -> String {
    let mut json = String::from("{");
    for (i, (key, value)) in fields.iter().enumerate() {
        if i > 0 {
            json.push(',');
        }
        json.push('"');
        json.push_str(key);
        json.push_str("\":");
        if is_literal(value) {
            json.push_str(value);
        } else {
            json.push('"');
            json.push_str(&escape_json(value));
            json.push('"');
        }
    }
    json.push('}');
    json
}

/// Incremental JSON object builder for handler payloads
pub struct JsonBuilder {
    json: String,
    first: bool,
}

impl JsonBuilder {
    /// Start an empty object
    pub fn new() -> Self {
        Self {
            json: String::from("{"),
            first: true,
        }
    }

    fn key(&mut self, key: &str) {
        if !self.first {
            self.json.push(',');
        }
        self.first = false;
        self.json.push('"');
        self.json.push_str(key);
        self.json.push_str("\":");
    }

    /// Add a string value (escaped and quoted)
    pub fn add_str(&mut self, key: &str, value: &str) -> &mut Self {
        self.key(key);
        self.json.push('"');
        self.json.push_str(&escape_json(value));
        self.json.push('"');
        self
    }

    /// Add an integer value
    pub fn add_int(&mut self, key: &str, value: i64) -> &mut Self {
        self.key(key);
        self.json.push_str(&value.to_string());
        self
    }

    /// Add a boolean value
    pub fn add_bool(&mut self, key: &str, value: bool) -> &mut Self {
        self.key(key);
        self.json.push_str(if value { "true" } else { "false" });
        self
    }

    /// Close the object and return it
    pub fn into_string(mut self) -> String {
        self.json.push('}');
        self.json
    }
}

impl Default for JsonBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Response channel handed to command handlers.
///
/// A handler answers exactly once, either atomically with [`respond`]
/// or [`respond_fields`], or as a stream framed by [`begin_stream`]
/// and [`end_stream`].
///
/// [`respond`]: Responder::respond
/// [`respond_fields`]: Responder::respond_fields
/// [`begin_stream`]: Responder::begin_stream
/// [`end_stream`]: Responder::end_stream
pub struct Responder<'a> {
    out: &'a mut dyn Write,
}

impl<'a> Responder<'a> {
    /// Wrap a transport writer
    pub fn new(out: &'a mut dyn Write) -> Self {
        Self { out }
    }

    /// Emit the standard atomic response: `command`, `result`,
    /// `success`, in that order.
    pub fn respond(&mut self, command: &str, result: &str, success: bool) {
        let fields = [
            ("command", command.to_owned()),
            ("result", result.to_owned()),
            (
                "success",
                if success { "true" } else { "false" }.to_owned(),
            ),
        ];
        self.respond_fields(&fields);
    }

    /// Emit an atomic response with caller-chosen fields, preserving
    /// their order.
    pub fn respond_fields(&mut self, fields: &[(&str, String)]) {
        let _ = write!(self.out, "{}\r\n", format_json(fields));
    }

    /// Open a streamed response (a lone `{`)
    pub fn begin_stream(&mut self) {
        let _ = self.out.write_all(b"{");
    }

    /// Emit one raw fragment of a streamed response.
    ///
    /// No escaping happens here; the caller is responsible for valid
    /// JSON. Yields the thread after the write so cooperative peers
    /// can run.
    pub fn part(&mut self, part: &str) {
        let _ = self.out.write_all(part.as_bytes());
        thread::yield_now();
    }

    /// Close a streamed response (`}` plus line terminator)
    pub fn end_stream(&mut self) {
        let _ = self.out.write_all(b"}\r\n");
    }
}
