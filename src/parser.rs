//! Command line tokenizer
//!
//! First word is the command name, the rest are space-separated
//! arguments. Double quotes group a multi-word argument; an
//! unterminated quote consumes the remainder of the line.

/// Parsed command borrowing from the input line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedCommand<'a> {
    /// The command name (first token)
    pub command: &'a str,
    /// Arguments in left-to-right order
    pub args: Vec<&'a str>,
}

impl<'a> ParsedCommand<'a> {
    /// Get argument by index (0-based)
    pub fn arg(&self, idx: usize) -> Option<&'a str> {
        self.args.get(idx).copied()
    }
}

/// Parse a command line into command and arguments.
///
/// No validation of argument types or counts happens here.
pub fn parse_line(line: &str) -> ParsedCommand<'_> {
    let trimmed = line.trim();

    let Some(split) = trimmed.find(' ') else {
        return ParsedCommand {
            command: trimmed,
            args: Vec::new(),
        };
    };

    let command = &trimmed[..split];
    let bytes = trimmed.as_bytes();
    let mut args = Vec::new();
    let mut i = split + 1;

    while i < trimmed.len() {
        while i < trimmed.len() && bytes[i] == b' ' {
            i += 1;
        }
        if i >= trimmed.len() {
            break;
        }

        if bytes[i] == b'"' {
            i += 1;
            match trimmed[i..].find('"') {
                Some(close) => {
                    args.push(&trimmed[i..i + close]);
                    i += close + 1;
                }
                None => {
                    // No closing quote, take rest of line
                    args.push(&trimmed[i..]);
                    break;
                }
            }
        } else {
            match trimmed[i..].find(' ') {
                Some(end) => {
                    args.push(&trimmed[i..i + end]);
                    i += end + 1;
                }
                None => {
                    args.push(&trimmed[i..]);
                    break;
                }
            }
        }
    }

    ParsedCommand { command, args }
}
