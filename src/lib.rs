//! # fms-console
//!
//! Line-oriented, authenticated command interpreter for byte-stream
//! transports (serial consoles, TCP bridges).
//!
//! ## Architecture
//!
//! One [`Console`] per transport. Raw bytes go in through
//! [`Console::feed`]; echo, prompts and JSON responses come back out
//! through the `io::Write` handed to each call. Device subsystems
//! expose operations by registering capability closures with
//! [`Console::register`]; handlers answer through a [`Responder`],
//! either as one atomic JSON object or as a caller-driven stream of
//! fragments that never lives in memory at once.
//!
//! Processing is single-threaded and cooperative: one line at a time,
//! no parallel dispatch. `&mut self` on the byte-consuming entry point
//! enforces the single-writer rule at compile time.

pub mod auth;
pub mod console;
pub mod error;
pub mod line_buffer;
pub mod parser;
pub mod registry;
pub mod response;

pub use auth::AuthGate;
pub use console::Console;
pub use error::ConsoleError;
pub use line_buffer::LineBuffer;
pub use parser::{parse_line, ParsedCommand};
pub use registry::{CommandDescriptor, CommandHandler, CommandRegistry};
pub use response::{escape_json, format_json, JsonBuilder, Responder};
