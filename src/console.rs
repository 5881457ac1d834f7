//! Console session: line assembly, authentication flow, dispatch
//!
//! One `Console` per transport. Bytes are fed in through
//! [`Console::feed`]; echo, prompts and responses come back out
//! through the writer handed to each call, so the transport itself
//! stays an external collaborator.

use std::io::Write;

use tracing::debug;

use crate::auth::AuthGate;
use crate::error::ConsoleError;
use crate::line_buffer::LineBuffer;
use crate::parser::parse_line;
use crate::registry::{Builtin, CommandAction, CommandDescriptor, CommandRegistry};
use crate::response::Responder;

/// Guidance line shown while the session is locked
const LOGIN_HINT: &str = "Please login with 'login <password>'";

/// Line-oriented authenticated command interpreter.
///
/// All mutation goes through `&mut self`, so a session fed from more
/// than one execution context must be serialized externally (a single
/// worker, or a mutex around the instance).
pub struct Console {
    name: String,
    prompt: String,
    echo: bool,
    line: LineBuffer,
    auth: AuthGate,
    registry: CommandRegistry,
}

impl Console {
    /// Create a console. `Some` password requires `login` before any
    /// other command is dispatched.
    pub fn new(name: &str, password: Option<&str>) -> Self {
        let mut console = Self {
            name: name.to_owned(),
            prompt: format!("{name}> "),
            echo: true,
            line: LineBuffer::new(),
            auth: AuthGate::new(password),
            registry: CommandRegistry::new(),
        };
        console.register_built_ins();
        console
    }

    /// Register a command. Registering a name again replaces the
    /// previous descriptor, built-ins included.
    pub fn register<F>(
        &mut self,
        name: &str,
        description: &str,
        min_args: u8,
        max_args: u8,
        handler: F,
    ) where
        F: FnMut(&mut Responder<'_>, &[&str]) + 'static,
    {
        self.registry.insert(CommandDescriptor {
            name: name.to_owned(),
            description: description.to_owned(),
            min_args,
            max_args,
            action: CommandAction::Handler(Box::new(handler)),
        });
    }

    fn register_built_ins(&mut self) {
        self.registry.insert(CommandDescriptor {
            name: "help".to_owned(),
            description: "Show available commands".to_owned(),
            min_args: 0,
            max_args: 0,
            action: CommandAction::Builtin(Builtin::Help),
        });
        self.registry.insert(CommandDescriptor {
            name: "echo".to_owned(),
            description: "Toggle command echo".to_owned(),
            min_args: 0,
            max_args: 1,
            action: CommandAction::Builtin(Builtin::Echo),
        });
        self.registry.insert(CommandDescriptor {
            name: "logout".to_owned(),
            description: "Logout from console".to_owned(),
            min_args: 0,
            max_args: 0,
            action: CommandAction::Builtin(Builtin::Logout),
        });
    }

    /// Print the banner and the first prompt (or the login hint when
    /// the session starts locked).
    pub fn start(&mut self, out: &mut dyn Write) {
        let _ = write!(out, "\r\n{} v{}\r\n", self.name, env!("CARGO_PKG_VERSION"));
        let _ = write!(out, "Type 'help' for commands.\r\n");
        if self.auth.locked() {
            let _ = write!(out, "{LOGIN_HINT}\r\n");
        } else {
            let _ = write!(out, "{}", self.prompt);
        }
    }

    /// Consume raw transport bytes.
    ///
    /// May be called with any chunking, down to one byte per call.
    pub fn feed(&mut self, bytes: &[u8], out: &mut dyn Write) {
        for (i, &byte) in bytes.iter().enumerate() {
            let lookahead = bytes.get(i + 1).copied();
            self.consume(byte, lookahead, out);
        }
    }

    fn consume(&mut self, byte: u8, lookahead: Option<u8>, out: &mut dyn Write) {
        match byte {
            // Backspace / delete: silent edit when echo is off
            0x08 | 0x7f => {
                if self.line.backspace() && self.echo {
                    let _ = out.write_all(b"\x08 \x08");
                }
            }

            b'\r' | b'\n' => {
                if !self.line.is_empty() {
                    let _ = out.write_all(b"\r\n");
                    let line = self.line.take();
                    self.handle_line(&line, out);
                    let _ = out.write_all(self.prompt.as_bytes());
                } else if byte == b'\r' && lookahead != Some(b'\n') {
                    // Bare carriage return on an empty line (terminals
                    // that send CR alone): fresh prompt, no dispatch
                    let _ = out.write_all(b"\r\n");
                    let _ = out.write_all(self.prompt.as_bytes());
                }
            }

            // Printable character
            b if b >= 0x20 => {
                if self.echo && b < 0x7f {
                    let _ = out.write_all(&[b]);
                }
                self.line.push(b);
            }

            // Other control characters are ignored
            _ => {}
        }
    }

    /// Parse and dispatch one command line directly, bypassing line
    /// assembly. The auth gate still applies. Intended for tests and
    /// scripted control.
    pub fn run_line(&mut self, line: &str, out: &mut dyn Write) -> Result<(), ConsoleError> {
        if self.auth.locked() {
            self.handle_locked(line, out);
            if self.auth.locked() {
                return Err(ConsoleError::NotAuthenticated);
            }
            return Ok(());
        }
        let parsed = parse_line(line);
        let args = parsed.args;
        self.dispatch(parsed.command, &args, out)
    }

    fn handle_line(&mut self, line: &str, out: &mut dyn Write) {
        if self.auth.locked() {
            self.handle_locked(line, out);
        } else {
            let parsed = parse_line(line);
            let args = parsed.args;
            let _ = self.dispatch(parsed.command, &args, out);
        }
    }

    /// While locked, only `login <password>` is evaluated; everything
    /// else gets the guidance line.
    fn handle_locked(&mut self, line: &str, out: &mut dyn Write) {
        let parsed = parse_line(line);
        if parsed.command == "login" && parsed.args.len() == 1 {
            if self.auth.try_login(parsed.args[0]) {
                Responder::new(out).respond("login", "Login successful", true);
            } else {
                Responder::new(out).respond("login", "Invalid password", false);
            }
        } else {
            let _ = write!(out, "{LOGIN_HINT}\r\n");
        }
    }

    fn dispatch(
        &mut self,
        name: &str,
        args: &[&str],
        out: &mut dyn Write,
    ) -> Result<(), ConsoleError> {
        if name.is_empty() {
            return Ok(());
        }
        debug!(command = name, argc = args.len(), "dispatching");

        let arity = match self.registry.get(name) {
            None => {
                let err = ConsoleError::UnknownCommand;
                Responder::new(out).respond(name, &err.to_string(), false);
                return Err(err);
            }
            Some(descriptor) => descriptor.check_arity(args.len()),
        };
        if let Err(err) = arity {
            Responder::new(out).respond(name, &err.to_string(), false);
            return Err(err);
        }

        // The handler alone decides what response to emit
        let builtin = match self.registry.get_mut(name) {
            Some(descriptor) => match &mut descriptor.action {
                CommandAction::Handler(handler) => {
                    let mut responder = Responder::new(out);
                    handler(&mut responder, args);
                    None
                }
                CommandAction::Builtin(builtin) => Some(*builtin),
            },
            None => None,
        };

        if let Some(builtin) = builtin {
            match builtin {
                Builtin::Help => self.cmd_help(out),
                Builtin::Echo => self.cmd_echo(args, out),
                Builtin::Logout => self.cmd_logout(out),
            }
        }
        Ok(())
    }

    fn cmd_help(&self, out: &mut dyn Write) {
        let _ = write!(out, "+------------------+------------------------------+\r\n");
        let _ = write!(out, "| Command          | Description                  |\r\n");
        let _ = write!(out, "+------------------+------------------------------+\r\n");
        for descriptor in self.registry.sorted() {
            let _ = write!(
                out,
                "| {:<16} | {:<28} |\r\n",
                descriptor.name, descriptor.description
            );
        }
        let _ = write!(out, "+------------------+------------------------------+\r\n");
    }

    fn cmd_echo(&mut self, args: &[&str], out: &mut dyn Write) {
        match args.first().copied() {
            Some("on") => {
                self.echo = true;
                Responder::new(out).respond("echo", "Echo enabled", true);
            }
            Some("off") => {
                self.echo = false;
                Responder::new(out).respond("echo", "Echo disabled", true);
            }
            Some(_) => {
                Responder::new(out).respond("echo", "Invalid argument. Use 'on' or 'off'", false);
            }
            None => {
                self.echo = !self.echo;
                let result = if self.echo { "Echo enabled" } else { "Echo disabled" };
                Responder::new(out).respond("echo", result, true);
            }
        }
        debug!(echo = self.echo, "echo changed");
    }

    fn cmd_logout(&mut self, out: &mut dyn Write) {
        if self.auth.logout() {
            Responder::new(out).respond("logout", "Logged out", true);
            let _ = write!(out, "{LOGIN_HINT}\r\n");
        } else {
            Responder::new(out).respond("logout", "Authentication not enabled", false);
        }
    }

    /// Change the prompt string
    pub fn set_prompt(&mut self, prompt: &str) {
        self.prompt = prompt.to_owned();
    }

    /// Current prompt string
    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    /// Enable/disable echo
    pub fn set_echo(&mut self, enabled: bool) {
        self.echo = enabled;
    }

    /// Current echo flag
    pub fn echo_enabled(&self) -> bool {
        self.echo
    }

    /// Toggle the authentication requirement
    pub fn set_auth_required(&mut self, required: bool) {
        self.auth.set_required(required);
    }

    /// Current session authentication flag
    pub fn is_authenticated(&self) -> bool {
        self.auth.authenticated()
    }

    /// Read access to the command table
    pub fn registry(&self) -> &CommandRegistry {
        &self.registry
    }
}
