//! Console error types

use thiserror::Error;

/// Failures surfaced by command dispatch.
///
/// Display strings double as the `result` text of failure responses on
/// the wire. None of these terminate the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ConsoleError {
    /// No descriptor registered under the command name
    #[error("Command not found")]
    UnknownCommand,
    /// Fewer arguments than the descriptor's minimum
    #[error("Too few arguments")]
    TooFewArguments,
    /// More arguments than the descriptor's maximum
    #[error("Too many arguments")]
    TooManyArguments,
    /// Session is locked; only `login` is accepted
    #[error("Please login with 'login <password>'")]
    NotAuthenticated,
}
