//! Command registry and descriptors

use std::collections::HashMap;

use crate::error::ConsoleError;
use crate::response::Responder;

/// Capability callback invoked with the parsed argument list.
///
/// Handlers are bound at registration time to the resources they need
/// and answer through the [`Responder`] before returning.
pub type CommandHandler = Box<dyn FnMut(&mut Responder<'_>, &[&str])>;

/// Commands the console executes itself
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Builtin {
    Help,
    Echo,
    Logout,
}

pub(crate) enum CommandAction {
    Builtin(Builtin),
    Handler(CommandHandler),
}

/// Static metadata for a registered command
pub struct CommandDescriptor {
    pub name: String,
    pub description: String,
    pub min_args: u8,
    pub max_args: u8,
    pub(crate) action: CommandAction,
}

impl CommandDescriptor {
    /// Validate an argument count against the arity bounds
    pub fn check_arity(&self, argc: usize) -> Result<(), ConsoleError> {
        if argc < self.min_args as usize {
            return Err(ConsoleError::TooFewArguments);
        }
        if argc > self.max_args as usize {
            return Err(ConsoleError::TooManyArguments);
        }
        Ok(())
    }
}

/// Name-keyed command table.
///
/// Registering a name that already exists silently replaces the
/// previous descriptor.
#[derive(Default)]
pub struct CommandRegistry {
    commands: HashMap<String, CommandDescriptor>,
}

impl CommandRegistry {
    /// Create empty registry
    pub fn new() -> Self {
        Self {
            commands: HashMap::new(),
        }
    }

    pub(crate) fn insert(&mut self, descriptor: CommandDescriptor) {
        debug_assert!(descriptor.min_args <= descriptor.max_args);
        self.commands.insert(descriptor.name.clone(), descriptor);
    }

    /// Look up a descriptor by command name
    pub fn get(&self, name: &str) -> Option<&CommandDescriptor> {
        self.commands.get(name)
    }

    pub(crate) fn get_mut(&mut self, name: &str) -> Option<&mut CommandDescriptor> {
        self.commands.get_mut(name)
    }

    /// Whether a command name is registered
    pub fn contains(&self, name: &str) -> bool {
        self.commands.contains_key(name)
    }

    /// Number of registered commands
    pub fn len(&self) -> usize {
        self.commands.len()
    }

    /// Check if empty
    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Descriptors sorted by name, for deterministic listings
    pub fn sorted(&self) -> Vec<&CommandDescriptor> {
        let mut all: Vec<_> = self.commands.values().collect();
        all.sort_by(|a, b| a.name.cmp(&b.name));
        all
    }

    /// All registered command names
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.commands.keys().map(String::as_str)
    }
}
