//! Session authentication gate
//!
//! Two states: locked and unlocked. A console configured with a
//! password starts locked; one without a password never locks.

use tracing::{info, warn};

/// Locked/unlocked state machine guarding command dispatch
pub struct AuthGate {
    password: String,
    required: bool,
    authenticated: bool,
}

impl AuthGate {
    /// Create a gate. `Some` password means authentication is required
    /// and the session starts locked.
    pub fn new(password: Option<&str>) -> Self {
        Self {
            password: password.unwrap_or_default().to_owned(),
            required: password.is_some(),
            authenticated: password.is_none(),
        }
    }

    /// Whether dispatch is currently blocked
    pub fn locked(&self) -> bool {
        self.required && !self.authenticated
    }

    /// Whether authentication was configured
    pub fn required(&self) -> bool {
        self.required
    }

    /// Current session authentication flag
    pub fn authenticated(&self) -> bool {
        self.authenticated
    }

    /// Compare an attempt against the configured password and unlock
    /// on match.
    pub fn try_login(&mut self, attempt: &str) -> bool {
        if attempt == self.password {
            self.authenticated = true;
            info!("session authenticated");
            true
        } else {
            warn!("login attempt rejected");
            false
        }
    }

    /// Return to locked. Reports false when authentication was never
    /// required (state unchanged).
    pub fn logout(&mut self) -> bool {
        if self.required {
            self.authenticated = false;
            info!("session locked");
            true
        } else {
            false
        }
    }

    /// Toggle the authentication requirement. Dropping the requirement
    /// unlocks the session immediately.
    pub fn set_required(&mut self, required: bool) {
        self.required = required;
        if !required {
            self.authenticated = true;
        }
    }
}
