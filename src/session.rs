// src/session.rs

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessState {
    Locked,
    Rejected,
    Unlocked,
}

/// Per-session state: whether the shared secret was entered, and what the
/// user is searching for.
#[derive(Debug, Clone)]
pub struct Session {
    access: AccessState,
    pub search: String,
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

impl Session {
    pub fn new() -> Self {
        Session {
            access: AccessState::Locked,
            search: String::new(),
        }
    }

    pub fn access(&self) -> AccessState {
        self.access
    }

    pub fn is_unlocked(&self) -> bool {
        self.access == AccessState::Unlocked
    }

    /// Exact comparison against the shared secret. A wrong attempt only
    /// flips the state to `Rejected`; there is no lockout.
    pub fn submit_secret(&mut self, attempt: &str, secret: &str) -> bool {
        if attempt == secret {
            self.access = AccessState::Unlocked;
            log::info!("Session unlocked");
            true
        } else {
            self.access = AccessState::Rejected;
            log::warn!("Rejected access attempt");
            false
        }
    }

    pub fn log_out(&mut self) {
        self.access = AccessState::Locked;
    }
}
