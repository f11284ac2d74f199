//! Admin session gate.
//!
//! A per-session flag flipped by a shared password. This gates the admin
//! panel in the UI; the HTTP layer checks the same flag before any catalog
//! or shipping mutation.

use serde::{Deserialize, Serialize};

/// Message shown when the password does not match.
pub const LOGIN_ERROR: &str = "كلمة المرور غير صحيحة";

/// Admin state for one session.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AdminGate {
    is_admin: bool,
    prompt_open: bool,
    login_error: bool,
}

impl AdminGate {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub const fn is_admin(&self) -> bool {
        self.is_admin
    }

    #[must_use]
    pub const fn is_prompt_open(&self) -> bool {
        self.prompt_open
    }

    #[must_use]
    pub const fn has_login_error(&self) -> bool {
        self.login_error
    }

    /// Open the password prompt. Does nothing when already logged in.
    ///
    /// Returns whether the prompt is open.
    pub fn open_prompt(&mut self) -> bool {
        if !self.is_admin {
            self.prompt_open = true;
            self.login_error = false;
        }
        self.prompt_open
    }

    /// Check a password attempt against the configured secret.
    ///
    /// On success the session becomes admin and the prompt closes. On
    /// failure the prompt stays open with the login error set.
    pub fn submit(&mut self, attempt: &str, secret: &str) -> bool {
        if attempt == secret {
            self.is_admin = true;
            self.prompt_open = false;
            self.login_error = false;
        } else {
            self.prompt_open = true;
            self.login_error = true;
        }
        self.is_admin
    }

    /// Close the prompt without logging in.
    pub fn cancel(&mut self) {
        self.prompt_open = false;
        self.login_error = false;
    }

    /// Leave admin mode.
    pub fn logout(&mut self) {
        *self = Self::new();
    }
}
