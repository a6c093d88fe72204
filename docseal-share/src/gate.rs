//! Biometric gate collaborator.
//!
//! The platform authenticator is consumed as a capability: register and
//! authenticate return success or failure, nothing more. The core's role
//! is limited to deciding whether a protected resource may be unwrapped.

use crate::error::ShareResult;

/// Platform authenticator capability.
pub trait BiometricGate: Send + Sync {
    /// Registers a platform credential, returning its id.
    fn register(&self) -> ShareResult<String>;

    /// Authenticates against a previously registered credential.
    fn authenticate(&self, credential_id: &str) -> ShareResult<bool>;
}

/// Fixed-outcome gate for tests and hosts without an authenticator.
pub struct StaticGate {
    allow: bool,
}

impl StaticGate {
    pub fn allowing() -> Self {
        Self { allow: true }
    }

    pub fn denying() -> Self {
        Self { allow: false }
    }
}

impl BiometricGate for StaticGate {
    fn register(&self) -> ShareResult<String> {
        Ok("static-credential".to_string())
    }

    fn authenticate(&self, _credential_id: &str) -> ShareResult<bool> {
        Ok(self.allow)
    }
}
