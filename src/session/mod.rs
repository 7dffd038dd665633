//! Session shell: who is signed in, if anyone
//!
//! The session lives in process memory only; signing out or quitting
//! discards it.

mod actor;
mod identity;

pub use actor::{SessionActorHandle, SessionCommand, SessionEvent, spawn_session_actor};
pub use identity::{AuthError, IdentityProvider, MockIdentityProvider, UserProfile};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionState {
    SignedOut {
        /// Failure from the last sign-in attempt, if it failed
        error: Option<AuthError>,
    },
    SigningIn,
    SignedIn(UserProfile),
}

impl Default for SessionState {
    fn default() -> Self {
        Self::SignedOut { error: None }
    }
}

impl SessionState {
    pub fn user(&self) -> Option<&UserProfile> {
        match self {
            Self::SignedIn(user) => Some(user),
            _ => None,
        }
    }

    pub fn is_signing_in(&self) -> bool {
        matches!(self, Self::SigningIn)
    }

    /// Enter `SigningIn`. Returns false (and changes nothing) unless signed out.
    pub fn begin_sign_in(&mut self) -> bool {
        if !matches!(self, Self::SignedOut { .. }) {
            return false;
        }
        *self = Self::SigningIn;
        true
    }

    /// Apply the provider's answer. Ignored unless a sign-in is in progress.
    pub fn complete_sign_in(&mut self, result: Result<UserProfile, AuthError>) -> bool {
        if !self.is_signing_in() {
            return false;
        }
        *self = match result {
            Ok(profile) => Self::SignedIn(profile),
            Err(error) => Self::SignedOut { error: Some(error) },
        };
        true
    }

    /// Drop the session immediately, returning the discarded profile
    pub fn sign_out(&mut self) -> Option<UserProfile> {
        match std::mem::take(self) {
            Self::SignedIn(profile) => Some(profile),
            other => {
                *self = other;
                None
            }
        }
    }
}
