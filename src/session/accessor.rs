//! Typed access to the normal-user and elevated slots.
//!
//! Reads fail closed: unreadable storage, an empty token, or a user record that
//! does not parse all count as "no session" and are never surfaced as errors.

use crate::error::SessionError;
use crate::session::store::SessionStore;
use crate::types::{
    UserRecord, ELEVATED_TOKEN_KEY, ELEVATED_USER_KEY, NORMAL_TOKEN_KEY, NORMAL_USER_KEY,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Slot {
    Normal,
    Elevated,
}

impl Slot {
    fn keys(self) -> (&'static str, &'static str) {
        match self {
            Slot::Normal => (NORMAL_TOKEN_KEY, NORMAL_USER_KEY),
            Slot::Elevated => (ELEVATED_TOKEN_KEY, ELEVATED_USER_KEY),
        }
    }

    fn name(self) -> &'static str {
        match self {
            Slot::Normal => "normal-user",
            Slot::Elevated => "elevated",
        }
    }
}

pub struct SessionAccessor<S> {
    store: S,
}

impl<S: SessionStore> SessionAccessor<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }

    pub fn into_inner(self) -> S {
        self.store
    }

    pub fn has_normal_user_session(&self) -> bool {
        self.normal_user().is_some()
    }

    pub fn has_elevated_session(&self) -> bool {
        self.elevated_user().is_some()
    }

    /// User record of the normal-user slot, if that slot holds a valid session.
    pub fn normal_user(&self) -> Option<UserRecord> {
        self.read_slot(Slot::Normal)
    }

    /// User record of the elevated slot. A record whose role is not
    /// Super Admin or Super Moderator is ignored.
    pub fn elevated_user(&self) -> Option<UserRecord> {
        let user = self.read_slot(Slot::Elevated)?;
        if !user.role.is_elevated() {
            tracing::warn!("Ignoring elevated slot holding non-elevated role {}", user.role);
            return None;
        }
        Some(user)
    }

    pub fn clear_normal_user_session(&mut self) -> Result<(), SessionError> {
        self.clear_slot(Slot::Normal)
    }

    pub fn clear_elevated_session(&mut self) -> Result<(), SessionError> {
        self.clear_slot(Slot::Elevated)
    }

    /// Clears both slots. The elevated slot is attempted even if clearing the
    /// normal slot failed; the first error is returned.
    pub fn clear_all_sessions(&mut self) -> Result<(), SessionError> {
        let normal = self.clear_normal_user_session();
        let elevated = self.clear_elevated_session();
        normal.and(elevated)
    }

    pub fn store_normal_session(&mut self, token: &str, user: &UserRecord) -> Result<(), SessionError> {
        self.write_slot(Slot::Normal, token, user)
    }

    pub fn store_elevated_session(&mut self, token: &str, user: &UserRecord) -> Result<(), SessionError> {
        if !user.role.is_elevated() {
            return Err(SessionError::RoleNotElevated {
                role: user.role.to_string(),
            });
        }
        self.write_slot(Slot::Elevated, token, user)
    }

    fn read_slot(&self, slot: Slot) -> Option<UserRecord> {
        let (token_key, user_key) = slot.keys();

        let token = match self.store.get(token_key) {
            Ok(token) => token,
            Err(e) => {
                tracing::warn!("Failed to read {} token: {}", slot.name(), e);
                return None;
            }
        };
        if token.map_or(true, |t| t.is_empty()) {
            return None;
        }

        let raw = match self.store.get(user_key) {
            Ok(Some(raw)) => raw,
            Ok(None) => return None,
            Err(e) => {
                tracing::warn!("Failed to read {} user: {}", slot.name(), e);
                return None;
            }
        };

        match serde_json::from_str::<UserRecord>(&raw) {
            Ok(user) => Some(user),
            Err(e) => {
                tracing::warn!("Ignoring malformed {} user record: {}", slot.name(), e);
                None
            }
        }
    }

    fn write_slot(&mut self, slot: Slot, token: &str, user: &UserRecord) -> Result<(), SessionError> {
        let (token_key, user_key) = slot.keys();
        let raw = serde_json::to_string(user)?;

        // Never leave a half-written slot behind
        let written = self
            .store
            .set(token_key, token)
            .and_then(|_| self.store.set(user_key, &raw));
        if let Err(e) = written {
            tracing::warn!("Failed to store {} session: {}", slot.name(), e);
            if let Err(clear_err) = self.clear_slot(slot) {
                tracing::warn!("Failed to roll back {} slot: {}", slot.name(), clear_err);
            }
            return Err(e);
        }

        tracing::info!("Stored {} session for {}", slot.name(), user.display_name());
        Ok(())
    }

    fn clear_slot(&mut self, slot: Slot) -> Result<(), SessionError> {
        let (token_key, user_key) = slot.keys();
        let token = self.store.remove(token_key);
        let user = self.store.remove(user_key);
        token.and(user)?;
        tracing::info!("Cleared {} session", slot.name());
        Ok(())
    }
}
