//! Conflict warning and the per-page login gate.
//!
//! The page decides once, when it is shown, whether a conflict blocks its
//! login form. The warning only renders the conflict and, on confirmation,
//! clears the blocking slot.

use crate::error::SessionError;
use crate::session::accessor::SessionAccessor;
use crate::session::conflict::{ConflictCheck, LoginTarget};
use crate::session::store::SessionStore;
use crate::types::{SessionType, UserRecord};

#[derive(Debug, Clone, PartialEq)]
pub struct ConflictWarning {
    pub conflict_type: SessionType,
    pub conflict_user: Option<UserRecord>,
}

impl ConflictWarning {
    pub fn new(conflict_type: SessionType, conflict_user: Option<UserRecord>) -> Self {
        Self {
            conflict_type,
            conflict_user,
        }
    }

    /// `None` when the check found nothing to resolve.
    pub fn from_check(check: &ConflictCheck) -> Option<Self> {
        if !check.has_conflict {
            return None;
        }
        let conflict_type = check.conflict_type?;
        Some(Self::new(conflict_type, check.conflict_user.clone()))
    }

    pub fn label(&self) -> &'static str {
        self.conflict_type.label()
    }

    pub fn message(&self) -> String {
        match &self.conflict_user {
            Some(user) => format!(
                "You are already signed in as {} ({}). Sign out of that session to continue.",
                user.display_name(),
                self.label()
            ),
            None => format!(
                "A {} session is already active. Sign out of that session to continue.",
                self.label()
            ),
        }
    }

    /// Clears the slot matching the conflict type, then calls `on_resolved`.
    pub fn confirm<S, F>(&self, accessor: &mut SessionAccessor<S>, on_resolved: F) -> Result<(), SessionError>
    where
        S: SessionStore,
        F: FnOnce(),
    {
        match self.conflict_type {
            SessionType::NormalUser => accessor.clear_normal_user_session()?,
            SessionType::SuperAdmin | SessionType::SuperModerator => {
                accessor.clear_elevated_session()?
            }
        }
        tracing::info!("Resolved {} session conflict", self.label());
        on_resolved();
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum GateState {
    Checking,
    ConflictBlocked(ConflictWarning),
    FormVisible,
}

/// One login page instance. `Checking` is evaluated exactly once; a blocked
/// gate only opens through [`LoginGate::resolve`], and an open gate never
/// blocks again.
#[derive(Debug, Clone)]
pub struct LoginGate {
    target: LoginTarget,
    state: GateState,
}

impl LoginGate {
    pub fn new(target: LoginTarget) -> Self {
        Self {
            target,
            state: GateState::Checking,
        }
    }

    pub fn target(&self) -> LoginTarget {
        self.target
    }

    pub fn state(&self) -> &GateState {
        &self.state
    }

    pub fn is_form_visible(&self) -> bool {
        matches!(self.state, GateState::FormVisible)
    }

    pub fn warning(&self) -> Option<&ConflictWarning> {
        match &self.state {
            GateState::ConflictBlocked(warning) => Some(warning),
            _ => None,
        }
    }

    pub fn evaluate<S: SessionStore>(&mut self, accessor: &SessionAccessor<S>) -> Result<&GateState, SessionError> {
        if self.state != GateState::Checking {
            return Err(SessionError::invalid_transition("login gate was already evaluated"));
        }

        let check = accessor.check_login_conflict(self.target);
        self.state = match ConflictWarning::from_check(&check) {
            Some(warning) => GateState::ConflictBlocked(warning),
            None => GateState::FormVisible,
        };
        Ok(&self.state)
    }

    pub fn resolve<S: SessionStore>(&mut self, accessor: &mut SessionAccessor<S>) -> Result<(), SessionError> {
        let warning = match &self.state {
            GateState::ConflictBlocked(warning) => warning.clone(),
            GateState::Checking => {
                return Err(SessionError::invalid_transition("login gate has not been evaluated"))
            }
            GateState::FormVisible => {
                return Err(SessionError::invalid_transition("login form is already visible"))
            }
        };

        let mut resolved = false;
        warning.confirm(accessor, || resolved = true)?;
        if resolved {
            self.state = GateState::FormVisible;
        }
        Ok(())
    }
}
