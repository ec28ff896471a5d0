//! Login conflict detection.
//!
//! A login of one kind is blocked while a session of the other kind is stored.
//! Both checks return the same shape so the warning can be driven generically.
//! They only read the store, so repeating a check without an intervening write
//! gives the same answer.

use serde::{Deserialize, Serialize};

use crate::session::accessor::SessionAccessor;
use crate::session::store::SessionStore;
use crate::types::{SessionType, UserRecord};

/// Which login form is being shown
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LoginTarget {
    Normal,
    Elevated,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConflictCheck {
    pub has_conflict: bool,
    pub conflict_type: Option<SessionType>,
    pub conflict_user: Option<UserRecord>,
}

impl ConflictCheck {
    pub fn none() -> Self {
        Self {
            has_conflict: false,
            conflict_type: None,
            conflict_user: None,
        }
    }

    pub fn blocked_by(conflict_type: SessionType, conflict_user: UserRecord) -> Self {
        Self {
            has_conflict: true,
            conflict_type: Some(conflict_type),
            conflict_user: Some(conflict_user),
        }
    }
}

impl<S: SessionStore> SessionAccessor<S> {
    /// A normal login is blocked by a stored elevated session.
    pub fn check_normal_login_conflict(&self) -> ConflictCheck {
        let check = self
            .elevated_user()
            .and_then(|user| {
                SessionType::elevated_for(user.role).map(|t| ConflictCheck::blocked_by(t, user))
            })
            .unwrap_or_else(ConflictCheck::none);
        tracing::debug!("Normal login conflict check: {}", check.has_conflict);
        check
    }

    /// An elevated login is blocked by a stored normal-user session.
    pub fn check_elevated_login_conflict(&self) -> ConflictCheck {
        let check = self
            .normal_user()
            .map(|user| ConflictCheck::blocked_by(SessionType::NormalUser, user))
            .unwrap_or_else(ConflictCheck::none);
        tracing::debug!("Elevated login conflict check: {}", check.has_conflict);
        check
    }

    pub fn check_login_conflict(&self, target: LoginTarget) -> ConflictCheck {
        match target {
            LoginTarget::Normal => self.check_normal_login_conflict(),
            LoginTarget::Elevated => self.check_elevated_login_conflict(),
        }
    }
}
