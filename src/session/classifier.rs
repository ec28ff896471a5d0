//! Which session is active when a page asks.

use crate::session::accessor::SessionAccessor;
use crate::session::store::SessionStore;
use crate::types::{SessionType, UserRecord};

impl<S: SessionStore> SessionAccessor<S> {
    /// Classifies the active session. The elevated slot wins when both slots
    /// are populated, so the more privileged state is never masked.
    pub fn current_session_type(&self) -> Option<SessionType> {
        self.current_session().map(|(session_type, _)| session_type)
    }

    /// User record of the session [`current_session_type`](Self::current_session_type) reports.
    pub fn current_session_user(&self) -> Option<UserRecord> {
        self.current_session().map(|(_, user)| user)
    }

    /// Session type and its user record. Each slot is read from the store
    /// separately, so a concurrent writer can change the store between reads.
    pub fn current_session(&self) -> Option<(SessionType, UserRecord)> {
        if let Some(user) = self.elevated_user() {
            let session_type = SessionType::elevated_for(user.role)?;
            return Some((session_type, user));
        }

        self.normal_user().map(|user| (SessionType::NormalUser, user))
    }
}
