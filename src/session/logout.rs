//! Unified logout: dispatch on the active session type, clear its slot, and
//! pick the redirect. Any failure falls back to clearing both slots.

use serde::{Deserialize, Serialize};

use crate::config::RouteConfig;
use crate::error::SessionError;
use crate::session::accessor::SessionAccessor;
use crate::session::store::SessionStore;
use crate::types::SessionType;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LogoutResult {
    pub success: bool,
    pub session_type: Option<SessionType>,
    pub redirect_path: String,
}

/// Logs out whichever session is active, clearing the normal slot directly.
pub fn perform_logout<S: SessionStore>(accessor: &mut SessionAccessor<S>, routes: &RouteConfig) -> LogoutResult {
    dispatch(
        accessor,
        routes,
        None::<fn(&mut SessionAccessor<S>) -> Result<(), SessionError>>,
    )
}

/// Like [`perform_logout`], but a normal-user logout runs `normal_logout`
/// instead of clearing the slot itself, so the caller can do its own cleanup.
pub fn perform_logout_with<S, F>(
    accessor: &mut SessionAccessor<S>,
    routes: &RouteConfig,
    normal_logout: F,
) -> LogoutResult
where
    S: SessionStore,
    F: FnOnce(&mut SessionAccessor<S>) -> Result<(), SessionError>,
{
    dispatch(accessor, routes, Some(normal_logout))
}

fn dispatch<S, F>(accessor: &mut SessionAccessor<S>, routes: &RouteConfig, normal_logout: Option<F>) -> LogoutResult
where
    S: SessionStore,
    F: FnOnce(&mut SessionAccessor<S>) -> Result<(), SessionError>,
{
    let Some(session_type) = accessor.current_session_type() else {
        tracing::debug!("Logout requested with no active session");
        return LogoutResult {
            success: false,
            session_type: None,
            redirect_path: "/".to_string(),
        };
    };

    match logout_session(accessor, routes, session_type, normal_logout) {
        Ok(redirect_path) => {
            tracing::info!("Logged out {} session", session_type.label());
            LogoutResult {
                success: true,
                session_type: Some(session_type),
                redirect_path,
            }
        }
        Err(e) => {
            // Never leave one slot behind: fall back to a full logout.
            tracing::warn!("Logout of {} session failed, clearing all sessions: {}", session_type.label(), e);
            if let Err(clear_err) = accessor.clear_all_sessions() {
                tracing::error!("Failed to clear sessions after logout error: {}", clear_err);
            }
            LogoutResult {
                success: false,
                session_type: Some(session_type),
                redirect_path: routes.home.clone(),
            }
        }
    }
}

fn logout_session<S, F>(
    accessor: &mut SessionAccessor<S>,
    routes: &RouteConfig,
    session_type: SessionType,
    normal_logout: Option<F>,
) -> Result<String, SessionError>
where
    S: SessionStore,
    F: FnOnce(&mut SessionAccessor<S>) -> Result<(), SessionError>,
{
    match session_type {
        SessionType::SuperAdmin | SessionType::SuperModerator => {
            accessor.clear_elevated_session()?;
            Ok(routes.elevated_login.clone())
        }
        SessionType::NormalUser => {
            match normal_logout {
                Some(hook) => hook(accessor)?,
                None => accessor.clear_normal_user_session()?,
            }
            Ok(routes.home.clone())
        }
    }
}
