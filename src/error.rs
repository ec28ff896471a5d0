// Session error types
use thiserror::Error;

use crate::types::SessionType;

/// Errors raised by the session store, the login client and the login gate.
///
/// Read paths of the accessor never return these for malformed stored data;
/// they fail closed to "no session" instead.
#[derive(Debug, Error)]
pub enum SessionError {
    // Storage
    #[error("Storage error: {0}")]
    Storage(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    // Login
    #[error("Login blocked by an active {} session", .0.label())]
    Conflict(SessionType),

    #[error("Role '{role}' cannot hold an elevated session")]
    RoleNotElevated { role: String },

    #[error("Login rejected ({status}): {message}")]
    LoginRejected { status: u16, message: String },

    #[error("Network error: {0}")]
    Network(String),

    #[error("Invalid login response: {0}")]
    InvalidResponse(String),

    // Flow
    #[error("Invalid login gate transition: {0}")]
    InvalidTransition(String),

    #[error("Logout hook failed: {0}")]
    LogoutHook(String),

    #[error("Config error: {0}")]
    Config(String),
}

impl SessionError {
    /// Stable error code for JSON output
    pub fn error_code(&self) -> &'static str {
        match self {
            SessionError::Storage(_) => "STORAGE_ERROR",
            SessionError::Serialization(_) => "SERIALIZATION_ERROR",
            SessionError::Conflict(_) => "SESSION_CONFLICT",
            SessionError::RoleNotElevated { .. } => "ROLE_NOT_ELEVATED",
            SessionError::LoginRejected { .. } => "LOGIN_REJECTED",
            SessionError::Network(_) => "NETWORK_ERROR",
            SessionError::InvalidResponse(_) => "INVALID_RESPONSE",
            SessionError::InvalidTransition(_) => "INVALID_TRANSITION",
            SessionError::LogoutHook(_) => "LOGOUT_HOOK_FAILED",
            SessionError::Config(_) => "CONFIG_ERROR",
        }
    }
}

impl SessionError {
    pub fn network(message: impl Into<String>) -> Self {
        SessionError::Network(message.into())
    }

    pub fn invalid_response(message: impl Into<String>) -> Self {
        SessionError::InvalidResponse(message.into())
    }

    pub fn invalid_transition(message: impl Into<String>) -> Self {
        SessionError::InvalidTransition(message.into())
    }

    pub fn logout_hook(message: impl Into<String>) -> Self {
        SessionError::LogoutHook(message.into())
    }

    pub fn config(message: impl Into<String>) -> Self {
        SessionError::Config(message.into())
    }
}

impl From<reqwest::Error> for SessionError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            SessionError::InvalidResponse(err.to_string())
        } else {
            SessionError::Network(err.to_string())
        }
    }
}
