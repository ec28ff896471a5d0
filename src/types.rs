//! Shared types used across the codebase

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

/// Storage keys for the normal-user slot
pub const NORMAL_TOKEN_KEY: &str = "token";
pub const NORMAL_USER_KEY: &str = "user";

/// Storage keys for the elevated (super admin / super moderator) slot
pub const ELEVATED_TOKEN_KEY: &str = "appAdminToken";
pub const ELEVATED_USER_KEY: &str = "appAdminUser";

/// Platform roles. Unknown role strings fail deserialization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Role {
    Student,
    Instructor,
    Admin,
    Moderator,
    #[serde(rename = "Super Admin")]
    SuperAdmin,
    #[serde(rename = "Super Moderator")]
    SuperModerator,
}

impl Role {
    #[inline]
    pub const fn code(&self) -> &'static str {
        use Role::*;
        match self {
            Student => "Student",
            Instructor => "Instructor",
            Admin => "Admin",
            Moderator => "Moderator",
            SuperAdmin => "Super Admin",
            SuperModerator => "Super Moderator",
        }
    }

    /// Only these roles may occupy the elevated slot
    #[inline]
    pub const fn is_elevated(&self) -> bool {
        matches!(self, Role::SuperAdmin | Role::SuperModerator)
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// User record as persisted next to a session token.
///
/// Only `role`, `name` and `email` are interpreted; any other fields the
/// backend sent are carried along untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserRecord {
    pub role: Role,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl UserRecord {
    pub fn new(role: Role) -> Self {
        Self {
            role,
            name: None,
            email: None,
            extra: Map::new(),
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    pub fn display_name(&self) -> &str {
        self.name
            .as_deref()
            .or(self.email.as_deref())
            .unwrap_or("unknown user")
    }
}

/// Classified identity of the active session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SessionType {
    #[serde(rename = "Super Admin")]
    SuperAdmin,
    #[serde(rename = "Super Moderator")]
    SuperModerator,
    #[serde(rename = "NORMAL_USER")]
    NormalUser,
}

impl SessionType {
    /// Elevated sub-type for a role, if the role is elevated
    pub const fn elevated_for(role: Role) -> Option<Self> {
        match role {
            Role::SuperAdmin => Some(SessionType::SuperAdmin),
            Role::SuperModerator => Some(SessionType::SuperModerator),
            _ => None,
        }
    }

    /// Serialized form, as consumed by the conflict warning
    pub const fn code(&self) -> &'static str {
        match self {
            SessionType::SuperAdmin => "Super Admin",
            SessionType::SuperModerator => "Super Moderator",
            SessionType::NormalUser => "NORMAL_USER",
        }
    }

    /// Human-readable name
    pub const fn label(&self) -> &'static str {
        match self {
            SessionType::SuperAdmin => "Super Admin",
            SessionType::SuperModerator => "Super Moderator",
            SessionType::NormalUser => "Normal User",
        }
    }

    pub const fn is_elevated(&self) -> bool {
        !matches!(self, SessionType::NormalUser)
    }
}

impl fmt::Display for SessionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}
