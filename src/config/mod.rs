use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::env;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub environment: Environment,
    pub api: ApiConfig,
    pub routes: RouteConfig,
    pub storage: StorageConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Environment {
    Development,
    Staging,
    Production,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    pub base_url: String,
    pub normal_login_path: String,
    pub elevated_login_path: String,
    pub request_timeout_secs: u64,
}

/// Redirect targets handed to the router after logout
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RouteConfig {
    pub home: String,
    pub elevated_login: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    pub file_name: String,
}

impl Default for RouteConfig {
    fn default() -> Self {
        Self {
            home: "/".to_string(),
            elevated_login: "/app-admin/login".to_string(),
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Self {
        let environment = match env::var("LMS_ENV").as_deref() {
            Ok("production") | Ok("prod") => Environment::Production,
            Ok("staging") | Ok("stage") => Environment::Staging,
            _ => Environment::Development,
        };

        match environment {
            Environment::Production => Self::production(),
            Environment::Staging => Self::staging(),
            Environment::Development => Self::development(),
        }
        .with_env_overrides()
    }

    fn with_env_overrides(self) -> Self {
        self.with_overrides(|key| env::var(key).ok())
    }

    /// Applies `LMS_*` overrides from `lookup` on top of the preset
    fn with_overrides(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        // API overrides
        if let Some(v) = lookup("LMS_API_BASE_URL") {
            self.api.base_url = v.trim().trim_end_matches('/').to_string();
        }
        if let Some(v) = lookup("LMS_NORMAL_LOGIN_PATH") {
            self.api.normal_login_path = v;
        }
        if let Some(v) = lookup("LMS_ELEVATED_LOGIN_PATH") {
            self.api.elevated_login_path = v;
        }
        if let Some(v) = lookup("LMS_REQUEST_TIMEOUT_SECS") {
            self.api.request_timeout_secs = v.parse().unwrap_or(self.api.request_timeout_secs);
        }

        // Route overrides
        if let Some(v) = lookup("LMS_HOME_ROUTE") {
            self.routes.home = v;
        }
        if let Some(v) = lookup("LMS_ELEVATED_LOGIN_ROUTE") {
            self.routes.elevated_login = v;
        }

        // Storage overrides
        if let Some(v) = lookup("LMS_STORE_FILE") {
            if !v.trim().is_empty() {
                self.storage.file_name = v;
            }
        }

        self
    }

    fn development() -> Self {
        Self {
            environment: Environment::Development,
            api: ApiConfig {
                base_url: "http://localhost:5000".to_string(),
                normal_login_path: "/api/auth/login".to_string(),
                elevated_login_path: "/api/app-admin/login".to_string(),
                request_timeout_secs: 30,
            },
            routes: RouteConfig::default(),
            storage: StorageConfig {
                file_name: "session.json".to_string(),
            },
        }
    }

    fn staging() -> Self {
        Self {
            environment: Environment::Staging,
            api: ApiConfig {
                base_url: "https://staging-api.example.com".to_string(),
                normal_login_path: "/api/auth/login".to_string(),
                elevated_login_path: "/api/app-admin/login".to_string(),
                request_timeout_secs: 15,
            },
            routes: RouteConfig::default(),
            storage: StorageConfig {
                file_name: "session.json".to_string(),
            },
        }
    }

    fn production() -> Self {
        Self {
            environment: Environment::Production,
            api: ApiConfig {
                base_url: "https://api.example.com".to_string(),
                normal_login_path: "/api/auth/login".to_string(),
                elevated_login_path: "/api/app-admin/login".to_string(),
                request_timeout_secs: 10,
            },
            routes: RouteConfig::default(),
            storage: StorageConfig {
                file_name: "session.json".to_string(),
            },
        }
    }
}

// Global singleton config - initialized once on first use
pub static CONFIG: Lazy<AppConfig> = Lazy::new(AppConfig::from_env);

pub fn config() -> &'static AppConfig {
    &CONFIG
}
