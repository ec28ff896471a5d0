#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use axum::{http::StatusCode, routing::post, Json, Router};
use lms_session::config::ApiConfig;
use lms_session::session::{FileStore, SessionAccessor};
use serde_json::{json, Value};
use tempfile::TempDir;

pub const PASSWORD: &str = "correct-horse";

/// Fresh session file in its own temp directory. The directory is removed
/// when the returned handle drops.
pub fn temp_store_path() -> (TempDir, PathBuf) {
    let dir = TempDir::new().expect("create temp dir");
    let path = dir.path().join("session.json");
    (dir, path)
}

pub fn file_accessor(path: &PathBuf) -> SessionAccessor<FileStore> {
    SessionAccessor::new(FileStore::new(path.clone()))
}

/// Writes raw key/values straight into a session file
pub fn seed_store(path: &Path, entries: Value) -> Result<()> {
    let parent = path.parent().context("session path has no parent")?;
    fs::create_dir_all(parent)?;
    fs::write(path, serde_json::to_string_pretty(&entries)?)?;
    Ok(())
}

pub struct MockLoginServer {
    pub base_url: String,
}

impl MockLoginServer {
    pub fn api_config(&self) -> ApiConfig {
        ApiConfig {
            base_url: self.base_url.clone(),
            normal_login_path: "/api/auth/login".to_string(),
            elevated_login_path: "/api/app-admin/login".to_string(),
            request_timeout_secs: 5,
        }
    }
}

fn rejected() -> (StatusCode, Json<Value>) {
    (
        StatusCode::UNAUTHORIZED,
        Json(json!({ "message": "Invalid credentials" })),
    )
}

async fn normal_login(Json(body): Json<Value>) -> (StatusCode, Json<Value>) {
    if body["password"] != PASSWORD {
        return rejected();
    }
    let email = body["email"].as_str().unwrap_or_default();
    (
        StatusCode::OK,
        Json(json!({
            "token": format!("normal-{email}"),
            "user": { "role": "Student", "email": email, "id": 7 }
        })),
    )
}

// Enveloped like the platform's admin API; "plain@" accounts come back as Admin
async fn elevated_login(Json(body): Json<Value>) -> (StatusCode, Json<Value>) {
    if body["password"] != PASSWORD {
        return rejected();
    }
    let email = body["email"].as_str().unwrap_or_default();
    let role = if email.starts_with("mod") {
        "Super Moderator"
    } else if email.starts_with("plain") {
        "Admin"
    } else {
        "Super Admin"
    };
    (
        StatusCode::OK,
        Json(json!({
            "success": true,
            "data": {
                "token": format!("elevated-{email}"),
                "user": { "role": role, "email": email, "name": "Root Operator" }
            }
        })),
    )
}

pub async fn spawn_login_server() -> Result<MockLoginServer> {
    let port = portpicker::pick_unused_port().context("failed to pick free port")?;
    let app = Router::new()
        .route("/api/auth/login", post(normal_login))
        .route("/api/app-admin/login", post(elevated_login));

    let listener = tokio::net::TcpListener::bind(("127.0.0.1", port))
        .await
        .context("failed to bind mock login server")?;
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });

    Ok(MockLoginServer {
        base_url: format!("http://127.0.0.1:{}", port),
    })
}
