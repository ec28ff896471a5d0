use std::fs;
use std::path::PathBuf;

use crate::config::config;
use crate::session::{FileStore, SessionAccessor};

pub fn get_config_dir() -> anyhow::Result<PathBuf> {
    let config_dir = if let Ok(custom_dir) = std::env::var("LMS_CLI_CONFIG_DIR") {
        PathBuf::from(custom_dir)
    } else {
        let home = std::env::var("HOME").map_err(|_| anyhow::anyhow!("HOME environment variable not set"))?;
        PathBuf::from(home).join(".config").join("lms").join("cli")
    };

    if !config_dir.exists() {
        fs::create_dir_all(&config_dir)?;
    }

    Ok(config_dir)
}

pub fn session_store_path() -> anyhow::Result<PathBuf> {
    Ok(get_config_dir()?.join(&config().storage.file_name))
}

pub fn open_session_store() -> anyhow::Result<FileStore> {
    Ok(FileStore::new(session_store_path()?))
}

pub fn open_accessor() -> anyhow::Result<SessionAccessor<FileStore>> {
    Ok(SessionAccessor::new(open_session_store()?))
}

/// Creates the store file with no sessions if it does not exist yet.
/// Returns true when a file was created.
pub fn init_session_store() -> anyhow::Result<bool> {
    let path = session_store_path()?;
    if path.exists() {
        return Ok(false);
    }

    fs::write(&path, "{}")?;
    Ok(true)
}
