//! Persisted login session. The server owns all domain data; the only state
//! kept on this machine is the authenticated user record, replaced wholesale
//! on login and deleted on logout.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

const SESSION_DIR: &str = "fc_terminal";
const SESSION_FILE: &str = "session.json";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Captain,
    Manager,
    Player,
}

impl Role {
    pub fn label(self) -> &'static str {
        match self {
            Role::Captain => "队长",
            Role::Manager => "领队",
            Role::Player => "队员",
        }
    }

    /// Only captains and managers may import rosters, edit lineups, or enter
    /// match statistics.
    pub fn can_edit(self) -> bool {
        matches!(self, Role::Captain | Role::Manager)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuthUser {
    pub id: i64,
    pub username: String,
    #[serde(rename = "displayName")]
    pub display_name: String,
    pub role: Role,
}

pub fn load() -> Option<AuthUser> {
    load_from(&session_path()?)
}

pub fn save(user: &AuthUser) -> Result<()> {
    let Some(path) = session_path() else {
        return Ok(());
    };
    save_to(&path, user)
}

pub fn clear() {
    if let Some(path) = session_path() {
        let _ = fs::remove_file(path);
    }
}

pub fn load_from(path: &Path) -> Option<AuthUser> {
    let raw = fs::read_to_string(path).ok()?;
    serde_json::from_str(&raw).ok()
}

pub fn save_to(path: &Path, user: &AuthUser) -> Result<()> {
    if let Some(dir) = path.parent() {
        fs::create_dir_all(dir).context("create session dir")?;
    }
    let json = serde_json::to_string(user).context("serialize session")?;
    let tmp = path.with_extension("json.tmp");
    fs::write(&tmp, json).context("write session")?;
    fs::rename(&tmp, path).context("swap session")?;
    Ok(())
}

fn session_path() -> Option<PathBuf> {
    if let Ok(explicit) = std::env::var("FC_SESSION_FILE") {
        if !explicit.trim().is_empty() {
            return Some(PathBuf::from(explicit));
        }
    }
    if let Ok(base) = std::env::var("XDG_CACHE_HOME") {
        if !base.trim().is_empty() {
            return Some(PathBuf::from(base).join(SESSION_DIR).join(SESSION_FILE));
        }
    }
    let home = std::env::var("HOME").ok()?;
    if home.trim().is_empty() {
        return None;
    }
    Some(
        PathBuf::from(home)
            .join(".cache")
            .join(SESSION_DIR)
            .join(SESSION_FILE),
    )
}
