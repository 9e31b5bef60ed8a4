//! Shell configuration, read once from the environment.

use std::path::PathBuf;

use anyhow::{Context, bail};

use crate::navigation::normalize_path;

pub const SESSION_FILE_ENV: &str = "STOCKDESK_SESSION_FILE";
pub const LOGIN_PATH_ENV: &str = "STOCKDESK_LOGIN_PATH";
pub const HOME_PATH_ENV: &str = "STOCKDESK_HOME_PATH";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShellConfig {
    pub session_file: PathBuf,
    pub login_path: String,
    pub home_path: String,
}

impl ShellConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary key lookup (the environment in production).
    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let session_file = match lookup(SESSION_FILE_ENV).filter(|v| !v.trim().is_empty()) {
            Some(path) => PathBuf::from(path),
            None => default_session_file()?,
        };

        let login_path = route_path(&lookup, LOGIN_PATH_ENV, stockdesk_auth::LOGIN_PATH)?;
        let home_path = route_path(&lookup, HOME_PATH_ENV, "/")?;

        if login_path == home_path {
            bail!("{LOGIN_PATH_ENV} and {HOME_PATH_ENV} must differ (both are '{login_path}')");
        }

        Ok(Self {
            session_file,
            login_path,
            home_path,
        })
    }
}

fn route_path<F>(lookup: &F, key: &str, default: &str) -> anyhow::Result<String>
where
    F: Fn(&str) -> Option<String>,
{
    let value = lookup(key)
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .unwrap_or_else(|| default.to_string());

    if !value.starts_with('/') {
        bail!("{key} must be an absolute route path starting with '/', got '{value}'");
    }
    Ok(normalize_path(&value).to_string())
}

fn default_session_file() -> anyhow::Result<PathBuf> {
    let base = dirs::data_dir()
        .or_else(|| {
            dirs::home_dir().map(|mut h| {
                h.push(".local");
                h.push("share");
                h
            })
        })
        .context("failed to resolve OS app data directory - tried data_dir() and home_dir()/.local/share")?;

    Ok(base.join("stockdesk").join("session.json"))
}
