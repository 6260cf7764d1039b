use anyhow::{Context, Result};
use std::path::PathBuf;

/// Paths and identity of the invoking user, read once at startup.
#[derive(Debug, Clone)]
pub struct HostContext {
    pub home: PathBuf,
    pub user: String,
}

impl HostContext {
    pub fn from_env() -> Result<Self> {
        let user = std::env::var("USER").context("USER is not set")?;

        // dirs honors $HOME; fall back to the conventional location when the
        // environment is stripped (e.g. launched from a minimal session).
        let home = dirs::home_dir().unwrap_or_else(|| PathBuf::from(format!("/home/{}", user)));

        Ok(Self { home, user })
    }
}
