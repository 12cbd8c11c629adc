use crate::config::{self, ConfigKey};
use crate::error::Result;
use crate::validation;
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Abstract token persistence interface
pub trait TokenStorage: Send + Sync {
    /// Return the configured token. If none is stored, returns Ok(None)
    fn get_token(&self) -> Result<Option<String>>;
    /// Persist the token without destroying previously stored content
    fn configure_token(&self, token: &str) -> Result<()>;
}

/// Token persistence backed by the INI-style config file
#[derive(Debug, Clone)]
pub struct FileTokenStorage {
    path: PathBuf,
}

impl FileTokenStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        FileTokenStorage { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl TokenStorage for FileTokenStorage {
    /// The most recently appended entry wins.
    fn get_token(&self) -> Result<Option<String>> {
        if !self.path.exists() {
            debug!(path = %self.path.display(), "No config file, continuing unauthenticated");
            return Ok(None);
        }
        let content = fs::read(&self.path)?;
        let token = config::parse_config(&content)
            .remove(&ConfigKey::GithubToken)
            .and_then(|tokens| tokens.into_iter().last());
        Ok(token)
    }

    fn configure_token(&self, token: &str) -> Result<()> {
        let token = validation::require("token", Some(token))?;

        if !self.path.exists() {
            if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
                fs::create_dir_all(parent)?;
            }
            let content = format!(
                "{}{}",
                config::render_section(ConfigKey::GithubToken),
                config::render_entry(ConfigKey::GithubToken, token)
            );
            fs::write(&self.path, content)?;
            info!(path = %self.path.display(), "Created config file with GitHub token");
            return Ok(());
        }

        let existing = fs::read(&self.path)?;
        let mut file = OpenOptions::new().append(true).open(&self.path)?;
        if !existing.is_empty() && !existing.ends_with(b"\n") {
            file.write_all(b"\n")?;
        }
        let in_other_section = config::last_section(&existing)
            .is_some_and(|section| section != ConfigKey::GithubToken.section());
        if in_other_section {
            file.write_all(config::render_section(ConfigKey::GithubToken).as_bytes())?;
        }
        file.write_all(config::render_entry(ConfigKey::GithubToken, token).as_bytes())?;
        info!(path = %self.path.display(), "Appended GitHub token to config file");
        Ok(())
    }
}
