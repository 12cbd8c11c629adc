use std::collections::HashMap;
use std::path::PathBuf;
use std::time::Duration;

/// Configuration keys recognized in the config file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConfigKey {
    GithubToken,
}

impl ConfigKey {
    pub fn as_str(&self) -> &'static str {
        match self {
            ConfigKey::GithubToken => "token",
        }
    }

    /// Section the key lives in
    pub fn section(&self) -> &'static str {
        match self {
            ConfigKey::GithubToken => "github",
        }
    }

    /// Get all config keys
    pub fn all() -> &'static [ConfigKey] {
        &[ConfigKey::GithubToken]
    }
}

/// Directory name for the user configuration, relative to the home directory.
pub const CONFIG_DIR: &str = ".and-cli";
/// Filename of the user configuration within [`CONFIG_DIR`].
pub const CONFIG_FILENAME: &str = "config";

pub const DEFAULT_API_BASE_URL: &str = "https://api.github.com";
pub const DEFAULT_ORGANIZATION: &str = "AndcultureCode";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;
pub const USER_AGENT: &str = "and-cli";

/// Environment variables read by [`Settings::from_env`].
pub mod env_vars {
    pub const API_URL: &str = "AND_CLI_GITHUB_API_URL";
    pub const DEFAULT_ORG: &str = "AND_CLI_DEFAULT_ORG";
    pub const CONFIG_PATH: &str = "AND_CLI_CONFIG";
    pub const TIMEOUT_SECS: &str = "AND_CLI_HTTP_TIMEOUT_SECS";
    pub const LOG: &str = "AND_CLI_LOG";
}

/// Runtime settings for the GitHub integration.
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub api_base_url: String,
    pub default_organization: String,
    pub config_path: PathBuf,
    pub timeout: Duration,
    pub user_agent: String,
}

impl Settings {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds settings from an arbitrary variable lookup. Unset or blank
    /// variables fall back to the defaults.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let config_path = get(env_vars::CONFIG_PATH)
            .map(PathBuf::from)
            .unwrap_or_else(|| default_config_path(get("HOME").or_else(|| get("USERPROFILE"))));

        let timeout = get(env_vars::TIMEOUT_SECS)
            .and_then(|v| v.trim().parse::<u64>().ok())
            .unwrap_or(DEFAULT_TIMEOUT_SECS);

        Settings {
            api_base_url: get(env_vars::API_URL)
                .map(|url| url.trim_end_matches('/').to_string())
                .unwrap_or_else(|| DEFAULT_API_BASE_URL.to_string()),
            default_organization: get(env_vars::DEFAULT_ORG)
                .unwrap_or_else(|| DEFAULT_ORGANIZATION.to_string()),
            config_path,
            timeout: Duration::from_secs(timeout),
            user_agent: USER_AGENT.to_string(),
        }
    }

    /// Settings pointing at a custom API root, used against mock servers.
    pub fn with_api_base_url(mut self, url: &str) -> Self {
        self.api_base_url = url.trim_end_matches('/').to_string();
        self
    }

    pub fn with_config_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.config_path = path.into();
        self
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self::from_lookup(|_| None)
    }
}

fn default_config_path(home: Option<String>) -> PathBuf {
    let mut path = home.map(PathBuf::from).unwrap_or_default();
    path.push(CONFIG_DIR);
    path.push(CONFIG_FILENAME);
    path
}

/// Parses INI-style config file content into the values of every known key.
///
/// - Lines are `key = value` pairs grouped under `[section]` headers.
/// - Keys may repeat; values are collected in file order.
/// - Blank lines, `#`/`;` comments, unknown keys and blank values are skipped.
/// - Keys before any section header are matched regardless of section.
pub fn parse_config(content: &[u8]) -> HashMap<ConfigKey, Vec<String>> {
    let text = String::from_utf8_lossy(content);
    let mut section: Option<String> = None;
    let mut config_map: HashMap<ConfigKey, Vec<String>> = HashMap::new();

    for line in text.lines().map(str::trim) {
        if line.is_empty() || line.starts_with('#') || line.starts_with(';') {
            continue;
        }
        if let Some(name) = line.strip_prefix('[').and_then(|l| l.strip_suffix(']')) {
            section = Some(name.trim().to_lowercase());
            continue;
        }
        let Some((key, value)) = line.split_once('=') else {
            continue;
        };
        let (key, value) = (key.trim(), value.trim());
        if value.is_empty() {
            continue;
        }
        for config_key in ConfigKey::all() {
            let section_matches = section
                .as_deref()
                .is_none_or(|s| s == config_key.section());
            if section_matches && key.eq_ignore_ascii_case(config_key.as_str()) {
                config_map
                    .entry(*config_key)
                    .or_default()
                    .push(value.to_string());
            }
        }
    }

    config_map
}

/// Name of the last `[section]` header in the content, lower-cased.
pub fn last_section(content: &[u8]) -> Option<String> {
    String::from_utf8_lossy(content)
        .lines()
        .map(str::trim)
        .filter_map(|line| line.strip_prefix('[').and_then(|l| l.strip_suffix(']')))
        .last()
        .map(|name| name.trim().to_lowercase())
}

/// Renders a single `key = value` line.
pub fn render_entry(key: ConfigKey, value: &str) -> String {
    format!("{} = {}\n", key.as_str(), value.trim())
}

/// Renders a section header line.
pub fn render_section(key: ConfigKey) -> String {
    format!("[{}]\n", key.section())
}
