//! Configuration primitives for an AgentOS card workspace.
//!
//! Stored in a machine-readable TOML file located at:
//!   %APPDATA%/AgentOS/config/config.toml on Windows
//!   $XDG_DATA_HOME/AgentOS/config/config.toml on Linux
//!   ~/Library/Application Support/AgentOS/config/config.toml on macOS
//!
//! Every key is optional; a missing file yields the defaults below.

use serde::{Deserialize, Serialize};

/// Root configuration persisted per installation.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AppConfig {
    /// Interview pacing (simulated typing pauses).
    #[serde(default)]
    pub interview: InterviewSettings,
    /// Inbound relay transport settings.
    #[serde(default)]
    pub relay: RelaySettings,
}

/// Pauses inserted before bot messages, in milliseconds.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InterviewSettings {
    /// When false every pause is skipped.
    #[serde(default = "default_simulate_typing")]
    pub simulate_typing: bool,
    #[serde(default = "default_prompt_delay_ms")]
    pub prompt_delay_ms: u64,
    /// Pause before proposing a rewritten bio.
    #[serde(default = "default_suggestion_delay_ms")]
    pub suggestion_delay_ms: u64,
    #[serde(default = "default_services_after_suggestion_delay_ms")]
    pub services_after_suggestion_delay_ms: u64,
    #[serde(default = "default_finalize_delay_ms")]
    pub finalize_delay_ms: u64,
    #[serde(default = "default_upload_notice_delay_ms")]
    pub upload_notice_delay_ms: u64,
}

impl Default for InterviewSettings {
    fn default() -> Self {
        Self {
            simulate_typing: default_simulate_typing(),
            prompt_delay_ms: default_prompt_delay_ms(),
            suggestion_delay_ms: default_suggestion_delay_ms(),
            services_after_suggestion_delay_ms: default_services_after_suggestion_delay_ms(),
            finalize_delay_ms: default_finalize_delay_ms(),
            upload_notice_delay_ms: default_upload_notice_delay_ms(),
        }
    }
}

const fn default_simulate_typing() -> bool {
    true
}

const fn default_prompt_delay_ms() -> u64 {
    1_500
}

const fn default_suggestion_delay_ms() -> u64 {
    1_000
}

const fn default_services_after_suggestion_delay_ms() -> u64 {
    3_000
}

const fn default_finalize_delay_ms() -> u64 {
    2_000
}

const fn default_upload_notice_delay_ms() -> u64 {
    2_000
}

/// Messaging provider used by the inbound relay.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RelaySettings {
    #[serde(default = "default_api_base")]
    pub api_base: String,
    /// Environment variable holding the bot token. The token itself is never
    /// written to config.toml.
    #[serde(default = "default_bot_token_env")]
    pub bot_token_env: String,
}

impl RelaySettings {
    pub fn bot_token(&self) -> Option<String> {
        env::var(&self.bot_token_env)
            .ok()
            .filter(|token| !token.trim().is_empty())
    }
}

impl Default for RelaySettings {
    fn default() -> Self {
        Self {
            api_base: default_api_base(),
            bot_token_env: default_bot_token_env(),
        }
    }
}

fn default_api_base() -> String {
    "https://api.telegram.org".into()
}

fn default_bot_token_env() -> String {
    "TELEGRAM_BOT_TOKEN".into()
}

/// Standard relative path to the config file (resolved per OS at runtime).
pub const CONFIG_FILE_NAME: &str = "config.toml";

use anyhow::{Context, Result};
use directories::BaseDirs;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

/// Returns the root directory where AgentOS stores data.
///
/// Order of precedence:
/// 1. `AGENTOS_HOME` environment variable.
/// 2. OS-specific data directory via `directories::BaseDirs`.
pub fn workspace_root() -> Result<PathBuf> {
    if let Ok(path) = env::var("AGENTOS_HOME") {
        return Ok(PathBuf::from(path));
    }
    let base_dirs = BaseDirs::new().context("Unable to determine OS data directory")?;
    Ok(base_dirs.data_dir().join("AgentOS"))
}

/// Loads the configuration from disk or returns defaults.
pub fn load_or_default(paths: &WorkspacePaths) -> Result<AppConfig> {
    let path = paths.config_file();
    if path.exists() {
        let data = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config file {:?}", path))?;
        let cfg: AppConfig = toml::from_str(&data)
            .with_context(|| format!("Failed to parse config file {:?}", path))?;
        Ok(cfg)
    } else {
        Ok(AppConfig::default())
    }
}

/// Persists the configuration to disk.
pub fn save(paths: &WorkspacePaths, config: &AppConfig) -> Result<()> {
    fs::create_dir_all(&paths.config_dir)?;
    let data = toml::to_string_pretty(config)?;
    fs::write(paths.config_file(), data)?;
    Ok(())
}

/// Ensures the workspace structure exists under `AGENTOS_HOME` (or the OS default).
pub fn ensure_workspace_structure() -> Result<WorkspacePaths> {
    let paths = WorkspacePaths::new(workspace_root()?);
    paths.ensure()?;
    Ok(paths)
}

/// Convenience struct exposing important workspace paths.
#[derive(Debug, Clone)]
pub struct WorkspacePaths {
    pub root: PathBuf,
    pub config_dir: PathBuf,
    pub store_dir: PathBuf,
    pub logs_dir: PathBuf,
    pub exports_dir: PathBuf,
}

impl WorkspacePaths {
    pub fn new<P: AsRef<Path>>(root: P) -> Self {
        let root = root.as_ref().to_path_buf();
        Self {
            config_dir: root.join("config"),
            store_dir: root.join("store"),
            logs_dir: root.join("logs"),
            exports_dir: root.join("exports"),
            root,
        }
    }

    pub fn ensure(&self) -> Result<()> {
        for dir in [
            &self.config_dir,
            &self.store_dir,
            &self.logs_dir,
            &self.exports_dir,
        ] {
            fs::create_dir_all(dir)
                .with_context(|| format!("Failed creating workspace directory {:?}", dir))?;
        }
        Ok(())
    }

    pub fn config_file(&self) -> PathBuf {
        self.config_dir.join(CONFIG_FILE_NAME)
    }

    /// Default destination for `export` when none is given.
    pub fn export_path(&self, username: &str) -> PathBuf {
        self.exports_dir.join(format!("{username}-card.zip"))
    }
}
