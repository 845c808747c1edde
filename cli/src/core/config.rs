//! # ScholarMatch Configuration System
//!
//! File: cli/src/core/config.rs
//!
//! ## Overview
//!
//! This module loads, merges and validates the chatbot configuration. Only two
//! settings exist today, both consumed by the conversation controller at
//! construction time:
//! - `typing_delay_ms`: milliseconds between a submission and the bot's reply
//! - `max_messages`: conversation log capacity before eviction starts
//!
//! ## Architecture
//!
//! Configuration sources (in order of precedence):
//! 1. Command-line flags (`--typing-delay-ms`, `--max-messages`)
//! 2. An explicit `--config <path>` file, which replaces sources 3 and 4
//! 3. Project-specific `.scholarmatch.toml` in the current directory or ancestors
//! 4. User-specific `config.toml` in the platform config directory
//! 5. Default values defined in the code
//!
//! ## Examples
//!
//! ```toml
//! [chat]
//! typing_delay_ms = 250
//! max_messages = 20
//! ```
//!
//! ```rust,no_run
//! use scholarmatch::core::config::{self, ConfigOverrides};
//!
//! # fn main() -> anyhow::Result<()> {
//! let cfg = config::load_config(&ConfigOverrides::default())?;
//! println!("Replies arrive after {:?}", cfg.chat.typing_delay());
//! # Ok(())
//! # }
//! ```
//!
use crate::core::error::{ChatError, Result};
use anyhow::{anyhow, Context};
use directories::ProjectDirs;
use serde::Deserialize;
use std::{
    fs,
    path::{Path, PathBuf},
    time::Duration,
};
use tracing::{debug, info, warn};

const PROJECT_CONFIG_FILENAME: &str = ".scholarmatch.toml";

/// The effective configuration after every source has been applied.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Config {
    pub chat: ChatSettings,
}

/// Settings handed to the conversation controller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatSettings {
    /// Milliseconds between a submission and its reply.
    pub typing_delay_ms: u64,
    /// Number of real messages the log holds before evicting the oldest.
    pub max_messages: usize,
}

impl Default for ChatSettings {
    fn default() -> Self {
        Self {
            typing_delay_ms: default_typing_delay_ms(),
            max_messages: default_max_messages(),
        }
    }
}

impl ChatSettings {
    pub fn typing_delay(&self) -> Duration {
        Duration::from_millis(self.typing_delay_ms)
    }
}

fn default_typing_delay_ms() -> u64 {
    500
}
fn default_max_messages() -> usize {
    50
}

/// One configuration file as written on disk. Keys left out stay `None` so
/// the layer below (or the built-in default) shows through.
#[derive(Deserialize, Debug, Default, Clone, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
struct ConfigFile {
    #[serde(default)]
    chat: ChatLayer,
}

#[derive(Deserialize, Debug, Default, Clone, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
struct ChatLayer {
    typing_delay_ms: Option<u64>,
    max_messages: Option<usize>,
}

/// Values supplied on the command line. `None` means "not given".
#[derive(Debug, Default, Clone)]
pub struct ConfigOverrides {
    pub config_path: Option<PathBuf>,
    pub typing_delay_ms: Option<u64>,
    pub max_messages: Option<usize>,
}

pub fn load_config(overrides: &ConfigOverrides) -> Result<Config> {
    let file = match &overrides.config_path {
        Some(path) => {
            let expanded = PathBuf::from(shellexpand::tilde(&path.to_string_lossy()).into_owned());
            info!("Loading configuration from: {}", expanded.display());
            load_config_from_path(&expanded)?
        }
        None => {
            let user_config = load_user_config()?;
            let current_dir =
                std::env::current_dir().context("Failed to get current directory")?;
            let project_config = match find_project_config_path(&current_dir) {
                Some(path) => {
                    info!("Loading project configuration from: {}", path.display());
                    Some(load_config_from_path(&path)?)
                }
                None => {
                    debug!("No project configuration file ({PROJECT_CONFIG_FILENAME}) found.");
                    None
                }
            };
            merge_configs(user_config.unwrap_or_default(), project_config)
        }
    };
    let config = build_config(file, overrides);
    validate_config(&config).context("Configuration validation failed")?;
    debug!("Final loaded configuration: {:?}", config);
    Ok(config)
}

fn load_user_config() -> Result<Option<ConfigFile>> {
    if let Some(proj_dirs) = ProjectDirs::from("com", "ScholarMatch", "scholarmatch") {
        let config_path = proj_dirs.config_dir().join("config.toml");
        if config_path.exists() {
            info!("Loading user configuration from: {}", config_path.display());
            load_config_from_path(&config_path).map(Some)
        } else {
            debug!(
                "User configuration file not found at {}",
                config_path.display()
            );
            Ok(None)
        }
    } else {
        warn!("Could not determine user config directory.");
        Ok(None)
    }
}

/// Walks from `start` toward the filesystem root looking for
/// `.scholarmatch.toml`. The search stops at the first directory holding `.git`.
fn find_project_config_path(start: &Path) -> Option<PathBuf> {
    let mut path = start;
    loop {
        let project_config = path.join(PROJECT_CONFIG_FILENAME);
        if project_config.is_file() {
            return Some(project_config);
        }
        if path.join(".git").is_dir() {
            debug!(
                "Found .git directory at {}, stopping project config search.",
                path.display()
            );
            return None;
        }
        path = path.parent()?;
    }
}

fn load_config_from_path(path: &Path) -> Result<ConfigFile> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read configuration file: {}", path.display()))?;
    toml::from_str(&content)
        .with_context(|| format!("Failed to parse TOML from file: {}", path.display()))
}

/// Keys set in the project file win; the user file fills in the rest.
fn merge_configs(user: ConfigFile, project: Option<ConfigFile>) -> ConfigFile {
    let Some(project) = project else {
        return user;
    };
    ConfigFile {
        chat: ChatLayer {
            typing_delay_ms: project.chat.typing_delay_ms.or(user.chat.typing_delay_ms),
            max_messages: project.chat.max_messages.or(user.chat.max_messages),
        },
    }
}

/// Applies command-line values over the merged file, then the defaults.
fn build_config(file: ConfigFile, overrides: &ConfigOverrides) -> Config {
    let typing_delay_ms = overrides
        .typing_delay_ms
        .or(file.chat.typing_delay_ms)
        .unwrap_or_else(default_typing_delay_ms);
    let max_messages = overrides
        .max_messages
        .or(file.chat.max_messages)
        .unwrap_or_else(default_max_messages);
    Config {
        chat: ChatSettings {
            typing_delay_ms,
            max_messages,
        },
    }
}

fn validate_config(config: &Config) -> Result<()> {
    if config.chat.max_messages == 0 {
        return Err(anyhow!(ChatError::Config(
            "max_messages must be at least 1.".to_string()
        )));
    }
    Ok(())
}
