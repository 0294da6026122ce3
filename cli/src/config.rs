//! Configuration management for the speech CLI.
//!
//! Configuration is stored in ~/.samplespeech/{app_name}/config.yaml and holds
//! one or more named speech contexts.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use anyhow::Context as _;
use samplespeech_speech::{SpeechOptions, CMDLINE};
use serde::{Deserialize, Serialize};

/// Default base configuration directory name.
pub const DEFAULT_BASE_DIR: &str = ".samplespeech";
/// Default configuration filename.
pub const DEFAULT_CONFIG_FILE: &str = "config.yaml";

/// CLI configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Application name (not serialized).
    #[serde(skip)]
    pub app_name: String,

    /// Name of the currently active context.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub current_context: String,

    /// Map of context name to context configuration.
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub contexts: HashMap<String, Context>,

    /// Path to the config file (not serialized).
    #[serde(skip)]
    config_path: PathBuf,
}

/// A named speech configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Context {
    /// Context name.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub name: String,

    /// Registered speaker to use. Empty means the command line speaker.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub kind: String,

    /// Primary command with a `%s` placeholder.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub cmdline: String,

    /// Fallback synthesizer command with a `%s` placeholder.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub cmdline_tts: String,

    /// File whose first non-empty line is the fallback command, used when
    /// `cmdline_tts` is empty.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cmdline_tts_file: Option<PathBuf>,

    /// Directory holding the recorded samples.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sample_dir: Option<PathBuf>,

    /// File name suffix of the samples.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub sample_suffix: String,

    /// Sample file names are percent-encoded.
    #[serde(default, skip_serializing_if = "is_false")]
    pub decode_names: bool,
}

fn is_false(b: &bool) -> bool {
    !*b
}

impl Config {
    /// Gets the default config directory.
    pub fn default_config_dir(app_name: &str) -> Option<PathBuf> {
        dirs::home_dir().map(|home| home.join(DEFAULT_BASE_DIR).join(app_name))
    }

    /// Gets the default config file path.
    pub fn default_config_path(app_name: &str) -> Option<PathBuf> {
        Self::default_config_dir(app_name).map(|dir| dir.join(DEFAULT_CONFIG_FILE))
    }

    /// Returns the config file path.
    pub fn path(&self) -> &PathBuf {
        &self.config_path
    }

    /// Returns the config directory path.
    pub fn dir(&self) -> Option<&Path> {
        self.config_path.parent()
    }

    /// Saves the configuration to disk.
    pub fn save(&self) -> anyhow::Result<()> {
        let content = serde_yaml::to_string(self)?;
        std::fs::write(&self.config_path, content)?;
        Ok(())
    }

    /// Adds a new context, replacing one with the same name.
    pub fn add_context(&mut self, name: &str, mut ctx: Context) -> anyhow::Result<()> {
        ctx.name = name.to_string();
        self.contexts.insert(name.to_string(), ctx);
        self.save()
    }

    /// Deletes a context.
    pub fn delete_context(&mut self, name: &str) -> anyhow::Result<()> {
        if self.contexts.remove(name).is_none() {
            anyhow::bail!("context '{}' not found", name);
        }
        if self.current_context == name {
            self.current_context.clear();
        }
        self.save()
    }

    /// Sets the current context.
    pub fn use_context(&mut self, name: &str) -> anyhow::Result<()> {
        if !self.contexts.contains_key(name) {
            anyhow::bail!("context '{}' not found", name);
        }
        self.current_context = name.to_string();
        self.save()
    }

    /// Gets a specific context.
    pub fn get_context(&self, name: &str) -> Option<&Context> {
        self.contexts.get(name)
    }

    /// Gets the current context.
    pub fn get_current_context(&self) -> Option<&Context> {
        if self.current_context.is_empty() {
            return None;
        }
        self.contexts.get(&self.current_context)
    }

    /// Resolves the context by name, or current context if name is empty.
    pub fn resolve_context(&self, name: Option<&str>) -> Option<&Context> {
        match name {
            Some(n) if !n.is_empty() => self.get_context(n),
            _ => self.get_current_context(),
        }
    }

    /// Lists all context names, sorted.
    pub fn list_contexts(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.contexts.keys().map(|s| s.as_str()).collect();
        names.sort();
        names
    }
}

impl Context {
    /// Returns the registered speaker name for this context.
    pub fn speaker_kind(&self) -> &str {
        if self.kind.is_empty() {
            CMDLINE
        } else {
            &self.kind
        }
    }

    /// Builds speaker options.
    ///
    /// A relative `cmdline_tts_file` is resolved against `base_dir`.
    pub fn speech_options(&self, base_dir: Option<&Path>) -> anyhow::Result<SpeechOptions> {
        let cmdline_tts = if !self.cmdline_tts.is_empty() {
            Some(self.cmdline_tts.clone())
        } else if let Some(file) = &self.cmdline_tts_file {
            let path = match base_dir {
                Some(dir) if file.is_relative() => dir.join(file),
                _ => file.clone(),
            };
            read_first_line(&path)?
        } else {
            None
        };

        Ok(SpeechOptions {
            cmdline: self.cmdline.clone(),
            cmdline_tts,
            sample_dir: self.sample_dir.clone(),
            sample_suffix: (!self.sample_suffix.is_empty()).then(|| self.sample_suffix.clone()),
            decode_names: self.decode_names,
        })
    }
}

/// Returns the first non-empty line of a file.
fn read_first_line(path: &Path) -> anyhow::Result<Option<String>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("cannot read fallback command file {}", path.display()))?;
    Ok(content
        .lines()
        .map(str::trim)
        .find(|line| !line.is_empty())
        .map(str::to_string))
}

/// Loads configuration for the specified app.
pub fn load_config(app_name: &str, custom_path: Option<&str>) -> anyhow::Result<Config> {
    let config_path = resolve_config_path(app_name, custom_path)?;

    // Ensure config directory exists
    if let Some(parent) = config_path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let mut cfg = if config_path.exists() {
        let content = std::fs::read_to_string(&config_path)?;
        serde_yaml::from_str(&content)?
    } else {
        // Create empty config file
        let cfg = Config::default();
        let content = serde_yaml::to_string(&cfg)?;
        std::fs::write(&config_path, content)?;
        cfg
    };

    cfg.app_name = app_name.to_string();
    cfg.config_path = config_path;

    Ok(cfg)
}

/// Saves configuration to the specified path.
pub fn save_config(app_name: &str, config: &Config, custom_path: Option<&str>) -> anyhow::Result<()> {
    let config_path = resolve_config_path(app_name, custom_path)?;

    if let Some(parent) = config_path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let content = serde_yaml::to_string(config)?;
    std::fs::write(&config_path, content)?;
    Ok(())
}

fn resolve_config_path(app_name: &str, custom_path: Option<&str>) -> anyhow::Result<PathBuf> {
    match custom_path {
        Some(p) => Ok(PathBuf::from(p)),
        None => Config::default_config_path(app_name)
            .ok_or_else(|| anyhow::anyhow!("cannot determine config path")),
    }
}
