use markup_lint_engine::{DiagnosticTag, ProjectKind, Severity, TagSuppression};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use thiserror::Error;

pub const DEFAULT_ROW_DEFINITION: &str = "<RowDefinition Height=\"*\" />";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file at {config_path}: {source}")]
    ConfigReadError {
        config_path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config file at {config_path}: {source}")]
    ConfigParseError {
        config_path: PathBuf,
        source: toml::de::Error,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub project_kind: ProjectKind,
    /// Markup inserted by `insert-row`.
    pub row_definition_template: String,
    pub suppressions: Vec<TagSuppression>,
    /// Error code to severity, replacing the code's default.
    pub severities: BTreeMap<String, Severity>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            project_kind: ProjectKind::Unknown,
            row_definition_template: DEFAULT_ROW_DEFINITION.to_string(),
            suppressions: vec![],
            severities: BTreeMap::new(),
        }
    }
}

impl Config {
    pub fn load_from_path<P: AsRef<Path>>(config_path: P) -> Result<Option<Self>, ConfigError> {
        let config_path = config_path.as_ref();
        if !config_path.exists() {
            return Ok(None);
        }

        let content = std::fs::read_to_string(config_path).map_err(|source| {
            ConfigError::ConfigReadError {
                config_path: config_path.to_path_buf(),
                source,
            }
        })?;

        let config: Config =
            toml::from_str(&content).map_err(|source| ConfigError::ConfigParseError {
                config_path: config_path.to_path_buf(),
                source,
            })?;

        Ok(Some(config))
    }

    pub fn load() -> Result<Option<Self>, ConfigError> {
        let config_path = Self::config_path();
        Self::load_from_path(&config_path)
    }

    pub fn save_to_path<P: AsRef<Path>>(&self, config_path: P) -> anyhow::Result<()> {
        let config_path = config_path.as_ref();
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(config_path, content)?;
        Ok(())
    }

    pub fn save(&self) -> anyhow::Result<()> {
        let config_path = Self::config_path();
        self.save_to_path(&config_path)
    }

    pub fn config_path() -> PathBuf {
        let config_dir = shellexpand::tilde("~/.config/markup-lint");
        PathBuf::from(config_dir.as_ref()).join("config.toml")
    }

    /// Severity for `code`, honouring any override.
    pub fn severity_for(&self, code: &str) -> Option<Severity> {
        self.severities.get(code).copied()
    }

    /// Applies the configured severity overrides to `tags`.
    pub fn apply_severities(&self, tags: &mut [DiagnosticTag]) {
        for tag in tags {
            if let Some(severity) = self.severity_for(&tag.error_code) {
                tag.severity = severity;
            }
        }
    }
}
