//! Book manifest configuration for Quire.
//!
//! Parses `quire.toml` manifests with serde and provides auto-discovery of the
//! manifest in parent directories.
//!
//! CLI settings can be applied during load via [`CliSettings`].
//!
//! ## Manifest Format
//!
//! ```toml
//! [output]
//! path = "book.txt"      # optional, relative to the manifest; default stdout
//!
//! [[pages]]
//! text = "Hello"         # single unstyled component
//!
//! [[pages]]
//! components = [
//!   { text = "World", bold = true, color = "gold" },
//!   { text = "!", clickEvent = { action = "change_page", value = "1" } },
//! ]
//! ```
//!
//! The first page becomes the book's front page.

use std::path::{Path, PathBuf};

use quire_text::TextComponent;
use serde::Deserialize;

/// CLI settings that override manifest values.
///
/// All fields are optional. Only non-None values override the loaded config.
#[derive(Debug, Default)]
pub struct CliSettings {
    /// Override the output file.
    pub output: Option<PathBuf>,
}

/// Manifest filename to search for.
const CONFIG_FILENAME: &str = "quire.toml";

/// Book manifest.
#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Output configuration (paths are relative strings from TOML).
    output: OutputConfigRaw,
    /// Book pages, front page first.
    pub pages: Vec<PageConfig>,

    /// Resolved output configuration (set after loading).
    #[serde(skip)]
    pub output_resolved: OutputConfig,
    /// Path to the manifest file (set after loading).
    #[serde(skip)]
    pub config_path: Option<PathBuf>,
}

/// Raw output configuration as parsed from TOML.
#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct OutputConfigRaw {
    path: Option<String>,
}

/// Resolved output configuration.
#[derive(Debug, Default)]
pub struct OutputConfig {
    /// File to write the serialized book to; `None` writes to stdout.
    pub path: Option<PathBuf>,
}

/// One page of the manifest.
///
/// Exactly one of `text` and `components` must be set.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PageConfig {
    /// Shorthand for a single unstyled component.
    pub text: Option<String>,
    /// Components making up the page; the first is the base, the rest are
    /// appended to it as children.
    pub components: Option<Vec<TextComponent>>,
}

impl PageConfig {
    /// Components of this page, in order.
    pub fn components(&self) -> Vec<TextComponent> {
        match (&self.text, &self.components) {
            (Some(text), _) => vec![TextComponent::new(text.as_str())],
            (None, Some(components)) => components.clone(),
            (None, None) => Vec::new(),
        }
    }

    fn validate(&self, index: usize) -> Result<(), ConfigError> {
        match (&self.text, &self.components) {
            (Some(_), Some(_)) => Err(ConfigError::Validation(format!(
                "pages[{index}] cannot set both text and components"
            ))),
            (None, None) => Err(ConfigError::Validation(format!(
                "pages[{index}] requires text or components"
            ))),
            (None, Some(components)) if components.is_empty() => Err(ConfigError::Validation(
                format!("pages[{index}].components cannot be empty"),
            )),
            _ => Ok(()),
        }
    }
}

/// Configuration error.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// File not found.
    #[error("Manifest file not found: {}", .0.display())]
    NotFound(PathBuf),
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// TOML parsing error.
    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),
    /// Validation error.
    #[error("Manifest error: {0}")]
    Validation(String),
}

impl Config {
    /// Load the manifest with optional CLI settings.
    ///
    /// If `config_path` is provided, loads from that file.
    /// Otherwise, searches for `quire.toml` in current directory and parents.
    ///
    /// CLI settings are applied after loading and path resolution, allowing CLI
    /// arguments to take precedence over manifest values.
    ///
    /// # Errors
    ///
    /// Returns error if no manifest is found, parsing fails, or the manifest
    /// is invalid.
    pub fn load(
        config_path: Option<&Path>,
        cli_settings: Option<&CliSettings>,
    ) -> Result<Self, ConfigError> {
        let path = match config_path {
            Some(path) if !path.exists() => {
                return Err(ConfigError::NotFound(path.to_path_buf()));
            }
            Some(path) => path.to_path_buf(),
            None => {
                let cwd = std::env::current_dir()?;
                Self::discover_config(&cwd)
                    .ok_or_else(|| ConfigError::NotFound(cwd.join(CONFIG_FILENAME)))?
            }
        };

        let mut config = Self::load_from_file(&path)?;

        if let Some(settings) = cli_settings {
            config.apply_cli_settings(settings);
        }

        Ok(config)
    }

    /// Apply CLI settings to the configuration.
    fn apply_cli_settings(&mut self, settings: &CliSettings) {
        if let Some(output) = &settings.output {
            self.output_resolved.path = Some(output.clone());
        }
    }

    /// Search for the manifest in `start` and its parents.
    fn discover_config(start: &Path) -> Option<PathBuf> {
        let mut current = start.to_path_buf();
        loop {
            let candidate = current.join(CONFIG_FILENAME);
            if candidate.exists() {
                return Some(candidate);
            }
            if !current.pop() {
                return None;
            }
        }
    }

    /// Load the manifest from a specific file.
    fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let mut config: Self = toml::from_str(&content)?;

        let config_dir = path.parent().unwrap_or(Path::new("."));
        config.resolve_paths(config_dir);
        config.config_path = Some(path.to_path_buf());

        config.validate()?;

        Ok(config)
    }

    /// Validate manifest values.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if the manifest has no pages, a page
    /// is malformed, or the output path is empty.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.pages.is_empty() {
            return Err(ConfigError::Validation(
                "at least one [[pages]] entry is required".to_owned(),
            ));
        }

        for (index, page) in self.pages.iter().enumerate() {
            page.validate(index)?;
        }

        if self.output.path.as_deref() == Some("") {
            return Err(ConfigError::Validation(
                "output.path cannot be empty".to_owned(),
            ));
        }

        Ok(())
    }

    /// Resolve relative paths against the manifest directory.
    fn resolve_paths(&mut self, config_dir: &Path) {
        self.output_resolved = OutputConfig {
            path: self.output.path.as_deref().map(|path| config_dir.join(path)),
        };
    }
}
