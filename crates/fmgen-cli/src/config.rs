//! `fmgen.toml` settings parsing and validation

use anyhow::{Context, Result};
use fmgen_core::{AllowList, LogLevel};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Settings file looked up in the root directory when none is given.
pub const SETTINGS_FILE_NAME: &str = "fmgen.toml";

/// fmgen.toml settings
///
/// Example:
/// ```toml
/// [generate]
/// structs = ["Sample", "Simple"]
/// recursive = true
/// verbose = false
/// log_level = "info"
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub generate: GenerateSection,
}

/// `[generate]` section
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GenerateSection {
    /// Struct allow-list; empty means every struct
    #[serde(default)]
    pub structs: Vec<String>,

    /// Descend into subdirectories in directory mode
    #[serde(default = "default_recursive")]
    pub recursive: bool,

    /// Log extraction dumps
    #[serde(default)]
    pub verbose: bool,

    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_recursive() -> bool {
    true
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for GenerateSection {
    fn default() -> Self {
        Self {
            structs: Vec::new(),
            recursive: default_recursive(),
            verbose: false,
            log_level: default_log_level(),
        }
    }
}

impl Settings {
    /// Load settings from a file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read settings: {:?}", path.as_ref()))?;

        Self::from_str(&content)
            .with_context(|| format!("Invalid settings file: {:?}", path.as_ref()))
    }

    /// Parse settings from a string
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(content: &str) -> Result<Self> {
        let settings: Settings = toml::from_str(content).context("Failed to parse settings")?;
        settings.validate()?;
        Ok(settings)
    }

    /// Load the explicit settings file, or `fmgen.toml` under `root` if it
    /// exists, or defaults.
    pub fn load(explicit: Option<&Path>, root: &Path) -> Result<Self> {
        match explicit {
            Some(path) => Self::from_file(path),
            None => {
                let candidate = root.join(SETTINGS_FILE_NAME);
                if candidate.is_file() {
                    tracing::debug!(path = %candidate.display(), "loading settings");
                    Self::from_file(candidate)
                } else {
                    Ok(Self::default())
                }
            }
        }
    }

    /// Validate the settings
    pub fn validate(&self) -> Result<()> {
        if self.generate.structs.iter().any(|s| s.trim().is_empty()) {
            anyhow::bail!("Struct names in [generate].structs cannot be empty");
        }

        if LogLevel::parse(&self.generate.log_level).is_none() {
            anyhow::bail!(
                "Invalid log level: {} (expected trace, debug, info, warn, error or off)",
                self.generate.log_level
            );
        }

        Ok(())
    }

    /// The configured log level; validation guarantees it parses.
    pub fn log_level(&self) -> LogLevel {
        LogLevel::parse(&self.generate.log_level).unwrap_or(LogLevel::Info)
    }
}

/// Command-line values that take precedence over the settings file
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Overrides {
    /// Comma-separated allow-list
    pub structs: Option<String>,
    pub no_recursive: bool,
    pub verbose: bool,
    pub log_level: Option<String>,
}

impl Settings {
    /// Apply command-line overrides and re-validate.
    pub fn with_overrides(mut self, overrides: &Overrides) -> Result<Self> {
        if let Some(structs) = &overrides.structs {
            self.generate.structs = AllowList::parse(structs).names().to_vec();
        }
        if overrides.no_recursive {
            self.generate.recursive = false;
        }
        if overrides.verbose {
            self.generate.verbose = true;
        }
        if let Some(level) = &overrides.log_level {
            self.generate.log_level = level.clone();
        }

        self.validate()?;
        Ok(self)
    }

    /// The allow-list, or `None` when every struct is eligible.
    pub fn allow_list(&self) -> Option<AllowList> {
        let list = AllowList::from_names(&self.generate.structs);
        (!list.is_empty()).then_some(list)
    }
}

/// Root directory a settings file is searched in for the given source target
pub fn settings_root(dir: Option<&Path>, file: Option<&Path>) -> PathBuf {
    match (dir, file) {
        (Some(dir), _) => dir.to_path_buf(),
        (None, Some(file)) => file
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .map_or_else(|| PathBuf::from("."), Path::to_path_buf),
        (None, None) => PathBuf::from("."),
    }
}
