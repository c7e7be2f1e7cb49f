//! Config loading, validation, and utility operations.

use super::model::Config;
use super::types::{CONFIG_ENV_VAR, DEFAULT_CONFIG_PATH};
use crate::error::{Result, SweepError};
use std::path::{Path, PathBuf};

impl Config {
    /// Locate and load the configuration for this run.
    ///
    /// An explicit `KERNEL_SWEEP_CONFIG` path must exist. The default path is
    /// optional; built-in defaults apply when it is absent.
    pub fn discover() -> Result<Self> {
        let explicit = std::env::var_os(CONFIG_ENV_VAR).map(PathBuf::from);
        Self::discover_in(explicit, Path::new(DEFAULT_CONFIG_PATH))
    }

    pub(crate) fn discover_in(explicit: Option<PathBuf>, default_path: &Path) -> Result<Self> {
        match explicit {
            Some(path) => Self::load(path),
            None if default_path.is_file() => Self::load(default_path),
            None => Ok(Self::default()),
        }
    }

    /// Load config from a YAML file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        let content = std::fs::read_to_string(path).map_err(|e| {
            SweepError::UserError(format!(
                "failed to read config file '{}': {}",
                path.display(),
                e
            ))
        })?;

        Self::from_yaml(&content)
    }

    /// Parse config from a YAML string.
    ///
    /// Unknown fields in the YAML are silently ignored for forward compatibility.
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        let config: Config = serde_yaml::from_str(yaml)
            .map_err(|e| SweepError::UserError(format!("failed to parse config YAML: {}", e)))?;

        config.validate()?;
        Ok(config)
    }

    /// Validate config values and return error on invalid values.
    ///
    /// Validation rules:
    /// - `package_patterns` must be non-empty and contain no blank entries
    /// - `query_program` must be non-empty
    /// - `purge_command` must parse into at least one word
    /// - `sweep_roots` entries must be absolute
    pub fn validate(&self) -> Result<()> {
        if self.package_patterns.is_empty() {
            return Err(SweepError::UserError(
                "config validation failed: package_patterns must not be empty".to_string(),
            ));
        }
        if self.package_patterns.iter().any(|p| p.trim().is_empty()) {
            return Err(SweepError::UserError(
                "config validation failed: package_patterns entries must be non-empty".to_string(),
            ));
        }

        if self.query_program.trim().is_empty() {
            return Err(SweepError::UserError(
                "config validation failed: query_program must be non-empty".to_string(),
            ));
        }

        self.purge_argv()?;

        for root in &self.sweep_roots {
            if !root.is_absolute() {
                return Err(SweepError::UserError(format!(
                    "config validation failed: sweep_roots entries must be absolute (found '{}')",
                    root.display()
                )));
            }
        }

        Ok(())
    }

    /// The purge command split into program and arguments.
    ///
    /// The assume-yes flag and package names are appended by the caller.
    pub fn purge_argv(&self) -> Result<Vec<String>> {
        let argv = shell_words::split(&self.purge_command).map_err(|e| {
            SweepError::UserError(format!(
                "failed to parse purge_command '{}': {}\n\
                 Fix: check for unmatched quotes or invalid escape sequences.",
                self.purge_command, e
            ))
        })?;

        if argv.is_empty() {
            return Err(SweepError::UserError(
                "config validation failed: purge_command must be non-empty".to_string(),
            ));
        }

        Ok(argv)
    }
}
