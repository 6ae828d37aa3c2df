use crate::error::{Result, VcclogError};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// What to do when a candidate's modification time cannot be read
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum StatFailurePolicy {
    /// Log the failure and treat the candidate as never winning
    #[default]
    Skip,
    /// Fail the whole lookup with `StatFailure`
    Abort,
}

/// Locator configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LocatorConfig {
    /// Directory to scan instead of the OS temp directory
    #[serde(default)]
    pub temp_dir: Option<PathBuf>,

    /// Policy applied to candidates whose metadata cannot be read
    #[serde(default)]
    pub on_stat_error: StatFailurePolicy,
}

impl LocatorConfig {
    /// Load a configuration from a file (supports TOML and JSON)
    pub fn from_file(path: &Path) -> Result<LocatorConfig> {
        let contents = std::fs::read_to_string(path).map_err(|e| {
            VcclogError::ConfigError(format!(
                "Failed to read config file {}: {}",
                path.display(),
                e
            ))
        })?;

        // Determine format based on file extension
        let extension = path.extension().and_then(|s| s.to_str()).unwrap_or("");

        let mut config = match extension {
            "toml" => Self::parse_toml(&contents)?,
            "json" => Self::parse_json(&contents)?,
            _ => {
                return Err(VcclogError::InvalidConfig(format!(
                    "Unsupported file format: {}. Use .toml or .json",
                    extension
                )))
            }
        };

        config.expand_env_vars();
        config.validate()?;

        Ok(config)
    }

    fn parse_toml(contents: &str) -> Result<LocatorConfig> {
        toml::from_str(contents)
            .map_err(|e| VcclogError::InvalidConfig(format!("Failed to parse TOML: {}", e)))
    }

    fn parse_json(contents: &str) -> Result<LocatorConfig> {
        serde_json::from_str(contents)
            .map_err(|e| VcclogError::InvalidConfig(format!("Failed to parse JSON: {}", e)))
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if let Some(ref dir) = self.temp_dir {
            if dir.as_os_str().is_empty() {
                return Err(VcclogError::ConfigValidationError(
                    "temp_dir must not be empty".to_string(),
                ));
            }
        }

        Ok(())
    }

    /// Apply command-line overrides on top of file values
    pub fn with_overrides(
        mut self,
        temp_dir: Option<PathBuf>,
        on_stat_error: Option<StatFailurePolicy>,
    ) -> Self {
        if temp_dir.is_some() {
            self.temp_dir = temp_dir;
        }
        if let Some(policy) = on_stat_error {
            self.on_stat_error = policy;
        }
        self
    }

    fn expand_env_vars(&mut self) {
        if let Some(ref dir) = self.temp_dir {
            self.temp_dir = Some(Self::expand_env_in_path(dir));
        }
    }

    /// Expand `$VAR` and `${VAR}` references in a string
    ///
    /// A bare `$VAR` takes the longest run of `[A-Za-z0-9_]` as the name.
    /// Unset variables are left as written.
    fn expand_env_in_string(s: &str) -> String {
        let mut result = String::with_capacity(s.len());
        let mut rest = s;

        while let Some(pos) = rest.find('$') {
            result.push_str(&rest[..pos]);
            let after = &rest[pos + 1..];

            let (name, consumed) = match after.strip_prefix('{') {
                Some(braced) => match braced.find('}') {
                    Some(end) => (&braced[..end], end + 2),
                    None => ("", 0),
                },
                None => {
                    let end = after
                        .find(|c: char| !(c.is_ascii_alphanumeric() || c == '_'))
                        .unwrap_or(after.len());
                    (&after[..end], end)
                }
            };

            let value = if name.is_empty() {
                None
            } else {
                std::env::var(name).ok()
            };
            match value {
                Some(value) => result.push_str(&value),
                None => result.push_str(&rest[pos..pos + 1 + consumed]),
            }

            rest = &rest[pos + 1 + consumed..];
        }

        result.push_str(rest);
        result
    }

    fn expand_env_in_path(path: &Path) -> PathBuf {
        let path_str = path.to_string_lossy();
        PathBuf::from(Self::expand_env_in_string(&path_str))
    }
}
