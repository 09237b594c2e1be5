//! User configuration.
//!
//! Settings are read from `config.toml` in the platform config directory
//! (or an explicit file) and can be overridden on the command line:
//!
//! ```toml
//! separator = ";"
//! max_depth = 256
//! ```

use directories::ProjectDirs;
use postfix_engine::engine::EvalOptions;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::info;

use crate::error::{CoreError, Result};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Field separator used to split rows into cells.
    pub separator: String,
    #[serde(flatten)]
    pub eval: EvalOptions,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            separator: ",".to_string(),
            eval: EvalOptions::default(),
        }
    }
}

impl Config {
    pub fn from_toml(content: &str) -> std::result::Result<Config, toml::de::Error> {
        toml::from_str(content)
    }

    /// Reject settings the engine cannot work with.
    pub fn validate(&self) -> Result<()> {
        if self.separator.is_empty() {
            return Err(CoreError::InvalidConfig("separator must not be empty".to_string()));
        }
        if self.eval.max_depth == 0 {
            return Err(CoreError::InvalidConfig("max_depth must be at least 1".to_string()));
        }
        Ok(())
    }
}

/// Load configuration, falling back to defaults.
///
/// Returns the configuration together with warnings about files that could
/// not be read or parsed. A missing default config file is not a warning.
pub fn load_config(explicit: Option<&Path>) -> (Config, Vec<String>) {
    let mut warnings: Vec<String> = Vec::new();
    let config_path = explicit.map(Path::to_path_buf).or_else(user_config_path);

    let Some(path) = config_path else {
        return (Config::default(), warnings);
    };

    if !path.exists() {
        if explicit.is_some() {
            warnings.push(format!("Config file not found: {}", path.display()));
        }
        return (Config::default(), warnings);
    }

    match std::fs::read_to_string(&path) {
        Ok(content) => match Config::from_toml(&content) {
            Ok(config) => {
                info!(path = %path.display(), "loaded config");
                return (config, warnings);
            }
            Err(err) => warnings.push(format!("Failed to parse {}: {}", path.display(), err)),
        },
        Err(err) => warnings.push(format!("Failed to read {}: {}", path.display(), err)),
    }

    (Config::default(), warnings)
}

pub fn user_config_path() -> Option<PathBuf> {
    let proj = ProjectDirs::from("", "", "postfixcsv")?;
    let mut path = proj.config_dir().to_path_buf();
    path.push("config.toml");
    Some(path)
}
