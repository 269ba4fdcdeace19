//! Configuration loading and discovery for `pxlshade.toml`
//!
//! Provides functions to find, load, and merge configuration.

use super::schema::{DisplayShape, ShadeConfig};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Name of the configuration file searched for.
pub const CONFIG_FILE: &str = "pxlshade.toml";

/// Configuration loading error
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ConfigError {
    /// File I/O error
    #[error("Failed to read config: {0}")]
    Io(#[from] std::io::Error),
    /// TOML parsing error
    #[error("Failed to parse pxlshade.toml: {0}")]
    Parse(#[from] toml::de::Error),
    /// Validation error
    #[error("Config validation failed:\n{}", .0.iter().map(|e| format!("  - {}", e)).collect::<Vec<_>>().join("\n"))]
    Validation(Vec<String>),
}

/// CLI arguments that can override config values
#[derive(Debug, Default, Clone)]
pub struct CliOverrides {
    pub shape: Option<DisplayShape>,
    pub width: Option<u16>,
    pub height: Option<u16>,
    pub angle_degrees: Option<i32>,
    pub scale: Option<u8>,
    pub antialiased: Option<bool>,
}

/// Find `pxlshade.toml` by walking up from the current working directory.
pub fn find_config() -> Option<PathBuf> {
    env::current_dir().ok().and_then(find_config_from)
}

/// Find `pxlshade.toml` by walking up from a specific directory.
pub fn find_config_from(start: PathBuf) -> Option<PathBuf> {
    let mut current = start;

    loop {
        let config_path = current.join(CONFIG_FILE);
        if config_path.exists() {
            return Some(config_path);
        }

        if !current.pop() {
            return None;
        }
    }
}

/// Load configuration.
///
/// If a path is provided, loads from that file. Otherwise, uses
/// [`find_config`] and falls back to defaults when nothing is found.
///
/// # Example
/// ```ignore
/// let config = load_config(Some(Path::new("demo/pxlshade.toml")))?;
/// ```
pub fn load_config(path: Option<&Path>) -> Result<ShadeConfig, ConfigError> {
    let config_path = match path {
        Some(p) => Some(p.to_path_buf()),
        None => find_config(),
    };

    match config_path {
        Some(p) => {
            tracing::debug!(path = %p.display(), "loading config");
            load_config_file(&p)
        }
        None => Ok(ShadeConfig::default()),
    }
}

/// Load configuration from a specific file path.
fn load_config_file(path: &Path) -> Result<ShadeConfig, ConfigError> {
    let contents = fs::read_to_string(path)?;
    let config: ShadeConfig = toml::from_str(&contents)?;
    validated(config)
}

fn validated(config: ShadeConfig) -> Result<ShadeConfig, ConfigError> {
    let issues = config.validate();
    if !issues.is_empty() {
        return Err(ConfigError::Validation(issues.into_iter().map(|e| e.to_string()).collect()));
    }
    Ok(config)
}

/// Merge CLI overrides into a configuration and re-validate.
///
/// CLI arguments take precedence over config file values.
pub fn merge_cli_overrides(
    mut config: ShadeConfig,
    overrides: &CliOverrides,
) -> Result<ShadeConfig, ConfigError> {
    if let Some(shape) = overrides.shape {
        config.display.shape = shape;
    }
    if let Some(width) = overrides.width {
        config.display.width = width;
    }
    if let Some(height) = overrides.height {
        config.display.height = height;
    }
    if let Some(angle) = overrides.angle_degrees {
        config.light.angle_degrees = angle;
    }
    if let Some(scale) = overrides.scale {
        config.render.scale = scale;
    }
    if let Some(antialiased) = overrides.antialiased {
        config.render.antialiased = antialiased;
    }
    validated(config)
}
