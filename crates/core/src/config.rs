//! Application configuration.
//!
//! Values are layered: built-in defaults, then the optional TOML file under
//! the user's config directory, then `INDIC_GAMES_*` environment variables.

use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use config::{Config, Environment, File, FileFormat};
use serde::Deserialize;
use tracing::{info, warn};

use crate::{catalog, export::ExportManager};

/// Directory name under the platform config directory.
pub const CONFIG_DIR: &str = "indic-games";
/// Configuration file name.
pub const CONFIG_FILE: &str = "config.toml";
/// Prefix for environment overrides.
pub const ENV_PREFIX: &str = "INDIC_GAMES";

const DEFAULT_CONFIG: &str = r#"# Indic Game Generator configuration.

# Language selected at startup (english, hindi, bengali, ...).
default_language = "english"

# Directory exported games are written to. Defaults to the download directory.
# export_dir = "/home/me/Downloads"

# Animate the progress gauge while a custom game is generated.
animate_generation = true

# Directory for log files, relative to the working directory unless absolute.
log_dir = "logs"
"#;

/// Runtime configuration shared by the core and the terminal host.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Language code selected when the session starts.
    pub default_language: String,
    /// Directory exports are written to.
    pub export_dir: PathBuf,
    /// Whether the host animates generation progress.
    pub animate_generation: bool,
    /// Directory for log files.
    pub log_dir: PathBuf,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            default_language: catalog::DEFAULT_LANGUAGE.to_string(),
            export_dir: ExportManager::default_root(),
            animate_generation: true,
            log_dir: PathBuf::from("logs"),
        }
    }
}

impl AppConfig {
    /// Load configuration from the default file location and environment.
    pub fn load() -> Result<Self> {
        Self::load_from(config_path())
    }

    /// Load configuration from `path` (if present) and environment.
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let defaults = Self::default();
        let settings = Config::builder()
            .set_default("default_language", defaults.default_language)?
            .set_default(
                "export_dir",
                defaults.export_dir.to_string_lossy().into_owned(),
            )?
            .set_default("animate_generation", defaults.animate_generation)?
            .set_default("log_dir", defaults.log_dir.to_string_lossy().into_owned())?
            .add_source(File::new(&path.to_string_lossy(), FileFormat::Toml).required(false))
            .add_source(Environment::with_prefix(ENV_PREFIX).try_parsing(true))
            .build()
            .with_context(|| format!("failed to read configuration {}", path.display()))?;

        settings
            .try_deserialize()
            .with_context(|| format!("invalid configuration in {}", path.display()))
    }

    /// Configured language if the catalog knows it, English otherwise.
    pub fn language(&self) -> &'static str {
        match catalog::language(&self.default_language) {
            Some(entry) => entry.code,
            None => {
                warn!(
                    language = %self.default_language,
                    "unknown default language, using {}",
                    catalog::DEFAULT_LANGUAGE
                );
                catalog::DEFAULT_LANGUAGE
            }
        }
    }
}

/// Location of the user configuration file.
pub fn config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(CONFIG_DIR)
        .join(CONFIG_FILE)
}

/// Write the commented default configuration if no file exists yet.
pub fn ensure_default_config() -> Result<()> {
    ensure_default_config_at(config_path())
}

/// Write the commented default configuration to `path` if it is missing.
pub fn ensure_default_config_at(path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    if path.exists() {
        return Ok(());
    }
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("failed to create config directory {}", parent.display()))?;
    }
    fs::write(path, DEFAULT_CONFIG)
        .with_context(|| format!("failed to write default config {}", path.display()))?;
    info!(path = %path.display(), "default configuration written");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn default_file_is_written_once() -> Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join("nested").join(CONFIG_FILE);
        ensure_default_config_at(&path)?;
        assert_eq!(fs::read_to_string(&path)?, DEFAULT_CONFIG);

        fs::write(&path, "default_language = \"tamil\"\n")?;
        ensure_default_config_at(&path)?;
        assert_eq!(fs::read_to_string(&path)?, "default_language = \"tamil\"\n");
        Ok(())
    }

    #[test]
    fn file_values_override_defaults() -> Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join(CONFIG_FILE);
        fs::write(
            &path,
            "default_language = \"marathi\"\nexport_dir = \"/tmp/games\"\nanimate_generation = false\n",
        )?;

        let config = AppConfig::load_from(&path)?;
        assert_eq!(config.language(), "marathi");
        assert_eq!(config.export_dir, PathBuf::from("/tmp/games"));
        assert!(!config.animate_generation);
        assert_eq!(config.log_dir, PathBuf::from("logs"));
        Ok(())
    }

    #[test]
    fn missing_file_uses_defaults() -> Result<()> {
        let dir = tempdir()?;
        let config = AppConfig::load_from(dir.path().join("absent.toml"))?;
        assert!(config.animate_generation);
        assert_eq!(config.log_dir, PathBuf::from("logs"));
        Ok(())
    }

    #[test]
    fn unknown_language_falls_back_to_english() {
        let config = AppConfig {
            default_language: "klingon".to_string(),
            ..AppConfig::default()
        };
        assert_eq!(config.language(), "english");
    }
}
