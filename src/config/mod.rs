//! Configuration management module.
//!
//! This module handles loading and saving the YAML configuration file:
//! board file location, theme, save throttling and log level.

mod error;

pub use error::ConfigError;

use crate::error::AppError;
use log::{info, LevelFilter};
use serde::{Deserialize, Serialize};
use std::{fs, path::PathBuf, str::FromStr, time::Duration};

const FILE_NAME: &str = "config.yml";
const BOARD_FILE_NAME: &str = "board.json";
const DEFAULT_DIRECTORY_PATH: &str = ".config/flowboard";

/// Oversees management of configuration file.
///
#[derive(Clone, Debug)]
pub struct Config {
    pub board_file: Option<PathBuf>,
    pub theme_name: String,
    pub save_debounce_ms: u64,
    pub log_level: String,
    file_path: Option<PathBuf>,
}

/// Define specification for configuration file.
///
#[derive(Serialize, Deserialize)]
struct FileSpec {
    #[serde(default)]
    pub board_file: Option<PathBuf>,
    #[serde(default = "default_theme_name")]
    pub theme_name: String,
    #[serde(default = "default_save_debounce_ms")]
    pub save_debounce_ms: u64,
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_theme_name() -> String {
    "dark".to_string()
}

fn default_save_debounce_ms() -> u64 {
    1000
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Config::new()
    }
}

impl Config {
    /// Return a new instance with default values and no file.
    ///
    pub fn new() -> Config {
        Config {
            board_file: None,
            theme_name: default_theme_name(),
            save_debounce_ms: default_save_debounce_ms(),
            log_level: default_log_level(),
            file_path: None,
        }
    }

    /// Load `config.yml` from the given directory, or from
    /// `~/.config/flowboard`. When the file does not exist yet it is written
    /// with default values and a board file next to it.
    ///
    pub fn load(&mut self, custom_path: Option<&str>) -> Result<(), AppError> {
        let dir_path = match custom_path {
            Some(path) => PathBuf::from(path),
            None => Config::default_path()?,
        };
        let file_path = dir_path.join(FILE_NAME);
        self.file_path = Some(file_path.clone());

        if !file_path.exists() {
            info!("Writing default configuration to {}", file_path.display());
            self.board_file = Some(dir_path.join(BOARD_FILE_NAME));
            return self.save();
        }

        let contents = fs::read_to_string(&file_path).map_err(|source| ConfigError::Read {
            path: file_path.clone(),
            source,
        })?;
        let spec: FileSpec = serde_yaml::from_str(&contents).map_err(|e| ConfigError::Parse {
            path: file_path.clone(),
            message: e.to_string(),
        })?;
        self.board_file = spec.board_file;
        self.theme_name = spec.theme_name;
        self.save_debounce_ms = spec.save_debounce_ms;
        self.log_level = spec.log_level;
        Ok(())
    }

    /// Write the current values back to the file picked by `load`.
    ///
    pub fn save(&self) -> Result<(), AppError> {
        let file_path = self.file_path.as_ref().ok_or(ConfigError::NotLoaded)?;
        let spec = FileSpec {
            board_file: self.board_file.clone(),
            theme_name: self.theme_name.clone(),
            save_debounce_ms: self.save_debounce_ms,
            log_level: self.log_level.clone(),
        };
        let content = serde_yaml::to_string(&spec).map_err(|e| ConfigError::Encode(e.to_string()))?;

        if let Some(parent) = file_path.parent() {
            fs::create_dir_all(parent).map_err(|source| ConfigError::CreateDirectory {
                path: parent.to_path_buf(),
                source,
            })?;
        }
        fs::write(file_path, content).map_err(|source| ConfigError::Write {
            path: file_path.clone(),
            source,
        })?;
        Ok(())
    }

    /// Returns the board file location. Falls back to `board.json` next to
    /// the configuration file.
    ///
    pub fn board_path(&self) -> Result<PathBuf, AppError> {
        if let Some(path) = &self.board_file {
            return Ok(path.clone());
        }
        match &self.file_path {
            Some(file_path) => Ok(file_path.with_file_name(BOARD_FILE_NAME)),
            None => Ok(Config::default_path()?.join(BOARD_FILE_NAME)),
        }
    }

    /// Returns the coalescing window for board writes.
    ///
    pub fn save_window(&self) -> Duration {
        Duration::from_millis(self.save_debounce_ms)
    }

    /// Parse the configured log level.
    ///
    pub fn level_filter(&self) -> Result<LevelFilter, ConfigError> {
        LevelFilter::from_str(self.log_level.trim())
            .map_err(|_| ConfigError::InvalidLogLevel(self.log_level.clone()))
    }

    fn default_path() -> Result<PathBuf, ConfigError> {
        dirs::home_dir()
            .map(|home| home.join(DEFAULT_DIRECTORY_PATH))
            .ok_or(ConfigError::NoHomeDirectory)
    }
}
