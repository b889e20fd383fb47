//! Configuration management module.
//!
//! This module handles loading and saving the application configuration:
//! the workspace root, the preferred file sort order, the log level and the
//! git details shown by the git view.

mod error;

pub use error::ConfigError;

use crate::error::AppError;
use crate::workspace::SortOrder;
use log::LevelFilter;
use serde::{Deserialize, Serialize};
use std::{
    fs,
    io::Write,
    path::{Path, PathBuf},
};

const FILE_NAME: &str = "config.yml";
const DEFAULT_DIRECTORY_PATH: &str = ".config/patto-nav";

/// Oversees management of configuration file.
///
#[derive(Clone, Debug)]
pub struct Config {
    pub workspace_root: Option<PathBuf>,
    pub sort_by: SortOrder,
    pub log_level: String,
    pub git_remote: Option<String>,
    pub git_user: Option<String>,
    file_path: Option<PathBuf>,
}

/// Define specification for configuration file.
///
#[derive(Serialize, Deserialize)]
struct FileSpec {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    workspace_root: Option<PathBuf>,
    #[serde(default)]
    sort_by: SortOrder,
    #[serde(default = "default_log_level")]
    log_level: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    git_remote: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    git_user: Option<String>,
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
    /// Return a new instance holding the defaults.
    ///
    pub fn new() -> Config {
        Config {
            workspace_root: None,
            sort_by: SortOrder::default(),
            log_level: default_log_level(),
            git_remote: None,
            git_user: None,
            file_path: None,
        }
    }

    /// Load the configuration from the default directory, or from the
    /// custom directory if provided. A missing file leaves the defaults in
    /// place; it is written on the first `save`.
    ///
    pub fn load(&mut self, custom_path: Option<&str>) -> Result<(), AppError> {
        let dir_path = match custom_path {
            Some(path) => Path::new(&path).to_path_buf(),
            None => Config::default_path()?,
        };

        if !dir_path.exists() {
            fs::create_dir_all(&dir_path).map_err(|e| ConfigError::CreateDirectoryFailed {
                path: dir_path.clone(),
                source: e,
            })?;
        }

        self.file_path = Some(dir_path.join(Path::new(FILE_NAME)));
        let file_path = self.file_path.as_ref().ok_or(ConfigError::FilePathNotSet)?;

        if file_path.exists() {
            let contents = fs::read_to_string(file_path).map_err(|e| ConfigError::LoadFailed {
                path: file_path.clone(),
                message: format!("IO error: {}", e),
            })?;
            let data: FileSpec = serde_yaml::from_str(&contents)
                .map_err(|e| ConfigError::DeserializationFailed(e.to_string()))?;
            self.workspace_root = data.workspace_root;
            self.sort_by = data.sort_by;
            self.log_level = data.log_level;
            self.git_remote = data.git_remote;
            self.git_user = data.git_user;
        }

        self.level_filter()?;
        Ok(())
    }

    /// Serialize the configuration and write it to the loaded file path.
    ///
    pub fn save(&self) -> Result<(), AppError> {
        let file_path = self.file_path.as_ref().ok_or(ConfigError::FilePathNotSet)?;
        let data = FileSpec {
            workspace_root: self.workspace_root.clone(),
            sort_by: self.sort_by,
            log_level: self.log_level.clone(),
            git_remote: self.git_remote.clone(),
            git_user: self.git_user.clone(),
        };
        let content = serde_yaml::to_string(&data)
            .map_err(|e| ConfigError::SerializationFailed(e.to_string()))?;

        if let Some(parent) = file_path.parent() {
            if !parent.exists() {
                fs::create_dir_all(parent).map_err(|e| ConfigError::CreateDirectoryFailed {
                    path: parent.to_path_buf(),
                    source: e,
                })?;
            }
        }

        let mut file = fs::File::create(file_path).map_err(|e| ConfigError::SaveFailed {
            path: file_path.clone(),
            source: e,
        })?;
        write!(file, "{}", content).map_err(|e| ConfigError::SaveFailed {
            path: file_path.clone(),
            source: e,
        })?;
        file.flush().map_err(|e| ConfigError::SaveFailed {
            path: file_path.clone(),
            source: e,
        })?;
        Ok(())
    }

    /// Parse the configured log level.
    ///
    pub fn level_filter(&self) -> Result<LevelFilter, ConfigError> {
        self.log_level
            .parse::<LevelFilter>()
            .map_err(|_| ConfigError::InvalidLogLevel(self.log_level.clone()))
    }

    /// Pick the workspace directory: the command line override, then the
    /// configured root, then the current directory.
    ///
    pub fn resolve_workspace(&self, override_path: Option<&str>) -> Result<PathBuf, ConfigError> {
        if let Some(path) = override_path {
            return Ok(PathBuf::from(path));
        }
        if let Some(root) = &self.workspace_root {
            return Ok(root.clone());
        }
        std::env::current_dir().map_err(|e| ConfigError::WorkspaceNotResolved(e.to_string()))
    }

    pub fn file_path(&self) -> Option<&Path> {
        self.file_path.as_deref()
    }

    /// Returns the path buffer for the default configuration directory or
    /// an error if the home directory could not be found.
    ///
    fn default_path() -> Result<PathBuf, AppError> {
        match dirs::home_dir() {
            Some(home) => Ok(home.join(DEFAULT_DIRECTORY_PATH)),
            None => Err(ConfigError::HomeDirectoryNotFound.into()),
        }
    }
}
