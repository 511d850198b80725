use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{Result, VersionError};
use crate::git::command::default_executables;

/// Name of the project-local configuration file
pub const CONFIG_FILE: &str = "gitpep440.toml";

/// Represents the complete configuration for git-pep440.
///
/// Locates the package, its generated static file and keyword file, and
/// carries the branch rule block and the verbosity flag.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct Config {
    /// Package root; working directory for git and base for relative files
    #[serde(default = "default_root")]
    pub root: PathBuf,

    #[serde(default = "default_static_file")]
    pub static_file: PathBuf,

    #[serde(default = "default_keyword_file")]
    pub keyword_file: PathBuf,

    /// `<branch-regex> <virtual-tag> <reference-commit>` lines
    #[serde(default)]
    pub branch_rules: String,

    #[serde(default)]
    pub verbose: bool,

    #[serde(default)]
    pub git: GitConfig,
}

fn default_root() -> PathBuf {
    PathBuf::from(".")
}

fn default_static_file() -> PathBuf {
    PathBuf::from("_static_version.py")
}

fn default_keyword_file() -> PathBuf {
    PathBuf::from(".git_archival.txt")
}

/// Configuration for invoking the git client.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct GitConfig {
    /// Client binaries to try, in order; later entries are only used when
    /// earlier ones are not installed
    #[serde(default = "default_executables")]
    pub executables: Vec<String>,
}

impl Default for GitConfig {
    fn default() -> Self {
        GitConfig {
            executables: default_executables(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            root: default_root(),
            static_file: default_static_file(),
            keyword_file: default_keyword_file(),
            branch_rules: String::new(),
            verbose: false,
            git: GitConfig::default(),
        }
    }
}

impl Config {
    /// Configuration for a package rooted at `root`
    pub fn for_root(root: impl Into<PathBuf>) -> Self {
        Config {
            root: root.into(),
            ..Default::default()
        }
    }

    /// Absolute or root-relative location of the static version file
    pub fn static_file_path(&self) -> PathBuf {
        self.root.join(&self.static_file)
    }

    /// Absolute or root-relative location of the keyword file
    pub fn keyword_file_path(&self) -> PathBuf {
        self.root.join(&self.keyword_file)
    }

    /// Parse configuration from TOML text
    pub fn from_toml(text: &str) -> Result<Self> {
        let config: Config = toml::from_str(text)?;
        if config.git.executables.is_empty() {
            return Err(VersionError::config("git.executables must not be empty"));
        }
        Ok(config)
    }

    /// Read a configuration file; a relative `root` is taken relative to
    /// the directory holding the file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path).map_err(|e| {
            VersionError::config(format!("Cannot read {}: {}", path.display(), e))
        })?;
        let mut config = Self::from_toml(&text)?;

        if config.root.is_relative() {
            if let Some(dir) = path.parent() {
                config.root = dir.join(&config.root);
            }
        }

        Ok(config)
    }
}

/// Loads configuration from file or returns defaults.
///
/// Attempts to load configuration in the following order:
/// 1. Custom path provided as parameter
/// 2. `gitpep440.toml` in current directory
/// 3. `~/.config/.gitpep440.toml` in user config directory
/// 4. Default configuration if no file found
///
/// # Arguments
/// * `config_path` - Optional path to custom configuration file
///
/// # Returns
/// * `Ok(Config)` - Loaded or default configuration
/// * `Err` - If file exists but cannot be read or parsed
pub fn load_config(config_path: Option<&str>) -> Result<Config> {
    if let Some(path) = config_path {
        return Config::from_file(Path::new(path));
    }

    let local = Path::new(".").join(CONFIG_FILE);
    if local.exists() {
        return Config::from_file(&local);
    }

    if let Some(config_dir) = dirs::config_dir() {
        let user = config_dir.join(format!(".{}", CONFIG_FILE));
        if user.exists() {
            return Config::from_file(&user);
        }
    }

    Ok(Config::default())
}
