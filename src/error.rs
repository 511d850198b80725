use thiserror::Error;

/// Unified error type for the edges of version resolution
///
/// Resolution itself never fails; these errors only surface from loading
/// configuration, reading the static file and writing it at build time.
#[derive(Error, Debug)]
pub enum VersionError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Static version file error: {0}")]
    StaticFile(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("TOML serialization error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),
}

/// Convenience type alias for Results in git-pep440
pub type Result<T> = std::result::Result<T, VersionError>;

impl VersionError {
    /// Create a configuration error with context
    pub fn config(msg: impl Into<String>) -> Self {
        VersionError::Config(msg.into())
    }

    /// Create a static file error with context
    pub fn static_file(msg: impl Into<String>) -> Self {
        VersionError::StaticFile(msg.into())
    }
}
