//! The version file generated into built packages and source distributions.

use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::domain::VersionData;
use crate::error::{Result, VersionError};

/// Version value meaning "ignore this file and ask git"
pub const USE_GIT: &str = "__use_git__";

/// Value older generators wrote for an absent branch or revision
const ABSENT: &str = "None";

/// Header written at the top of generated files
pub const HEADER: &str = "# This file has been generated by git-pep440.";

/// Contents of a static version file.
///
/// The file is plain `key = "value"` text, which is read and written as TOML.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StaticVersionFile {
    pub version: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub branch: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub revision: Option<String>,
}

impl StaticVersionFile {
    /// Parse file contents; a `"None"` branch or revision counts as absent.
    pub fn parse(text: &str) -> Result<Self> {
        let mut file: Self = toml::from_str(text)
            .map_err(|e| VersionError::static_file(format!("invalid contents: {}", e)))?;
        file.branch = file.branch.filter(|b| b != ABSENT);
        file.revision = file.revision.filter(|r| r != ABSENT);
        Ok(file)
    }

    /// Read the file at `path`, `Ok(None)` if it does not exist
    pub fn read(path: &Path) -> Result<Option<Self>> {
        match fs::read_to_string(path) {
            Ok(text) => Self::parse(&text).map(Some),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// Whether the file defers to git
    pub fn uses_git(&self) -> bool {
        self.version == USE_GIT
    }

    /// Render the file contents, header included
    pub fn render(&self) -> Result<String> {
        let body = toml::to_string(self)?;
        Ok(format!("{}\n{}", HEADER, body))
    }

    /// Validated version data, `None` if the version is not PEP 440
    pub fn into_version_data(self) -> Option<VersionData> {
        VersionData::validated(self.version, self.branch, self.revision)
    }
}

impl From<&VersionData> for StaticVersionFile {
    fn from(data: &VersionData) -> Self {
        StaticVersionFile {
            version: data.version.clone(),
            branch: data.branch.clone(),
            revision: data.revision.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_generated_file() {
        let file = StaticVersionFile::parse(
            "# This file has been generated by _version.py.\n\
             version = \"1.10.0.dev7+gabc1234\"\n\
             branch = \"maintenance\"\n\
             revision = \"abc1234def\"\n",
        )
        .unwrap();

        assert_eq!(file.version, "1.10.0.dev7+gabc1234");
        assert_eq!(file.branch.as_deref(), Some("maintenance"));
        assert_eq!(file.revision.as_deref(), Some("abc1234def"));
        assert!(!file.uses_git());
    }

    #[test]
    fn test_parse_without_optional_fields() {
        let file = StaticVersionFile::parse("version = \"1.2.3\"").unwrap();
        assert_eq!(file.branch, None);
        assert_eq!(file.revision, None);
    }

    #[test]
    fn test_parse_none_string_as_absent() {
        let file = StaticVersionFile::parse(
            "version = \"1.2.3\"\nbranch = \"None\"\nrevision = \"None\"\n",
        )
        .unwrap();
        assert_eq!(file.branch, None);
        assert_eq!(file.revision, None);

        let data = file.into_version_data().unwrap();
        assert_eq!(data.branch, None);
        assert_eq!(data.revision, None);
    }

    #[test]
    fn test_parse_missing_version() {
        let err = StaticVersionFile::parse("branch = \"main\"").unwrap_err();
        assert!(err.to_string().starts_with("Static version file error"));
    }

    #[test]
    fn test_use_git_sentinel() {
        let file = StaticVersionFile::parse("version = \"__use_git__\"").unwrap();
        assert!(file.uses_git());
    }

    #[test]
    fn test_render_has_header_and_skips_absent() {
        let file = StaticVersionFile {
            version: "0+unknown".to_string(),
            branch: None,
            revision: None,
        };
        let text = file.render().unwrap();
        assert!(text.starts_with(HEADER));
        assert!(text.contains("version = \"0+unknown\""));
        assert!(!text.contains("branch"));
        assert_eq!(StaticVersionFile::parse(&text).unwrap(), file);
    }

    #[test]
    fn test_invalid_version_is_rejected() {
        let file = StaticVersionFile::parse("version = \"not-a-version\"").unwrap();
        assert!(file.into_version_data().is_none());
    }

    #[test]
    fn test_read_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("_static_version.py");
        assert_eq!(StaticVersionFile::read(&missing).unwrap(), None);
    }
}
