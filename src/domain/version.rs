use std::fmt;

use serde::{Deserialize, Serialize};

use crate::pep440;

/// Terminal fallback when no commit id is available
pub const FALLBACK: &str = "0+unknown";

/// Fallback when a commit id is available but no tag or branch resolution is possible
pub const FALLBACK_WITH_SHA: &str = "0+unknown.g{short}";

/// Resolved version information.
///
/// The `version` field is always syntactically valid PEP 440; values that
/// fail validation are never constructed through [`VersionData::validated`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VersionData {
    pub version: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub branch: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub revision: Option<String>,
}

impl VersionData {
    /// Build version data, rejecting versions that are not valid PEP 440.
    pub fn validated(
        version: impl Into<String>,
        branch: Option<String>,
        revision: Option<String>,
    ) -> Option<Self> {
        let version = version.into();
        if !pep440::is_valid(&version) {
            return None;
        }

        Some(VersionData {
            version,
            branch,
            revision,
        })
    }

    /// The value returned when every source failed
    pub fn fallback() -> Self {
        VersionData {
            version: FALLBACK.to_string(),
            branch: None,
            revision: None,
        }
    }
}

impl Default for VersionData {
    fn default() -> Self {
        Self::fallback()
    }
}

impl fmt::Display for VersionData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.version)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validated_accepts_pep440() {
        let data = VersionData::validated("1.2.3", Some("main".to_string()), None).unwrap();
        assert_eq!(data.version, "1.2.3");
        assert_eq!(data.branch.as_deref(), Some("main"));
        assert_eq!(data.to_string(), "1.2.3");
    }

    #[test]
    fn test_validated_rejects_invalid() {
        assert!(VersionData::validated("v1.x", None, None).is_none());
        assert!(VersionData::validated("abc1234", None, None).is_none());
    }

    #[test]
    fn test_fallbacks_are_valid() {
        assert!(pep440::is_valid(FALLBACK));
        assert!(pep440::is_valid(&FALLBACK_WITH_SHA.replace("{short}", "deadbee")));
        assert_eq!(VersionData::default(), VersionData::fallback());
        assert_eq!(VersionData::fallback().version, "0+unknown");
        assert!(VersionData::fallback().branch.is_none());
        assert!(VersionData::fallback().revision.is_none());
    }
}
