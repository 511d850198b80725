//! PEP 440 syntax check for candidate version strings.
//!
//! Only accepts or rejects; no normalization is performed. The grammar
//! mirrors the public-version pattern published by PyPA's `packaging`
//! project: epoch, release segment, pre-, post- and dev-release, and a
//! local version label, matched case-insensitively with an optional
//! leading `v`.

use std::sync::LazyLock;

use regex::Regex;

const PEP440_PATTERN: &str = r"(?ix)
    ^\s*
    v?
    (?:
        (?:(?P<epoch>[0-9]+)!)?                           # epoch
        (?P<release>[0-9]+(?:\.[0-9]+)*)                  # release segment
        (?P<pre>                                          # pre-release
            [-_.]?
            (?P<pre_l>alpha|beta|preview|pre|rc|a|b|c)
            [-_.]?
            (?P<pre_n>[0-9]+)?
        )?
        (?P<post>                                         # post release
            (?:-(?P<post_n1>[0-9]+))
            |
            (?:
                [-_.]?
                (?P<post_l>post|rev|r)
                [-_.]?
                (?P<post_n2>[0-9]+)?
            )
        )?
        (?P<dev>                                          # dev release
            [-_.]?
            (?P<dev_l>dev)
            [-_.]?
            (?P<dev_n>[0-9]+)?
        )?
    )
    (?:\+(?P<local>[a-z0-9]+(?:[-_.][a-z0-9]+)*))?        # local version
    \s*$
";

static PEP440_REGEX: LazyLock<Option<Regex>> = LazyLock::new(|| Regex::new(PEP440_PATTERN).ok());

/// Returns `true` if `version` is a syntactically valid PEP 440 version.
///
/// # Example
/// ```
/// use git_pep440::pep440::is_valid;
///
/// assert!(is_valid("1.10.0rc2"));
/// assert!(is_valid("2.0.0.dev0+gabc123"));
/// assert!(!is_valid("not-a-version"));
/// ```
pub fn is_valid(version: &str) -> bool {
    PEP440_REGEX
        .as_ref()
        .is_some_and(|re| re.is_match(version))
}
