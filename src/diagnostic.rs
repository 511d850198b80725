use std::fmt;
use std::path::PathBuf;

use crate::domain::RuleTableAbort;
use crate::sources::SourceKind;
use crate::ui;

/// Non-fatal events noticed while resolving a version.
///
/// None of these stop resolution; they explain why a source was skipped or
/// which value was picked, and are only shown in verbose mode.
#[derive(Debug, Clone, PartialEq)]
pub enum Diagnostic {
    /// About to run a git client
    TryingCommand { command: String },
    /// None of the configured git clients could be started
    CommandNotFound { tried: Vec<String> },
    /// A git query failed to start or exited non-zero
    CommandFailed { command: String, reason: String },
    /// A value read from the checkout
    SnapshotField { name: &'static str, value: String },
    /// The branch rule block was rejected as a whole
    RuleTableAborted(RuleTableAbort),
    StaticFileMissing { path: PathBuf },
    StaticFileUnreadable { path: PathBuf, reason: String },
    /// The static file asks for git resolution instead
    UseGitSentinel { path: PathBuf },
    KeywordFileMissing { path: PathBuf },
    KeywordsUnexpanded { path: PathBuf },
    /// A source produced a string that is not PEP 440
    InvalidVersion { source: SourceKind, version: String },
    Resolved { source: SourceKind, version: String },
    /// Every source failed; the fixed fallback is used
    Exhausted,
}

impl Diagnostic {
    /// Whether this diagnostic describes a problem rather than progress
    pub fn is_warning(&self) -> bool {
        matches!(
            self,
            Diagnostic::CommandNotFound { .. }
                | Diagnostic::RuleTableAborted(_)
                | Diagnostic::StaticFileUnreadable { .. }
                | Diagnostic::InvalidVersion { .. }
                | Diagnostic::Exhausted
        )
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Diagnostic::TryingCommand { command } => write!(f, "trying {}", command),
            Diagnostic::CommandNotFound { tried } => {
                write!(f, "unable to find command, tried {}", tried.join(", "))
            }
            Diagnostic::CommandFailed { command, reason } => {
                write!(f, "unable to run {} ({})", command, reason)
            }
            Diagnostic::SnapshotField { name, value } => {
                write!(f, "{:<7} {}", format!("{}:", name), value)
            }
            Diagnostic::RuleTableAborted(abort) => {
                write!(f, "Ignoring all branch rules, malformed {}", abort)
            }
            Diagnostic::StaticFileMissing { path } => {
                write!(f, "No static version file at {}", path.display())
            }
            Diagnostic::StaticFileUnreadable { path, reason } => {
                write!(
                    f,
                    "Cannot read static version file {}: {}",
                    path.display(),
                    reason
                )
            }
            Diagnostic::UseGitSentinel { path } => {
                write!(f, "Static version file {} defers to git", path.display())
            }
            Diagnostic::KeywordFileMissing { path } => {
                write!(f, "No keyword file at {}", path.display())
            }
            Diagnostic::KeywordsUnexpanded { path } => {
                write!(f, "Keywords in {} are not expanded", path.display())
            }
            Diagnostic::InvalidVersion { source, version } => {
                write!(
                    f,
                    "{} produced '{}', which is not a valid PEP 440 version",
                    source, version
                )
            }
            Diagnostic::Resolved { source, version } => {
                write!(f, "Resolved version {} from {}", version, source)
            }
            Diagnostic::Exhausted => {
                write!(f, "No source produced a version, using fallback")
            }
        }
    }
}

/// Decides whether diagnostics reach the terminal.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Reporter {
    verbose: bool,
}

impl Reporter {
    pub fn new(verbose: bool) -> Self {
        Reporter { verbose }
    }

    pub fn is_verbose(&self) -> bool {
        self.verbose
    }

    pub fn report(&self, diagnostic: Diagnostic) {
        if self.verbose {
            ui::display_diagnostic(&diagnostic);
        }
    }
}
