//! Resolve a PEP 440 version for a package without a hand-maintained
//! version file.
//!
//! The version comes from the first usable of three sources: a static file
//! generated at build time, keywords expanded by `git archive`, or the live
//! git checkout with branch rules that assign virtual tags to development
//! branches. See [sources] for the order and [composer] for how versions
//! are built from a checkout.

pub mod build_hook;
pub mod composer;
pub mod config;
pub mod diagnostic;
pub mod domain;
pub mod error;
pub mod git;
pub mod pep440;
pub mod sources;
pub mod ui;

pub use config::{load_config, Config};
pub use domain::VersionData;
pub use error::{Result, VersionError};

use git::GitCommand;
use sources::SourceChain;

/// Resolve version data for the package described by `config`.
///
/// Never fails: when no source yields a valid version the result is
/// `0+unknown` with no branch or revision.
pub fn get_data(config: &Config) -> VersionData {
    let repo = GitCommand::new(&config.root)
        .with_executables(config.git.executables.clone())
        .with_reporter(diagnostic::Reporter::new(config.verbose));

    SourceChain::new(config, repo).resolve()
}
