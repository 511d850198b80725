//! Ranked version sources.
//!
//! Sources are tried in a fixed order and the first one producing a valid
//! PEP 440 version wins:
//!
//! 1. the static file generated into built packages ([static_file])
//! 2. keywords expanded by `git archive` ([keywords])
//! 3. live inspection of the git checkout, with branch rules applied
//!
//! If all of them fail, the fixed `0+unknown` fallback is returned.
//! Resolution never fails.

pub mod keywords;
pub mod static_file;

use std::fmt;

use crate::composer::VersionComposer;
use crate::config::Config;
use crate::diagnostic::{Diagnostic, Reporter};
use crate::domain::{BranchRuleTable, RepoSnapshot, VersionData};
use crate::git::Repository;

pub use keywords::Keywords;
pub use static_file::StaticVersionFile;

/// Identifies where a version came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceKind {
    StaticFile,
    Keywords,
    Git,
}

impl SourceKind {
    pub fn name(&self) -> &'static str {
        match self {
            SourceKind::StaticFile => "static file",
            SourceKind::Keywords => "archive keywords",
            SourceKind::Git => "git",
        }
    }
}

impl fmt::Display for SourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

type Source<'a, R> = fn(&SourceChain<'a, R>) -> Option<VersionData>;

/// Resolves version data for one package
pub struct SourceChain<'a, R> {
    config: &'a Config,
    repo: R,
    reporter: Reporter,
}

impl<'a, R: Repository> SourceChain<'a, R> {
    pub fn new(config: &'a Config, repo: R) -> Self {
        SourceChain {
            config,
            repo,
            reporter: Reporter::new(config.verbose),
        }
    }

    /// Sources in priority order
    fn sources() -> [(SourceKind, Source<'a, R>); 3] {
        [
            (SourceKind::StaticFile, Self::from_static_file),
            (SourceKind::Keywords, Self::from_keywords),
            (SourceKind::Git, Self::from_git),
        ]
    }

    /// Return the first validated result, or the `0+unknown` fallback
    pub fn resolve(&self) -> VersionData {
        for (kind, source) in Self::sources() {
            if let Some(data) = source(self) {
                self.reporter.report(Diagnostic::Resolved {
                    source: kind,
                    version: data.version.clone(),
                });
                return data;
            }
        }

        self.reporter.report(Diagnostic::Exhausted);
        VersionData::fallback()
    }

    fn validated(
        &self,
        source: SourceKind,
        version: String,
        branch: Option<String>,
        revision: Option<String>,
    ) -> Option<VersionData> {
        let data = VersionData::validated(version.clone(), branch, revision);
        if data.is_none() {
            self.reporter
                .report(Diagnostic::InvalidVersion { source, version });
        }
        data
    }

    /// Version data from the generated static file
    pub fn from_static_file(&self) -> Option<VersionData> {
        let path = self.config.static_file_path();

        let file = match StaticVersionFile::read(&path) {
            Ok(Some(file)) => file,
            Ok(None) => {
                self.reporter.report(Diagnostic::StaticFileMissing { path });
                return None;
            }
            Err(e) => {
                self.reporter.report(Diagnostic::StaticFileUnreadable {
                    path,
                    reason: e.to_string(),
                });
                return None;
            }
        };

        if file.uses_git() {
            self.reporter.report(Diagnostic::UseGitSentinel { path });
            return None;
        }

        let version = file.version.clone();
        let data = file.into_version_data();
        if data.is_none() {
            self.reporter.report(Diagnostic::InvalidVersion {
                source: SourceKind::StaticFile,
                version,
            });
        }
        data
    }

    /// Version data from expanded archive keywords
    pub fn from_keywords(&self) -> Option<VersionData> {
        let path = self.config.keyword_file_path();

        let Some(keywords) = Keywords::read(&path) else {
            self.reporter.report(Diagnostic::KeywordFileMissing { path });
            return None;
        };

        if !keywords.is_expanded() {
            self.reporter.report(Diagnostic::KeywordsUnexpanded { path });
            return None;
        }

        let version = keywords.render_version()?;
        self.validated(
            SourceKind::Keywords,
            version,
            keywords.branch(),
            keywords.full.clone(),
        )
    }

    /// Version data from inspecting the checkout
    pub fn from_git(&self) -> Option<VersionData> {
        let snapshot = RepoSnapshot::capture(&self.repo);
        self.report_snapshot(&snapshot);

        let rules = match BranchRuleTable::try_parse(&self.config.branch_rules) {
            Ok(rules) => rules,
            Err(abort) => {
                self.reporter.report(Diagnostic::RuleTableAborted(abort));
                BranchRuleTable::default()
            }
        };

        let composition = VersionComposer::new(rules).compose(&self.repo, &snapshot);
        self.validated(
            SourceKind::Git,
            composition.version,
            snapshot.branch,
            snapshot.sha,
        )
    }

    fn report_snapshot(&self, snapshot: &RepoSnapshot) {
        let show = |value: &Option<String>| value.clone().unwrap_or_else(|| "None".to_string());

        for (name, value) in [
            ("Branch", show(&snapshot.branch)),
            ("Dirty", snapshot.is_dirty.to_string()),
            ("SHA", show(&snapshot.sha)),
            ("Short", show(&snapshot.short_sha)),
        ] {
            self.reporter
                .report(Diagnostic::SnapshotField { name, value });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::git::MockRepository;
    use crate::pep440;
    use std::fs;

    const REF: &str = "cd955e9a46782119b36cc22b8dea5652ebbf9774";

    fn package() -> (tempfile::TempDir, Config) {
        let dir = tempfile::tempdir().unwrap();
        let mut config = Config::for_root(dir.path());
        config.branch_rules = format!("maintenance 1.10.0 {REF}\n");
        (dir, config)
    }

    fn checkout() -> MockRepository {
        MockRepository::new()
            .with_branch("maintenance")
            .with_commit("abc1234def", "abc1234")
            .with_tag("1.9.3")
            .with_distance(REF, 7)
    }

    #[test]
    fn test_static_file_wins() {
        let (dir, config) = package();
        fs::write(
            dir.path().join("_static_version.py"),
            "version = \"1.9.4\"\nbranch = \"staging/bugfix\"\n",
        )
        .unwrap();

        let data = SourceChain::new(&config, checkout()).resolve();
        assert_eq!(data.version, "1.9.4");
        assert_eq!(data.branch.as_deref(), Some("staging/bugfix"));
        assert_eq!(data.revision, None);
    }

    #[test]
    fn test_use_git_sentinel_falls_through() {
        let (dir, config) = package();
        fs::write(
            dir.path().join("_static_version.py"),
            "version = \"__use_git__\"\n",
        )
        .unwrap();

        let data = SourceChain::new(&config, checkout()).resolve();
        assert_eq!(data.version, "1.10.0.dev7+gabc1234");
    }

    #[test]
    fn test_invalid_static_file_falls_through() {
        let (dir, config) = package();
        fs::write(dir.path().join("_static_version.py"), "version = \"v1.x\"\n").unwrap();

        let data = SourceChain::new(&config, checkout()).resolve();
        assert_eq!(data.version, "1.10.0.dev7+gabc1234");
        assert_eq!(data.branch.as_deref(), Some("maintenance"));
        assert_eq!(data.revision.as_deref(), Some("abc1234def"));
    }

    #[test]
    fn test_static_file_none_fields_are_absent() {
        let (dir, config) = package();
        fs::write(
            dir.path().join("_static_version.py"),
            "version = \"1.9.4\"\nbranch = \"None\"\nrevision = \"None\"\n",
        )
        .unwrap();

        let data = SourceChain::new(&config, checkout()).resolve();
        assert_eq!(data.version, "1.9.4");
        assert_eq!(data.branch, None);
        assert_eq!(data.revision, None);
    }

    #[test]
    fn test_garbled_static_file_falls_through() {
        let (dir, config) = package();
        fs::write(dir.path().join("_static_version.py"), "version = ").unwrap();

        let chain = SourceChain::new(&config, checkout());
        assert_eq!(chain.from_static_file(), None);
        assert_eq!(chain.resolve().version, "1.10.0.dev7+gabc1234");
    }

    #[test]
    fn test_expanded_keywords_win_over_git() {
        let (dir, config) = package();
        fs::write(
            dir.path().join(".git_archival.txt"),
            format!("node: {REF}\nref-names:  (HEAD -> main, tag: 1.9.3)\n"),
        )
        .unwrap();

        let data = SourceChain::new(&config, checkout()).resolve();
        assert_eq!(data.version, "1.9.3");
        assert_eq!(data.branch.as_deref(), Some("main"));
        assert_eq!(data.revision.as_deref(), Some(REF));
    }

    #[test]
    fn test_unexpanded_keywords_fall_through() {
        let (dir, config) = package();
        fs::write(
            dir.path().join(".git_archival.txt"),
            "node: $Format:%H$\nref-names: $Format:%d$\n",
        )
        .unwrap();

        let chain = SourceChain::new(&config, checkout());
        assert_eq!(chain.from_keywords(), None);
        assert_eq!(chain.resolve().version, "1.10.0.dev7+gabc1234");
    }

    #[test]
    fn test_invalid_keyword_tag_falls_through() {
        let (dir, config) = package();
        fs::write(
            dir.path().join(".git_archival.txt"),
            format!("node: {REF}\nref-names:  (HEAD, release-x1)\n"),
        )
        .unwrap();

        let chain = SourceChain::new(&config, checkout());
        assert_eq!(chain.from_keywords(), None);
    }

    #[test]
    fn test_malformed_rules_are_ignored() {
        let (_dir, mut config) = package();
        config.branch_rules = format!("maintenance 1.10.0 {REF}\nbroken 1.0\n");

        let data = SourceChain::new(&config, checkout()).resolve();
        assert_eq!(data.version, "1.9.3");
    }

    #[test]
    fn test_invalid_git_version_uses_fallback() {
        let (_dir, config) = package();
        let repo = MockRepository::new()
            .with_branch("release/x")
            .with_commit("abc1234def", "abc1234")
            .with_tag("abc1234");

        let data = SourceChain::new(&config, repo).resolve();
        assert_eq!(data, VersionData::fallback());
    }

    #[test]
    fn test_no_vcs_resolves_to_dirty_fallback() {
        let (_dir, config) = package();
        let data = SourceChain::new(&config, MockRepository::unavailable()).resolve();
        // git source still composes the "cannot describe" fallback
        assert_eq!(data.version, "0+unknown.dirty");
        assert_eq!(data.branch, None);
    }

    #[test]
    fn test_resolved_versions_always_validate() {
        let (_dir, config) = package();
        for repo in [
            checkout(),
            checkout().dirty(true),
            MockRepository::new().with_tag("not a version"),
            MockRepository::new().with_commit("deadbeef", "deadbee"),
            MockRepository::unavailable(),
        ] {
            let data = SourceChain::new(&config, repo).resolve();
            assert!(pep440::is_valid(&data.version), "{}", data.version);
        }
    }

    #[test]
    fn test_source_kind_names() {
        assert_eq!(SourceKind::StaticFile.to_string(), "static file");
        assert_eq!(SourceKind::Keywords.to_string(), "archive keywords");
        assert_eq!(SourceKind::Git.to_string(), "git");
    }
}
