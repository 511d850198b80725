use std::collections::HashMap;

use crate::git::Repository;

/// Mock checkout for testing without running git
#[derive(Debug, Clone, Default)]
pub struct MockRepository {
    branch: Option<String>,
    sha: Option<String>,
    short_sha: Option<String>,
    tag: Option<String>,
    dirty: Option<bool>,
    distances: HashMap<String, u64>,
}

impl MockRepository {
    /// Create a checkout with a commit but no branch, tag or changes
    pub fn new() -> Self {
        MockRepository {
            dirty: Some(false),
            ..Default::default()
        }
    }

    /// A directory where git is missing or is not a checkout.
    ///
    /// Every query fails, so the describe-based dirty check reports dirty.
    pub fn unavailable() -> Self {
        MockRepository::default()
    }

    pub fn with_branch(mut self, branch: impl Into<String>) -> Self {
        self.branch = Some(branch.into());
        self
    }

    pub fn with_commit(mut self, sha: impl Into<String>, short: impl Into<String>) -> Self {
        self.sha = Some(sha.into());
        self.short_sha = Some(short.into());
        self
    }

    /// Set the nearest tag as `describe --tags --abbrev=0` would report it
    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tag = Some(tag.into());
        self
    }

    /// Set the commit count for `reference..HEAD`
    pub fn with_distance(mut self, reference: impl Into<String>, distance: u64) -> Self {
        self.distances.insert(reference.into(), distance);
        self
    }

    pub fn dirty(mut self, dirty: bool) -> Self {
        self.dirty = Some(dirty);
        self
    }
}

impl Repository for MockRepository {
    fn current_branch(&self) -> Option<String> {
        self.branch.clone()
    }

    fn is_dirty(&self) -> bool {
        self.dirty.unwrap_or(true)
    }

    fn full_commit_id(&self) -> Option<String> {
        self.sha.clone()
    }

    fn short_commit_id(&self) -> Option<String> {
        self.short_sha.clone()
    }

    fn nearest_tag(&self) -> Option<String> {
        self.tag.clone()
    }

    fn distance_from(&self, reference: &str) -> Option<u64> {
        self.distances.get(reference).copied()
    }
}
