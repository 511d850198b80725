use crate::git::Repository;

/// Point-in-time view of the checkout, queried fresh for every resolution.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RepoSnapshot {
    pub branch: Option<String>,
    pub sha: Option<String>,
    pub short_sha: Option<String>,
    pub nearest_tag: Option<String>,
    pub is_dirty: bool,
    /// Commits from `nearest_tag` to HEAD
    pub distance: Option<u64>,
}

impl RepoSnapshot {
    /// Run every inspector query against `repo`
    pub fn capture<R: Repository + ?Sized>(repo: &R) -> Self {
        let nearest_tag = repo.nearest_tag();
        let distance = nearest_tag
            .as_deref()
            .and_then(|tag| repo.distance_from(tag));

        RepoSnapshot {
            branch: repo.current_branch(),
            is_dirty: repo.is_dirty(),
            sha: repo.full_commit_id(),
            short_sha: repo.short_commit_id(),
            nearest_tag,
            distance,
        }
    }
}
