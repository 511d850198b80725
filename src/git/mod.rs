//! Read-only queries against a git checkout
//!
//! The [Repository] trait is the seam between version composition and the
//! version control system. Every query is tolerant of git being absent:
//! failures come back as `None` (or `true` for [Repository::is_dirty]),
//! never as errors, so callers treat a missing value as "source not usable".
//!
//! - [command::GitCommand]: runs the git client as an external process
//! - [mock::MockRepository]: canned answers for tests

pub mod command;
pub mod mock;

pub use command::GitCommand;
pub use mock::MockRepository;

/// Common inspector trait for real and mock checkouts
pub trait Repository {
    /// Name of the checked-out branch (`HEAD` when detached)
    ///
    /// Runs `rev-parse --abbrev-ref HEAD`.
    fn current_branch(&self) -> Option<String>;

    /// Whether the working tree has uncommitted changes
    ///
    /// Runs `describe --tags --dirty --always`. A checkout that cannot be
    /// described at all is reported as dirty.
    fn is_dirty(&self) -> bool;

    /// Full commit id of HEAD (`rev-parse HEAD`)
    fn full_commit_id(&self) -> Option<String>;

    /// Abbreviated commit id of HEAD (`rev-parse --short HEAD`)
    fn short_commit_id(&self) -> Option<String>;

    /// Closest reachable tag, or the commit id if no tag is reachable
    ///
    /// Runs `describe --tags --abbrev=0 --always`; `None` only when there is
    /// no commit at all.
    fn nearest_tag(&self) -> Option<String>;

    /// Number of commits in `reference..HEAD`
    ///
    /// `None` if `reference` is unknown or the count cannot be parsed.
    fn distance_from(&self, reference: &str) -> Option<u64>;
}

impl<R: Repository + ?Sized> Repository for &R {
    fn current_branch(&self) -> Option<String> {
        (**self).current_branch()
    }

    fn is_dirty(&self) -> bool {
        (**self).is_dirty()
    }

    fn full_commit_id(&self) -> Option<String> {
        (**self).full_commit_id()
    }

    fn short_commit_id(&self) -> Option<String> {
        (**self).short_commit_id()
    }

    fn nearest_tag(&self) -> Option<String> {
        (**self).nearest_tag()
    }

    fn distance_from(&self, reference: &str) -> Option<u64> {
        (**self).distance_from(reference)
    }
}
