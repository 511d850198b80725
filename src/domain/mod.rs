//! Domain types - pure data and rules independent of how git is queried

pub mod branch;
pub mod snapshot;
pub mod version;

pub use branch::{BranchRule, BranchRuleTable, RuleTableAbort};
pub use snapshot::RepoSnapshot;
pub use version::{VersionData, FALLBACK, FALLBACK_WITH_SHA};
