//! Turns a checkout snapshot and the branch rules into a version string.

use std::sync::LazyLock;

use regex::{Captures, Regex};

use crate::domain::{BranchRuleTable, RepoSnapshot, FALLBACK, FALLBACK_WITH_SHA};
use crate::git::Repository;
use crate::pep440;

/// Template for a version on a branch without a rule: the nearest tag
pub const TAG_TEMPLATE: &str = "{tag}";

/// Template for a version on a branch with a virtual tag
pub const VIRTUAL_TAG_TEMPLATE: &str = "{tag}.dev{distance}+g{short}";

const TAG_DIRTY_SUFFIX: &str = "+g{short}.dirty";
const VIRTUAL_TAG_DIRTY_SUFFIX: &str = ".dirty";
const FALLBACK_DIRTY_SUFFIX: &str = ".dirty";

static PLACEHOLDER: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"\{([a-z]+)\}").ok());

/// Values available for substitution into a template
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TemplateVars {
    pub tag: Option<String>,
    pub distance: Option<u64>,
    pub short: Option<String>,
    pub full: Option<String>,
}

impl TemplateVars {
    fn get(&self, name: &str) -> Option<String> {
        match name {
            "tag" => self.tag.clone(),
            "distance" => self.distance.map(|d| d.to_string()),
            "short" => self.short.clone(),
            "full" => self.full.clone(),
            _ => None,
        }
    }
}

/// A version format with `{name}` placeholders
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Template {
    pattern: String,
}

impl Template {
    pub fn new(pattern: impl Into<String>) -> Self {
        Template {
            pattern: pattern.into(),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.pattern
    }

    /// Append a suffix, e.g. a dirty marker
    pub fn push(&mut self, suffix: &str) {
        self.pattern.push_str(suffix);
    }

    /// Names referenced by this template, in order of appearance
    pub fn placeholders(&self) -> Vec<&str> {
        match PLACEHOLDER.as_ref() {
            Some(re) => re
                .captures_iter(&self.pattern)
                .filter_map(|c| c.get(1))
                .map(|m| m.as_str())
                .collect(),
            None => Vec::new(),
        }
    }

    /// Whether every referenced placeholder has a value
    pub fn is_complete(&self, vars: &TemplateVars) -> bool {
        self.placeholders()
            .iter()
            .all(|name| vars.get(name).is_some())
    }

    /// Substitute all placeholders, or `None` if any value is missing
    ///
    /// Substitution is a single pass: braces inside substituted values are
    /// left as they are.
    pub fn render(&self, vars: &TemplateVars) -> Option<String> {
        let re = PLACEHOLDER.as_ref()?;
        let mut missing = false;
        let rendered = re.replace_all(&self.pattern, |caps: &Captures<'_>| {
            match vars.get(&caps[1]) {
                Some(value) => value,
                None => {
                    missing = true;
                    String::new()
                }
            }
        });

        if missing {
            None
        } else {
            Some(rendered.into_owned())
        }
    }
}

/// The outcome of composing a version, before validation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Composition {
    pub template: Template,
    pub vars: TemplateVars,
    pub version: String,
}

impl Composition {
    pub fn is_valid(&self) -> bool {
        pep440::is_valid(&self.version)
    }
}

/// Fallback template used when the selected one cannot be filled in
pub fn fallback_template(short: Option<&str>, is_dirty: bool) -> Template {
    let mut template = match short {
        Some(_) => Template::new(FALLBACK_WITH_SHA),
        None => Template::new(FALLBACK),
    };
    if is_dirty {
        template.push(FALLBACK_DIRTY_SUFFIX);
    }
    template
}

/// Composes versions from a checkout using virtual tags for matching branches
pub struct VersionComposer {
    rules: BranchRuleTable,
}

impl VersionComposer {
    pub fn new(rules: BranchRuleTable) -> Self {
        VersionComposer { rules }
    }

    /// Select and fill in a template for `snapshot`.
    ///
    /// A branch matching a rule gets `{tag}.dev{distance}+g{short}` with the
    /// rule's virtual tag and the distance from its reference commit; any
    /// other checkout uses the nearest tag as is. Dirty checkouts get a
    /// suffix. If a referenced value is missing, the `0+unknown` fallback is
    /// used instead.
    pub fn compose<R: Repository + ?Sized>(&self, repo: &R, snapshot: &RepoSnapshot) -> Composition {
        let mut vars = TemplateVars {
            tag: snapshot.nearest_tag.clone(),
            distance: snapshot.distance,
            short: snapshot.short_sha.clone(),
            full: snapshot.sha.clone(),
        };
        let mut template = Template::new(TAG_TEMPLATE);
        let mut dirty_suffix = TAG_DIRTY_SUFFIX;

        if let Some(rule) = snapshot.branch.as_deref().and_then(|b| self.rules.find(b)) {
            vars.tag = Some(rule.virtual_tag.clone());
            vars.distance = repo.distance_from(&rule.reference_commit);
            template = Template::new(VIRTUAL_TAG_TEMPLATE);
            dirty_suffix = VIRTUAL_TAG_DIRTY_SUFFIX;
        }

        if snapshot.is_dirty {
            template.push(dirty_suffix);
        }

        if !template.is_complete(&vars) {
            template = fallback_template(vars.short.as_deref(), snapshot.is_dirty);
        }

        // the fallback only references `short`, which it checked for
        let version = template
            .render(&vars)
            .unwrap_or_else(|| FALLBACK.to_string());

        Composition {
            template,
            vars,
            version,
        }
    }

    /// Compose a version and keep it only if it is valid PEP 440
    pub fn version<R: Repository + ?Sized>(&self, repo: &R, snapshot: &RepoSnapshot) -> Option<String> {
        let composition = self.compose(repo, snapshot);
        if composition.is_valid() {
            Some(composition.version)
        } else {
            None
        }
    }
}
