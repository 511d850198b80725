//! Version data from keywords expanded by `git archive`.
//!
//! A file marked `export-subst` in `.gitattributes` holds placeholders that
//! git replaces with commit metadata when exporting an archive:
//!
//! ```text
//! node: $Format:%H$
//! ref-names: $Format:%d$
//! ```
//!
//! Inside a checkout the placeholders stay literal and this source does not
//! apply.

use std::fs;
use std::path::Path;

use crate::composer::{Template, TemplateVars, TAG_TEMPLATE};
use crate::domain::FALLBACK_WITH_SHA;

const UNEXPANDED: &str = "$Format";
const NODE_KEY: &str = "node";
const REF_NAMES_KEY: &str = "ref-names";
const TAG_PREFIX: &str = "tag: ";
const HEAD_PREFIX: &str = "HEAD -> ";
const SHORT_LEN: usize = 8;

/// The two archive keywords
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Keywords {
    /// Ref names decorating the commit, e.g. ` (HEAD -> main, tag: 1.2.3)`
    pub refnames: Option<String>,
    /// Full commit id
    pub full: Option<String>,
}

impl Keywords {
    pub fn new(refnames: impl Into<String>, full: impl Into<String>) -> Self {
        Keywords {
            refnames: Some(refnames.into()),
            full: Some(full.into()),
        }
    }

    /// Parse `key: value` lines; unknown keys are ignored
    pub fn parse(text: &str) -> Self {
        let mut keywords = Keywords::default();
        for line in text.lines() {
            let Some((key, value)) = line.split_once(':') else {
                continue;
            };
            match key.trim() {
                NODE_KEY => keywords.full = Some(value.trim().to_string()),
                REF_NAMES_KEY => keywords.refnames = Some(value.to_string()),
                _ => {}
            }
        }
        keywords
    }

    /// Read the keyword file, `None` if it cannot be read
    pub fn read(path: &Path) -> Option<Self> {
        fs::read_to_string(path).ok().map(|text| Self::parse(&text))
    }

    /// Whether git substituted both keywords
    pub fn is_expanded(&self) -> bool {
        match (&self.refnames, &self.full) {
            (Some(refnames), Some(full)) => {
                !refnames.trim().starts_with(UNEXPANDED) && !full.starts_with(UNEXPANDED)
            }
            _ => false,
        }
    }

    /// Individual ref names, with any `HEAD -> ` prefix removed
    pub fn refs(&self) -> Vec<String> {
        let Some(refnames) = &self.refnames else {
            return Vec::new();
        };

        let mut refs: Vec<String> = Vec::new();
        for raw in refnames
            .trim()
            .trim_matches(|c: char| c == '(' || c == ')')
            .split(',')
        {
            let r = raw.trim();
            let r = r.strip_prefix(HEAD_PREFIX).unwrap_or(r);
            if !r.is_empty() && !refs.iter().any(|known| known == r) {
                refs.push(r.to_string());
            }
        }
        refs
    }

    /// Lowest-sorting tag decorating the commit.
    ///
    /// Refs without a `tag: ` prefix only count as tags, when no prefixed
    /// ones exist, if they contain a digit.
    pub fn tag(&self) -> Option<String> {
        let refs = self.refs();
        let mut tags: Vec<&str> = refs
            .iter()
            .filter_map(|r| r.strip_prefix(TAG_PREFIX))
            .collect();

        if tags.is_empty() {
            tags = refs
                .iter()
                .map(String::as_str)
                .filter(|r| r.chars().any(|c| c.is_ascii_digit()))
                .collect();
        }

        tags.into_iter().min().map(str::to_string)
    }

    /// First plain branch decorating the commit
    pub fn branch(&self) -> Option<String> {
        self.refs()
            .into_iter()
            .find(|r| !r.starts_with(TAG_PREFIX) && r != "HEAD" && !r.starts_with("refs/"))
    }

    /// Abbreviated commit id
    pub fn short(&self) -> Option<String> {
        self.full
            .as_ref()
            .map(|full| full.chars().take(SHORT_LEN).collect())
    }

    /// Render the (unvalidated) version described by the keywords
    pub fn render_version(&self) -> Option<String> {
        let tag = self.tag();
        let template = match tag {
            Some(_) => Template::new(TAG_TEMPLATE),
            None => Template::new(FALLBACK_WITH_SHA),
        };
        let vars = TemplateVars {
            tag,
            short: self.short(),
            full: self.full.clone(),
            ..Default::default()
        };
        template.render(&vars)
    }
}
