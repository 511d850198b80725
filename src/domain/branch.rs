use std::fmt;

use regex::Regex;

/// A branch pattern mapped to a virtual tag and the commit that tag counts from.
///
/// The pattern uses "match" semantics: anchored at the start of the branch
/// name, not required to consume all of it.
#[derive(Debug, Clone)]
pub struct BranchRule {
    pattern: Regex,
    source: String,
    pub virtual_tag: String,
    pub reference_commit: String,
}

impl BranchRule {
    /// Compile a rule from its three configuration fields
    pub fn new(
        pattern: &str,
        virtual_tag: impl Into<String>,
        reference_commit: impl Into<String>,
    ) -> Result<Self, regex::Error> {
        Regex::new(pattern)?;
        let anchored = Regex::new(&format!("^(?:{})", pattern))?;

        Ok(BranchRule {
            pattern: anchored,
            source: pattern.to_string(),
            virtual_tag: virtual_tag.into(),
            reference_commit: reference_commit.into(),
        })
    }

    /// The pattern as written in the configuration
    pub fn pattern(&self) -> &str {
        &self.source
    }

    /// Check whether this rule applies to a branch
    pub fn matches(&self, branch: &str) -> bool {
        self.pattern.is_match(branch)
    }
}

/// Why parsing a branch rule block was abandoned
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleTableAbort {
    /// 1-based line number in the configuration block
    pub line_number: usize,
    pub line: String,
    pub reason: String,
}

impl fmt::Display for RuleTableAbort {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "line {} '{}': {}",
            self.line_number, self.line, self.reason
        )
    }
}

/// Ordered list of branch rules; the first matching rule wins.
#[derive(Debug, Clone, Default)]
pub struct BranchRuleTable {
    rules: Vec<BranchRule>,
}

impl BranchRuleTable {
    /// Parse a rule block, returning an empty table if any line is malformed.
    ///
    /// Format, one rule per line, `#` starting a comment:
    ///
    /// ```text
    /// <branch-regex> <virtual-tag> <reference-commit>
    /// ```
    pub fn parse(text: &str) -> Self {
        Self::try_parse(text).unwrap_or_default()
    }

    /// Parse a rule block, reporting the first malformed line.
    ///
    /// A partial table is never returned: either every non-empty line is a
    /// valid rule or the whole block is rejected.
    pub fn try_parse(text: &str) -> Result<Self, RuleTableAbort> {
        let mut rules = Vec::new();

        for (index, raw) in text.lines().enumerate() {
            let line = match raw.find('#') {
                Some(pos) => &raw[..pos],
                None => raw,
            }
            .trim();

            let tokens: Vec<&str> = line.split_whitespace().collect();
            if tokens.is_empty() {
                continue;
            }

            let abort = |reason: String| RuleTableAbort {
                line_number: index + 1,
                line: line.to_string(),
                reason,
            };

            if tokens.len() != 3 {
                return Err(abort(format!("expected 3 fields, found {}", tokens.len())));
            }

            let rule = BranchRule::new(tokens[0], tokens[1], tokens[2])
                .map_err(|e| abort(format!("invalid branch pattern: {}", e)))?;
            rules.push(rule);
        }

        Ok(BranchRuleTable { rules })
    }

    /// Find the first rule matching `branch`
    pub fn find(&self, branch: &str) -> Option<&BranchRule> {
        self.rules.iter().find(|rule| rule.matches(branch))
    }

    pub fn rules(&self) -> &[BranchRule] {
        &self.rules
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}
