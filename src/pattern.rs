//! User filter patterns.
//!
//! These are deliberately not globs. A pattern that contains a separator is a
//! literal substring of the normalized path; any other pattern must equal one
//! whole path segment. No wildcard expansion takes place.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Matcher {
    /// Literal `/`-normalized substring match anywhere in the path.
    Substring(String),
    /// Matches when one segment of the path equals the pattern.
    Segment(String),
}

impl Matcher {
    pub fn compile(pattern: &str) -> Matcher {
        let normalized = pattern.replace('\\', "/");
        if normalized.contains('/') {
            Matcher::Substring(normalized)
        } else {
            Matcher::Segment(normalized)
        }
    }

    /// `path` must already be normalized to `/` separators.
    pub fn matches(&self, path: &str) -> bool {
        match self {
            Matcher::Substring(needle) => path.contains(needle.as_str()),
            Matcher::Segment(segment) => path.split('/').any(|s| s == segment),
        }
    }
}

/// An OR-combination of matchers, compiled once and reused for the whole walk.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PatternSet {
    matchers: Vec<Matcher>,
}

impl PatternSet {
    pub fn new<I, S>(patterns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let matchers = patterns
            .into_iter()
            .map(|p| p.as_ref().trim().to_string())
            .filter(|p| !p.is_empty())
            .map(|p| Matcher::compile(&p))
            .collect();
        Self { matchers }
    }

    pub fn is_empty(&self) -> bool {
        self.matchers.is_empty()
    }

    pub fn matches(&self, path: &str) -> bool {
        self.matchers.iter().any(|m| m.matches(path))
    }
}
