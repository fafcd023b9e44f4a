//! Per-entry classification into hard-excluded, soft-excluded or included.

use crate::ignore_files::{RuleStack, Strength};
use crate::options::{BinaryDetection, SniffFallback, TreepackOptions};
use crate::pattern::PatternSet;
use crate::rules::{self, STATIC_RULES, StaticRuleTables};
use crate::sniff;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Classification outcome for a single path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Verdict {
    /// Pruned: never listed, never recursed into.
    Hard,
    /// Listed, but content is omitted.
    Soft,
    /// Listed with content.
    Include,
}

/// Which rule produced a non-`Include` verdict.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Reason {
    StaticTraversal,
    Dotfile,
    HardPattern,
    HardIgnoreFile(PathBuf),
    SoftPattern,
    SoftIgnoreFile(PathBuf),
    StaticContent,
    Binary,
    /// The sniff failed; carries the error text. The verdict follows the
    /// configured fallback.
    SniffFailed(String),
}

/// A verdict together with the rule that decided it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Classification {
    pub verdict: Verdict,
    pub reason: Option<Reason>,
}

impl Classification {
    fn include() -> Self {
        Self {
            verdict: Verdict::Include,
            reason: None,
        }
    }

    fn hard(reason: Reason) -> Self {
        Self {
            verdict: Verdict::Hard,
            reason: Some(reason),
        }
    }

    fn soft(reason: Reason) -> Self {
        Self {
            verdict: Verdict::Soft,
            reason: Some(reason),
        }
    }
}

/// Kind of a directory entry, as reported by the directory listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    File,
    Directory,
    Other,
}

/// Classifier holding every rule that does not change during a walk.
///
/// Rules are evaluated in a fixed order and the first match wins:
/// dotfiles, static traversal tables, hard patterns and hard ignore-files
/// (all `Hard`); then soft patterns, soft ignore-files, static content tables
/// and finally the binary sniff on regular files (all `Soft`).
#[derive(Debug, Clone)]
pub struct Classifier {
    root: PathBuf,
    tables: StaticRuleTables,
    hard_patterns: PatternSet,
    soft_patterns: PatternSet,
    detection: BinaryDetection,
    sniff_len: usize,
    fallback: SniffFallback,
}

impl Classifier {
    pub fn new(options: &TreepackOptions) -> Self {
        Self {
            root: options.root.clone(),
            tables: STATIC_RULES,
            hard_patterns: PatternSet::new(&options.hard_filters),
            soft_patterns: PatternSet::new(&options.soft_filters),
            detection: options.binary_detection,
            sniff_len: options.sniff_len,
            fallback: options.sniff_fallback,
        }
    }

    /// Replaces the built-in tables.
    pub fn with_tables(mut self, tables: StaticRuleTables) -> Self {
        self.tables = tables;
        self
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn classify(&self, path: &Path, kind: EntryKind, stack: &RuleStack) -> Verdict {
        self.explain(path, kind, stack).verdict
    }

    /// Like [`Classifier::classify`], also reporting which rule decided.
    pub fn explain(&self, path: &Path, kind: EntryKind, stack: &RuleStack) -> Classification {
        let relative = path.strip_prefix(&self.root).unwrap_or(path);
        let rel = rules::normalize(relative);
        let is_dir = kind == EntryKind::Directory;

        if rules::is_dotfile(&rel) {
            return Classification::hard(Reason::Dotfile);
        }
        if self.tables.skips_traversal(&rel) {
            return Classification::hard(Reason::StaticTraversal);
        }
        if self.hard_patterns.matches(&rel) {
            return Classification::hard(Reason::HardPattern);
        }
        if let Some(rules) = stack.ignored_by(Strength::Hard, path, is_dir) {
            return Classification::hard(Reason::HardIgnoreFile(rules.source().to_path_buf()));
        }

        if self.soft_patterns.matches(&rel) {
            return Classification::soft(Reason::SoftPattern);
        }
        if let Some(rules) = stack.ignored_by(Strength::Soft, path, is_dir) {
            return Classification::soft(Reason::SoftIgnoreFile(rules.source().to_path_buf()));
        }
        if !is_dir && self.tables.skips_content(&rel) {
            return Classification::soft(Reason::StaticContent);
        }

        if kind != EntryKind::File {
            return Classification::include();
        }
        match sniff::is_binary(path, self.detection, self.sniff_len) {
            Ok(true) => Classification::soft(Reason::Binary),
            Ok(false) => Classification::include(),
            Err(e) => {
                let verdict = match self.fallback {
                    SniffFallback::Binary => Verdict::Soft,
                    SniffFallback::Text => Verdict::Include,
                };
                Classification {
                    verdict,
                    reason: Some(Reason::SniffFailed(e.to_string())),
                }
            }
        }
    }
}
