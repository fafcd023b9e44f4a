//! Loading and scoping of gitignore-style rule files.
//!
//! Syntax (comments, negation, globs, directory-only markers) is handled by
//! `ignore::gitignore`. This module decides which files are loaded, which base
//! directory their rules are relative to, and which stack they join.

use crate::error::{TreepackError, Warning, WarningKind};
use crate::options::TreepackOptions;
use ignore::gitignore::{Gitignore, GitignoreBuilder};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Name of the ignore-file sought in every visited directory.
pub const PER_DIRECTORY_FILE: &str = ".gitignore";

/// Whether a rule set prunes traversal or only suppresses content.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strength {
    Hard,
    Soft,
}

/// Compiled rules from one ignore-file, scoped to a base directory.
#[derive(Debug)]
pub struct RuleSet {
    base: PathBuf,
    source: PathBuf,
    matcher: Gitignore,
    rejected: Vec<String>,
}

impl RuleSet {
    /// Loads `source` with rules relative to `base`.
    ///
    /// Returns `Ok(None)` when the file does not exist. Lines that fail to
    /// compile are skipped and reported through [`RuleSet::rejected`].
    pub fn load(source: &Path, base: &Path) -> Result<Option<RuleSet>, TreepackError> {
        let text = match fs::read_to_string(source) {
            Ok(text) => text,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(TreepackError::io(source, e)),
        };
        Self::parse(&text, source, base).map(Some)
    }

    /// Compiles rule text as if it had been read from `source`.
    pub fn parse(text: &str, source: &Path, base: &Path) -> Result<RuleSet, TreepackError> {
        let mut builder = GitignoreBuilder::new(base);
        let mut rejected = Vec::new();
        for line in text.lines() {
            if let Err(e) = builder.add_line(Some(source.to_path_buf()), line) {
                rejected.push(e.to_string());
            }
        }
        let matcher = builder
            .build()
            .map_err(|e| TreepackError::io(source, std::io::Error::other(e.to_string())))?;
        #[cfg(feature = "logging")]
        tracing::debug!(
            "Loaded {} ignore rules from {} (base {})",
            matcher.num_ignores() + matcher.num_whitelists(),
            source.display(),
            base.display()
        );
        Ok(RuleSet {
            base: base.to_path_buf(),
            source: source.to_path_buf(),
            matcher,
            rejected,
        })
    }

    pub fn base(&self) -> &Path {
        &self.base
    }

    pub fn source(&self) -> &Path {
        &self.source
    }

    /// Messages for rule lines that could not be compiled.
    pub fn rejected(&self) -> &[String] {
        &self.rejected
    }

    /// True if `path`, or one of its parents below the base, is ignored.
    ///
    /// Paths outside the base, and the base itself, are never ignored.
    pub fn is_ignored(&self, path: &Path, is_dir: bool) -> bool {
        let relative = match path.strip_prefix(&self.base) {
            Ok(rel) if !rel.as_os_str().is_empty() => rel,
            _ => return false,
        };
        self.matcher
            .matched_path_or_any_parents(relative, is_dir)
            .is_ignore()
    }
}

/// The hard and soft rule sets active for one traversal frame.
///
/// Cloning is cheap; each directory frame clones its parent's stack before
/// appending, so siblings never observe each other's additions.
#[derive(Debug, Clone, Default)]
pub struct RuleStack {
    hard: Vec<Arc<RuleSet>>,
    soft: Vec<Arc<RuleSet>>,
}

impl RuleStack {
    pub fn push(&mut self, strength: Strength, rules: Arc<RuleSet>) {
        match strength {
            Strength::Hard => self.hard.push(rules),
            Strength::Soft => self.soft.push(rules),
        }
    }

    pub fn len(&self, strength: Strength) -> usize {
        match strength {
            Strength::Hard => self.hard.len(),
            Strength::Soft => self.soft.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.hard.is_empty() && self.soft.is_empty()
    }

    /// Returns the rule set that ignores `path` on the given stack, if any.
    pub fn ignored_by(&self, strength: Strength, path: &Path, is_dir: bool) -> Option<&RuleSet> {
        let stack = match strength {
            Strength::Hard => &self.hard,
            Strength::Soft => &self.soft,
        };
        stack
            .iter()
            .map(Arc::as_ref)
            .find(|rules| rules.is_ignored(path, is_dir))
    }
}

/// Decides which ignore-files join the stack, and when.
#[derive(Debug)]
pub struct IgnoreResolver<'a> {
    options: &'a TreepackOptions,
}

impl<'a> IgnoreResolver<'a> {
    pub fn new(options: &'a TreepackOptions) -> Self {
        Self { options }
    }

    /// Builds the stack active at the root: the global and specific sources,
    /// each scoped to the whole traversal.
    pub fn root_stack(&self, root: &Path, warnings: &mut Vec<Warning>) -> RuleStack {
        let mut stack = RuleStack::default();
        let global = self.options.global_gitignore;
        if global.is_enabled() {
            match self.options.resolved_global_gitignore() {
                Some(source) => {
                    if let Some(rules) = load_requested(&source, root, warnings) {
                        if global.hard {
                            stack.push(Strength::Hard, Arc::clone(&rules));
                        }
                        if global.soft {
                            stack.push(Strength::Soft, rules);
                        }
                    }
                }
                None => warnings.push(Warning::new(
                    WarningKind::IgnoreFileUnreadable,
                    PathBuf::from("~/.gitignore_global"),
                    "home directory could not be determined",
                )),
            }
        }
        if let Some(source) = &self.options.specific_gitignore_hard {
            if let Some(rules) = load_requested(source, root, warnings) {
                stack.push(Strength::Hard, rules);
            }
        }
        if let Some(source) = &self.options.specific_gitignore_soft {
            if let Some(rules) = load_requested(source, root, warnings) {
                stack.push(Strength::Soft, rules);
            }
        }
        stack
    }

    /// Returns the stack for `dir`'s children: `parent` plus the directory's own
    /// `.gitignore` when per-directory loading is enabled.
    pub fn descend(&self, dir: &Path, parent: &RuleStack, warnings: &mut Vec<Warning>) -> RuleStack {
        let mut stack = parent.clone();
        let toggle = self.options.repo_gitignore;
        if !toggle.is_enabled() {
            return stack;
        }
        let source = dir.join(PER_DIRECTORY_FILE);
        let rules = match RuleSet::load(&source, dir) {
            Ok(Some(rules)) => Arc::new(rules),
            Ok(None) => return stack,
            Err(e) => {
                warnings.push(Warning::new(WarningKind::IgnoreFileUnreadable, &source, e));
                return stack;
            }
        };
        report_rejected(&rules, warnings);
        if toggle.hard {
            stack.push(Strength::Hard, Arc::clone(&rules));
        }
        if toggle.soft {
            stack.push(Strength::Soft, rules);
        }
        stack
    }
}

/// Loads an explicitly requested source; a missing file is worth a warning here.
fn load_requested(source: &Path, base: &Path, warnings: &mut Vec<Warning>) -> Option<Arc<RuleSet>> {
    match RuleSet::load(source, base) {
        Ok(Some(rules)) => {
            report_rejected(&rules, warnings);
            Some(Arc::new(rules))
        }
        Ok(None) => {
            warnings.push(Warning::new(
                WarningKind::IgnoreFileUnreadable,
                source,
                "ignore file not found",
            ));
            None
        }
        Err(e) => {
            warnings.push(Warning::new(WarningKind::IgnoreFileUnreadable, source, e));
            None
        }
    }
}

fn report_rejected(rules: &RuleSet, warnings: &mut Vec<Warning>) {
    for message in rules.rejected() {
        warnings.push(Warning::new(
            WarningKind::IgnoreRuleInvalid,
            rules.source(),
            message,
        ));
    }
}
