//! Depth-first tree walk that threads the ignore-rule stack through each frame.

use crate::classify::{Classifier, EntryKind, Reason, Verdict};
use crate::error::{TreepackError, Warning, WarningKind};
use crate::ignore_files::{IgnoreResolver, RuleStack};
use crate::types::{FileRecord, Stats, TreeNode, dotted_extension};
use std::fs::{self, DirEntry};
use std::path::{Path, PathBuf};

/// Everything the walk produces before any content is read.
#[derive(Debug, Clone)]
pub struct Walk {
    pub tree: TreeNode,
    pub files: Vec<FileRecord>,
    pub stats: Stats,
    pub warnings: Vec<Warning>,
}

pub struct TreeWalker<'a> {
    classifier: &'a Classifier,
    resolver: IgnoreResolver<'a>,
    max_depth: Option<usize>,
}

impl<'a> TreeWalker<'a> {
    pub fn new(
        classifier: &'a Classifier,
        resolver: IgnoreResolver<'a>,
        max_depth: Option<usize>,
    ) -> Self {
        Self {
            classifier,
            resolver,
            max_depth,
        }
    }

    /// Walks `root` starting from `stack`.
    ///
    /// Only a root that cannot be listed is fatal; every other failure becomes a
    /// [`Warning`] in the result.
    pub fn walk(&self, root: &Path, stack: RuleStack) -> Result<Walk, TreepackError> {
        let metadata = fs::metadata(root)
            .map_err(|e| TreepackError::config(root, format!("cannot stat root: {}", e)))?;
        if !metadata.is_dir() {
            return Err(TreepackError::config(root, "not a directory"));
        }
        let entries = list_sorted(root)
            .map_err(|e| TreepackError::config(root, format!("cannot list root: {}", e)))?;

        let mut out = Walk {
            tree: TreeNode::Directory {
                name: root_name(root),
                children: Vec::new(),
            },
            files: Vec::new(),
            stats: Stats::default(),
            warnings: Vec::new(),
        };
        let children = if self.max_depth == Some(0) {
            Vec::new()
        } else {
            self.visit_entries(root, entries, 0, &stack, &mut out)
        };
        if let TreeNode::Directory { children: slot, .. } = &mut out.tree {
            *slot = children;
        }
        Ok(out)
    }

    fn walk_dir(&self, dir: &Path, depth: usize, parent: &RuleStack, out: &mut Walk) -> Vec<TreeNode> {
        if self.max_depth.is_some_and(|max| depth + 1 > max) {
            return Vec::new();
        }
        match list_sorted(dir) {
            Ok(entries) => self.visit_entries(dir, entries, depth, parent, out),
            Err(e) => {
                out.warnings
                    .push(Warning::new(WarningKind::DirectoryReadFailed, dir, e));
                Vec::new()
            }
        }
    }

    fn visit_entries(
        &self,
        dir: &Path,
        entries: Vec<Result<DirEntry, std::io::Error>>,
        depth: usize,
        parent: &RuleStack,
        out: &mut Walk,
    ) -> Vec<TreeNode> {
        let stack = self.resolver.descend(dir, parent, &mut out.warnings);
        let mut nodes = Vec::new();
        for entry in entries {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    out.warnings
                        .push(Warning::new(WarningKind::EntryStatFailed, dir, e));
                    continue;
                }
            };
            let path = entry.path();
            let file_type = match entry.file_type() {
                Ok(file_type) => file_type,
                Err(e) => {
                    out.warnings
                        .push(Warning::new(WarningKind::EntryStatFailed, &path, e));
                    continue;
                }
            };
            let kind = if file_type.is_dir() {
                EntryKind::Directory
            } else if file_type.is_file() {
                EntryKind::File
            } else if file_type.is_symlink() {
                // Name-based tiers first, so a pruned link is never resolved.
                let rules_only = self.classifier.explain(&path, EntryKind::Other, &stack);
                if rules_only.verdict == Verdict::Hard {
                    #[cfg(feature = "logging")]
                    tracing::debug!("Pruned {} ({:?})", path.display(), rules_only.reason);
                    continue;
                }
                match fs::metadata(&path) {
                    Ok(target) if target.is_file() => EntryKind::File,
                    Ok(target) if target.is_dir() => {
                        #[cfg(feature = "logging")]
                        tracing::debug!("Not following directory link {}", path.display());
                        let name = entry.file_name().to_string_lossy().into_owned();
                        nodes.push(TreeNode::Directory {
                            name,
                            children: Vec::new(),
                        });
                        continue;
                    }
                    Ok(_) => continue,
                    Err(e) => {
                        out.warnings
                            .push(Warning::new(WarningKind::EntryStatFailed, &path, e));
                        continue;
                    }
                }
            } else {
                #[cfg(feature = "logging")]
                tracing::debug!("Skipping special entry {}", path.display());
                continue;
            };

            let classification = self.classifier.explain(&path, kind, &stack);
            if classification.verdict == Verdict::Hard {
                #[cfg(feature = "logging")]
                tracing::debug!("Pruned {} ({:?})", path.display(), classification.reason);
                continue;
            }
            let name = entry.file_name().to_string_lossy().into_owned();

            if kind == EntryKind::Directory {
                let children = self.walk_dir(&path, depth + 1, &stack, out);
                nodes.push(TreeNode::Directory { name, children });
                continue;
            }

            if let Some(Reason::SniffFailed(message)) = &classification.reason {
                out.warnings
                    .push(Warning::new(WarningKind::SniffFailed, &path, message));
            }
            let size = match fs::metadata(&path) {
                Ok(metadata) => metadata.len(),
                Err(e) => {
                    out.warnings
                        .push(Warning::new(WarningKind::EntryStatFailed, &path, e));
                    continue;
                }
            };
            let extension = dotted_extension(&name);
            out.stats.record(&extension, size);
            if classification.verdict == Verdict::Include {
                out.files.push(FileRecord {
                    relative: relative_to(self.classifier.root(), &path),
                    path: path.clone(),
                    size,
                    extension,
                });
            }
            nodes.push(TreeNode::File {
                name,
                size,
                verdict: classification.verdict,
            });
        }
        nodes
    }
}

fn list_sorted(dir: &Path) -> Result<Vec<Result<DirEntry, std::io::Error>>, std::io::Error> {
    let mut entries: Vec<_> = fs::read_dir(dir)?.collect();
    entries.sort_by(|a, b| match (a, b) {
        (Ok(a), Ok(b)) => a.file_name().cmp(&b.file_name()),
        (Ok(_), Err(_)) => std::cmp::Ordering::Less,
        (Err(_), Ok(_)) => std::cmp::Ordering::Greater,
        (Err(_), Err(_)) => std::cmp::Ordering::Equal,
    });
    Ok(entries)
}

fn relative_to(root: &Path, path: &Path) -> PathBuf {
    path.strip_prefix(root).unwrap_or(path).to_path_buf()
}

fn root_name(root: &Path) -> String {
    root.file_name().map_or_else(
        || root.to_string_lossy().into_owned(),
        |n| n.to_string_lossy().into_owned(),
    )
}
