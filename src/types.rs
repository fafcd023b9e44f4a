use crate::classify::Verdict;
use crate::error::Warning;
use crate::rules;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::path::PathBuf;

/// A file classified as `Include`, before its content is read.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileRecord {
    /// The full path to the file.
    pub path: PathBuf,
    /// Path relative to the snapshot root.
    pub relative: PathBuf,
    /// The size of the file in bytes at walk time.
    pub size: u64,
    /// Lowercase extension with a leading dot, or empty.
    pub extension: String,
}

/// An included file with its content.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileEntry {
    #[serde(flatten)]
    pub record: FileRecord,
    /// The content of the file as a string.
    ///
    /// Invalid UTF-8 is replaced lossily. Files over the size limit carry the
    /// placeholder `[File too large, content omitted]`.
    pub content: String,
}

/// Aggregate counters over every listed (non-hard) file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stats {
    pub total_files: usize,
    pub total_bytes: u64,
    /// Extension (lowercase, leading dot, empty for none) to file count.
    pub extensions: BTreeMap<String, usize>,
    pub technologies: BTreeSet<String>,
}

impl Stats {
    pub fn record(&mut self, extension: &str, size: u64) {
        self.total_files += 1;
        self.total_bytes += size;
        *self.extensions.entry(extension.to_string()).or_insert(0) += 1;
        for tech in technologies_for(extension) {
            self.technologies.insert((*tech).to_string());
        }
    }

    /// Extension histogram sorted by count, most frequent first; ties by name.
    pub fn extensions_by_count(&self) -> Vec<(&str, usize)> {
        let mut entries: Vec<(&str, usize)> = self
            .extensions
            .iter()
            .map(|(ext, count)| (ext.as_str(), *count))
            .collect();
        entries.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
        entries
    }
}

/// Technologies implied by a dotted lowercase extension.
pub fn technologies_for(extension: &str) -> &'static [&'static str] {
    match extension {
        ".ts" => &["TypeScript"],
        ".tsx" => &["TypeScript", "React"],
        ".jsx" => &["React"],
        ".vue" => &["Vue.js"],
        ".svelte" => &["Svelte"],
        ".py" => &["Python"],
        ".rs" => &["Rust"],
        ".go" => &["Go"],
        ".java" => &["Java"],
        ".kt" | ".kts" => &["Kotlin"],
        ".rb" => &["Ruby"],
        ".php" => &["PHP"],
        ".swift" => &["Swift"],
        ".cs" => &["C#"],
        ".c" | ".h" => &["C"],
        ".cpp" | ".cc" | ".cxx" | ".hpp" => &["C++"],
        _ => &[],
    }
}

/// Lowercase dotted extension of a file name, as used by [`Stats`].
pub fn dotted_extension(name: &str) -> String {
    rules::extension(name)
        .map(|ext| format!(".{}", ext.to_ascii_lowercase()))
        .unwrap_or_default()
}

/// One visible node of the walked tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum TreeNode {
    Directory {
        name: String,
        children: Vec<TreeNode>,
    },
    File {
        name: String,
        size: u64,
        verdict: Verdict,
    },
}

impl TreeNode {
    pub fn name(&self) -> &str {
        match self {
            TreeNode::Directory { name, .. } | TreeNode::File { name, .. } => name,
        }
    }

    /// Finds a descendant by `/`-separated path relative to this node.
    pub fn find(&self, path: &str) -> Option<&TreeNode> {
        let mut current = self;
        for segment in path.split('/').filter(|s| !s.is_empty()) {
            match current {
                TreeNode::Directory { children, .. } => {
                    current = children.iter().find(|c| c.name() == segment)?;
                }
                TreeNode::File { .. } => return None,
            }
        }
        Some(current)
    }
}

/// The complete result of a walk plus content read.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Snapshot {
    pub root: PathBuf,
    /// Structural listing; the root node is the traversal root itself.
    pub tree: TreeNode,
    /// Included files with content, in traversal order.
    pub files: Vec<FileEntry>,
    pub stats: Stats,
    /// Non-fatal problems, in the order they were met.
    pub warnings: Vec<Warning>,
}
