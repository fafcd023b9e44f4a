use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// How the binary sniffer decides that a sampled prefix is binary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BinaryDetection {
    /// Any NUL byte in the prefix.
    Simple,
    /// NUL or any control byte other than tab, newline and carriage return.
    Strict,
    /// Delegates to `content_inspector` (NUL bytes plus UTF-16/32 BOM handling).
    Accurate,
    /// Never sniff; every file that passes the rule tiers is included.
    None,
}

/// Verdict applied when the sniffer cannot read a file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SniffFallback {
    /// Treat the file as binary, so it is soft-excluded.
    Binary,
    /// Treat the file as text and let the content reader deal with it.
    Text,
}

/// Whether an ignore-file source is applied as a hard rule set, a soft one, or both.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IgnoreToggle {
    pub hard: bool,
    pub soft: bool,
}
impl IgnoreToggle {
    pub const OFF: IgnoreToggle = IgnoreToggle {
        hard: false,
        soft: false,
    };
    pub const HARD: IgnoreToggle = IgnoreToggle {
        hard: true,
        soft: false,
    };
    pub const SOFT: IgnoreToggle = IgnoreToggle {
        hard: false,
        soft: true,
    };
    pub fn is_enabled(&self) -> bool {
        self.hard || self.soft
    }
}

pub const DEFAULT_SNIFF_LEN: usize = 8000;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TreepackOptions {
    pub root: PathBuf,
    pub hard_filters: Vec<String>,
    pub soft_filters: Vec<String>,
    pub repo_gitignore: IgnoreToggle,
    pub specific_gitignore_hard: Option<PathBuf>,
    pub specific_gitignore_soft: Option<PathBuf>,
    pub global_gitignore: IgnoreToggle,
    pub global_gitignore_path: Option<PathBuf>,
    pub max_depth: Option<usize>,
    pub binary_detection: BinaryDetection,
    pub sniff_len: usize,
    pub sniff_fallback: SniffFallback,
    pub file_size_limit: Option<u64>,
}
impl Default for TreepackOptions {
    fn default() -> Self {
        Self {
            root: PathBuf::from("."),
            hard_filters: Vec::new(),
            soft_filters: Vec::new(),
            repo_gitignore: IgnoreToggle::OFF,
            specific_gitignore_hard: None,
            specific_gitignore_soft: None,
            global_gitignore: IgnoreToggle::OFF,
            global_gitignore_path: None,
            max_depth: None,
            binary_detection: BinaryDetection::Simple,
            sniff_len: DEFAULT_SNIFF_LEN,
            sniff_fallback: SniffFallback::Binary,
            file_size_limit: None,
        }
    }
}
impl TreepackOptions {
    /// Location of the global ignore-file: the configured override, else `~/.gitignore_global`.
    pub fn resolved_global_gitignore(&self) -> Option<PathBuf> {
        if let Some(path) = &self.global_gitignore_path {
            return Some(path.clone());
        }
        directories::BaseDirs::new().map(|dirs| dirs.home_dir().join(".gitignore_global"))
    }
}

/// Splits the comma-separated form of a pattern list, trimming each entry and
/// dropping empty ones.
pub fn split_patterns(input: &str) -> Vec<String> {
    input
        .split(',')
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .map(String::from)
        .collect()
}

#[derive(Debug, Default)]
pub struct TreepackBuilder {
    options: TreepackOptions,
}
impl TreepackBuilder {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            options: TreepackOptions {
                root: root.into(),
                ..Default::default()
            },
        }
    }
    pub fn hard_filters(mut self, patterns: Vec<String>) -> Self {
        self.options.hard_filters = patterns;
        self
    }
    pub fn soft_filters(mut self, patterns: Vec<String>) -> Self {
        self.options.soft_filters = patterns;
        self
    }
    pub fn repo_gitignore(mut self, toggle: IgnoreToggle) -> Self {
        self.options.repo_gitignore = toggle;
        self
    }
    pub fn specific_gitignore_hard(mut self, path: Option<PathBuf>) -> Self {
        self.options.specific_gitignore_hard = path;
        self
    }
    pub fn specific_gitignore_soft(mut self, path: Option<PathBuf>) -> Self {
        self.options.specific_gitignore_soft = path;
        self
    }
    pub fn global_gitignore(mut self, toggle: IgnoreToggle) -> Self {
        self.options.global_gitignore = toggle;
        self
    }
    pub fn global_gitignore_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.options.global_gitignore_path = Some(path.into());
        self
    }
    pub fn max_depth(mut self, depth: usize) -> Self {
        self.options.max_depth = Some(depth);
        self
    }
    pub fn no_limit_depth(mut self) -> Self {
        self.options.max_depth = None;
        self
    }
    pub fn binary_detection(mut self, method: BinaryDetection) -> Self {
        self.options.binary_detection = method;
        self
    }
    pub fn sniff_len(mut self, len: usize) -> Self {
        self.options.sniff_len = len;
        self
    }
    pub fn sniff_fallback(mut self, fallback: SniffFallback) -> Self {
        self.options.sniff_fallback = fallback;
        self
    }
    pub fn file_size_limit(mut self, limit: Option<u64>) -> Self {
        self.options.file_size_limit = limit;
        self
    }
    pub fn build(self) -> TreepackOptions {
        self.options
    }
}
