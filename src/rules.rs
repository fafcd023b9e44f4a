//! Built-in name and extension tables.
//!
//! All lookups take a root-relative path already normalized to `/` separators
//! (see [`normalize`]).

use std::path::Path;

/// Fixed rule tables consulted before any user-supplied rule.
#[derive(Debug, Clone, Copy)]
pub struct StaticRuleTables {
    /// Bumped whenever an entry is added or removed, so snapshots can record
    /// which tables produced them.
    pub version: u32,
    /// Basenames or multi-segment suffixes that prune traversal.
    pub traversal_skip: &'static [&'static str],
    /// Basenames whose content is never shown.
    pub content_skip_names: &'static [&'static str],
    /// Lowercase extensions (without the dot) whose content is never shown.
    pub content_skip_extensions: &'static [&'static str],
}

pub const STATIC_RULES: StaticRuleTables = StaticRuleTables {
    version: 1,
    traversal_skip: &[
        "node_modules",
        "bower_components",
        "vendor",
        "dist",
        "build",
        "coverage",
        "target",
        "__pycache__",
        "var/cache",
    ],
    content_skip_names: &[
        "package-lock.json",
        "yarn.lock",
        "pnpm-lock.yaml",
        "Cargo.lock",
        "composer.lock",
        "Gemfile.lock",
        "poetry.lock",
        "go.sum",
    ],
    content_skip_extensions: &[
        // images
        "jpg", "jpeg", "png", "gif", "bmp", "tiff", "webp", "svg", "ico", "psd", "ai", "eps",
        "raw", "xcf",
        // fonts
        "woff", "woff2", "ttf", "otf", "eot",
        // media
        "mp3", "mp4", "wav", "ogg", "avi", "mov", "webm",
        // archives and binaries
        "zip", "gz", "tar", "tgz", "7z", "rar", "jar", "exe", "dll", "so", "dylib", "o", "a",
        "class", "pyc", "wasm", "pdf",
        // bundles
        "map",
    ],
};

impl StaticRuleTables {
    /// True if any traversal-skip entry appears as a segment, or segment
    /// sequence, of `rel`.
    pub fn skips_traversal(&self, rel: &str) -> bool {
        let segments: Vec<&str> = rel.split('/').filter(|s| !s.is_empty()).collect();
        self.traversal_skip.iter().any(|entry| {
            let wanted: Vec<&str> = entry.split('/').filter(|s| !s.is_empty()).collect();
            !wanted.is_empty()
                && segments
                    .windows(wanted.len())
                    .any(|window| window == wanted.as_slice())
        })
    }

    /// True if the basename or its extension is in a content-skip table.
    pub fn skips_content(&self, rel: &str) -> bool {
        let name = basename(rel);
        if self.content_skip_names.contains(&name) {
            return true;
        }
        match extension(name) {
            Some(ext) => {
                let ext = ext.to_ascii_lowercase();
                self.content_skip_extensions.contains(&ext.as_str())
            }
            None => false,
        }
    }
}

/// Dotfiles and dot-directories are always pruned.
pub fn is_dotfile(rel: &str) -> bool {
    basename(rel).starts_with('.')
}

/// Renders a path with `/` separators regardless of platform.
pub fn normalize(path: &Path) -> String {
    path.to_string_lossy().replace('\\', "/")
}

pub(crate) fn basename(rel: &str) -> &str {
    rel.trim_end_matches('/').rsplit('/').next().unwrap_or(rel)
}

/// Extension after the last dot; names like `.env` or `Makefile` have none.
pub(crate) fn extension(name: &str) -> Option<&str> {
    match name.rfind('.') {
        Some(0) | None => None,
        Some(idx) if idx + 1 < name.len() => Some(&name[idx + 1..]),
        Some(_) => None,
    }
}
