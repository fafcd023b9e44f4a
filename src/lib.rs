//! # Treepack
//!
//! `treepack` walks a directory tree, classifies every entry against layered
//! inclusion and exclusion rules, and packs the visual tree plus the contents of
//! every included file into a single snapshot.
//!
//! Each entry gets one [`Verdict`]:
//!
//! - `Hard`: pruned. Never listed, never descended into.
//! - `Soft`: listed in the tree, content omitted.
//! - `Include`: listed and its content read.
//!
//! Rules are checked in a fixed order, hard before soft: dotfiles, the built-in
//! traversal tables, hard filter patterns and hard ignore-files; then soft filter
//! patterns, soft ignore-files, the built-in content tables and a binary sniff of
//! the file's first bytes.
//!
//! # Features
//!
//! - `parallel`: Reads included file contents on the Rayon pool.
//! - `logging`: Enables debug logging via the `tracing` crate.
//!
//! # Example
//!
//! ```no_run
//! use treepack::{IgnoreToggle, TreepackBuilder, output, treepack};
//!
//! let options = TreepackBuilder::new(".")
//!     .hard_filters(vec!["fixtures".into()])
//!     .repo_gitignore(IgnoreToggle::HARD)
//!     .build();
//!
//! let snapshot = treepack(options).expect("Failed to scan directory");
//! for warning in &snapshot.warnings {
//!     eprintln!("warning: {}", warning);
//! }
//! let report = output::format_result(&snapshot, output::OutputFormat::Text, false).unwrap();
//! println!("{}", report);
//! ```

mod classify;
mod engine;
mod error;
mod ignore_files;
mod options;
pub mod output;
mod pattern;
mod rules;
mod sniff;
mod tree;
mod types;
mod walker;

pub use classify::{Classification, Classifier, EntryKind, Reason, Verdict};
pub use engine::{TOO_LARGE_PLACEHOLDER, treepack};
pub use error::{TreepackError, Warning, WarningKind};
pub use ignore_files::{IgnoreResolver, PER_DIRECTORY_FILE, RuleSet, RuleStack, Strength};
pub use options::{
    BinaryDetection, DEFAULT_SNIFF_LEN, IgnoreToggle, SniffFallback, TreepackBuilder,
    TreepackOptions, split_patterns,
};
pub use pattern::{Matcher, PatternSet};
pub use rules::{STATIC_RULES, StaticRuleTables, is_dotfile, normalize};
pub use sniff::{is_binary, looks_binary};
pub use types::{FileEntry, FileRecord, Snapshot, Stats, TreeNode, technologies_for};
pub use walker::{TreeWalker, Walk};
