use crate::classify::Classifier;
use crate::error::{TreepackError, Warning, WarningKind};
use crate::ignore_files::IgnoreResolver;
use crate::options::TreepackOptions;
use crate::types::{FileEntry, FileRecord, Snapshot};
use crate::walker::TreeWalker;
#[cfg(feature = "parallel")]
use rayon::prelude::*;
use std::fs::File;
use std::io::{BufReader, Read};

pub const TOO_LARGE_PLACEHOLDER: &str = "[File too large, content omitted]";

fn read_file_content(record: &FileRecord, size_limit: Option<u64>) -> Result<String, TreepackError> {
    let path = &record.path;
    if let Some(limit) = size_limit {
        if record.size > limit {
            #[cfg(feature = "logging")]
            tracing::debug!(
                "File too large ({} > {}), skipping content",
                record.size,
                limit
            );
            return Ok(TOO_LARGE_PLACEHOLDER.to_string());
        }
    }
    let file = File::open(path).map_err(|e| TreepackError::io(path, e))?;
    let mut reader = BufReader::new(file);
    let mut bytes = Vec::new();
    reader
        .read_to_end(&mut bytes)
        .map_err(|e| TreepackError::io(path, e))?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

fn load_entry(record: FileRecord, size_limit: Option<u64>) -> Result<FileEntry, Warning> {
    match read_file_content(&record, size_limit) {
        Ok(content) => Ok(FileEntry { record, content }),
        Err(e) => Err(Warning::new(WarningKind::FileReadFailed, &record.path, e)),
    }
}

/// Walks `options.root`, classifies every entry and reads the content of the
/// included files.
///
/// Only an unusable root is an error; unreadable entries, ignore-files and
/// contents end up in [`Snapshot::warnings`].
pub fn treepack(options: TreepackOptions) -> Result<Snapshot, TreepackError> {
    #[cfg(feature = "logging")]
    tracing::debug!("Starting treepack with root: {}", options.root.display());
    let classifier = Classifier::new(&options);
    let resolver = IgnoreResolver::new(&options);
    let mut warnings = Vec::new();
    let stack = resolver.root_stack(&options.root, &mut warnings);

    let walker = TreeWalker::new(&classifier, resolver, options.max_depth);
    let walk = walker.walk(&options.root, stack)?;
    warnings.extend(walk.warnings);
    #[cfg(feature = "logging")]
    tracing::debug!(
        "Walk finished: {} listed files, {} included",
        walk.stats.total_files,
        walk.files.len()
    );

    #[cfg(not(feature = "parallel"))]
    let loaded = process_files(walk.files, &options);
    #[cfg(feature = "parallel")]
    let loaded = process_files_parallel(walk.files, &options);

    let mut files = Vec::with_capacity(loaded.len());
    for result in loaded {
        match result {
            Ok(entry) => files.push(entry),
            Err(warning) => warnings.push(warning),
        }
    }

    Ok(Snapshot {
        root: options.root,
        tree: walk.tree,
        files,
        stats: walk.stats,
        warnings,
    })
}

#[cfg(not(feature = "parallel"))]
fn process_files(
    records: Vec<FileRecord>,
    options: &TreepackOptions,
) -> Vec<Result<FileEntry, Warning>> {
    records
        .into_iter()
        .map(|record| load_entry(record, options.file_size_limit))
        .collect()
}

/// Reads contents on the rayon pool; `collect` keeps traversal order.
#[cfg(feature = "parallel")]
fn process_files_parallel(
    records: Vec<FileRecord>,
    options: &TreepackOptions,
) -> Vec<Result<FileEntry, Warning>> {
    records
        .into_par_iter()
        .map(|record| load_entry(record, options.file_size_limit))
        .collect()
}
