//! Binary detection on a bounded prefix of a file.

use crate::error::TreepackError;
use crate::options::BinaryDetection;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

/// Reads at most `limit` bytes from the start of `path`.
///
/// The handle is dropped before returning, on success and on error alike.
pub(crate) fn read_prefix(path: &Path, limit: usize) -> Result<Vec<u8>, TreepackError> {
    let file = File::open(path).map_err(|e| TreepackError::io(path, e))?;
    let mut reader = BufReader::new(file);
    let mut prefix = Vec::with_capacity(limit.min(64 * 1024));
    reader
        .by_ref()
        .take(limit as u64)
        .read_to_end(&mut prefix)
        .map_err(|e| TreepackError::io(path, e))?;
    Ok(prefix)
}

/// Decides whether an already-sampled prefix looks binary.
pub fn looks_binary(sample: &[u8], detection: BinaryDetection) -> bool {
    match detection {
        BinaryDetection::Simple => sample.contains(&0),
        BinaryDetection::Strict => sample
            .iter()
            .any(|&b| b == 0 || (b < 0x20 && !matches!(b, b'\t' | b'\n' | b'\r'))),
        BinaryDetection::Accurate => content_inspector::inspect(sample).is_binary(),
        BinaryDetection::None => false,
    }
}

/// Sniffs the first `limit` bytes of `path`.
///
/// I/O failures are returned to the caller, which applies the configured
/// [`SniffFallback`](crate::SniffFallback).
pub fn is_binary(
    path: &Path,
    detection: BinaryDetection,
    limit: usize,
) -> Result<bool, TreepackError> {
    if detection == BinaryDetection::None {
        return Ok(false);
    }
    let prefix = read_prefix(path, limit)?;
    Ok(looks_binary(&prefix, detection))
}
