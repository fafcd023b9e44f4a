//! Output formatting for snapshots.
//!
//! Provides functions to format a [`Snapshot`] into the consolidated text
//! report, Markdown, or JSON. File contents are emitted unchanged.

use crate::tree::render_tree;
use crate::{Snapshot, TreepackError};
use std::fmt::Write as _;
use std::fs;
use std::path::Path;

/// Supported output formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Markdown,
    Json,
}

impl OutputFormat {
    /// Returns the conventional file extension for this format.
    pub fn extension(&self) -> &'static str {
        match self {
            OutputFormat::Markdown => "md",
            OutputFormat::Text => "txt",
            OutputFormat::Json => "json",
        }
    }
}

pub const LEGEND: &str = "Legend: ✓ = Included in output, ✗ = Excluded from output";
pub const SEPARATOR: &str = "-------- [ Separator ] ------";

/// Human-readable size: bytes below 1 KiB, then KB and MB with two decimals.
pub fn format_size(bytes: u64) -> String {
    if bytes < 1024 {
        format!("{} B", bytes)
    } else if bytes < 1024 * 1024 {
        format!("{:.2} KB", bytes as f64 / 1024.0)
    } else {
        format!("{:.2} MB", bytes as f64 / (1024.0 * 1024.0))
    }
}

/// Formats the snapshot into a string.
pub fn format_result(
    snapshot: &Snapshot,
    format: OutputFormat,
    pretty: bool,
) -> Result<String, TreepackError> {
    match format {
        OutputFormat::Text => Ok(format_text(snapshot)),
        OutputFormat::Markdown => Ok(format_markdown(snapshot)),
        OutputFormat::Json => format_json(snapshot, pretty),
    }
}

/// Writes the formatted snapshot to a file.
pub fn write_result_to_file(
    snapshot: &Snapshot,
    format: OutputFormat,
    path: impl AsRef<Path>,
    pretty: bool,
) -> Result<(), TreepackError> {
    let content = format_result(snapshot, format, pretty)?;
    fs::write(&path, content).map_err(|e| TreepackError::io(path.as_ref(), e))?;
    Ok(())
}

// ----------------------- Internal formatting -----------------------

fn push_overview(out: &mut String, snapshot: &Snapshot) {
    let stats = &snapshot.stats;
    let _ = writeln!(out, "Project Statistics:");
    let _ = writeln!(out, "Total Files: {}", stats.total_files);
    let _ = writeln!(out, "Total Size: {}\n", format_size(stats.total_bytes));

    let _ = writeln!(out, "File Types:");
    for (ext, count) in stats.extensions_by_count() {
        let label = if ext.is_empty() { "no extension" } else { ext };
        let _ = writeln!(out, "  {}: {} files", label, count);
    }

    let _ = writeln!(out, "\nDetected Technologies:");
    for tech in &stats.technologies {
        let _ = writeln!(out, "  - {}", tech);
    }
}

fn format_text(snapshot: &Snapshot) -> String {
    let mut out = String::with_capacity(4096);
    out.push_str("Project Overview\n===============\n\n");
    push_overview(&mut out, snapshot);

    out.push_str("\nFolder Structure (Tree)\n=====================\n");
    out.push_str(LEGEND);
    out.push_str("\n\n");
    out.push_str(&render_tree(&snapshot.tree));
    out.push_str("\n==============\n");

    for file in &snapshot.files {
        let _ = write!(
            out,
            "\nFile Name: {}\nSize: {}\nCode:\n{}\n{}\n",
            file.record.relative.display(),
            format_size(file.record.size),
            file.content,
            SEPARATOR
        );
    }
    out
}

fn format_markdown(snapshot: &Snapshot) -> String {
    let mut out = String::with_capacity(4096);
    out.push_str("# Project Overview\n\n```text\n");
    push_overview(&mut out, snapshot);
    out.push_str("```\n\n## Folder Structure\n\n");
    out.push_str(LEGEND);
    out.push_str("\n\n```text\n");
    out.push_str(&render_tree(&snapshot.tree));
    out.push_str("```\n\n");

    for file in &snapshot.files {
        let ext = file.record.extension.trim_start_matches('.');
        let lang = language_from_extension(ext);

        out.push_str(&format!(
            "## {}\n\n```{}\n",
            file.record.relative.display(),
            lang
        ));
        out.push_str(&file.content);
        if !file.content.ends_with('\n') {
            out.push('\n');
        }
        out.push_str("```\n\n");
    }
    out
}

fn format_json(snapshot: &Snapshot, pretty: bool) -> Result<String, TreepackError> {
    let json = if pretty {
        serde_json::to_string_pretty(snapshot)
    } else {
        serde_json::to_string(snapshot)
    };
    json.map_err(|e| TreepackError::Serialize(e.to_string()))
}

fn language_from_extension(ext: &str) -> &'static str {
    match ext {
        "rs" => "rust", "toml" => "toml", "json" => "json", "md" | "markdown" => "markdown",
        "txt" => "text", "html" | "htm" => "html", "css" => "css", "js" => "javascript",
        "ts" => "typescript", "tsx" => "tsx", "jsx" => "jsx", "vue" => "vue",
        "py" => "python", "sh" | "bash" => "bash", "yml" | "yaml" => "yaml", "xml" => "xml",
        "c" => "c", "cpp" | "cc" | "cxx" => "cpp", "h" => "c", "hpp" => "cpp",
        "go" => "go", "rb" => "ruby", "php" => "php", "swift" => "swift",
        "kt" | "kts" => "kotlin", "scala" => "scala", "dart" => "dart",
        _ => "",
    }
}
