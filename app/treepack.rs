//! Command-line interface for treepack.
//!
//! Walks a folder, classifies every entry and writes the consolidated snapshot
//! (statistics, tree and included file contents) to a single output file.

use chrono::Local;
use clap::{Parser, ValueEnum};
use std::path::{Path, PathBuf};
use std::process::exit;
use treepack::output::{self, OutputFormat as ReportFormat, format_size};
use treepack::{
    BinaryDetection, IgnoreToggle, Snapshot, TreepackBuilder, TreepackOptions, split_patterns,
    treepack,
};

/// Pack a project tree into one shareable text file
#[derive(Parser)]
#[command(name = "treepack", version, about, long_about = None)]
struct Cli {
    /// Path to the target folder
    folder: PathBuf,

    /// Output file name (default: <folder>_<MMDDYYYY>_<timestamp>.<ext>)
    output: Option<PathBuf>,

    /// Additional patterns to filter, comma separated (hard: pruned from the tree)
    #[arg(short = 'f', long = "filter")]
    filter: Option<String>,

    /// Soft filter patterns, comma separated (listed, content omitted)
    #[arg(long = "filter-soft")]
    filter_soft: Option<String>,

    /// Respect .gitignore files in each folder (hard)
    #[arg(short = 'g', long)]
    gitignore: bool,

    /// Respect .gitignore files in each folder (soft)
    #[arg(long)]
    gitignore_soft: bool,

    /// Use a specific ignore file (hard)
    #[arg(long, value_name = "FILE")]
    gitignore_specific: Option<PathBuf>,

    /// Use a specific ignore file (soft)
    #[arg(long, value_name = "FILE")]
    gitignore_specific_soft: Option<PathBuf>,

    /// Use the global ignore file ~/.gitignore_global (hard)
    #[arg(long)]
    gitignore_global: bool,

    /// Use the global ignore file ~/.gitignore_global (soft)
    #[arg(long)]
    gitignore_global_soft: bool,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    /// Binary detection strategy
    #[arg(long, default_value = "simple", value_parser = parse_binary_detection)]
    binary_detection: BinaryDetection,

    /// Max depth (unlimited if not set)
    #[arg(long)]
    max_depth: Option<usize>,

    /// File size limit in bytes (files larger will have content omitted)
    #[arg(long)]
    file_size_limit: Option<u64>,

    /// Pretty output (indented JSON)
    #[arg(short, long)]
    pretty: bool,

    /// Print the snapshot to stdout instead of writing a file
    #[arg(long)]
    stdout: bool,
}

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Text,
    Markdown,
    Json,
}

impl From<OutputFormat> for ReportFormat {
    fn from(format: OutputFormat) -> Self {
        match format {
            OutputFormat::Text => ReportFormat::Text,
            OutputFormat::Markdown => ReportFormat::Markdown,
            OutputFormat::Json => ReportFormat::Json,
        }
    }
}

/// Parse string into BinaryDetection enum.
fn parse_binary_detection(s: &str) -> Result<BinaryDetection, String> {
    match s {
        "simple" => Ok(BinaryDetection::Simple),
        "strict" => Ok(BinaryDetection::Strict),
        "accurate" => Ok(BinaryDetection::Accurate),
        "none" => Ok(BinaryDetection::None),
        _ => Err(format!("invalid binary detection method: {}", s)),
    }
}

impl Cli {
    fn to_options(&self) -> TreepackOptions {
        let mut builder = TreepackBuilder::new(&self.folder)
            .hard_filters(self.filter.as_deref().map(split_patterns).unwrap_or_default())
            .soft_filters(
                self.filter_soft
                    .as_deref()
                    .map(split_patterns)
                    .unwrap_or_default(),
            )
            .repo_gitignore(IgnoreToggle {
                hard: self.gitignore,
                soft: self.gitignore_soft,
            })
            .global_gitignore(IgnoreToggle {
                hard: self.gitignore_global,
                soft: self.gitignore_global_soft,
            })
            .specific_gitignore_hard(self.gitignore_specific.as_deref().map(absolute))
            .specific_gitignore_soft(self.gitignore_specific_soft.as_deref().map(absolute))
            .binary_detection(self.binary_detection)
            .file_size_limit(self.file_size_limit);

        builder = if let Some(depth) = self.max_depth {
            builder.max_depth(depth)
        } else {
            builder.no_limit_depth()
        };
        builder.build()
    }

    fn output_path(&self) -> PathBuf {
        if let Some(path) = &self.output {
            return path.clone();
        }
        let now = Local::now();
        let folder_name = folder_label(&self.folder);
        let format: ReportFormat = self.format.into();
        PathBuf::from(format!(
            "{}_{}_{}.{}",
            folder_name,
            now.format("%m%d%Y"),
            now.timestamp(),
            format.extension()
        ))
    }
}

fn absolute(path: &Path) -> PathBuf {
    std::path::absolute(path).unwrap_or_else(|_| path.to_path_buf())
}

/// Basename of the scanned folder, resolving `.` and `..` to the real directory.
fn folder_label(folder: &Path) -> String {
    let resolved = std::fs::canonicalize(folder).unwrap_or_else(|_| absolute(folder));
    resolved
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "snapshot".to_string())
}

fn main() {
    let cli = Cli::parse();
    let options = cli.to_options();

    eprintln!("Starting to process directory: {}", cli.folder.display());
    eprintln!("Collecting files...");
    let snapshot = match treepack(options) {
        Ok(snapshot) => snapshot,
        Err(e) => {
            eprintln!("Error: {}", e);
            exit(1);
        }
    };
    for warning in &snapshot.warnings {
        eprintln!("Warning: {}", warning);
    }
    eprintln!("Found {} files", snapshot.files.len());

    if let Err(e) = emit(&cli, &snapshot) {
        eprintln!("Error: {}", e);
        exit(1);
    }
}

fn emit(cli: &Cli, snapshot: &Snapshot) -> Result<(), treepack::TreepackError> {
    let format = cli.format.into();
    if cli.stdout {
        print!("{}", output::format_result(snapshot, format, cli.pretty)?);
        return Ok(());
    }
    let path = cli.output_path();
    eprintln!("Writing output file...");
    output::write_result_to_file(snapshot, format, &path, cli.pretty)?;
    eprintln!("Output written to {}", path.display());
    eprintln!("Total files processed: {}", snapshot.files.len());
    eprintln!("Total size: {}", format_size(snapshot.stats.total_bytes));
    Ok(())
}
