//! CLI output formatting.
//!
//! Each command has a `format_*` function returning display lines and a
//! `print_*` wrapper that writes them to stdout. Format functions are pure so
//! they can be tested without capturing stdout.
//!
//! # Output Format
//!
//! ## Check
//!
//! ```text
//! Manifest (website)
//! 001 LEGACY.HTML
//! 002 about/index.html
//! 003 css/style.css
//!
//! 3 publishable files
//! ```
//!
//! ## Publish
//!
//! ```text
//! 001 LEGACY.HTML
//! 002 archive.html/2020.html
//!     Links: 2 rewritten
//! 003 css/style.css
//!
//! Published 3 files to publish (1 rewritten, 2 links)
//! ```

use crate::publish::{PublishReport, PublishedFile};
use crate::scan::Manifest;
use std::path::Path;

/// Format a 1-based positional index as 3-digit zero-padded.
fn format_index(pos: usize) -> String {
    format!("{:0>3}", pos)
}

/// Return indentation string: 4 spaces per depth level.
fn indent(depth: usize) -> String {
    "    ".repeat(depth)
}

/// `1 file`, `2 files`.
fn plural(n: usize, noun: &str) -> String {
    if n == 1 {
        format!("{n} {noun}")
    } else {
        format!("{n} {noun}s")
    }
}

/// Manifest paths always display with `/`, whatever the platform separator.
fn display_path(path: &Path) -> String {
    path.components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}

/// Format one published file: header line plus an indented link summary.
fn file_lines(index: usize, file: &PublishedFile) -> Vec<String> {
    let mut lines = vec![format!("{} {}", format_index(index), display_path(&file.path))];
    match file.links_rewritten {
        Some(0) => lines.push(format!("{}Links: none found", indent(1))),
        Some(n) => lines.push(format!("{}Links: {} rewritten", indent(1), n)),
        None => {}
    }
    lines
}

// ============================================================================
// Check
// ============================================================================

/// Format the manifest produced by a scan, without touching the output root.
///
/// `source_exists` tells an empty source directory apart from a missing one.
pub fn format_scan_output(
    manifest: &Manifest,
    source_root: &Path,
    source_exists: bool,
) -> Vec<String> {
    let mut lines = vec![format!("Manifest ({})", source_root.display())];

    for (i, entry) in manifest.entries.iter().enumerate() {
        lines.push(format!("{} {}", format_index(i + 1), display_path(entry)));
    }

    lines.push(String::new());
    if manifest.is_empty() && !source_exists {
        lines.push(format!(
            "No publishable files ({} is not a directory)",
            source_root.display()
        ));
    } else {
        lines.push(plural(manifest.len(), "publishable file"));
    }
    lines
}

/// Print scan output to stdout.
pub fn print_scan_output(manifest: &Manifest, source_root: &Path) {
    for line in format_scan_output(manifest, source_root, source_root.is_dir()) {
        println!("{}", line);
    }
}

// ============================================================================
// Publish
// ============================================================================

/// Format the result of a publish pass: one entry per file, then a summary.
pub fn format_publish_output(report: &PublishReport, output_root: &Path) -> Vec<String> {
    let mut lines: Vec<String> = report
        .files
        .iter()
        .enumerate()
        .flat_map(|(i, file)| file_lines(i + 1, file))
        .collect();

    if !lines.is_empty() {
        lines.push(String::new());
    }
    lines.push(format!(
        "Published {} to {} ({} rewritten, {})",
        plural(report.files.len(), "file"),
        output_root.display(),
        report.rewritten_count(),
        plural(report.link_count(), "link"),
    ));
    lines
}

/// Print publish output to stdout.
pub fn print_publish_output(report: &PublishReport, output_root: &Path) {
    for line in format_publish_output(report, output_root) {
        println!("{}", line);
    }
}
