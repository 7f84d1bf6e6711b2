//! Copying and transforming publishable files.
//!
//! For every manifest entry, the source file is read as text, its links are
//! optionally rewritten, and the result is written to the mirrored path under
//! the output root:
//!
//! ```text
//! website/about/index.html   →   publish/about/index.html
//! website/css/style.css      →   publish/css/style.css
//! ```
//!
//! ## Failure Model
//!
//! Files are processed one at a time, in manifest order. The first file that
//! cannot be read, written, or given a parent directory aborts the run; files
//! already written stay written. Non-UTF-8 sources count as unreadable.
//!
//! Existing destination files are overwritten. Files removed from the source
//! since an earlier run are *not* removed from the output.

use crate::config::{PublishConfig, RewriteTrigger};
use crate::links::LinkRewriter;
use crate::scan::{self, Manifest};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PublishError {
    #[error("Failed to create directory {path}: {source}")]
    CreateDir {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Invalid link pattern: {0}")]
    Pattern(#[from] regex::Error),
    #[error("Cannot derive a link marker from source root {0}; set link_marker in config.toml")]
    NoLinkMarker(PathBuf),
}

/// Result of publishing a single file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublishedFile {
    /// Path relative to both the source and output roots.
    pub path: PathBuf,
    /// `Some(n)` if the link rewriter ran (replacing `n` links), `None` if copied verbatim.
    pub links_rewritten: Option<usize>,
}

/// Everything one publish pass wrote, in order.
#[derive(Debug, Default)]
pub struct PublishReport {
    pub files: Vec<PublishedFile>,
}

impl PublishReport {
    /// Number of files that went through the link rewriter.
    pub fn rewritten_count(&self) -> usize {
        self.files
            .iter()
            .filter(|f| f.links_rewritten.is_some())
            .count()
    }

    /// Total links replaced across all files.
    pub fn link_count(&self) -> usize {
        self.files.iter().filter_map(|f| f.links_rewritten).sum()
    }
}

/// Whether the file about to be written at `dest` gets its links rewritten.
pub fn should_rewrite(dest: &Path, trigger: RewriteTrigger) -> bool {
    let subject = match trigger {
        RewriteTrigger::ParentDirectory => dest.parent(),
        RewriteTrigger::FileExtension => Some(dest),
    };
    subject
        .and_then(Path::extension)
        .is_some_and(|ext| ext.eq_ignore_ascii_case("html"))
}

/// Copy `src` to `dest`, rewriting links when `trigger` selects the file.
///
/// Creates any missing parent directories of `dest` and overwrites an existing
/// file. Returns the number of links replaced, or `None` if the content was
/// copied verbatim.
pub fn transform_and_copy(
    src: &Path,
    dest: &Path,
    rewriter: &LinkRewriter,
    trigger: RewriteTrigger,
) -> Result<Option<usize>, PublishError> {
    if let Some(parent) = dest.parent() {
        fs::create_dir_all(parent).map_err(|source| PublishError::CreateDir {
            path: parent.to_path_buf(),
            source,
        })?;
    }

    let contents = fs::read_to_string(src).map_err(|source| PublishError::Read {
        path: src.to_path_buf(),
        source,
    })?;

    let (contents, links) = if should_rewrite(dest, trigger) {
        let (rewritten, n) = rewriter.rewrite_counted(&contents);
        (rewritten, Some(n))
    } else {
        (contents, None)
    };

    fs::write(dest, contents).map_err(|source| PublishError::Write {
        path: dest.to_path_buf(),
        source,
    })?;

    Ok(links)
}

/// Publishes one source tree into one output tree.
#[derive(Debug)]
pub struct Publisher {
    source_root: PathBuf,
    output_root: PathBuf,
    rewriter: LinkRewriter,
    trigger: RewriteTrigger,
}

impl Publisher {
    /// Prepare a publisher; compiles the link pattern once for the whole run.
    pub fn new(
        source_root: &Path,
        output_root: &Path,
        config: &PublishConfig,
    ) -> Result<Self, PublishError> {
        let marker = match &config.link_marker {
            Some(marker) => marker.clone(),
            None => default_link_marker(source_root)
                .ok_or_else(|| PublishError::NoLinkMarker(source_root.to_path_buf()))?,
        };
        let rewriter = LinkRewriter::new(&marker, &config.site_url)?;

        Ok(Self {
            source_root: source_root.to_path_buf(),
            output_root: output_root.to_path_buf(),
            rewriter,
            trigger: config.rewrite_trigger,
        })
    }

    /// Walk the source root; an output root nested inside it is skipped.
    pub fn manifest(&self) -> Manifest {
        scan::scan_excluding(&self.source_root, Some(self.output_root.as_path()))
    }

    /// Run one full publish pass, stopping at the first failing file.
    pub fn run(&self) -> Result<PublishReport, PublishError> {
        let manifest = self.manifest();
        let mut report = PublishReport::default();

        for rel in manifest.entries {
            let src = self.source_root.join(&rel);
            let dest = self.output_root.join(&rel);
            let links_rewritten = transform_and_copy(&src, &dest, &self.rewriter, self.trigger)?;
            report.files.push(PublishedFile {
                path: rel,
                links_rewritten,
            });
        }

        Ok(report)
    }
}

/// The source root's final path component, e.g. `website` for `/home/c/website`.
///
/// Falls back to the canonical path so that `.` resolves to the real directory
/// name. Returns `None` for roots with no usable name, such as `/`.
fn default_link_marker(source_root: &Path) -> Option<String> {
    let name = match source_root.file_name() {
        Some(name) => name.to_os_string(),
        None => source_root.canonicalize().ok()?.file_name()?.to_os_string(),
    };
    name.into_string().ok()
}
