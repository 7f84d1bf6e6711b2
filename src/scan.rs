//! Source tree scanning and manifest generation.
//!
//! Walks the website source directory and selects every publishable file,
//! producing a [`Manifest`] of paths relative to the source root.
//!
//! ## Selection Rule
//!
//! A file is publishable when its name ends in `.html` or `.css`, compared
//! case-insensitively on the extension:
//!
//! ```text
//! website/
//! ├── config.toml          # skipped
//! ├── index.html           # published
//! ├── LEGACY.HTML          # published
//! ├── css/
//! │   └── style.Css        # published
//! ├── img/
//! │   └── logo.png         # skipped
//! └── notes.htm            # skipped
//! ```
//!
//! ## Error Tolerance
//!
//! The walk never fails. A missing or unreadable source root produces an empty
//! manifest, and unreadable subdirectories are skipped. Whether a missing
//! source directory is a problem is for the caller to decide.
//!
//! Symlinks are followed only for the name check: one that points at a
//! directory is skipped, while a dangling one is listed so that publishing
//! reports it as a read failure instead of dropping it silently.

use serde::Serialize;
use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

const PUBLISHABLE_SUFFIXES: &[&str] = &[".html", ".css"];

/// Manifest output from the scan stage.
#[derive(Debug, Default, Serialize)]
pub struct Manifest {
    /// Publishable files, relative to the source root, in depth-first order.
    pub entries: Vec<PathBuf>,
}

impl Manifest {
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// True iff `name` ends with `.html` or `.css`, ignoring ASCII case.
pub fn is_publishable(name: impl AsRef<OsStr>) -> bool {
    let bytes = name.as_ref().as_encoded_bytes();
    PUBLISHABLE_SUFFIXES.iter().any(|suffix| {
        bytes.len() >= suffix.len()
            && bytes[bytes.len() - suffix.len()..].eq_ignore_ascii_case(suffix.as_bytes())
    })
}

/// Scan `root` for publishable files.
pub fn scan(root: &Path) -> Manifest {
    scan_excluding(root, None)
}

/// Scan `root` for publishable files, pruning the `exclude` subtree.
///
/// `exclude` is typically the output root. When it lives inside the source
/// root, pruning keeps a second run from re-publishing the first run's output.
/// An `exclude` outside `root`, or one that does not exist, has no effect.
pub fn scan_excluding(root: &Path, exclude: Option<&Path>) -> Manifest {
    let pruned = exclude.and_then(|ex| nested_subtree(root, ex));

    let entries = WalkDir::new(root)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|e| pruned.as_deref() != Some(e.path()))
        .filter_map(|e| e.ok())
        .filter(|e| !e.file_type().is_dir())
        .filter(|e| is_publishable(e.file_name()))
        // Symlinked directories are skipped; dangling links stay and fail on read
        .filter(|e| !e.path_is_symlink() || !e.path().is_dir())
        .filter_map(|e| e.path().strip_prefix(root).ok().map(Path::to_path_buf))
        // A root that is itself a file yields one empty relative path
        .filter(|rel| !rel.as_os_str().is_empty())
        .collect();

    Manifest { entries }
}

/// Express `inner` as a path under `root` in the form the walk will yield.
///
/// Both paths must exist; returns `None` if `inner` is not strictly inside `root`.
fn nested_subtree(root: &Path, inner: &Path) -> Option<PathBuf> {
    let root_abs = root.canonicalize().ok()?;
    let inner_abs = inner.canonicalize().ok()?;
    let rel = inner_abs.strip_prefix(&root_abs).ok()?;
    if rel.as_os_str().is_empty() {
        return None;
    }
    Some(root.join(rel))
}
