//! Shared test utilities for the sitepub test suite.
//!
//! Provides fixture setup and output-tree inspection helpers.
//!
//! # Usage
//!
//! ```rust
//! use crate::test_helpers::*;
//!
//! let tmp = setup_fixtures();
//! let manifest = scan(&site_root(&tmp));
//! assert_eq!(entry_strings(&manifest), FIXTURE_MANIFEST);
//! ```

use std::path::{Path, PathBuf};
use tempfile::TempDir;
use walkdir::WalkDir;

use crate::scan::Manifest;

/// Publishable files under `fixtures/website/`, in walk order.
pub const FIXTURE_MANIFEST: &[&str] = &[
    "LEGACY.HTML",
    "about/index.html",
    "archive.html/2020.html",
    "css/style.css",
    "index.html",
    "plain.html",
];

// =========================================================================
// Fixture setup
// =========================================================================

/// Copy `fixtures/website/` to `<tmp>/website` and return the temp directory.
///
/// The copy keeps the `website` directory name so the default link marker
/// matches the links inside the fixture pages.
pub fn setup_fixtures() -> TempDir {
    let tmp = TempDir::new().unwrap();
    let fixtures = Path::new(env!("CARGO_MANIFEST_DIR")).join("fixtures/website");
    copy_dir_recursive(&fixtures, &site_root(&tmp)).unwrap();
    tmp
}

/// The fixture site inside a temp directory from [`setup_fixtures`].
pub fn site_root(tmp: &TempDir) -> PathBuf {
    tmp.path().join("website")
}

fn copy_dir_recursive(src: &Path, dst: &Path) -> std::io::Result<()> {
    std::fs::create_dir_all(dst)?;
    for entry in std::fs::read_dir(src)? {
        let entry = entry?;
        let src_path = entry.path();
        let dst_path = dst.join(entry.file_name());

        if src_path.is_dir() {
            copy_dir_recursive(&src_path, &dst_path)?;
        } else {
            std::fs::copy(&src_path, &dst_path)?;
        }
    }
    Ok(())
}

/// Write `contents` to `path`, creating parent directories.
pub fn write_file(path: &Path, contents: &str) {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).unwrap();
    }
    std::fs::write(path, contents).unwrap();
}

// =========================================================================
// Inspection
// =========================================================================

/// Manifest entries as `/`-separated strings.
pub fn entry_strings(manifest: &Manifest) -> Vec<String> {
    manifest
        .entries
        .iter()
        .map(|p| p.to_string_lossy().replace('\\', "/"))
        .collect()
}

/// Every regular file under `root`, relative and `/`-separated, in walk order.
pub fn list_files(root: &Path) -> Vec<String> {
    WalkDir::new(root)
        .sort_by_file_name()
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file())
        .map(|e| {
            e.path()
                .strip_prefix(root)
                .unwrap()
                .to_string_lossy()
                .replace('\\', "/")
        })
        .collect()
}

/// `(relative path, bytes)` for every file under `root`.
pub fn snapshot(root: &Path) -> Vec<(String, Vec<u8>)> {
    list_files(root)
        .into_iter()
        .map(|rel| {
            let bytes = std::fs::read(root.join(&rel)).unwrap();
            (rel, bytes)
        })
        .collect()
}
