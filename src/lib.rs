//! # sitepub
//!
//! Publishes a static website authored on the local filesystem. Every HTML and
//! CSS file under the source directory is copied to the same relative path
//! under an output directory, and local `file://` hyperlinks are rewritten into
//! public URLs along the way.
//!
//! # Architecture: Walk, Then Copy
//!
//! ```text
//! 1. Scan      website/   →  Manifest        (which files to publish)
//! 2. Publish   Manifest   →  publish/        (mirror + rewrite links)
//! ```
//!
//! The whole manifest is built before any file is written. Files are then
//! processed one at a time, and the first failure stops the run.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`scan`] | Walks the source tree and selects `.html`/`.css` files |
//! | [`links`] | Rewrites `<a href="file://…/website/…">` into the public site URL |
//! | [`publish`] | Per-file copy/transform and the [`publish::Publisher`] that drives a run |
//! | [`config`] | Layered `config.toml` loading and validation |
//! | [`output`] | CLI output formatting |
//!
//! # Design Decisions
//!
//! ## Text Substitution, Not HTML Parsing
//!
//! Link rewriting is a single regular expression over the page text. It
//! recognizes one anchor shape (`<a href=Q…Q>`) and leaves everything else
//! alone, including other attribute orders and other tags. Pages are written
//! by hand in a consistent style, and a parser would reformat them.
//!
//! ## Which Pages Get Rewritten
//!
//! By default, a page's links are rewritten only when the directory that
//! contains it is named `*.html`. That is the historical behavior and is kept
//! as-is. Setting `rewrite_trigger = "file-extension"` in `config.toml`
//! rewrites every `.html` page instead. See [`config::RewriteTrigger`].
//!
//! ## Nothing Is Deleted
//!
//! Publishing only ever creates directories and overwrites files. Output from
//! pages since removed from the source stays in the output tree.

pub mod config;
pub mod links;
pub mod output;
pub mod publish;
pub mod scan;

#[cfg(test)]
pub(crate) mod test_helpers;
