//! Local-to-public hyperlink rewriting.
//!
//! Pages authored on disk link to each other with `file://` URLs. Before
//! publishing, those links are pointed at the public site:
//!
//! ```text
//! <a href="file:///Users/x/website/about/index.html">
//!                        ↓
//! <a href="https://www.chriskimmel.com/about/index.html">
//! ```
//!
//! Everything up to and including the first `<marker>/` segment after some
//! local prefix is replaced by the site URL; the rest is kept verbatim.
//!
//! This is a targeted text substitution, not an HTML transformer. It only
//! recognizes `<a href=...>` with `href` first, a matching pair of quotes, and
//! the closing `>` right after the closing quote. Other attribute orders and
//! unusual markup are left alone. Rewriting is idempotent for well-formed
//! anchors only: when the kept remainder itself holds another local anchor
//! (an unclosed quote swallowing the next tag), that inner link is rewritten
//! on a later pass rather than the first.

use regex::{Captures, Regex};

/// Rewrites `file://` anchors whose path passes through a marker segment.
#[derive(Debug, Clone)]
pub struct LinkRewriter {
    pattern: Regex,
    site_url: String,
}

impl LinkRewriter {
    /// Build a rewriter for links containing `<marker>/`, pointing them at `site_url`.
    ///
    /// `site_url` is used as-is, so it should end with `/`.
    pub fn new(marker: &str, site_url: &str) -> Result<Self, regex::Error> {
        // No backreferences in `regex`, so each quote style gets its own branch
        let marker = regex::escape(marker);
        let pattern = Regex::new(&format!(
            r#"<a\s+href\s*=\s*(?:"file://.+?{marker}/(?P<dq>.+?)"|'file://.+?{marker}/(?P<sq>.+?)')>"#
        ))?;
        Ok(Self {
            pattern,
            site_url: site_url.to_string(),
        })
    }

    /// Return `page` with every matching local link rewritten.
    pub fn rewrite(&self, page: &str) -> String {
        self.rewrite_counted(page).0
    }

    /// Like [`rewrite`](Self::rewrite), also returning how many links changed.
    pub fn rewrite_counted(&self, page: &str) -> (String, usize) {
        let mut count = 0;
        let rewritten = self.pattern.replace_all(page, |caps: &Captures| {
            let quoted = caps
                .name("dq")
                .map(|m| ('"', m.as_str()))
                .or_else(|| caps.name("sq").map(|m| ('\'', m.as_str())));
            match quoted {
                Some((quote, rest)) => {
                    count += 1;
                    format!("<a href={quote}{}{rest}{quote}>", self.site_url)
                }
                None => caps[0].to_string(),
            }
        });
        (rewritten.into_owned(), count)
    }
}
