//! Static HTML shell with SSR placeholders.

use std::io;
use std::path::Path;

use tracing::warn;

use super::PageHead;

/// Replaced with the Open Graph namespace prefix.
pub const OG_NAMESPACE_PLACEHOLDER: &str = "{ssr-og}";
/// Replaced with the page title text.
pub const TITLE_PLACEHOLDER: &str = "{ssr-title}";
/// Replaced with the metadata block.
pub const HEAD_PLACEHOLDER: &str = "<!--{ssr-head}-->";

const PLACEHOLDERS: [&str; 3] = [OG_NAMESPACE_PLACEHOLDER, TITLE_PLACEHOLDER, HEAD_PLACEHOLDER];

/// Immutable HTML shell produced by the frontend build.
///
/// Loaded once at start-up and shared behind an `Arc`; rendering never
/// mutates it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageTemplate {
    html: String,
}

impl PageTemplate {
    /// Wrap template markup, warning about any placeholder it lacks.
    pub fn new(html: impl Into<String>) -> Self {
        let template = Self { html: html.into() };
        for placeholder in template.missing_placeholders() {
            warn!(placeholder, "page template is missing an SSR placeholder");
        }
        template
    }

    /// Read the template from disk.
    ///
    /// # Errors
    /// Returns the underlying I/O error when the file cannot be read.
    pub fn load(path: &Path) -> io::Result<Self> {
        let html = std::fs::read_to_string(path)?;
        Ok(Self::new(html))
    }

    /// Placeholders absent from the markup.
    #[must_use]
    pub fn missing_placeholders(&self) -> Vec<&'static str> {
        PLACEHOLDERS
            .into_iter()
            .filter(|placeholder| !self.html.contains(placeholder))
            .collect()
    }

    /// Raw template markup.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.html
    }

    /// Splice `head` into a copy of the template.
    ///
    /// Only the first occurrence of each placeholder is replaced.
    #[must_use]
    pub fn render(&self, head: &PageHead) -> String {
        self.html
            .replacen(OG_NAMESPACE_PLACEHOLDER, head.namespace(), 1)
            .replacen(TITLE_PLACEHOLDER, head.title(), 1)
            .replacen(HEAD_PLACEHOLDER, head.head_html(), 1)
    }
}
