//! Content model structs for pages and the site index.

use crate::markdown::TocEntry;
use crate::nav::Breadcrumbs;
use std::path::PathBuf;

/// A single rendered markdown page with its navigation resolved
#[derive(Debug, Clone)]
pub struct Page {
    /// Absolute (or caller-relative) path of the markdown source
    pub source_path: PathBuf,
    /// Source path relative to the input root (e.g., "posts/a.md")
    pub rel_path: PathBuf,
    /// Output path relative to the output root (e.g., "posts/a.html")
    pub output_rel_path: PathBuf,
    /// Directory levels between the input root and this page
    pub depth: usize,

    pub title: String,
    pub content_html: String,
    pub toc: Vec<TocEntry>,
    /// Rendered outline; empty for the homepage and for pages without headings
    pub toc_html: String,

    // Navigation, relative to this page
    pub css_path: String,
    pub home_path: String,
    pub breadcrumbs: Breadcrumbs,
    pub subfolders_html: String,
}

impl Page {
    /// Whether this is `index.md` directly in the input root
    pub fn is_homepage(&self) -> bool {
        self.rel_path.as_os_str() == "index.md"
    }
}

/// Everything a build produced, in traversal order
#[derive(Debug, Clone, Default)]
pub struct SiteIndex {
    pub pages: Vec<Page>,
}

impl SiteIndex {
    pub fn find_by_rel_path(&self, rel_path: &str) -> Option<&Page> {
        self.pages
            .iter()
            .find(|p| p.rel_path.as_os_str() == rel_path)
    }
}
