//! Relative navigation: depth, link prefixes, breadcrumbs, subfolder links.
//!
//! Every link produced here is relative to the page that embeds it, so the
//! output tree can be served from any base path or opened from disk.

use crate::markdown::html_escape;
use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use std::path::{Component, Path};

// Unreserved URL characters pass through
const SEGMENT_ENCODE_SET: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~');

/// Number of directory levels between the input root and a file.
///
/// `rel_path` is the file's path relative to the input root, so
/// `index.md` has depth 0 and `a/b/page.md` has depth 2.
pub fn depth(rel_path: &Path) -> usize {
    rel_path
        .parent()
        .map(|dir| dir_segments(dir).len())
        .unwrap_or(0)
}

/// The normal components of a directory path relative to the input root
pub fn dir_segments(rel_dir: &Path) -> Vec<String> {
    rel_dir
        .components()
        .filter_map(|c| match c {
            Component::Normal(s) => Some(s.to_string_lossy().into_owned()),
            _ => None,
        })
        .collect()
}

/// `"../"` repeated `depth` times
pub fn relative_prefix(depth: usize) -> String {
    "../".repeat(depth)
}

pub fn css_path(depth: usize) -> String {
    format!("{}static/main.css", relative_prefix(depth))
}

pub fn home_path(depth: usize) -> String {
    format!("{}index.html", relative_prefix(depth))
}

/// One link in a breadcrumb trail
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Crumb {
    pub label: String,
    pub href: String,
}

/// Ancestor trail from the site root to a page's directory
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Breadcrumbs {
    pub crumbs: Vec<Crumb>,
}

impl Breadcrumbs {
    /// Build the trail for pages living in `rel_dir`.
    ///
    /// Pages in the root get no trail. Otherwise the trail starts with
    /// `Home`, then one crumb per segment, each pointing at that
    /// ancestor's `index.html`.
    pub fn for_dir(rel_dir: &Path) -> Self {
        let segments = dir_segments(rel_dir);
        if segments.is_empty() {
            return Self::default();
        }

        let n = segments.len();
        let mut crumbs = Vec::with_capacity(n + 1);
        crumbs.push(Crumb {
            label: "Home".to_string(),
            href: home_path(n),
        });
        for (i, segment) in segments.into_iter().enumerate() {
            crumbs.push(Crumb {
                label: segment,
                href: home_path(n - i - 1),
            });
        }

        Self { crumbs }
    }

    pub fn is_empty(&self) -> bool {
        self.crumbs.is_empty()
    }

    pub fn to_html(&self) -> String {
        let Some((home, ancestors)) = self.crumbs.split_first() else {
            return String::new();
        };

        let mut html = String::from("<div class=\"breadcrumbs\">\n");
        html.push_str(&format!(
            "<a href=\"{}\">{}</a>\n",
            html_escape(&home.href),
            html_escape(&home.label)
        ));
        for crumb in ancestors {
            html.push_str(&format!(
                " / <a href=\"{}\">{}</a>",
                html_escape(&crumb.href),
                html_escape(&crumb.label)
            ));
        }
        html.push_str("</div>\n");
        html
    }
}

/// Percent-encode one path segment for use inside an href
fn encode_segment(segment: &str) -> String {
    utf8_percent_encode(segment, SEGMENT_ENCODE_SET).to_string()
}

/// Links to the index pages of a directory's visible children
pub fn subfolders_html(subdirs: &[String]) -> String {
    subdirs
        .iter()
        .map(|dir| {
            format!(
                "<a href=\"{}/index.html\">{}</a>\n",
                encode_segment(dir),
                html_escape(dir)
            )
        })
        .collect()
}
