//! Placeholder templates.

use kcblog_core::{config::SiteConfig, html_escape, Page};
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

const BUILTIN_PAGE: &str = include_str!("../templates/page.html");

// `$$`, `$name` or `${name}`
static PLACEHOLDER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\$(?:(\$)|([_A-Za-z][_A-Za-z0-9]*)|\{([_A-Za-z][_A-Za-z0-9]*)\})")
        .expect("valid regex")
});

#[derive(Error, Debug)]
pub enum TemplateError {
    #[error("Failed to read template {path:?}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Template uses unknown placeholder ${name}")]
    UnknownPlaceholder { name: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Literal(String),
    Placeholder(String),
}

/// A parsed template: literal text interleaved with named placeholders
#[derive(Debug, Clone)]
pub struct Template {
    segments: Vec<Segment>,
}

impl Template {
    /// Parse template source.
    ///
    /// `$$` renders a literal `$`. A `$` that starts no placeholder is kept
    /// as-is.
    pub fn parse(source: &str) -> Self {
        let mut segments = Vec::new();
        let mut literal = String::new();
        let mut last = 0;

        for caps in PLACEHOLDER.captures_iter(source) {
            let Some(whole) = caps.get(0) else { continue };
            literal.push_str(&source[last..whole.start()]);
            last = whole.end();

            if caps.get(1).is_some() {
                literal.push('$');
                continue;
            }
            if let Some(name) = caps.get(2).or_else(|| caps.get(3)) {
                if !literal.is_empty() {
                    segments.push(Segment::Literal(std::mem::take(&mut literal)));
                }
                segments.push(Segment::Placeholder(name.as_str().to_string()));
            }
        }

        literal.push_str(&source[last..]);
        if !literal.is_empty() {
            segments.push(Segment::Literal(literal));
        }

        Self { segments }
    }

    /// Read and parse a template file
    pub fn load(path: &Path) -> Result<Self, TemplateError> {
        let source = fs::read_to_string(path).map_err(|source| TemplateError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(Self::parse(&source))
    }

    /// The page template bundled with kcblog
    pub fn builtin() -> Self {
        Self::parse(BUILTIN_PAGE)
    }

    /// The raw source of the bundled page template
    pub fn builtin_source() -> &'static str {
        BUILTIN_PAGE
    }

    /// Placeholder names in order of appearance (duplicates included)
    pub fn placeholders(&self) -> impl Iterator<Item = &str> {
        self.segments.iter().filter_map(|s| match s {
            Segment::Placeholder(name) => Some(name.as_str()),
            Segment::Literal(_) => None,
        })
    }

    /// Fail on the first placeholder that is not in `known`
    pub fn check_placeholders(&self, known: &[&str]) -> Result<(), TemplateError> {
        match self.placeholders().find(|name| !known.contains(name)) {
            Some(name) => Err(TemplateError::UnknownPlaceholder {
                name: name.to_string(),
            }),
            None => Ok(()),
        }
    }

    /// Substitute every placeholder.
    ///
    /// Values are inserted verbatim and never re-scanned for placeholders.
    /// Values without a matching placeholder are ignored.
    pub fn render(&self, values: &HashMap<&str, &str>) -> Result<String, TemplateError> {
        let mut out = String::new();
        for segment in &self.segments {
            match segment {
                Segment::Literal(text) => out.push_str(text),
                Segment::Placeholder(name) => {
                    let value = values.get(name.as_str()).ok_or_else(|| {
                        TemplateError::UnknownPlaceholder { name: name.clone() }
                    })?;
                    out.push_str(value);
                }
            }
        }
        Ok(out)
    }
}

/// Values for one page, keyed by placeholder name.
///
/// HTML fragments (`breadcrumbs`, `toc`, `content`, `subfolders`) are
/// inserted as-is; plain text fields are escaped on construction.
#[derive(Debug, Clone)]
pub struct PageTemplate {
    pub title: String,
    pub css_path: String,
    pub breadcrumbs: String,
    pub toc: String,
    pub content: String,
    pub site_name: String,
    pub site_description: String,
    pub subfolders: String,
}

impl PageTemplate {
    /// Every placeholder a page template may use
    pub const PLACEHOLDERS: [&'static str; 8] = [
        "title",
        "css_path",
        "breadcrumbs",
        "toc",
        "content",
        "site_name",
        "site_description",
        "subfolders",
    ];

    pub fn from_page(page: &Page, site: &SiteConfig) -> Self {
        Self {
            title: html_escape(&page.title),
            css_path: html_escape(&page.css_path),
            breadcrumbs: page.breadcrumbs.to_html(),
            toc: page.toc_html.clone(),
            content: page.content_html.clone(),
            site_name: html_escape(&site.name),
            site_description: html_escape(&site.description),
            subfolders: page.subfolders_html.clone(),
        }
    }

    /// The explicit placeholder -> value mapping
    pub fn placeholders(&self) -> HashMap<&'static str, &str> {
        HashMap::from([
            ("title", self.title.as_str()),
            ("css_path", self.css_path.as_str()),
            ("breadcrumbs", self.breadcrumbs.as_str()),
            ("toc", self.toc.as_str()),
            ("content", self.content.as_str()),
            ("site_name", self.site_name.as_str()),
            ("site_description", self.site_description.as_str()),
            ("subfolders", self.subfolders.as_str()),
        ])
    }

    pub fn render(&self, template: &Template) -> Result<String, TemplateError> {
        template.render(&self.placeholders())
    }
}
