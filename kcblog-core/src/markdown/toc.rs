//! Heading outline: nesting and HTML rendering.

use super::html_escape;

/// A heading as it appears in the document, before nesting
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Heading {
    pub level: u32,
    pub name: String,
    pub id: String,
}

/// One node of the nested table of contents
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TocEntry {
    pub level: u32,
    pub name: String,
    pub id: String,
    pub children: Vec<TocEntry>,
}

impl From<Heading> for TocEntry {
    fn from(h: Heading) -> Self {
        Self {
            level: h.level,
            name: h.name,
            id: h.id,
            children: Vec::new(),
        }
    }
}

/// Nest a flat heading list into an outline.
///
/// Each heading becomes a child of the closest preceding heading with a
/// strictly smaller level; otherwise it is a top-level entry.
pub fn nest(headings: Vec<Heading>) -> Vec<TocEntry> {
    let mut roots = Vec::new();
    for heading in headings {
        insert(&mut roots, TocEntry::from(heading));
    }
    roots
}

fn insert(siblings: &mut Vec<TocEntry>, entry: TocEntry) {
    match siblings.last_mut() {
        Some(last) if last.level < entry.level => insert(&mut last.children, entry),
        _ => siblings.push(entry),
    }
}

/// Render the outline as nested lists; empty outlines render to ""
pub fn render_toc(entries: &[TocEntry]) -> String {
    if entries.is_empty() {
        return String::new();
    }

    let mut html = String::from("<div class=\"toc\">\n");
    render_list(&mut html, entries);
    html.push_str("</div>\n");
    html
}

fn render_list(html: &mut String, entries: &[TocEntry]) {
    html.push_str("<ul>\n");
    for entry in entries {
        html.push_str(&format!(
            "<li><a href=\"#{}\">{}</a>",
            html_escape(&entry.id),
            html_escape(&entry.name)
        ));
        if !entry.children.is_empty() {
            html.push('\n');
            render_list(html, &entry.children);
        }
        html.push_str("</li>\n");
    }
    html.push_str("</ul>\n");
}
