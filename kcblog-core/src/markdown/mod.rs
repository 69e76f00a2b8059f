//! Markdown processing: HTML body plus heading outline.

pub mod toc;

use crate::slug::UniqueIds;
use pulldown_cmark::{html, CowStr, Event, Options, Parser, Tag, TagEnd};

pub use toc::{render_toc, Heading, TocEntry};

/// Output of a single markdown conversion
#[derive(Debug, Clone, Default)]
pub struct RenderedMarkdown {
    pub html: String,
    pub toc: Vec<TocEntry>,
}

impl RenderedMarkdown {
    /// Name of the first outline entry, or "" for documents without headings
    pub fn title(&self) -> String {
        self.toc
            .first()
            .map(|entry| entry.name.clone())
            .unwrap_or_default()
    }

    /// The outline rendered as nested lists
    pub fn toc_html(&self) -> String {
        render_toc(&self.toc)
    }
}

/// Markdown processor that also extracts a table of contents
pub struct MarkdownProcessor {
    options: Options,
}

impl MarkdownProcessor {
    pub fn new() -> Self {
        let mut options = Options::empty();
        options.insert(Options::ENABLE_TABLES);
        options.insert(Options::ENABLE_FOOTNOTES);
        options.insert(Options::ENABLE_STRIKETHROUGH);
        options.insert(Options::ENABLE_TASKLISTS);
        options.insert(Options::ENABLE_HEADING_ATTRIBUTES);

        Self { options }
    }

    /// Convert markdown to HTML, giving every heading an id that the
    /// outline links to
    pub fn convert(&self, markdown: &str) -> RenderedMarkdown {
        // Parse markdown into events
        let events: Vec<Event> = Parser::new_ext(markdown, self.options).collect();

        // Collect headings for the outline, then stamp their ids back on
        let headings = collect_headings(&events);
        let events = attach_heading_ids(events, &headings);

        // Render to HTML
        let mut html_output = String::new();
        html::push_html(&mut html_output, events.into_iter());

        RenderedMarkdown {
            html: html_output,
            toc: toc::nest(headings),
        }
    }
}

impl Default for MarkdownProcessor {
    fn default() -> Self {
        Self::new()
    }
}

/// Collect headings in document order and settle their ids.
///
/// Explicit `{#id}` attributes win; the rest are derived from the heading
/// text and kept unique within the document.
fn collect_headings(events: &[Event]) -> Vec<Heading> {
    let mut raw: Vec<(u32, String, Option<String>)> = Vec::new();
    let mut current: Option<(u32, String, Option<String>)> = None;

    for event in events {
        match event {
            Event::Start(Tag::Heading { level, id, .. }) => {
                let explicit = id.as_ref().map(|s| s.to_string());
                current = Some((*level as u32, String::new(), explicit));
            }
            Event::Text(text) | Event::Code(text) => {
                if let Some((_, ref mut name, _)) = current {
                    name.push_str(text.as_ref());
                }
            }
            Event::SoftBreak | Event::HardBreak => {
                if let Some((_, ref mut name, _)) = current {
                    name.push(' ');
                }
            }
            Event::End(TagEnd::Heading(_)) => {
                if let Some(heading) = current.take() {
                    raw.push(heading);
                }
            }
            _ => {}
        }
    }

    let mut ids = UniqueIds::new();
    for (_, _, explicit) in &raw {
        if let Some(id) = explicit {
            ids.reserve(id);
        }
    }

    raw.into_iter()
        .map(|(level, name, explicit)| {
            let name = name.trim().to_string();
            let id = explicit.unwrap_or_else(|| ids.next_for(&name));
            Heading { level, name, id }
        })
        .collect()
}

fn attach_heading_ids<'a>(events: Vec<Event<'a>>, headings: &[Heading]) -> Vec<Event<'a>> {
    let mut heading_iter = headings.iter();
    let mut result = Vec::with_capacity(events.len());

    for event in events {
        match event {
            Event::Start(Tag::Heading {
                level,
                id,
                classes,
                attrs,
            }) => {
                let id = match heading_iter.next() {
                    Some(next) => Some(CowStr::from(next.id.clone())),
                    None => id,
                };
                result.push(Event::Start(Tag::Heading {
                    level,
                    id,
                    classes,
                    attrs,
                }));
            }
            other => result.push(other),
        }
    }

    result
}

/// Escape text for use in HTML element content and attribute values
pub fn html_escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}
