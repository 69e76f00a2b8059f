//! # kcblog-core
//!
//! Core library for the kcblog static site generator.
//!
//! This crate discovers the markdown source tree, renders each page to HTML
//! with its table of contents, and resolves the relative links (stylesheet,
//! home, breadcrumbs, subfolders) every page needs to work at any nesting
//! depth.

pub mod assets;
pub mod builder;
pub mod config;
pub mod markdown;
pub mod models;
pub mod nav;
pub mod slug;
pub mod source;

pub use assets::{AssetError, AssetFetcher};
pub use builder::{clean_output_dir, BuildError, SiteBuilder};
pub use config::{Config, ConfigError};
pub use markdown::{html_escape, MarkdownProcessor, RenderedMarkdown, TocEntry};
pub use models::{Page, SiteIndex};
pub use nav::{Breadcrumbs, Crumb};
pub use slug::slugify;
pub use source::{SourceDir, SourceTree};
