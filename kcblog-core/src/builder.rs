//! Site building logic - walks the source tree and resolves every page.

use crate::{
    config::Config,
    markdown::MarkdownProcessor,
    models::{Page, SiteIndex},
    nav::{self, Breadcrumbs},
    source::{SourceDir, SourceTree},
};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum BuildError {
    #[error("IO error at {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to walk source tree: {0}")]
    Walk(#[from] walkdir::Error),

    #[error("Input directory {0:?} does not exist")]
    MissingInput(PathBuf),

    #[error("Refusing to clean {output:?}: it contains the input directory {input:?}")]
    UnsafeOutput { input: PathBuf, output: PathBuf },
}

impl BuildError {
    fn io(path: &Path, source: std::io::Error) -> Self {
        BuildError::Io {
            path: path.to_path_buf(),
            source,
        }
    }
}

/// Main site builder
pub struct SiteBuilder {
    config: Config,
    processor: MarkdownProcessor,
}

impl SiteBuilder {
    pub fn new(config: Config) -> Self {
        Self {
            config,
            processor: MarkdownProcessor::new(),
        }
    }

    /// Read and render every visible markdown page of the input tree
    pub fn build(&self) -> Result<SiteIndex, BuildError> {
        let input_dir = self.config.input_dir();
        if !input_dir.is_dir() {
            return Err(BuildError::MissingInput(input_dir));
        }

        // Discover visible directories and pages
        let tree = SourceTree::scan(&input_dir)?;
        tracing::info!("Found {} markdown files", tree.page_count());

        // Pages of one directory share its subfolder links
        let mut pages = Vec::with_capacity(tree.page_count());
        for dir in tree.dirs() {
            let subfolders = nav::subfolders_html(&dir.subdirs);
            for rel_path in &dir.pages {
                let page = self.render_page(tree.root(), dir, rel_path, &subfolders)?;
                tracing::debug!("Rendered {:?} (depth {})", page.rel_path, page.depth);
                pages.push(page);
            }
        }

        tracing::info!("Built site index with {} pages", pages.len());

        Ok(SiteIndex { pages })
    }

    fn render_page(
        &self,
        root: &Path,
        dir: &SourceDir,
        rel_path: &Path,
        subfolders_html: &str,
    ) -> Result<Page, BuildError> {
        let source_path = root.join(rel_path);
        let markdown =
            fs::read_to_string(&source_path).map_err(|e| BuildError::io(&source_path, e))?;

        // Convert markdown and resolve relative navigation
        let rendered = self.processor.convert(&markdown);
        let depth = nav::depth(rel_path);

        let mut page = Page {
            source_path,
            rel_path: rel_path.to_path_buf(),
            output_rel_path: rel_path.with_extension("html"),
            depth,
            title: rendered.title(),
            content_html: String::new(),
            toc: Vec::new(),
            toc_html: String::new(),
            css_path: nav::css_path(depth),
            home_path: nav::home_path(depth),
            breadcrumbs: Breadcrumbs::for_dir(&dir.rel_dir),
            subfolders_html: subfolders_html.to_string(),
        };

        // The homepage never carries a table of contents
        if !page.is_homepage() {
            page.toc_html = rendered.toc_html();
        }
        page.toc = rendered.toc;
        page.content_html = rendered.html;

        Ok(page)
    }
}

/// Remove everything inside `output_dir`, keeping the directory itself.
///
/// A missing output directory is not an error. Cleaning is refused when
/// the output directory is (or contains) the input directory.
pub fn clean_output_dir(output_dir: &Path, input_dir: &Path) -> Result<(), BuildError> {
    if !output_dir.exists() {
        return Ok(());
    }

    let output_abs = fs::canonicalize(output_dir).map_err(|e| BuildError::io(output_dir, e))?;
    if let Ok(input_abs) = fs::canonicalize(input_dir) {
        if input_abs.starts_with(&output_abs) {
            return Err(BuildError::UnsafeOutput {
                input: input_dir.to_path_buf(),
                output: output_dir.to_path_buf(),
            });
        }
    }

    let entries = fs::read_dir(output_dir).map_err(|e| BuildError::io(output_dir, e))?;
    for entry in entries {
        let entry = entry.map_err(|e| BuildError::io(output_dir, e))?;
        let path = entry.path();
        let file_type = entry.file_type().map_err(|e| BuildError::io(&path, e))?;
        if file_type.is_dir() {
            fs::remove_dir_all(&path).map_err(|e| BuildError::io(&path, e))?;
        } else {
            fs::remove_file(&path).map_err(|e| BuildError::io(&path, e))?;
        }
    }

    tracing::debug!("Cleaned output directory {:?}", output_dir);
    Ok(())
}
