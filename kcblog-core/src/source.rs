//! Source tree discovery.

use std::path::{Path, PathBuf};
use walkdir::{DirEntry, WalkDir};

/// A visible directory of the source tree
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceDir {
    /// Path relative to the input root ("" for the root itself)
    pub rel_dir: PathBuf,
    /// Names of visible immediate child directories, sorted
    pub subdirs: Vec<String>,
    /// Markdown files directly in this directory, relative to the input root, sorted
    pub pages: Vec<PathBuf>,
}

/// Ordered hierarchy of visible directories under an input root
#[derive(Debug, Clone)]
pub struct SourceTree {
    root: PathBuf,
    dirs: Vec<SourceDir>,
}

impl SourceTree {
    /// Walk `root` in sorted pre-order, pruning every `_`-prefixed entry
    /// below the root: hidden directories are never descended into and
    /// hidden markdown files are never collected.
    pub fn scan(root: &Path) -> Result<Self, walkdir::Error> {
        let mut dirs: Vec<SourceDir> = Vec::new();

        let walker = WalkDir::new(root)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|e| e.depth() == 0 || !is_hidden(e));

        for entry in walker {
            let entry = entry?;
            let rel = entry
                .path()
                .strip_prefix(root)
                .unwrap_or(entry.path())
                .to_path_buf();

            if entry.file_type().is_dir() {
                if entry.depth() > 0 {
                    if let Some(parent) = find_dir(&mut dirs, rel.parent()) {
                        parent.subdirs.push(file_name(&entry));
                    }
                }
                dirs.push(SourceDir {
                    rel_dir: rel,
                    subdirs: Vec::new(),
                    pages: Vec::new(),
                });
            } else if entry.file_type().is_file() && is_markdown(entry.path()) {
                if let Some(parent) = find_dir(&mut dirs, rel.parent()) {
                    parent.pages.push(rel);
                }
            }
        }

        Ok(Self {
            root: root.to_path_buf(),
            dirs,
        })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Visible directories in traversal order, root first
    pub fn dirs(&self) -> &[SourceDir] {
        &self.dirs
    }

    pub fn page_count(&self) -> usize {
        self.dirs.iter().map(|d| d.pages.len()).sum()
    }
}

fn find_dir<'a>(dirs: &'a mut [SourceDir], rel_dir: Option<&Path>) -> Option<&'a mut SourceDir> {
    let rel_dir = rel_dir.unwrap_or_else(|| Path::new(""));
    dirs.iter_mut().rev().find(|d| d.rel_dir == rel_dir)
}

fn file_name(entry: &DirEntry) -> String {
    entry.file_name().to_string_lossy().into_owned()
}

fn is_hidden(entry: &DirEntry) -> bool {
    entry.file_name().to_string_lossy().starts_with('_')
}

fn is_markdown(path: &Path) -> bool {
    path.extension().is_some_and(|ext| ext == "md")
}
