//! Init command implementation.

use anyhow::{Context, Result};
use kcblog_render::Template;
use std::fs;
use std::path::Path;

const DEFAULT_CONFIG: &str = r#"# kcblog configuration. Every key is optional.
site:
  name: "kcBlog"
  description: "A simple static site generator."
paths:
  input: "input"
  output: "output"
  template: "template.html"
assets:
  stylesheet_url: "https://raw.githubusercontent.com/kevquirk/simple.css/main/simple.min.css"
  fail_on_error: false
"#;

const SAMPLE_INDEX: &str = r#"# Welcome

This site was generated by kcblog from the markdown files in `input/`.

Directories starting with `_` are never published, so keep drafts in
`input/_drafts/`.
"#;

const SAMPLE_POST: &str = r#"# Hello, world

Every page gets breadcrumbs back to the homepage and a table of contents.

## Writing pages

Add markdown files anywhere under `input/`, then run `kcblog build`.

## Customizing

Edit `template.html`. Available placeholders: `$title`, `$css_path`,
`$breadcrumbs`, `$toc`, `$content`, `$site_name`, `$site_description`,
`$subfolders`.
"#;

/// Initialize a new kcblog project
pub fn init_project(path: Option<&Path>) -> Result<()> {
    let root = path.unwrap_or_else(|| Path::new("."));
    fs::create_dir_all(root).with_context(|| format!("Failed to create {:?}", root))?;

    write_if_missing(&root.join("kcblog.yml"), DEFAULT_CONFIG)?;
    write_if_missing(&root.join("template.html"), Template::builtin_source())?;
    write_if_missing(&root.join("input/index.md"), SAMPLE_INDEX)?;
    write_if_missing(&root.join("input/posts/hello.md"), SAMPLE_POST)?;

    println!("✓ kcblog initialized in {:?}", root);
    println!("  - Write pages in input/");
    println!("  - Run `kcblog build` to generate output/");
    Ok(())
}

fn write_if_missing(path: &Path, contents: &str) -> Result<()> {
    if path.exists() {
        println!("{:?} already exists, leaving it untouched", path);
        return Ok(());
    }

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).with_context(|| format!("Failed to create {:?}", parent))?;
    }
    fs::write(path, contents).with_context(|| format!("Failed to write {:?}", path))?;
    println!("Created {:?}", path);
    Ok(())
}
