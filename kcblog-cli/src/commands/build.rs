//! Build command implementation.

use anyhow::{Context, Result};
use kcblog_core::{clean_output_dir, AssetFetcher, Config, Page, SiteBuilder, SiteIndex};
use kcblog_render::{PageTemplate, Template};
use std::fs;
use std::path::{Path, PathBuf};

/// Command-line and environment overrides layered over the config file
#[derive(Debug, Clone, Default)]
pub struct BuildOptions {
    pub input: Option<PathBuf>,
    pub output: Option<PathBuf>,
    pub template: Option<PathBuf>,
    pub site_name: Option<String>,
    pub site_description: Option<String>,
    pub stylesheet_url: Option<String>,
    pub skip_assets: bool,
    pub fail_on_asset_error: bool,
}

impl BuildOptions {
    /// Layer the overrides onto `config`.
    ///
    /// Paths given on the command line are relative to `cwd`, not to the
    /// config file, so they are made absolute here.
    fn apply(self, config: &mut Config, cwd: &Path) {
        if let Some(input) = self.input {
            config.paths.input = cwd.join(input);
        }
        if let Some(output) = self.output {
            config.paths.output = cwd.join(output);
        }
        if let Some(template) = self.template {
            config.paths.template = Some(cwd.join(template));
        }
        if let Some(name) = self.site_name {
            config.site.name = name;
        }
        if let Some(description) = self.site_description {
            config.site.description = description;
        }
        if let Some(url) = self.stylesheet_url {
            config.assets.stylesheet_url = url;
        }
        config.assets.skip |= self.skip_assets;
        config.assets.fail_on_error |= self.fail_on_asset_error;
    }
}

/// Load config, apply overrides and build the site
pub fn build_site(config_path: &Path, opts: BuildOptions) -> Result<()> {
    tracing::debug!("Loading config from {:?}", config_path);
    let mut config =
        Config::load_or_default(config_path).context("Failed to load configuration")?;
    let cwd = std::env::current_dir().context("Failed to read current directory")?;
    opts.apply(&mut config, &cwd);
    build_site_with_config(config).map(|_| ())
}

/// Build the site from an already loaded config, writing output and returning the index.
pub fn build_site_with_config(config: Config) -> Result<SiteIndex> {
    let input_dir = config.input_dir();
    let output_dir = config.output_dir();

    tracing::info!("Building site: {}", config.site.name);

    // Validate the template before touching the output directory
    let template = match config.template_path() {
        Some(path) => {
            tracing::debug!("Using template {:?}", path);
            let template = Template::load(&path).context("Failed to load page template")?;
            template
                .check_placeholders(&PageTemplate::PLACEHOLDERS)
                .with_context(|| format!("Invalid page template {:?}", path))?;
            template
        }
        None => Template::builtin(),
    };

    clean_output_dir(&output_dir, &input_dir).context("Failed to clean output directory")?;
    fs::create_dir_all(&output_dir).context("Failed to create output directory")?;

    let builder = SiteBuilder::new(config.clone());
    let site_index = builder.build().context("Failed to build site")?;

    // Every page goes through the same template
    for page in &site_index.pages {
        render_page(&config, &template, page, &output_dir)?;
    }

    fetch_assets(&config, &output_dir)?;

    tracing::info!("✓ Built {} pages", site_index.pages.len());
    tracing::info!("✓ Output written to {:?}", output_dir);

    Ok(site_index)
}

/// Render a single page through the template and write it
fn render_page(
    config: &Config,
    template: &Template,
    page: &Page,
    output_dir: &Path,
) -> Result<()> {
    let html = PageTemplate::from_page(page, &config.site)
        .render(template)
        .with_context(|| format!("Failed to render {:?}", page.rel_path))?;

    let output_path = output_dir.join(&page.output_rel_path);
    if let Some(parent) = output_path.parent() {
        fs::create_dir_all(parent).with_context(|| format!("Failed to create {:?}", parent))?;
    }
    fs::write(&output_path, html).with_context(|| format!("Failed to write {:?}", output_path))?;

    tracing::debug!("Wrote {:?}", output_path);
    Ok(())
}

/// Download the shared stylesheet, honouring the failure policy
fn fetch_assets(config: &Config, output_dir: &Path) -> Result<()> {
    if config.assets.skip {
        tracing::info!("Asset download disabled; skipping stylesheet");
        return Ok(());
    }

    let url = &config.assets.stylesheet_url;
    let result = AssetFetcher::new().and_then(|fetcher| fetcher.fetch_stylesheet(url, output_dir));

    match result {
        Ok(_) => Ok(()),
        Err(err) if config.assets.fail_on_error => Err(anyhow::Error::new(err)
            .context(format!("Failed to download stylesheet from {}", url))),
        Err(err) => {
            tracing::warn!("Failed to download stylesheet from {}: {}", url, err);
            Ok(())
        }
    }
}
