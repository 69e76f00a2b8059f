//! # kcblog CLI
//!
//! Command-line interface for the kcblog static site generator.

mod commands;

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "kcblog")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path to configuration file (optional; defaults apply when absent)
    #[arg(long, default_value = "kcblog.yml")]
    config: PathBuf,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render the input tree into a static site
    Build(BuildArgs),

    /// Scaffold a new site with sample pages and an editable template
    Init {
        /// Target directory (defaults to current directory)
        path: Option<PathBuf>,
    },
}

#[derive(Args)]
struct BuildArgs {
    /// Directory of markdown sources
    #[arg(long)]
    input: Option<PathBuf>,

    /// Directory to (re)generate; its previous contents are deleted
    #[arg(long)]
    output: Option<PathBuf>,

    /// Page template with $placeholders (defaults to the built-in template)
    #[arg(long)]
    template: Option<PathBuf>,

    /// Site name shown on every page
    #[arg(long, env = "kcSiteName")]
    site_name: Option<String>,

    /// Site description shown on every page
    #[arg(long, env = "kcSiteDescription")]
    site_description: Option<String>,

    /// Stylesheet downloaded to static/main.css
    #[arg(long, env = "kcBlogCssUrl")]
    stylesheet_url: Option<String>,

    /// Do not download the stylesheet
    #[arg(long)]
    skip_assets: bool,

    /// Fail the build when the stylesheet cannot be downloaded
    #[arg(long)]
    fail_on_asset_error: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize tracing
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive(if cli.verbose {
                tracing::Level::DEBUG.into()
            } else {
                tracing::Level::INFO.into()
            }),
        )
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    match cli.command {
        Commands::Build(args) => {
            let opts = commands::BuildOptions {
                input: args.input,
                output: args.output,
                template: args.template,
                site_name: args.site_name,
                site_description: args.site_description,
                stylesheet_url: args.stylesheet_url,
                skip_assets: args.skip_assets,
                fail_on_asset_error: args.fail_on_asset_error,
            };
            commands::build_site(&cli.config, opts)
        }
        Commands::Init { path } => commands::init_project(path.as_deref()),
    }
}
