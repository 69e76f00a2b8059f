//! Configuration parsing and management.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

pub const DEFAULT_SITE_NAME: &str = "kcBlog";
pub const DEFAULT_SITE_DESCRIPTION: &str = "A simple static site generator.";
pub const DEFAULT_STYLESHEET_URL: &str =
    "https://raw.githubusercontent.com/kevquirk/simple.css/main/simple.min.css";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),

    #[error("Failed to parse YAML: {0}")]
    ParseError(#[from] serde_yaml::Error),
}

/// Main configuration struct matching the kcblog.yml schema.
///
/// Every section is optional in the file; missing values fall back to
/// the built-in defaults.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub site: SiteConfig,

    #[serde(default)]
    pub paths: PathsConfig,

    #[serde(default)]
    pub assets: AssetConfig,

    // Internal: path to config file (for relative path resolution)
    #[serde(skip)]
    config_path: Option<PathBuf>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SiteConfig {
    #[serde(default = "default_site_name")]
    pub name: String,

    #[serde(default = "default_site_description")]
    pub description: String,
}

fn default_site_name() -> String {
    DEFAULT_SITE_NAME.to_string()
}

fn default_site_description() -> String {
    DEFAULT_SITE_DESCRIPTION.to_string()
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            name: default_site_name(),
            description: default_site_description(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PathsConfig {
    #[serde(default = "default_input")]
    pub input: PathBuf,

    #[serde(default = "default_output")]
    pub output: PathBuf,

    /// Page template file (None means use the built-in template)
    #[serde(default)]
    pub template: Option<PathBuf>,
}

fn default_input() -> PathBuf {
    PathBuf::from("./input")
}

fn default_output() -> PathBuf {
    PathBuf::from("./output")
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            input: default_input(),
            output: default_output(),
            template: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssetConfig {
    #[serde(default = "default_stylesheet_url")]
    pub stylesheet_url: String,

    /// Abort the build when the stylesheet cannot be downloaded
    #[serde(default)]
    pub fail_on_error: bool,

    /// Do not download the stylesheet at all
    #[serde(default)]
    pub skip: bool,
}

fn default_stylesheet_url() -> String {
    DEFAULT_STYLESHEET_URL.to_string()
}

impl Default for AssetConfig {
    fn default() -> Self {
        Self {
            stylesheet_url: default_stylesheet_url(),
            fail_on_error: false,
            skip: false,
        }
    }
}

impl Config {
    /// Load configuration from a YAML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)?;
        let mut config: Config = serde_yaml::from_str(&contents)?;

        // Store config file path for relative path resolution
        config.config_path = Some(path.to_path_buf());

        Ok(config)
    }

    /// Load the config file if it exists, otherwise use the defaults
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        if path.exists() {
            Self::from_file(path)
        } else {
            tracing::debug!("No config file at {:?}, using defaults", path);
            Ok(Self::default())
        }
    }

    /// Get the input directory, resolved relative to config file
    pub fn input_dir(&self) -> PathBuf {
        self.resolve_path(&self.paths.input)
    }

    /// Get the output directory, resolved relative to config file
    pub fn output_dir(&self) -> PathBuf {
        self.resolve_path(&self.paths.output)
    }

    /// Get the page template file (None means use built-in)
    pub fn template_path(&self) -> Option<PathBuf> {
        self.paths.template.as_ref().map(|p| self.resolve_path(p))
    }

    /// Resolve a path relative to the config file location
    fn resolve_path(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else if let Some(config_path) = &self.config_path {
            match config_path.parent() {
                Some(parent) => parent.join(path),
                None => path.to_path_buf(),
            }
        } else {
            path.to_path_buf()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_default_values() {
        let config = Config::default();

        assert_eq!(config.site.name, "kcBlog");
        assert_eq!(config.site.description, "A simple static site generator.");
        assert_eq!(config.input_dir(), PathBuf::from("./input"));
        assert_eq!(config.output_dir(), PathBuf::from("./output"));
        assert_eq!(config.assets.stylesheet_url, DEFAULT_STYLESHEET_URL);
        assert!(!config.assets.fail_on_error);
        assert!(config.template_path().is_none());
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("kcblog.yml");
        fs::write(
            &path,
            r#"
site:
  name: "Field Notes"
paths:
  input: "content"
  template: "layout/page.html"
"#,
        )
        .unwrap();

        let config = Config::from_file(&path).unwrap();
        assert_eq!(config.site.name, "Field Notes");
        assert_eq!(config.site.description, DEFAULT_SITE_DESCRIPTION);
        assert_eq!(config.input_dir(), dir.path().join("content"));
        assert_eq!(config.output_dir(), dir.path().join("./output"));
        assert_eq!(
            config.template_path(),
            Some(dir.path().join("layout/page.html"))
        );
    }

    #[test]
    fn test_absolute_paths_are_kept() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("kcblog.yml");
        let absolute = dir.path().join("elsewhere");
        fs::write(
            &path,
            format!("paths:\n  output: {:?}\n", absolute.to_string_lossy()),
        )
        .unwrap();

        let config = Config::from_file(&path).unwrap();
        assert_eq!(config.output_dir(), absolute);
    }

    #[test]
    fn test_missing_file_falls_back_to_defaults() {
        let dir = tempdir().unwrap();
        let config = Config::load_or_default(dir.path().join("absent.yml")).unwrap();
        assert_eq!(config.site.name, DEFAULT_SITE_NAME);
    }

    #[test]
    fn test_invalid_yaml_is_an_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("kcblog.yml");
        fs::write(&path, "site: [unclosed").unwrap();

        assert!(matches!(
            Config::from_file(&path),
            Err(ConfigError::ParseError(_))
        ));
    }
}
