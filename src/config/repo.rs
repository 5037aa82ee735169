//! Repository configuration (posts.yml)

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

/// File name looked up in the base directory by [`RepoConfig::load_or_default`]
pub const CONFIG_FILE: &str = "posts.yml";

/// Main repository configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RepoConfig {
    /// Directory holding the post files, relative to the base directory
    pub content_dir: PathBuf,
    /// Extension of post files, without the leading dot
    pub extension: String,
    #[serde(default)]
    pub markdown: MarkdownConfig,
}

impl Default for RepoConfig {
    fn default() -> Self {
        Self {
            content_dir: PathBuf::from("posts"),
            extension: "md".to_string(),
            markdown: MarkdownConfig::default(),
        }
    }
}

impl RepoConfig {
    /// Load configuration from a file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
        serde_yaml::from_str(&content).map_err(|source| Error::Config {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Load `posts.yml` from `base_dir`, falling back to defaults when it is absent
    pub fn load_or_default<P: AsRef<Path>>(base_dir: P) -> Result<Self> {
        let config_path = base_dir.as_ref().join(CONFIG_FILE);
        if config_path.is_file() {
            tracing::debug!("Loading config from {:?}", config_path);
            Self::load(&config_path)
        } else {
            Ok(Self::default())
        }
    }

    /// Extension with any leading dot removed
    pub fn normalized_extension(&self) -> &str {
        self.extension.trim_start_matches('.')
    }
}

/// Markdown rendering options
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MarkdownConfig {
    /// Tables, strikethrough, task lists and footnotes
    pub gfm: bool,
    pub smart_punctuation: bool,
    /// Drop raw HTML from the markdown source
    pub sanitize: bool,
    #[serde(default)]
    pub highlight: HighlightConfig,
}

impl Default for MarkdownConfig {
    fn default() -> Self {
        Self {
            gfm: true,
            smart_punctuation: false,
            sanitize: true,
            highlight: HighlightConfig::default(),
        }
    }
}

/// Code block highlighting configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HighlightConfig {
    pub enable: bool,
    /// One of syntect's bundled theme names
    pub theme: String,
    pub line_number: bool,
}

impl Default for HighlightConfig {
    fn default() -> Self {
        Self {
            enable: false,
            theme: "base16-ocean.dark".to_string(),
            line_number: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = RepoConfig::default();
        assert_eq!(config.content_dir, PathBuf::from("posts"));
        assert_eq!(config.extension, "md");
        assert!(config.markdown.gfm);
        assert!(config.markdown.sanitize);
        assert!(!config.markdown.highlight.enable);
    }

    #[test]
    fn test_parse_config() {
        let yaml = r#"
content_dir: content/blog
extension: .markdown
markdown:
  sanitize: false
  highlight:
    enable: true
"#;
        let config: RepoConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.content_dir, PathBuf::from("content/blog"));
        assert_eq!(config.normalized_extension(), "markdown");
        assert!(!config.markdown.sanitize);
        assert!(config.markdown.gfm);
        assert!(config.markdown.highlight.enable);
        assert_eq!(config.markdown.highlight.theme, "base16-ocean.dark");
    }

    #[test]
    fn test_load_or_default() {
        let dir = TempDir::new().unwrap();
        assert_eq!(
            RepoConfig::load_or_default(dir.path()).unwrap(),
            RepoConfig::default()
        );

        fs::write(dir.path().join(CONFIG_FILE), "content_dir: articles\n").unwrap();
        let config = RepoConfig::load_or_default(dir.path()).unwrap();
        assert_eq!(config.content_dir, PathBuf::from("articles"));
    }

    #[test]
    fn test_invalid_config() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join(CONFIG_FILE), "extension: [md\n").unwrap();
        let err = RepoConfig::load_or_default(dir.path()).unwrap_err();
        assert!(matches!(err, Error::Config { .. }));
    }
}
