//! Post repository - lists, loads and renders posts from the content directory

use std::ffi::OsStr;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use walkdir::WalkDir;

use super::{FrontMatter, MarkdownRenderer, PostParams, PostSummary, RenderedPost};
use crate::config::RepoConfig;
use crate::error::{Error, Result};

/// Reads posts from a single content directory
///
/// Nothing is cached: every call lists and reads the directory again, so
/// changes on disk show up on the next call.
pub struct PostRepository {
    content_dir: PathBuf,
    extension: String,
    renderer: Arc<MarkdownRenderer>,
}

impl PostRepository {
    /// Create a repository over `content_dir` with default settings
    pub fn new<P: Into<PathBuf>>(content_dir: P) -> Self {
        Self {
            content_dir: content_dir.into(),
            extension: RepoConfig::default().extension,
            renderer: Arc::new(MarkdownRenderer::new()),
        }
    }

    /// Create a repository from a config, resolving `content_dir` against `base_dir`
    pub fn with_config<P: AsRef<Path>>(base_dir: P, config: &RepoConfig) -> Result<Self> {
        let content_dir = base_dir.as_ref().join(&config.content_dir);
        let renderer = MarkdownRenderer::with_config(&config.markdown)?;
        tracing::debug!(
            "Post repository at {:?} (*.{})",
            content_dir,
            config.normalized_extension()
        );

        Ok(Self {
            content_dir,
            extension: config.normalized_extension().to_string(),
            renderer: Arc::new(renderer),
        })
    }

    /// Open the repository described by `posts.yml` in `base_dir` (or the defaults)
    pub fn open<P: AsRef<Path>>(base_dir: P) -> Result<Self> {
        let config = RepoConfig::load_or_default(base_dir.as_ref())?;
        Self::with_config(base_dir, &config)
    }

    pub fn content_dir(&self) -> &Path {
        &self.content_dir
    }

    /// Path of the file backing `id`; the file may not exist
    pub fn post_path(&self, id: &str) -> PathBuf {
        if self.extension.is_empty() {
            self.content_dir.join(id)
        } else {
            self.content_dir.join(format!("{}.{}", id, self.extension))
        }
    }

    /// Summaries of every post, newest first
    ///
    /// Dates are compared as plain strings, so they need a sortable format
    /// such as `YYYY-MM-DD`. Equal dates fall back to the identifier, and
    /// posts without a date come last.
    pub fn sorted_posts_data(&self) -> Result<Vec<PostSummary>> {
        let mut posts = self
            .post_files()?
            .into_iter()
            .map(|(id, path)| {
                let content = read_post(&path)?;
                let (fm, _) = parse_front_matter(&content, &path)?;
                Ok(PostSummary::new(id, fm))
            })
            .collect::<Result<Vec<_>>>()?;

        // Sort by date descending (newest first)
        posts.sort_by(|a, b| b.date.cmp(&a.date).then_with(|| a.id.cmp(&b.id)));

        Ok(posts)
    }

    /// Route parameters for every post, in directory listing order
    pub fn all_post_ids(&self) -> Result<Vec<PostParams>> {
        Ok(self
            .post_files()?
            .into_iter()
            .map(|(id, _)| PostParams::new(id))
            .collect())
    }

    /// Load a single post and render its body to HTML
    ///
    /// The file is read without checking for it first, so an unknown `id`
    /// fails with a not-found I/O error. Rendering runs on tokio's blocking
    /// pool and this future waits for it.
    pub async fn post_data(&self, id: &str) -> Result<RenderedPost> {
        let path = self.post_path(id);
        let content = read_post(&path)?;
        let (fm, body) = parse_front_matter(&content, &path)?;

        let renderer = Arc::clone(&self.renderer);
        let body = body.to_string();
        let content_html = tokio::task::spawn_blocking(move || renderer.render(&body)).await??;

        Ok(RenderedPost {
            id: id.to_string(),
            content_html,
            date: fm.date,
            title: fm.title,
        })
    }

    /// Identifier and path of each post file directly inside the content directory
    fn post_files(&self) -> Result<Vec<(String, PathBuf)>> {
        let mut files = Vec::new();

        for entry in WalkDir::new(&self.content_dir)
            .min_depth(1)
            .max_depth(1)
            .follow_links(true)
        {
            let entry = entry.map_err(|e| {
                let path = e
                    .path()
                    .map(Path::to_path_buf)
                    .unwrap_or_else(|| self.content_dir.clone());
                Error::io(path, e.into())
            })?;

            let path = entry.path();
            if !entry.file_type().is_file() {
                tracing::debug!("Skipping {:?}: not a file", path);
                continue;
            }

            let Some(stem) = self.post_stem(path) else {
                tracing::debug!("Skipping {:?}: not a .{} file", path, self.extension);
                continue;
            };
            match stem.to_str() {
                Some(id) => files.push((id.to_string(), path.to_path_buf())),
                None => tracing::debug!("Skipping {:?}: file name is not valid UTF-8", path),
            }
        }

        tracing::debug!("Found {} posts in {:?}", files.len(), self.content_dir);
        Ok(files)
    }

    /// File name with the post extension stripped, if `path` is a post file
    fn post_stem<'p>(&self, path: &'p Path) -> Option<&'p OsStr> {
        if self.extension.is_empty() {
            if path.extension().is_some() {
                return None;
            }
            return path.file_name();
        }

        if path.extension()? != OsStr::new(&self.extension) {
            return None;
        }
        path.file_stem()
    }
}

fn read_post(path: &Path) -> Result<String> {
    fs::read_to_string(path).map_err(|e| Error::io(path, e))
}

fn parse_front_matter<'a>(content: &'a str, path: &Path) -> Result<(FrontMatter, &'a str)> {
    let (fm, body) = FrontMatter::parse(content).map_err(|source| Error::FrontMatter {
        path: path.to_path_buf(),
        source,
    })?;

    let missing = fm.missing_fields();
    if !missing.is_empty() {
        tracing::debug!("{:?} has no {} in its front-matter", path, missing.join(" or "));
    }

    Ok((fm, body))
}
