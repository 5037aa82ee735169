//! post-repo: build-time loader for markdown blog posts
//!
//! Reads `<id>.md` files from a content directory, splits off their
//! front-matter, and hands back date-sorted summaries, route parameters and
//! posts rendered to HTML for a page-generation layer to consume.

pub mod commands;
pub mod config;
pub mod content;
pub mod error;

pub use config::RepoConfig;
pub use content::{
    FrontMatter, MarkdownRenderer, PostId, PostParams, PostRepository, PostSummary, RenderedPost,
};
pub use error::{Error, Result};
