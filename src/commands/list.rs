//! List post summaries

use anyhow::{Context, Result};
use std::io::Write;

use super::print_json;
use crate::PostRepository;

/// Print every post summary, newest first
pub fn run<W: Write>(repo: &PostRepository, out: &mut W, compact: bool) -> Result<()> {
    let posts = repo
        .sorted_posts_data()
        .with_context(|| format!("Failed to list posts in {:?}", repo.content_dir()))?;
    tracing::info!("Listed {} posts", posts.len());
    print_json(out, &posts, compact)
}
