//! Render a single post

use anyhow::{Context, Result};
use std::io::Write;

use super::print_json;
use crate::PostRepository;

/// Print the rendered post for `id`
pub async fn run<W: Write>(
    repo: &PostRepository,
    id: &str,
    out: &mut W,
    compact: bool,
) -> Result<()> {
    let post = repo
        .post_data(id)
        .await
        .with_context(|| format!("Failed to load post '{}'", id))?;
    tracing::debug!("Rendered {} ({} bytes of HTML)", id, post.content_html.len());
    print_json(out, &post, compact)
}
