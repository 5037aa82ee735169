//! List post identifiers as route parameters

use anyhow::{Context, Result};
use std::io::Write;

use super::print_json;
use crate::PostRepository;

pub fn run<W: Write>(repo: &PostRepository, out: &mut W, compact: bool) -> Result<()> {
    let ids = repo
        .all_post_ids()
        .with_context(|| format!("Failed to list posts in {:?}", repo.content_dir()))?;
    print_json(out, &ids, compact)
}
