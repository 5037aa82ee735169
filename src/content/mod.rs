//! Content module - post files, front-matter and markdown rendering

mod frontmatter;
mod markdown;
mod post;
pub mod repository;

pub use frontmatter::{FrontMatter, FrontMatterError};
pub use markdown::MarkdownRenderer;
pub use post::{PostId, PostParams, PostSummary, RenderedPost};
pub use repository::PostRepository;
