//! Configuration module

mod repo;

pub use repo::HighlightConfig;
pub use repo::MarkdownConfig;
pub use repo::RepoConfig;
pub use repo::CONFIG_FILE;
