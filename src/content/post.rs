//! Post records handed to the page-generation layer

use serde::Serialize;

use super::FrontMatter;

/// Identifier and metadata of a post, used for listings
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PostSummary {
    pub id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
}

impl PostSummary {
    pub fn new(id: String, front_matter: FrontMatter) -> Self {
        Self {
            id,
            date: front_matter.date,
            title: front_matter.title,
        }
    }
}

/// Route parameters for one post, serialized as `{"params": {"id": ...}}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PostParams {
    pub params: PostId,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PostId {
    pub id: String,
}

impl PostParams {
    pub fn new(id: String) -> Self {
        Self {
            params: PostId { id },
        }
    }

    pub fn id(&self) -> &str {
        &self.params.id
    }
}

/// A post with its body rendered to HTML
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderedPost {
    pub id: String,

    /// Rendered HTML content
    pub content_html: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
}
