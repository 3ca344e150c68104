use crate::domain::{Document, PostView};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Body of `POST /v1/posts`. Missing title or visibility fail validation
/// rather than deserialization.
#[derive(Debug, Deserialize, ToSchema)]
pub struct CreatePostRequest {
    #[serde(default)]
    pub post_title: String,
    #[serde(default)]
    pub post_description: Option<String>,
    #[serde(default)]
    pub post_visibility: String,
    #[serde(default)]
    pub post_document_id: Option<i64>,
    #[serde(default)]
    pub post_summary_id: Option<i64>,
    #[serde(default)]
    pub tags: Vec<String>,
}

/// Body of `PUT /v1/posts/:id`. Omitting `tags` (or sending `null`) keeps the
/// current tags; `[]` clears them.
#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdatePostRequest {
    #[serde(default)]
    pub post_title: String,
    #[serde(default)]
    pub post_description: Option<String>,
    #[serde(default)]
    pub post_visibility: String,
    #[serde(default)]
    pub tags: Option<Vec<String>>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct PostIdResponse {
    pub post_id: i64,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct PostResponse {
    pub post_id: i64,
    pub author_id: i64,
    pub author_name: String,
    pub post_title: String,
    pub post_description: Option<String>,
    pub post_visibility: String,
    pub post_document_id: Option<i64>,
    pub post_summary_id: Option<i64>,
    pub post_created_at: DateTime<Utc>,
    pub post_updated_at: DateTime<Utc>,
    pub file_url: Option<String>,
    pub tags: Vec<String>,
    pub like_count: i64,
    pub save_count: i64,
    /// Only filled on single-post reads.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_liked: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_saved: Option<bool>,
}

impl From<PostView> for PostResponse {
    fn from(post: PostView) -> Self {
        Self {
            post_id: post.post_id,
            author_id: post.author_id,
            author_name: post.author_name,
            post_title: post.title,
            post_description: post.description,
            post_visibility: post.visibility,
            post_document_id: post.document_id,
            post_summary_id: post.summary_id,
            post_created_at: post.created_at,
            post_updated_at: post.updated_at,
            file_url: post.file_url,
            tags: post.tags,
            like_count: post.stats.like_count,
            save_count: post.stats.save_count,
            is_liked: None,
            is_saved: None,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct PostCountResponse {
    pub user_id: i64,
    pub post_count: i64,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct LikeResponse {
    pub post_id: i64,
    pub liked: bool,
    pub like_count: i64,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct SaveResponse {
    pub post_id: i64,
    pub saved: bool,
    pub save_count: i64,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateDocumentRequest {
    #[serde(default)]
    pub document_name: String,
    #[serde(default)]
    pub document_url: String,
    #[serde(default)]
    pub storage_provider: Option<String>,
    #[serde(default)]
    pub page_count: i32,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct DocumentResponse {
    pub document_id: i64,
    pub document_user_id: i64,
    pub document_name: String,
    pub document_url: String,
    pub storage_provider: String,
    pub page_count: i32,
    pub uploaded_at: DateTime<Utc>,
}

impl From<Document> for DocumentResponse {
    fn from(document: Document) -> Self {
        Self {
            document_id: document.document_id,
            document_user_id: document.owner_id,
            document_name: document.name,
            document_url: document.url,
            storage_provider: document.storage_provider,
            page_count: document.page_count,
            uploaded_at: document.uploaded_at,
        }
    }
}
