use super::{DocumentId, PostId, SummaryId, UserId, Visibility};
use chrono::{DateTime, Utc};

/// A post as submitted for creation. The author is always the authenticated caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewPost {
    pub author_user_id: UserId,
    pub title: String,
    pub description: Option<String>,
    pub visibility: String,
    pub document_id: Option<DocumentId>,
    pub summary_id: Option<SummaryId>,
}

/// Mutable post fields. Author, document and summary never change after creation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostUpdate {
    pub post_id: PostId,
    pub title: String,
    pub description: Option<String>,
    pub visibility: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PostStats {
    pub like_count: i64,
    pub save_count: i64,
    pub last_activity_at: Option<DateTime<Utc>>,
}

/// Read model joined from the post row, its author, stats, document and tags.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostView {
    pub post_id: PostId,
    pub author_id: UserId,
    pub author_name: String,
    pub title: String,
    pub description: Option<String>,
    pub visibility: String,
    pub document_id: Option<DocumentId>,
    pub summary_id: Option<SummaryId>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub file_url: Option<String>,
    pub tags: Vec<String>,
    pub stats: PostStats,
}

impl PostView {
    pub fn visibility(&self) -> Visibility {
        Visibility::parse(&self.visibility)
    }

    pub fn is_authored_by(&self, user_id: UserId) -> bool {
        self.author_id == user_id
    }
}
