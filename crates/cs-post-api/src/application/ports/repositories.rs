use crate::domain::{Document, DocumentId, NewDocument, NewPost, PostId, PostUpdate, PostView, UserId};
use crate::shared::error::AppError;
use async_trait::async_trait;

/// Transactional persistence for posts, their tag links and their stats row.
#[async_trait]
pub trait PostRepository: Send + Sync {
    /// Inserts the post, links the already-normalized `tags` and creates a
    /// zeroed stats row as one unit. Fails with `InvalidReference` when the
    /// post names a document the author does not own.
    async fn create_post(&self, post: &NewPost, tags: Vec<String>) -> Result<PostId, AppError>;
    /// `tags == None` leaves the tag set alone; `Some(vec![])` clears it.
    async fn update_post(&self, update: &PostUpdate, tags: Option<Vec<String>>)
    -> Result<(), AppError>;
    async fn delete_post(&self, post_id: PostId) -> Result<(), AppError>;
    async fn get_post_owner_id(&self, post_id: PostId) -> Result<UserId, AppError>;
    async fn get_all_posts(&self) -> Result<Vec<PostView>, AppError>;
    async fn get_post_by_id(&self, post_id: PostId) -> Result<Option<PostView>, AppError>;
    async fn count_by_user_id(&self, user_id: UserId) -> Result<i64, AppError>;
}

/// Idempotent like toggles. Both mutations return the recounted like total.
#[async_trait]
pub trait LikeRepository: Send + Sync {
    async fn like_post(&self, user_id: UserId, post_id: PostId) -> Result<i64, AppError>;
    async fn unlike_post(&self, user_id: UserId, post_id: PostId) -> Result<i64, AppError>;
    async fn is_post_liked(&self, user_id: UserId, post_id: PostId) -> Result<bool, AppError>;
}

/// Idempotent save toggles. Both mutations return the recounted save total.
#[async_trait]
pub trait SaveRepository: Send + Sync {
    async fn save_post(&self, user_id: UserId, post_id: PostId) -> Result<i64, AppError>;
    async fn unsave_post(&self, user_id: UserId, post_id: PostId) -> Result<i64, AppError>;
    async fn is_post_saved(&self, user_id: UserId, post_id: PostId) -> Result<bool, AppError>;
}

#[async_trait]
pub trait DocumentStore: Send + Sync {
    async fn create_document(&self, document: &NewDocument) -> Result<Document, AppError>;
    async fn owner_of(&self, document_id: DocumentId) -> Result<UserId, AppError>;
    async fn list_by_owner(&self, owner_id: UserId) -> Result<Vec<Document>, AppError>;
    async fn delete_document(&self, document_id: DocumentId) -> Result<(), AppError>;
}

#[async_trait]
pub trait StorageHealth: Send + Sync {
    async fn check_ready(&self) -> Result<(), AppError>;
}
