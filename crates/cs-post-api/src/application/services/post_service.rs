use crate::application::ports::PostRepository;
use crate::application::services::access_policy::{ViewDecision, VisibilityPolicy};
use crate::domain::{NewPost, PostId, PostUpdate, PostView, TagNormalizer, UserId, Visibility};
use crate::shared::error::AppError;
use std::sync::Arc;
use tracing::{debug, info};

/// Result of [`PostService::view_post`]. `post` is only present when the
/// decision allows reading it.
#[derive(Debug, Clone)]
pub struct PostAccess {
    pub decision: ViewDecision,
    pub post: Option<PostView>,
}

pub struct PostService {
    repository: Arc<dyn PostRepository>,
    policy: VisibilityPolicy,
    normalizer: Arc<dyn TagNormalizer>,
}

impl PostService {
    pub fn new(
        repository: Arc<dyn PostRepository>,
        policy: VisibilityPolicy,
        normalizer: Arc<dyn TagNormalizer>,
    ) -> Self {
        Self {
            repository,
            policy,
            normalizer,
        }
    }

    fn validate_title(title: &str) -> Result<(), AppError> {
        if title.trim().is_empty() {
            return Err(AppError::validation("post_title is required"));
        }
        Ok(())
    }

    fn validate_visibility(visibility: &str) -> Result<(), AppError> {
        if !Visibility::is_writable(visibility) {
            return Err(AppError::validation("unsupported visibility"));
        }
        Ok(())
    }

    pub async fn create_post(&self, post: NewPost, tags: &[String]) -> Result<PostId, AppError> {
        if post.author_user_id <= 0 {
            return Err(AppError::validation("invalid author"));
        }
        Self::validate_title(&post.title)?;
        Self::validate_visibility(&post.visibility)?;

        let tags = self.normalizer.normalize(tags);
        let post_id = self.repository.create_post(&post, tags.clone()).await?;
        info!(
            post_id,
            author_id = post.author_user_id,
            tag_count = tags.len(),
            "post created"
        );
        Ok(post_id)
    }

    /// `tags == None` keeps the current tag set; `Some(&[])` clears it.
    pub async fn update_post(
        &self,
        update: PostUpdate,
        tags: Option<&[String]>,
    ) -> Result<(), AppError> {
        if update.post_id <= 0 {
            return Err(AppError::validation("invalid post_id"));
        }
        Self::validate_title(&update.title)?;
        Self::validate_visibility(&update.visibility)?;

        let tags = tags.map(|raw| self.normalizer.normalize(raw));
        let replaces_tags = tags.is_some();
        self.repository.update_post(&update, tags).await?;
        info!(post_id = update.post_id, replaces_tags, "post updated");
        Ok(())
    }

    /// Callers check [`PostService::is_owner`] first.
    pub async fn delete_post(&self, post_id: PostId) -> Result<(), AppError> {
        self.repository.delete_post(post_id).await?;
        info!(post_id, "post deleted");
        Ok(())
    }

    /// `Ok(false)` when the post exists but belongs to someone else;
    /// `Err(NotFound)` only when the post itself is missing.
    pub async fn is_owner(&self, post_id: PostId, user_id: UserId) -> Result<bool, AppError> {
        let owner_id = self.repository.get_post_owner_id(post_id).await?;
        Ok(VisibilityPolicy::may_mutate(owner_id, user_id))
    }

    pub async fn view_post(&self, viewer_id: UserId, post_id: PostId) -> Result<PostAccess, AppError> {
        let post = self.repository.get_post_by_id(post_id).await?;
        let decision = self.policy.decide(viewer_id, post.as_ref()).await?;
        debug!(viewer_id, post_id, reason = decision.reason(), "view decision");

        let post = if decision.is_allowed() { post } else { None };
        Ok(PostAccess { decision, post })
    }

    pub async fn get_all_posts(&self) -> Result<Vec<PostView>, AppError> {
        self.repository.get_all_posts().await
    }

    pub async fn get_post_by_id(&self, post_id: PostId) -> Result<Option<PostView>, AppError> {
        self.repository.get_post_by_id(post_id).await
    }

    pub async fn count_by_user_id(&self, user_id: UserId) -> Result<i64, AppError> {
        self.repository.count_by_user_id(user_id).await
    }
}
