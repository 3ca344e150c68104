use crate::application::ports::LikeRepository;
use crate::domain::{PostId, UserId};
use crate::shared::error::AppError;
use std::sync::Arc;
use tracing::debug;

pub struct LikeService {
    repository: Arc<dyn LikeRepository>,
}

impl LikeService {
    pub fn new(repository: Arc<dyn LikeRepository>) -> Self {
        Self { repository }
    }

    fn validate_ids(user_id: UserId, post_id: PostId) -> Result<(), AppError> {
        if user_id <= 0 || post_id <= 0 {
            return Err(AppError::validation("invalid user_id or post_id"));
        }
        Ok(())
    }

    /// Idempotent. Returns the like count after the toggle.
    pub async fn like_post(&self, user_id: UserId, post_id: PostId) -> Result<i64, AppError> {
        Self::validate_ids(user_id, post_id)?;
        let like_count = self.repository.like_post(user_id, post_id).await?;
        debug!(user_id, post_id, like_count, "post liked");
        Ok(like_count)
    }

    /// Idempotent. Returns the like count after the toggle.
    pub async fn unlike_post(&self, user_id: UserId, post_id: PostId) -> Result<i64, AppError> {
        Self::validate_ids(user_id, post_id)?;
        let like_count = self.repository.unlike_post(user_id, post_id).await?;
        debug!(user_id, post_id, like_count, "post unliked");
        Ok(like_count)
    }

    pub async fn is_post_liked(&self, user_id: UserId, post_id: PostId) -> Result<bool, AppError> {
        Self::validate_ids(user_id, post_id)?;
        self.repository.is_post_liked(user_id, post_id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use mockall::{mock, predicate::*};

    mock! {
        pub LikeRepo {}

        #[async_trait]
        impl LikeRepository for LikeRepo {
            async fn like_post(&self, user_id: UserId, post_id: PostId) -> Result<i64, AppError>;
            async fn unlike_post(&self, user_id: UserId, post_id: PostId) -> Result<i64, AppError>;
            async fn is_post_liked(&self, user_id: UserId, post_id: PostId) -> Result<bool, AppError>;
        }
    }

    #[tokio::test]
    async fn like_returns_recounted_total() {
        let mut repo = MockLikeRepo::new();
        repo.expect_like_post()
            .with(eq(3), eq(7))
            .times(2)
            .returning(|_, _| Ok(1));

        let service = LikeService::new(Arc::new(repo));
        assert_eq!(service.like_post(3, 7).await.unwrap(), 1);
        assert_eq!(service.like_post(3, 7).await.unwrap(), 1);
    }

    #[tokio::test]
    async fn unlike_without_prior_like_reports_zero() {
        let mut repo = MockLikeRepo::new();
        repo.expect_unlike_post().returning(|_, _| Ok(0));

        let service = LikeService::new(Arc::new(repo));
        assert_eq!(service.unlike_post(3, 7).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn rejects_non_positive_ids() {
        let service = LikeService::new(Arc::new(MockLikeRepo::new()));

        assert!(matches!(
            service.like_post(0, 7).await,
            Err(AppError::Validation(_))
        ));
        assert!(matches!(
            service.is_post_liked(3, -1).await,
            Err(AppError::Validation(_))
        ));
    }

    #[tokio::test]
    async fn missing_post_surfaces_not_found() {
        let mut repo = MockLikeRepo::new();
        repo.expect_like_post()
            .returning(|_, post_id| Err(AppError::not_found(format!("post {post_id}"))));

        let service = LikeService::new(Arc::new(repo));
        assert!(service.like_post(3, 99).await.unwrap_err().is_not_found());
    }
}
