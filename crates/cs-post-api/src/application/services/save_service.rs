use crate::application::ports::SaveRepository;
use crate::domain::{PostId, UserId};
use crate::shared::error::AppError;
use std::sync::Arc;
use tracing::debug;

pub struct SaveService {
    repository: Arc<dyn SaveRepository>,
}

impl SaveService {
    pub fn new(repository: Arc<dyn SaveRepository>) -> Self {
        Self { repository }
    }

    fn validate_ids(user_id: UserId, post_id: PostId) -> Result<(), AppError> {
        if user_id <= 0 || post_id <= 0 {
            return Err(AppError::validation("invalid user_id or post_id"));
        }
        Ok(())
    }

    /// Idempotent. Returns the save count after the toggle.
    pub async fn save_post(&self, user_id: UserId, post_id: PostId) -> Result<i64, AppError> {
        Self::validate_ids(user_id, post_id)?;
        let save_count = self.repository.save_post(user_id, post_id).await?;
        debug!(user_id, post_id, save_count, "post saved");
        Ok(save_count)
    }

    /// Idempotent. Returns the save count after the toggle.
    pub async fn unsave_post(&self, user_id: UserId, post_id: PostId) -> Result<i64, AppError> {
        Self::validate_ids(user_id, post_id)?;
        let save_count = self.repository.unsave_post(user_id, post_id).await?;
        debug!(user_id, post_id, save_count, "post unsaved");
        Ok(save_count)
    }

    pub async fn is_post_saved(&self, user_id: UserId, post_id: PostId) -> Result<bool, AppError> {
        Self::validate_ids(user_id, post_id)?;
        self.repository.is_post_saved(user_id, post_id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use mockall::{mock, predicate::*};

    mock! {
        pub SaveRepo {}

        #[async_trait]
        impl SaveRepository for SaveRepo {
            async fn save_post(&self, user_id: UserId, post_id: PostId) -> Result<i64, AppError>;
            async fn unsave_post(&self, user_id: UserId, post_id: PostId) -> Result<i64, AppError>;
            async fn is_post_saved(&self, user_id: UserId, post_id: PostId) -> Result<bool, AppError>;
        }
    }

    #[tokio::test]
    async fn save_returns_recounted_total() {
        let mut repo = MockSaveRepo::new();
        repo.expect_save_post()
            .with(eq(3), eq(7))
            .times(2)
            .returning(|_, _| Ok(1));

        let service = SaveService::new(Arc::new(repo));
        assert_eq!(service.save_post(3, 7).await.unwrap(), 1);
        assert_eq!(service.save_post(3, 7).await.unwrap(), 1);
    }

    #[tokio::test]
    async fn unsave_without_prior_save_reports_zero() {
        let mut repo = MockSaveRepo::new();
        repo.expect_unsave_post().returning(|_, _| Ok(0));

        let service = SaveService::new(Arc::new(repo));
        assert_eq!(service.unsave_post(3, 7).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn rejects_non_positive_ids() {
        let service = SaveService::new(Arc::new(MockSaveRepo::new()));

        assert!(matches!(
            service.save_post(0, 7).await,
            Err(AppError::Validation(_))
        ));
        assert!(matches!(
            service.is_post_saved(3, -1).await,
            Err(AppError::Validation(_))
        ));
    }

    #[tokio::test]
    async fn is_post_saved_reads_membership() {
        let mut repo = MockSaveRepo::new();
        repo.expect_is_post_saved()
            .with(eq(3), eq(7))
            .returning(|_, _| Ok(true));
        repo.expect_is_post_saved()
            .with(eq(4), eq(7))
            .returning(|_, _| Ok(false));

        let service = SaveService::new(Arc::new(repo));
        assert!(service.is_post_saved(3, 7).await.unwrap());
        assert!(!service.is_post_saved(4, 7).await.unwrap());
    }
}
