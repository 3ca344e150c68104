use super::PgStore;
use super::queries::{
    DELETE_LIKE, DELETE_SAVE, INSERT_LIKE, INSERT_SAVE, LOCK_POST_STATS, RECOUNT_LIKES,
    RECOUNT_SAVES, SELECT_LIKE_EXISTS, SELECT_SAVE_EXISTS,
};
use crate::application::ports::{LikeRepository, SaveRepository};
use crate::domain::{PostId, ReactionKind, UserId};
use crate::shared::error::AppError;
use async_trait::async_trait;

struct ReactionSql {
    insert: &'static str,
    delete: &'static str,
    recount: &'static str,
    exists: &'static str,
}

fn statements(kind: ReactionKind) -> ReactionSql {
    match kind {
        ReactionKind::Like => ReactionSql {
            insert: INSERT_LIKE,
            delete: DELETE_LIKE,
            recount: RECOUNT_LIKES,
            exists: SELECT_LIKE_EXISTS,
        },
        ReactionKind::Save => ReactionSql {
            insert: INSERT_SAVE,
            delete: DELETE_SAVE,
            recount: RECOUNT_SAVES,
            exists: SELECT_SAVE_EXISTS,
        },
    }
}

impl PgStore {
    /// Adds or removes one reaction row and rewrites the post's counter from
    /// `COUNT(*)` in the same transaction. Repeating a toggle changes nothing
    /// but still refreshes the counter.
    async fn toggle_reaction(
        &self,
        kind: ReactionKind,
        user_id: UserId,
        post_id: PostId,
        present: bool,
    ) -> Result<i64, AppError> {
        let sql = statements(kind);
        let mut tx = self.pool.begin().await?;

        let locked: Option<i64> = sqlx::query_scalar(LOCK_POST_STATS)
            .bind(post_id)
            .fetch_optional(&mut *tx)
            .await?;
        if locked.is_none() {
            return Err(AppError::not_found(format!("post {post_id}")));
        }

        sqlx::query(if present { sql.insert } else { sql.delete })
            .bind(user_id)
            .bind(post_id)
            .execute(&mut *tx)
            .await?;

        let count: Option<i64> = sqlx::query_scalar(sql.recount)
            .bind(post_id)
            .fetch_optional(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(count.unwrap_or(0))
    }

    async fn has_reaction(
        &self,
        kind: ReactionKind,
        user_id: UserId,
        post_id: PostId,
    ) -> Result<bool, AppError> {
        let exists = sqlx::query_scalar::<_, bool>(statements(kind).exists)
            .bind(user_id)
            .bind(post_id)
            .fetch_one(&self.pool)
            .await?;
        Ok(exists)
    }
}

#[async_trait]
impl LikeRepository for PgStore {
    async fn like_post(&self, user_id: UserId, post_id: PostId) -> Result<i64, AppError> {
        self.toggle_reaction(ReactionKind::Like, user_id, post_id, true)
            .await
    }

    async fn unlike_post(&self, user_id: UserId, post_id: PostId) -> Result<i64, AppError> {
        self.toggle_reaction(ReactionKind::Like, user_id, post_id, false)
            .await
    }

    async fn is_post_liked(&self, user_id: UserId, post_id: PostId) -> Result<bool, AppError> {
        self.has_reaction(ReactionKind::Like, user_id, post_id).await
    }
}

#[async_trait]
impl SaveRepository for PgStore {
    async fn save_post(&self, user_id: UserId, post_id: PostId) -> Result<i64, AppError> {
        self.toggle_reaction(ReactionKind::Save, user_id, post_id, true)
            .await
    }

    async fn unsave_post(&self, user_id: UserId, post_id: PostId) -> Result<i64, AppError> {
        self.toggle_reaction(ReactionKind::Save, user_id, post_id, false)
            .await
    }

    async fn is_post_saved(&self, user_id: UserId, post_id: PostId) -> Result<bool, AppError> {
        self.has_reaction(ReactionKind::Save, user_id, post_id).await
    }
}
