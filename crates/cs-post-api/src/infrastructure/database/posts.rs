use super::PgStore;
use super::queries::{
    COUNT_POSTS_BY_AUTHOR, DELETE_POST, DELETE_POST_TAGS, INSERT_POST_FOR_AUTHOR,
    INSERT_POST_STATS, LINK_POST_TAG, SELECT_ALL_POST_VIEWS, SELECT_POST_OWNER,
    SELECT_POST_VIEW_BY_ID, UPDATE_POST, UPSERT_TAG,
};
use crate::application::ports::PostRepository;
use crate::domain::{NewPost, PostId, PostStats, PostUpdate, PostView, UserId};
use crate::shared::error::AppError;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, Postgres, Transaction};

#[derive(Debug, FromRow)]
struct PostRow {
    post_id: i64,
    author_id: i64,
    author_name: String,
    post_title: String,
    post_description: Option<String>,
    post_visibility: String,
    post_document_id: Option<i64>,
    post_summary_id: Option<i64>,
    post_created_at: DateTime<Utc>,
    post_updated_at: DateTime<Utc>,
    file_url: Option<String>,
    tags: Vec<String>,
    like_count: i64,
    save_count: i64,
    last_activity_at: Option<DateTime<Utc>>,
}

impl PostRow {
    fn into_view(self) -> PostView {
        PostView {
            post_id: self.post_id,
            author_id: self.author_id,
            author_name: self.author_name,
            title: self.post_title,
            description: self.post_description,
            visibility: self.post_visibility,
            document_id: self.post_document_id,
            summary_id: self.post_summary_id,
            created_at: self.post_created_at,
            updated_at: self.post_updated_at,
            file_url: self.file_url,
            tags: self.tags,
            stats: PostStats {
                like_count: self.like_count,
                save_count: self.save_count,
                last_activity_at: self.last_activity_at,
            },
        }
    }
}

/// Upserts each tag by name and links it to the post. Tags are expected to
/// be normalized already.
///
/// Upserts row-lock the tag until commit, so every writer takes those locks
/// in name order; two posts sharing tags in different orders would otherwise
/// deadlock.
async fn link_tags(
    tx: &mut Transaction<'_, Postgres>,
    post_id: PostId,
    tags: &[String],
) -> Result<(), AppError> {
    let mut ordered: Vec<&String> = tags.iter().collect();
    ordered.sort();
    ordered.dedup();

    for tag in ordered {
        let tag_id: i64 = sqlx::query_scalar(UPSERT_TAG)
            .bind(tag)
            .fetch_one(&mut **tx)
            .await?;
        sqlx::query(LINK_POST_TAG)
            .bind(post_id)
            .bind(tag_id)
            .execute(&mut **tx)
            .await?;
    }
    Ok(())
}

#[async_trait]
impl PostRepository for PgStore {
    async fn create_post(&self, post: &NewPost, tags: Vec<String>) -> Result<PostId, AppError> {
        let mut tx = self.pool.begin().await?;

        let post_id: Option<i64> = sqlx::query_scalar(INSERT_POST_FOR_AUTHOR)
            .bind(post.author_user_id)
            .bind(&post.title)
            .bind(&post.description)
            .bind(&post.visibility)
            .bind(post.document_id)
            .bind(post.summary_id)
            .fetch_optional(&mut *tx)
            .await?;
        let Some(post_id) = post_id else {
            return Err(AppError::InvalidReference(format!(
                "document {} is missing or not owned by the author",
                post.document_id.unwrap_or_default()
            )));
        };

        link_tags(&mut tx, post_id, &tags).await?;

        sqlx::query(INSERT_POST_STATS)
            .bind(post_id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(post_id)
    }

    async fn update_post(
        &self,
        update: &PostUpdate,
        tags: Option<Vec<String>>,
    ) -> Result<(), AppError> {
        let mut tx = self.pool.begin().await?;

        let result = sqlx::query(UPDATE_POST)
            .bind(update.post_id)
            .bind(&update.title)
            .bind(&update.description)
            .bind(&update.visibility)
            .execute(&mut *tx)
            .await?;
        if result.rows_affected() == 0 {
            return Err(AppError::not_found(format!("post {}", update.post_id)));
        }

        if let Some(tags) = tags {
            sqlx::query(DELETE_POST_TAGS)
                .bind(update.post_id)
                .execute(&mut *tx)
                .await?;
            link_tags(&mut tx, update.post_id, &tags).await?;
        }

        tx.commit().await?;
        Ok(())
    }

    async fn delete_post(&self, post_id: PostId) -> Result<(), AppError> {
        let mut tx = self.pool.begin().await?;

        // tag links, stats, likes and saves go with the post via ON DELETE CASCADE
        let result = sqlx::query(DELETE_POST)
            .bind(post_id)
            .execute(&mut *tx)
            .await?;
        if result.rows_affected() == 0 {
            return Err(AppError::not_found(format!("post {post_id}")));
        }

        tx.commit().await?;
        Ok(())
    }

    async fn get_post_owner_id(&self, post_id: PostId) -> Result<UserId, AppError> {
        sqlx::query_scalar::<_, i64>(SELECT_POST_OWNER)
            .bind(post_id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::not_found(format!("post {post_id}")))
    }

    async fn get_all_posts(&self) -> Result<Vec<PostView>, AppError> {
        let rows = sqlx::query_as::<_, PostRow>(SELECT_ALL_POST_VIEWS)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows.into_iter().map(PostRow::into_view).collect())
    }

    async fn get_post_by_id(&self, post_id: PostId) -> Result<Option<PostView>, AppError> {
        let row = sqlx::query_as::<_, PostRow>(SELECT_POST_VIEW_BY_ID)
            .bind(post_id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row.map(PostRow::into_view))
    }

    async fn count_by_user_id(&self, user_id: UserId) -> Result<i64, AppError> {
        let count = sqlx::query_scalar::<_, i64>(COUNT_POSTS_BY_AUTHOR)
            .bind(user_id)
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }
}
