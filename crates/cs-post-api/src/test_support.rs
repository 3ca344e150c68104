//! In-memory store implementing every storage port, for service and router tests.

use crate::application::ports::{
    DocumentStore, LikeRepository, PostRepository, SaveRepository, StorageHealth,
};
use crate::domain::{
    Document, DocumentId, NewDocument, NewPost, PostId, PostStats, PostUpdate, PostView,
    ReactionKind, UserId,
};
use crate::shared::error::AppError;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::error::{DatabaseError, ErrorKind};
use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet};
use std::error::Error as StdError;
use std::fmt;
use std::sync::{Mutex, MutexGuard};

/// A database-side constraint failure, shaped like the ones Postgres reports.
#[derive(Debug)]
pub(crate) struct ConstraintViolation {
    kind: ErrorKind,
    constraint: &'static str,
    message: String,
}

impl ConstraintViolation {
    pub(crate) fn new(kind: ErrorKind, constraint: &'static str) -> Self {
        Self {
            kind,
            constraint,
            message: format!("violates constraint \"{constraint}\""),
        }
    }

    pub(crate) fn foreign_key(constraint: &'static str) -> Self {
        Self::new(ErrorKind::ForeignKeyViolation, constraint)
    }

    pub(crate) fn into_sqlx(self) -> sqlx::Error {
        sqlx::Error::Database(Box::new(self))
    }
}

impl From<ConstraintViolation> for AppError {
    fn from(violation: ConstraintViolation) -> Self {
        AppError::from(violation.into_sqlx())
    }
}

impl fmt::Display for ConstraintViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl StdError for ConstraintViolation {}

impl DatabaseError for ConstraintViolation {
    fn message(&self) -> &str {
        &self.message
    }

    fn constraint(&self) -> Option<&str> {
        Some(self.constraint)
    }

    fn as_error(&self) -> &(dyn StdError + Send + Sync + 'static) {
        self
    }

    fn as_error_mut(&mut self) -> &mut (dyn StdError + Send + Sync + 'static) {
        self
    }

    fn into_error(self: Box<Self>) -> Box<dyn StdError + Send + Sync + 'static> {
        self
    }

    fn kind(&self) -> ErrorKind {
        match &self.kind {
            ErrorKind::UniqueViolation => ErrorKind::UniqueViolation,
            ErrorKind::ForeignKeyViolation => ErrorKind::ForeignKeyViolation,
            ErrorKind::NotNullViolation => ErrorKind::NotNullViolation,
            ErrorKind::CheckViolation => ErrorKind::CheckViolation,
            _ => ErrorKind::Other,
        }
    }
}

struct StoredPost {
    author_id: UserId,
    title: String,
    description: Option<String>,
    visibility: String,
    document_id: Option<DocumentId>,
    summary_id: Option<i64>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    tags: BTreeSet<String>,
    last_activity_at: DateTime<Utc>,
}

#[derive(Default)]
struct Inner {
    next_post_id: PostId,
    next_document_id: DocumentId,
    users: HashMap<UserId, String>,
    posts: BTreeMap<PostId, StoredPost>,
    documents: BTreeMap<DocumentId, Document>,
    likes: HashSet<(UserId, PostId)>,
    saves: HashSet<(UserId, PostId)>,
    unavailable: bool,
}

impl Inner {
    fn ensure_available(&self) -> Result<(), AppError> {
        if self.unavailable {
            return Err(AppError::Storage("connection refused".into()));
        }
        Ok(())
    }

    fn view(&self, post_id: PostId, post: &StoredPost) -> PostView {
        PostView {
            post_id,
            author_id: post.author_id,
            author_name: self.users.get(&post.author_id).cloned().unwrap_or_default(),
            title: post.title.clone(),
            description: post.description.clone(),
            visibility: post.visibility.clone(),
            document_id: post.document_id,
            summary_id: post.summary_id,
            created_at: post.created_at,
            updated_at: post.updated_at,
            file_url: post
                .document_id
                .and_then(|id| self.documents.get(&id))
                .map(|document| document.url.clone()),
            tags: post.tags.iter().cloned().collect(),
            stats: PostStats {
                like_count: self.likes.iter().filter(|(_, id)| *id == post_id).count() as i64,
                save_count: self.saves.iter().filter(|(_, id)| *id == post_id).count() as i64,
                last_activity_at: Some(post.last_activity_at),
            },
        }
    }
}

#[derive(Default)]
pub(crate) struct InMemoryStore {
    inner: Mutex<Inner>,
}

impl InMemoryStore {
    pub(crate) fn with_users(users: &[(UserId, &str)]) -> Self {
        let store = Self::default();
        {
            let mut inner = store.lock();
            for (user_id, name) in users {
                inner.users.insert(*user_id, name.to_string());
            }
        }
        store
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Inserts a post as-is, skipping validation. Used to seed legacy rows
    /// such as friends-only posts that can no longer be written.
    pub(crate) fn seed_post(&self, author_id: UserId, title: &str, visibility: &str) -> PostId {
        let mut inner = self.lock();
        inner.next_post_id += 1;
        let post_id = inner.next_post_id;
        let now = Utc::now();
        inner.posts.insert(
            post_id,
            StoredPost {
                author_id,
                title: title.to_string(),
                description: None,
                visibility: visibility.to_string(),
                document_id: None,
                summary_id: None,
                created_at: now,
                updated_at: now,
                tags: BTreeSet::new(),
                last_activity_at: now,
            },
        );
        post_id
    }

    pub(crate) fn set_unavailable(&self, unavailable: bool) {
        self.lock().unavailable = unavailable;
    }

    fn toggle(
        &self,
        kind: ReactionKind,
        user_id: UserId,
        post_id: PostId,
        present: bool,
    ) -> Result<i64, AppError> {
        let mut inner = self.lock();
        inner.ensure_available()?;
        let Some(post) = inner.posts.get_mut(&post_id) else {
            return Err(AppError::not_found(format!("post {post_id}")));
        };
        post.last_activity_at = Utc::now();

        let set = match kind {
            ReactionKind::Like => &mut inner.likes,
            ReactionKind::Save => &mut inner.saves,
        };
        if present {
            set.insert((user_id, post_id));
        } else {
            set.remove(&(user_id, post_id));
        }
        Ok(set.iter().filter(|(_, id)| *id == post_id).count() as i64)
    }
}

#[async_trait]
impl PostRepository for InMemoryStore {
    async fn create_post(&self, post: &NewPost, tags: Vec<String>) -> Result<PostId, AppError> {
        let mut inner = self.lock();
        inner.ensure_available()?;
        if !inner.users.contains_key(&post.author_user_id) {
            return Err(ConstraintViolation::foreign_key("posts_post_author_user_id_fkey").into());
        }
        // no summaries are ever stored here
        if post.summary_id.is_some() {
            return Err(ConstraintViolation::foreign_key("posts_post_summary_id_fkey").into());
        }
        if let Some(document_id) = post.document_id {
            let owned = inner
                .documents
                .get(&document_id)
                .is_some_and(|document| document.owner_id == post.author_user_id);
            if !owned {
                return Err(AppError::InvalidReference(format!(
                    "document {document_id} is missing or not owned by the author"
                )));
            }
        }

        inner.next_post_id += 1;
        let post_id = inner.next_post_id;
        let now = Utc::now();
        inner.posts.insert(
            post_id,
            StoredPost {
                author_id: post.author_user_id,
                title: post.title.clone(),
                description: post.description.clone(),
                visibility: post.visibility.clone(),
                document_id: post.document_id,
                summary_id: post.summary_id,
                created_at: now,
                updated_at: now,
                tags: tags.into_iter().collect(),
                last_activity_at: now,
            },
        );
        Ok(post_id)
    }

    async fn update_post(
        &self,
        update: &PostUpdate,
        tags: Option<Vec<String>>,
    ) -> Result<(), AppError> {
        let mut inner = self.lock();
        inner.ensure_available()?;
        let post = inner
            .posts
            .get_mut(&update.post_id)
            .ok_or_else(|| AppError::not_found(format!("post {}", update.post_id)))?;
        post.title = update.title.clone();
        post.description = update.description.clone();
        post.visibility = update.visibility.clone();
        post.updated_at = Utc::now();
        if let Some(tags) = tags {
            post.tags = tags.into_iter().collect();
        }
        Ok(())
    }

    async fn delete_post(&self, post_id: PostId) -> Result<(), AppError> {
        let mut inner = self.lock();
        inner.ensure_available()?;
        if inner.posts.remove(&post_id).is_none() {
            return Err(AppError::not_found(format!("post {post_id}")));
        }
        inner.likes.retain(|(_, id)| *id != post_id);
        inner.saves.retain(|(_, id)| *id != post_id);
        Ok(())
    }

    async fn get_post_owner_id(&self, post_id: PostId) -> Result<UserId, AppError> {
        let inner = self.lock();
        inner.ensure_available()?;
        inner
            .posts
            .get(&post_id)
            .map(|post| post.author_id)
            .ok_or_else(|| AppError::not_found(format!("post {post_id}")))
    }

    async fn get_all_posts(&self) -> Result<Vec<PostView>, AppError> {
        let inner = self.lock();
        inner.ensure_available()?;
        // ids grow with creation time, so reverse id order is newest first
        Ok(inner
            .posts
            .iter()
            .rev()
            .map(|(post_id, post)| inner.view(*post_id, post))
            .collect())
    }

    async fn get_post_by_id(&self, post_id: PostId) -> Result<Option<PostView>, AppError> {
        let inner = self.lock();
        inner.ensure_available()?;
        Ok(inner
            .posts
            .get(&post_id)
            .map(|post| inner.view(post_id, post)))
    }

    async fn count_by_user_id(&self, user_id: UserId) -> Result<i64, AppError> {
        let inner = self.lock();
        inner.ensure_available()?;
        Ok(inner
            .posts
            .values()
            .filter(|post| post.author_id == user_id)
            .count() as i64)
    }
}

#[async_trait]
impl LikeRepository for InMemoryStore {
    async fn like_post(&self, user_id: UserId, post_id: PostId) -> Result<i64, AppError> {
        self.toggle(ReactionKind::Like, user_id, post_id, true)
    }

    async fn unlike_post(&self, user_id: UserId, post_id: PostId) -> Result<i64, AppError> {
        self.toggle(ReactionKind::Like, user_id, post_id, false)
    }

    async fn is_post_liked(&self, user_id: UserId, post_id: PostId) -> Result<bool, AppError> {
        let inner = self.lock();
        inner.ensure_available()?;
        Ok(inner.likes.contains(&(user_id, post_id)))
    }
}

#[async_trait]
impl SaveRepository for InMemoryStore {
    async fn save_post(&self, user_id: UserId, post_id: PostId) -> Result<i64, AppError> {
        self.toggle(ReactionKind::Save, user_id, post_id, true)
    }

    async fn unsave_post(&self, user_id: UserId, post_id: PostId) -> Result<i64, AppError> {
        self.toggle(ReactionKind::Save, user_id, post_id, false)
    }

    async fn is_post_saved(&self, user_id: UserId, post_id: PostId) -> Result<bool, AppError> {
        let inner = self.lock();
        inner.ensure_available()?;
        Ok(inner.saves.contains(&(user_id, post_id)))
    }
}

#[async_trait]
impl DocumentStore for InMemoryStore {
    async fn create_document(&self, document: &NewDocument) -> Result<Document, AppError> {
        let mut inner = self.lock();
        inner.ensure_available()?;
        if !inner.users.contains_key(&document.owner_id) {
            return Err(AppError::InvalidReference(format!(
                "user {}",
                document.owner_id
            )));
        }
        inner.next_document_id += 1;
        let created = Document {
            document_id: inner.next_document_id,
            owner_id: document.owner_id,
            name: document.name.trim().to_string(),
            url: document.url.trim().to_string(),
            storage_provider: document.storage_provider().to_string(),
            page_count: document.page_count,
            uploaded_at: Utc::now(),
        };
        inner.documents.insert(created.document_id, created.clone());
        Ok(created)
    }

    async fn owner_of(&self, document_id: DocumentId) -> Result<UserId, AppError> {
        let inner = self.lock();
        inner.ensure_available()?;
        inner
            .documents
            .get(&document_id)
            .map(|document| document.owner_id)
            .ok_or_else(|| AppError::not_found(format!("document {document_id}")))
    }

    async fn list_by_owner(&self, owner_id: UserId) -> Result<Vec<Document>, AppError> {
        let inner = self.lock();
        inner.ensure_available()?;
        Ok(inner
            .documents
            .values()
            .rev()
            .filter(|document| document.owner_id == owner_id)
            .cloned()
            .collect())
    }

    async fn delete_document(&self, document_id: DocumentId) -> Result<(), AppError> {
        let mut inner = self.lock();
        inner.ensure_available()?;
        if inner.documents.remove(&document_id).is_none() {
            return Err(AppError::not_found(format!("document {document_id}")));
        }
        for post in inner.posts.values_mut() {
            if post.document_id == Some(document_id) {
                post.document_id = None;
            }
        }
        Ok(())
    }
}

#[async_trait]
impl StorageHealth for InMemoryStore {
    async fn check_ready(&self) -> Result<(), AppError> {
        self.lock().ensure_available()
    }
}
