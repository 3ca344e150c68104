use super::{DocumentId, UserId};
use chrono::{DateTime, Utc};

pub const DEFAULT_STORAGE_PROVIDER: &str = "local";

/// Metadata of an uploaded file. The bytes themselves live in external storage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    pub document_id: DocumentId,
    pub owner_id: UserId,
    pub name: String,
    pub url: String,
    pub storage_provider: String,
    pub page_count: i32,
    pub uploaded_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewDocument {
    pub owner_id: UserId,
    pub name: String,
    pub url: String,
    pub storage_provider: Option<String>,
    pub page_count: i32,
}

impl NewDocument {
    pub fn storage_provider(&self) -> &str {
        self.storage_provider
            .as_deref()
            .map(str::trim)
            .filter(|value| !value.is_empty())
            .unwrap_or(DEFAULT_STORAGE_PROVIDER)
    }
}
