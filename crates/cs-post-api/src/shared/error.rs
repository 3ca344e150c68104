use thiserror::Error;
use tracing::warn;

/// Failure kinds surfaced by services and repositories.
///
/// Callers branch on the variant, never on the message text.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AppError {
    /// Bad input rejected before any storage access.
    #[error("validation failed: {0}")]
    Validation(String),
    /// A referenced row is missing or belongs to someone else.
    #[error("invalid reference: {0}")]
    InvalidReference(String),
    #[error("not found: {0}")]
    NotFound(String),
    #[error("forbidden: {0}")]
    Forbidden(String),
    /// Transaction, connectivity or other I/O failure. The message is for logs only.
    #[error("storage failure: {0}")]
    Storage(String),
}

impl AppError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound(message.into())
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Self::Validation(_) => "validation",
            Self::InvalidReference(_) => "invalid_reference",
            Self::NotFound(_) => "not_found",
            Self::Forbidden(_) => "forbidden",
            Self::Storage(_) => "storage",
        }
    }
}

pub(crate) const MISSING_REFERENCE_MESSAGE: &str = "referenced record does not exist";
pub(crate) const DUPLICATE_VALUE_MESSAGE: &str = "value already exists";
pub(crate) const REJECTED_VALUE_MESSAGE: &str = "value is not allowed";
pub(crate) const MISSING_VALUE_MESSAGE: &str = "required value is missing";

impl From<sqlx::Error> for AppError {
    /// Constraint violations become client errors with fixed messages; the
    /// database text and constraint name only reach the log.
    fn from(err: sqlx::Error) -> Self {
        use sqlx::error::ErrorKind;

        let sqlx::Error::Database(db_err) = &err else {
            return match err {
                sqlx::Error::RowNotFound => AppError::not_found("row not found"),
                other => AppError::Storage(other.to_string()),
            };
        };

        let mapped = match db_err.kind() {
            ErrorKind::ForeignKeyViolation => {
                AppError::InvalidReference(MISSING_REFERENCE_MESSAGE.to_string())
            }
            ErrorKind::UniqueViolation => AppError::validation(DUPLICATE_VALUE_MESSAGE),
            ErrorKind::CheckViolation => AppError::validation(REJECTED_VALUE_MESSAGE),
            ErrorKind::NotNullViolation => AppError::validation(MISSING_VALUE_MESSAGE),
            _ => return AppError::Storage(err.to_string()),
        };
        warn!(
            error = %db_err,
            constraint = db_err.constraint().unwrap_or_default(),
            kind = mapped.kind(),
            "constraint violation"
        );
        mapped
    }
}

pub type Result<T> = std::result::Result<T, AppError>;
