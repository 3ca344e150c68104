pub mod auth;
pub mod dto;
pub mod error;
pub mod handlers;
pub mod openapi;

pub use auth::{require_principal, Principal};
pub use error::{ApiError, ApiResult, ErrorResponse};
