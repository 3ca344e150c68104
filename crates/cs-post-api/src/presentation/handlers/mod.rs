pub mod documents;
pub mod posts;
pub mod reactions;
pub mod users;

use crate::presentation::error::{ApiError, ApiResult};
use axum::extract::rejection::JsonRejection;
use axum::Json;

/// Path ids are positive integers; anything else is `INVALID_ID`.
pub(crate) fn parse_id(raw: &str) -> ApiResult<i64> {
    raw.trim()
        .parse::<i64>()
        .ok()
        .filter(|id| *id > 0)
        .ok_or_else(|| ApiError::invalid_id(raw))
}

pub(crate) fn json_body<T>(payload: Result<Json<T>, JsonRejection>) -> ApiResult<T> {
    payload
        .map(|Json(body)| body)
        .map_err(|rejection| ApiError::invalid_body(rejection.body_text()))
}
