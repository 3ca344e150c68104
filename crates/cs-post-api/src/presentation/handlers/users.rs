use super::parse_id;
use crate::presentation::dto::PostCountResponse;
use crate::presentation::error::ApiResult;
use crate::AppState;
use axum::extract::{Path, State};
use axum::Json;

pub async fn post_count(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> ApiResult<Json<PostCountResponse>> {
    let user_id = parse_id(&raw_id)?;
    let post_count = state.posts.count_by_user_id(user_id).await?;
    Ok(Json(PostCountResponse {
        user_id,
        post_count,
    }))
}
