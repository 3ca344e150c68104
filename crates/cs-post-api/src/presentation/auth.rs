use crate::domain::UserId;
use crate::presentation::error::ApiError;
use crate::AppState;
use axum::async_trait;
use axum::extract::{FromRequestParts, Request, State};
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;
use axum::http::{HeaderMap, StatusCode};
use axum::middleware::Next;
use axum::response::Response;
use axum_extra::extract::CookieJar;
use cs_core::auth;

const AUTHENTICATE_BEARER_CHALLENGE: &str = r#"Bearer realm="cs-post-api""#;

/// The authenticated caller, placed in request extensions by [`require_principal`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Principal {
    pub user_id: UserId,
}

pub(crate) fn auth_required_error(message: impl Into<String>) -> ApiError {
    ApiError::new(StatusCode::UNAUTHORIZED, "AUTH_REQUIRED", message)
        .with_header("www-authenticate", AUTHENTICATE_BEARER_CHALLENGE)
}

fn bearer_token(headers: &HeaderMap) -> Option<Result<String, ApiError>> {
    let header = headers.get(AUTHORIZATION)?;
    let token = header
        .to_str()
        .ok()
        .and_then(|value| value.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .map(str::to_string)
        .ok_or_else(|| auth_required_error("invalid token"));
    Some(token)
}

/// Resolves the caller from `Authorization: Bearer` or, failing that, the
/// session cookie.
pub async fn require_principal(
    State(state): State<AppState>,
    jar: CookieJar,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let token = match bearer_token(request.headers()) {
        Some(token) => token?,
        None => jar
            .get(&state.cookie_name)
            .map(|cookie| cookie.value().to_string())
            .ok_or_else(|| auth_required_error("missing token"))?,
    };

    let claims = auth::verify_token(&token, &state.jwt_config)
        .map_err(|err| auth_required_error(err.to_string()))?;
    let user_id = claims
        .user_id()
        .map_err(|err| auth_required_error(err.to_string()))?;

    request.extensions_mut().insert(Principal { user_id });
    Ok(next.run(request).await)
}

#[async_trait]
impl<S> FromRequestParts<S> for Principal
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<Principal>()
            .copied()
            .ok_or_else(|| auth_required_error("missing principal"))
    }
}
