use axum::{
    extract::{Request, State},
    http::{header::AUTHORIZATION, HeaderMap},
    middleware::Next,
    response::Response,
};
use tracing::{debug, warn};

use crate::{error::ApiError, state::AppState};

/// Reads the access token from `Authorization`, accepting `Bearer <token>` or the bare token.
pub fn access_token(headers: &HeaderMap) -> Option<&str> {
    let value = headers.get(AUTHORIZATION)?.to_str().ok()?.trim_start();
    let token = value
        .strip_prefix("Bearer ")
        .or_else(|| value.strip_prefix("bearer "))
        .unwrap_or(value)
        .trim();
    (!token.is_empty()).then_some(token)
}

/// Resolves the access token to a `User` and stores it in the request extensions.
/// Rejects with 401 when the token is absent and 403 when it matches nobody.
pub async fn authenticate_user(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let token = access_token(req.headers())
        .ok_or_else(|| {
            warn!("request without access token");
            ApiError::Unauthorized("Access token is missing".into())
        })?
        .to_owned();

    let user = match state.store.find_by_access_token(&token).await? {
        Some(user) => user,
        None => {
            warn!("invalid access token");
            return Err(ApiError::Forbidden("Invalid access token".into()));
        }
    };

    debug!(user_id = %user.id, "request authenticated");
    req.extensions_mut().insert(user);
    Ok(next.run(req).await)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn headers_with(value: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, HeaderValue::from_str(value).unwrap());
        headers
    }

    #[test]
    fn bare_token_is_accepted() {
        assert_eq!(access_token(&headers_with("abc123")), Some("abc123"));
    }

    #[test]
    fn bearer_scheme_is_stripped() {
        assert_eq!(access_token(&headers_with("Bearer abc123")), Some("abc123"));
        assert_eq!(access_token(&headers_with("bearer abc123")), Some("abc123"));
    }

    #[test]
    fn missing_or_blank_header_yields_none() {
        assert_eq!(access_token(&HeaderMap::new()), None);
        assert_eq!(access_token(&headers_with("")), None);
        assert_eq!(access_token(&headers_with("Bearer ")), None);
    }
}
