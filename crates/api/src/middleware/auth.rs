//! Bearer-token authentication for protected routes.

use axum::extract::{FromRequestParts, Request, State};
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;
use axum::http::HeaderMap;
use axum::middleware::Next;
use axum::response::Response;
use notes_core::error::CoreError;
use notes_core::types::DbId;

use crate::auth::jwt::TokenManager;
use crate::error::AppError;
use crate::state::AppState;

pub const MSG_HEADER_REQUIRED: &str = "Authorization header required";
pub const MSG_INVALID_FORMAT: &str = "Invalid authorization format";
pub const MSG_INVALID_TOKEN: &str = "Invalid or expired token";

/// Authenticated user bound to the request by [`require_auth`].
///
/// Use this as an extractor parameter in any handler mounted behind the gate:
///
/// ```ignore
/// async fn my_handler(user: AuthUser) -> AppResult<Json<()>> {
///     tracing::info!(user_id = user.user_id, "handling request");
///     Ok(Json(()))
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthUser {
    /// The user's internal database id (from the `id` claim).
    pub user_id: DbId,
    /// The username carried in the token.
    pub username: String,
}

/// Middleware: authenticate the request or answer 401 without calling `next`.
pub async fn require_auth(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let user = authenticate(request.headers(), &state.tokens)?;
    request.extensions_mut().insert(user);
    Ok(next.run(request).await)
}

/// Resolve the `Authorization: Bearer <token>` header into an [`AuthUser`].
///
/// Every token problem (bad signature, expired, malformed claims) yields the
/// same message; the underlying reason only goes to the debug log.
pub fn authenticate(headers: &HeaderMap, tokens: &TokenManager) -> Result<AuthUser, CoreError> {
    let header = headers
        .get(AUTHORIZATION)
        .ok_or_else(|| unauthorized(MSG_HEADER_REQUIRED))?;
    let header = header
        .to_str()
        .map_err(|_| unauthorized(MSG_INVALID_FORMAT))?;
    if header.trim().is_empty() {
        return Err(unauthorized(MSG_HEADER_REQUIRED));
    }

    let mut parts = header.split_whitespace();
    let token = match (parts.next(), parts.next(), parts.next()) {
        (Some("Bearer"), Some(token), None) => token,
        _ => {
            tracing::debug!("Rejected malformed Authorization header");
            return Err(unauthorized(MSG_INVALID_FORMAT));
        }
    };

    let identity = tokens.verify(token).map_err(|err| {
        tracing::debug!(error = %err, "Token verification failed");
        unauthorized(MSG_INVALID_TOKEN)
    })?;

    Ok(AuthUser {
        user_id: identity.user_id,
        username: identity.username,
    })
}

fn unauthorized(message: &str) -> CoreError {
    CoreError::Unauthorized(message.to_string())
}

impl<S: Send + Sync> FromRequestParts<S> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts.extensions.get::<AuthUser>().cloned().ok_or_else(|| {
            AppError::Core(CoreError::Internal(
                "AuthUser requested on a route without require_auth".into(),
            ))
        })
    }
}
