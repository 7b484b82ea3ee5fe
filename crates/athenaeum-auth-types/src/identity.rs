//! Bearer-token identity extractor.

use std::fmt;
use std::sync::Arc;

use athenaeum_domain::user::UserRole;
use axum::extract::{FromRef, FromRequestParts};
use axum_extra::headers::authorization::Bearer;
use axum_extra::headers::{Authorization, HeaderMapExt};
use http::StatusCode;
use http::request::Parts;

use crate::token::validate_access_token;

/// HMAC secret used to validate bearer tokens. Pulled from router state via [`FromRef`].
#[derive(Clone)]
pub struct JwtSecret(Arc<str>);

impl JwtSecret {
    pub fn new(secret: impl Into<Arc<str>>) -> Self {
        Self(secret.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for JwtSecret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("JwtSecret(..)")
    }
}

/// Caller identity decoded from `Authorization: Bearer <jwt>`.
///
/// Rejects with 401 when the header is absent or the token does not validate.
/// Role checks (403) are left to handlers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Identity {
    pub user_id: i32,
    pub user_role: UserRole,
}

impl Identity {
    /// True when the caller holds at least `min`.
    pub fn has_role(&self, min: UserRole) -> bool {
        self.user_role >= min
    }

    /// True when the caller is `user_id` or holds at least `min`.
    pub fn is_self_or(&self, user_id: i32, min: UserRole) -> bool {
        self.user_id == user_id || self.has_role(min)
    }
}

impl<S> FromRequestParts<S> for Identity
where
    S: Send + Sync,
    JwtSecret: FromRef<S>,
{
    type Rejection = StatusCode;

    // Resolve synchronously so the returned future does not borrow `parts`.
    fn from_request_parts(
        parts: &mut Parts,
        state: &S,
    ) -> impl std::future::Future<Output = Result<Self, Self::Rejection>> + Send {
        let secret = JwtSecret::from_ref(state);
        let result = match parts.headers.typed_get::<Authorization<Bearer>>() {
            Some(Authorization(bearer)) => validate_access_token(bearer.token(), secret.as_str())
                .map(|info| Self {
                    user_id: info.user_id,
                    user_role: info.user_role,
                })
                .map_err(|e| {
                    tracing::debug!(error = %e, "rejected bearer token");
                    StatusCode::UNAUTHORIZED
                }),
            None => Err(StatusCode::UNAUTHORIZED),
        };

        async move { result }
    }
}
