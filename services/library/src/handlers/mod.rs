use axum::Json;
use axum::extract::{FromRequest, FromRequestParts, Path, Query, Request};
use axum::http::request::Parts;
use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use validator::{Validate, ValidationError};

use athenaeum_auth_types::identity::Identity;
use athenaeum_domain::user::UserRole;

use crate::error::LibraryServiceError;

pub mod auth;
pub mod authors;
pub mod book_authors;
pub mod book_categories;
pub mod books;
pub mod categories;
pub mod loans;
pub mod reservations;
pub mod reviews;
pub mod user_profiles;
pub mod users;

/// JSON body that has been deserialized and passed its `validator` rules.
///
/// Malformed JSON, unknown enum values and rule violations all reject with
/// `VALIDATION_FAILED`.
pub struct ValidJson<T>(pub T);

impl<S, T> FromRequest<S> for ValidJson<T>
where
    S: Send + Sync,
    T: DeserializeOwned + Validate + Send,
{
    type Rejection = LibraryServiceError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|e| LibraryServiceError::Validation(e.body_text()))?;
        validate(&value)?;
        Ok(Self(value))
    }
}

/// Query string that has been deserialized and passed its `validator` rules.
pub struct ValidQuery<T>(pub T);

impl<S, T> FromRequestParts<S> for ValidQuery<T>
where
    S: Send + Sync,
    T: DeserializeOwned + Validate + Send,
{
    type Rejection = LibraryServiceError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(value) = Query::<T>::from_request_parts(parts, state)
            .await
            .map_err(|e| LibraryServiceError::Validation(e.body_text()))?;
        validate(&value)?;
        Ok(Self(value))
    }
}

/// Path parameters; a segment that fails to parse rejects with `VALIDATION_FAILED`.
pub struct ValidPath<T>(pub T);

impl<S, T> FromRequestParts<S> for ValidPath<T>
where
    S: Send + Sync,
    T: DeserializeOwned + Send,
{
    type Rejection = LibraryServiceError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(value) = Path::<T>::from_request_parts(parts, state)
            .await
            .map_err(|e| LibraryServiceError::Validation(e.body_text()))?;
        Ok(Self(value))
    }
}

pub(crate) fn validate<T: Validate>(value: &T) -> Result<(), LibraryServiceError> {
    value
        .validate()
        .map_err(|e| LibraryServiceError::Validation(e.to_string()))
}

pub(crate) fn require_role(identity: &Identity, min: UserRole) -> Result<(), LibraryServiceError> {
    if identity.has_role(min) {
        Ok(())
    } else {
        Err(LibraryServiceError::Forbidden)
    }
}

/// Callers may act on their own records; moderators may act on anyone's.
pub(crate) fn require_self_or_moderator(
    identity: &Identity,
    user_id: i32,
) -> Result<(), LibraryServiceError> {
    if identity.is_self_or(user_id, UserRole::Moderator) {
        Ok(())
    } else {
        Err(LibraryServiceError::Forbidden)
    }
}

pub(crate) fn not_in_future(value: &DateTime<Utc>) -> Result<(), ValidationError> {
    if *value > Utc::now() {
        return Err(ValidationError::new("in_future"));
    }
    Ok(())
}

pub(crate) fn not_in_past(value: &DateTime<Utc>) -> Result<(), ValidationError> {
    if *value < Utc::now() {
        return Err(ValidationError::new("in_past"));
    }
    Ok(())
}
