use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

/// Library service domain error variants.
#[derive(Debug, thiserror::Error)]
pub enum LibraryServiceError {
    #[error("book not found")]
    BookNotFound,
    #[error("author not found")]
    AuthorNotFound,
    #[error("category not found")]
    CategoryNotFound,
    #[error("book author not found")]
    BookAuthorNotFound,
    #[error("book category not found")]
    BookCategoryNotFound,
    #[error("user not found")]
    UserNotFound,
    #[error("user profile not found")]
    UserProfileNotFound,
    #[error("loan not found")]
    LoanNotFound,
    #[error("reservation not found")]
    ReservationNotFound,
    #[error("review not found")]
    ReviewNotFound,
    #[error("no available copies")]
    NoAvailableCopies,
    #[error("available copies must be between 0 and total copies")]
    InvalidCopies,
    #[error("validation failed: {0}")]
    Validation(String),
    #[error("invalid credentials")]
    InvalidCredentials,
    #[error("forbidden")]
    Forbidden,
    #[error("user already exists")]
    UserAlreadyExists,
    #[error("book is referenced by loans, reservations or reviews")]
    BookInUse,
    #[error("user is referenced by other records")]
    UserInUse,
    #[error("internal error")]
    Internal(#[from] anyhow::Error),
}

impl LibraryServiceError {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::BookNotFound => "BOOK_NOT_FOUND",
            Self::AuthorNotFound => "AUTHOR_NOT_FOUND",
            Self::CategoryNotFound => "CATEGORY_NOT_FOUND",
            Self::BookAuthorNotFound => "BOOK_AUTHOR_NOT_FOUND",
            Self::BookCategoryNotFound => "BOOK_CATEGORY_NOT_FOUND",
            Self::UserNotFound => "USER_NOT_FOUND",
            Self::UserProfileNotFound => "USER_PROFILE_NOT_FOUND",
            Self::LoanNotFound => "LOAN_NOT_FOUND",
            Self::ReservationNotFound => "RESERVATION_NOT_FOUND",
            Self::ReviewNotFound => "REVIEW_NOT_FOUND",
            Self::NoAvailableCopies => "NO_AVAILABLE_COPIES",
            Self::InvalidCopies => "INVALID_COPIES",
            Self::Validation(_) => "VALIDATION_FAILED",
            Self::InvalidCredentials => "INVALID_CREDENTIALS",
            Self::Forbidden => "FORBIDDEN",
            Self::UserAlreadyExists => "USER_ALREADY_EXISTS",
            Self::BookInUse => "BOOK_IN_USE",
            Self::UserInUse => "USER_IN_USE",
            Self::Internal(_) => "INTERNAL",
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            Self::BookNotFound
            | Self::AuthorNotFound
            | Self::CategoryNotFound
            | Self::BookAuthorNotFound
            | Self::BookCategoryNotFound
            | Self::UserNotFound
            | Self::UserProfileNotFound
            | Self::LoanNotFound
            | Self::ReservationNotFound
            | Self::ReviewNotFound => StatusCode::NOT_FOUND,
            Self::NoAvailableCopies | Self::InvalidCopies | Self::Validation(_) => {
                StatusCode::BAD_REQUEST
            }
            Self::InvalidCredentials => StatusCode::UNAUTHORIZED,
            Self::Forbidden => StatusCode::FORBIDDEN,
            Self::UserAlreadyExists | Self::BookInUse | Self::UserInUse => StatusCode::CONFLICT,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for LibraryServiceError {
    fn into_response(self) -> Response {
        let status = self.status();
        match &self {
            Self::Internal(e) => {
                tracing::error!(error = ?e, kind = "INTERNAL", "internal error");
            }
            _ if status == StatusCode::NOT_FOUND => {
                tracing::warn!(kind = self.kind(), "resource not found");
            }
            _ => {}
        }
        let body = serde_json::json!({
            "kind": self.kind(),
            "message": self.to_string(),
        });
        (status, axum::Json(body)).into_response()
    }
}
