use axum::{Json, extract::State, http::StatusCode};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use athenaeum_auth_types::identity::Identity;
use athenaeum_domain::user::UserRole;

use crate::domain::types::{NewReview, Review};
use crate::error::LibraryServiceError;
use crate::handlers::{ValidJson, ValidPath, not_in_future, require_role, require_self_or_moderator};
use crate::state::AppState;
use crate::usecase::review::{
    AddReviewUseCase, DeleteReviewUseCase, GetReviewUseCase, ListReviewsByBookUseCase,
    ListReviewsUseCase, UpdateReviewUseCase,
};

#[derive(Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ReviewRequest {
    pub user_id: i32,
    pub book_id: i32,
    #[validate(length(min = 1, max = 500))]
    pub comment: String,
    #[validate(range(min = 1, max = 10))]
    pub rating: i16,
    /// Defaults to the time of the request.
    #[serde(default = "Utc::now")]
    #[validate(custom(function = "not_in_future"))]
    pub created_at: DateTime<Utc>,
}

impl From<ReviewRequest> for NewReview {
    fn from(body: ReviewRequest) -> Self {
        Self {
            user_id: body.user_id,
            book_id: body.book_id,
            comment: body.comment,
            rating: body.rating,
            created_at: body.created_at,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewResponse {
    pub review_id: i32,
    pub user_id: i32,
    pub book_id: i32,
    pub comment: String,
    pub rating: i16,
    #[serde(serialize_with = "athenaeum_core::serde::to_rfc3339_ms")]
    pub created_at: DateTime<Utc>,
}

impl From<Review> for ReviewResponse {
    fn from(review: Review) -> Self {
        Self {
            review_id: review.id,
            user_id: review.user_id,
            book_id: review.book_id,
            comment: review.comment,
            rating: review.rating,
            created_at: review.created_at,
        }
    }
}

fn to_responses(reviews: Vec<Review>) -> Json<Vec<ReviewResponse>> {
    Json(reviews.into_iter().map(ReviewResponse::from).collect())
}

// ── POST /api/reviews ────────────────────────────────────────────────────────

pub async fn add_review(
    identity: Identity,
    State(state): State<AppState>,
    ValidJson(body): ValidJson<ReviewRequest>,
) -> Result<(StatusCode, Json<ReviewResponse>), LibraryServiceError> {
    require_self_or_moderator(&identity, body.user_id)?;
    let usecase = AddReviewUseCase {
        users: state.user_repo(),
        books: state.book_repo(),
        reviews: state.review_repo(),
    };
    let review = usecase.execute(body.into()).await?;
    Ok((StatusCode::CREATED, Json(review.into())))
}

// ── GET /api/reviews ─────────────────────────────────────────────────────────

pub async fn list_reviews(
    _identity: Identity,
    State(state): State<AppState>,
) -> Result<Json<Vec<ReviewResponse>>, LibraryServiceError> {
    let usecase = ListReviewsUseCase {
        reviews: state.review_repo(),
    };
    Ok(to_responses(usecase.execute().await?))
}

// ── GET /api/reviews/{id} ────────────────────────────────────────────────────

pub async fn get_review(
    _identity: Identity,
    State(state): State<AppState>,
    ValidPath(id): ValidPath<i32>,
) -> Result<Json<ReviewResponse>, LibraryServiceError> {
    let usecase = GetReviewUseCase {
        reviews: state.review_repo(),
    };
    Ok(Json(usecase.execute(id).await?.into()))
}

// ── GET /api/reviews/book/{book_id} ──────────────────────────────────────────

pub async fn list_reviews_by_book(
    _identity: Identity,
    State(state): State<AppState>,
    ValidPath(book_id): ValidPath<i32>,
) -> Result<Json<Vec<ReviewResponse>>, LibraryServiceError> {
    let usecase = ListReviewsByBookUseCase {
        reviews: state.review_repo(),
    };
    Ok(to_responses(usecase.execute(book_id).await?))
}

// ── PUT /api/reviews/{id} ────────────────────────────────────────────────────

pub async fn update_review(
    identity: Identity,
    State(state): State<AppState>,
    ValidPath(id): ValidPath<i32>,
    ValidJson(body): ValidJson<ReviewRequest>,
) -> Result<Json<ReviewResponse>, LibraryServiceError> {
    require_self_or_moderator(&identity, body.user_id)?;
    let current = GetReviewUseCase {
        reviews: state.review_repo(),
    }
    .execute(id)
    .await?;
    require_self_or_moderator(&identity, current.user_id)?;

    let usecase = UpdateReviewUseCase {
        users: state.user_repo(),
        books: state.book_repo(),
        reviews: state.review_repo(),
    };
    Ok(Json(usecase.execute(id, body.into()).await?.into()))
}

// ── DELETE /api/reviews/{id} ─────────────────────────────────────────────────

pub async fn delete_review(
    identity: Identity,
    State(state): State<AppState>,
    ValidPath(id): ValidPath<i32>,
) -> Result<StatusCode, LibraryServiceError> {
    require_role(&identity, UserRole::Moderator)?;
    let usecase = DeleteReviewUseCase {
        reviews: state.review_repo(),
    };
    usecase.execute(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
