use axum::{Json, extract::State, http::StatusCode};
use serde::Deserialize;
use validator::Validate;

use athenaeum_auth_types::identity::Identity;
use athenaeum_domain::id::BookCategoryKey;
use athenaeum_domain::user::UserRole;

use crate::error::LibraryServiceError;
use crate::handlers::{ValidJson, ValidPath, require_role};
use crate::state::AppState;
use crate::usecase::book_category::{
    AddBookCategoryUseCase, DeleteBookCategoryUseCase, GetBookCategoryUseCase,
    ListBookCategoriesUseCase,
};

#[derive(Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct BookCategoryRequest {
    #[validate(range(min = 1))]
    pub book_id: i32,
    #[validate(range(min = 1))]
    pub category_id: i32,
}

// ── POST /api/book-categories ────────────────────────────────────────────────

pub async fn add_book_category(
    identity: Identity,
    State(state): State<AppState>,
    ValidJson(body): ValidJson<BookCategoryRequest>,
) -> Result<(StatusCode, Json<BookCategoryKey>), LibraryServiceError> {
    require_role(&identity, UserRole::Moderator)?;
    let usecase = AddBookCategoryUseCase {
        books: state.book_repo(),
        categories: state.category_repo(),
        links: state.book_category_repo(),
    };
    let key = usecase
        .execute(BookCategoryKey::new(body.book_id, body.category_id))
        .await?;
    Ok((StatusCode::CREATED, Json(key)))
}

// ── GET /api/book-categories ─────────────────────────────────────────────────

pub async fn list_book_categories(
    _identity: Identity,
    State(state): State<AppState>,
) -> Result<Json<Vec<BookCategoryKey>>, LibraryServiceError> {
    let usecase = ListBookCategoriesUseCase {
        links: state.book_category_repo(),
    };
    Ok(Json(usecase.execute().await?))
}

// ── GET /api/book-categories/{book_id}/{category_id} ─────────────────────────

pub async fn get_book_category(
    _identity: Identity,
    State(state): State<AppState>,
    ValidPath((book_id, category_id)): ValidPath<(i32, i32)>,
) -> Result<Json<BookCategoryKey>, LibraryServiceError> {
    let usecase = GetBookCategoryUseCase {
        links: state.book_category_repo(),
    };
    Ok(Json(
        usecase
            .execute(BookCategoryKey::new(book_id, category_id))
            .await?,
    ))
}

// ── DELETE /api/book-categories/{book_id}/{category_id} ──────────────────────

pub async fn delete_book_category(
    identity: Identity,
    State(state): State<AppState>,
    ValidPath((book_id, category_id)): ValidPath<(i32, i32)>,
) -> Result<StatusCode, LibraryServiceError> {
    require_role(&identity, UserRole::Moderator)?;
    let usecase = DeleteBookCategoryUseCase {
        links: state.book_category_repo(),
    };
    usecase
        .execute(BookCategoryKey::new(book_id, category_id))
        .await?;
    Ok(StatusCode::NO_CONTENT)
}
