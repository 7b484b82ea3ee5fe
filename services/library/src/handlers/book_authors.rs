use axum::{Json, extract::State, http::StatusCode};
use serde::Deserialize;
use validator::Validate;

use athenaeum_auth_types::identity::Identity;
use athenaeum_domain::id::BookAuthorKey;
use athenaeum_domain::user::UserRole;

use crate::error::LibraryServiceError;
use crate::handlers::{ValidJson, ValidPath, require_role};
use crate::state::AppState;
use crate::usecase::book_author::{
    AddBookAuthorUseCase, DeleteBookAuthorUseCase, GetBookAuthorUseCase, ListBookAuthorsUseCase,
};

#[derive(Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct BookAuthorRequest {
    #[validate(range(min = 1))]
    pub book_id: i32,
    #[validate(range(min = 1))]
    pub author_id: i32,
}

// ── POST /api/book-authors ───────────────────────────────────────────────────

pub async fn add_book_author(
    identity: Identity,
    State(state): State<AppState>,
    ValidJson(body): ValidJson<BookAuthorRequest>,
) -> Result<(StatusCode, Json<BookAuthorKey>), LibraryServiceError> {
    require_role(&identity, UserRole::Moderator)?;
    let usecase = AddBookAuthorUseCase {
        books: state.book_repo(),
        authors: state.author_repo(),
        links: state.book_author_repo(),
    };
    let key = usecase
        .execute(BookAuthorKey::new(body.book_id, body.author_id))
        .await?;
    Ok((StatusCode::CREATED, Json(key)))
}

// ── GET /api/book-authors ────────────────────────────────────────────────────

pub async fn list_book_authors(
    _identity: Identity,
    State(state): State<AppState>,
) -> Result<Json<Vec<BookAuthorKey>>, LibraryServiceError> {
    let usecase = ListBookAuthorsUseCase {
        links: state.book_author_repo(),
    };
    Ok(Json(usecase.execute().await?))
}

// ── GET /api/book-authors/{book_id}/{author_id} ──────────────────────────────

pub async fn get_book_author(
    _identity: Identity,
    State(state): State<AppState>,
    ValidPath((book_id, author_id)): ValidPath<(i32, i32)>,
) -> Result<Json<BookAuthorKey>, LibraryServiceError> {
    let usecase = GetBookAuthorUseCase {
        links: state.book_author_repo(),
    };
    Ok(Json(
        usecase
            .execute(BookAuthorKey::new(book_id, author_id))
            .await?,
    ))
}

// ── DELETE /api/book-authors/{book_id}/{author_id} ───────────────────────────

pub async fn delete_book_author(
    identity: Identity,
    State(state): State<AppState>,
    ValidPath((book_id, author_id)): ValidPath<(i32, i32)>,
) -> Result<StatusCode, LibraryServiceError> {
    require_role(&identity, UserRole::Moderator)?;
    let usecase = DeleteBookAuthorUseCase {
        links: state.book_author_repo(),
    };
    usecase
        .execute(BookAuthorKey::new(book_id, author_id))
        .await?;
    Ok(StatusCode::NO_CONTENT)
}
