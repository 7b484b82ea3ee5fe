use axum::{Json, extract::State, http::StatusCode};
use serde::{Deserialize, Serialize};
use validator::Validate;

use athenaeum_auth_types::identity::Identity;
use athenaeum_domain::user::UserRole;

use crate::domain::types::{Book, BookQuery, NewBook};
use crate::error::LibraryServiceError;
use crate::handlers::{ValidJson, ValidPath, ValidQuery, require_role};
use crate::state::AppState;
use crate::usecase::book::{
    AddBookUseCase, DeleteBookUseCase, GetBookUseCase, ListBooksUseCase, SearchBooksUseCase,
    UpdateBookUseCase,
};

#[derive(Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct BookRequest {
    #[validate(length(min = 1, max = 255))]
    pub title: String,
    #[validate(length(min = 1, max = 1000))]
    pub description: String,
    #[validate(range(min = 0))]
    pub available_copies: i32,
    #[validate(range(min = 0))]
    pub total_copies: i32,
}

impl From<BookRequest> for NewBook {
    fn from(body: BookRequest) -> Self {
        Self {
            title: body.title,
            description: body.description,
            available_copies: body.available_copies,
            total_copies: body.total_copies,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BookResponse {
    pub book_id: i32,
    pub title: String,
    pub description: String,
    pub available_copies: i32,
    pub total_copies: i32,
}

impl From<Book> for BookResponse {
    fn from(book: Book) -> Self {
        Self {
            book_id: book.id,
            title: book.title,
            description: book.description,
            available_copies: book.available_copies,
            total_copies: book.total_copies,
        }
    }
}

fn to_responses(books: Vec<Book>) -> Json<Vec<BookResponse>> {
    Json(books.into_iter().map(BookResponse::from).collect())
}

// ── POST /api/books ──────────────────────────────────────────────────────────

pub async fn add_book(
    identity: Identity,
    State(state): State<AppState>,
    ValidJson(body): ValidJson<BookRequest>,
) -> Result<(StatusCode, Json<BookResponse>), LibraryServiceError> {
    require_role(&identity, UserRole::Moderator)?;
    let usecase = AddBookUseCase {
        repo: state.book_repo(),
    };
    let book = usecase.execute(body.into()).await?;
    Ok((StatusCode::CREATED, Json(book.into())))
}

// ── GET /api/books ───────────────────────────────────────────────────────────

pub async fn list_books(
    _identity: Identity,
    State(state): State<AppState>,
) -> Result<Json<Vec<BookResponse>>, LibraryServiceError> {
    let usecase = ListBooksUseCase {
        repo: state.book_repo(),
    };
    Ok(to_responses(usecase.execute().await?))
}

// ── GET /api/books/{id} ──────────────────────────────────────────────────────

pub async fn get_book(
    _identity: Identity,
    State(state): State<AppState>,
    ValidPath(id): ValidPath<i32>,
) -> Result<Json<BookResponse>, LibraryServiceError> {
    let usecase = GetBookUseCase {
        repo: state.book_repo(),
    };
    Ok(Json(usecase.execute(id).await?.into()))
}

// ── PUT /api/books/{id} ──────────────────────────────────────────────────────

pub async fn update_book(
    identity: Identity,
    State(state): State<AppState>,
    ValidPath(id): ValidPath<i32>,
    ValidJson(body): ValidJson<BookRequest>,
) -> Result<Json<BookResponse>, LibraryServiceError> {
    require_role(&identity, UserRole::Moderator)?;
    let usecase = UpdateBookUseCase {
        repo: state.book_repo(),
    };
    Ok(Json(usecase.execute(id, body.into()).await?.into()))
}

// ── DELETE /api/books/{id} ───────────────────────────────────────────────────

pub async fn delete_book(
    identity: Identity,
    State(state): State<AppState>,
    ValidPath(id): ValidPath<i32>,
) -> Result<StatusCode, LibraryServiceError> {
    require_role(&identity, UserRole::Moderator)?;
    let usecase = DeleteBookUseCase {
        repo: state.book_repo(),
    };
    usecase.execute(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

// ── GET /api/books/search/* ──────────────────────────────────────────────────

#[derive(Deserialize, Validate)]
pub struct TitleQuery {
    #[validate(length(min = 1, max = 255))]
    pub title: String,
}

#[derive(Deserialize, Validate)]
pub struct NameQuery {
    #[validate(length(min = 1, max = 255))]
    pub name: String,
}

#[derive(Deserialize, Validate)]
pub struct CopiesRangeQuery {
    pub min: i32,
    pub max: i32,
}

async fn search(
    state: &AppState,
    query: BookQuery,
) -> Result<Json<Vec<BookResponse>>, LibraryServiceError> {
    let usecase = SearchBooksUseCase {
        repo: state.book_repo(),
    };
    Ok(to_responses(usecase.execute(query).await?))
}

pub async fn search_by_title(
    _identity: Identity,
    State(state): State<AppState>,
    ValidQuery(query): ValidQuery<TitleQuery>,
) -> Result<Json<Vec<BookResponse>>, LibraryServiceError> {
    search(&state, BookQuery::Title(query.title)).await
}

pub async fn search_by_available_copies(
    _identity: Identity,
    State(state): State<AppState>,
    ValidQuery(query): ValidQuery<CopiesRangeQuery>,
) -> Result<Json<Vec<BookResponse>>, LibraryServiceError> {
    search(
        &state,
        BookQuery::AvailableCopies {
            min: query.min,
            max: query.max,
        },
    )
    .await
}

pub async fn search_by_author(
    _identity: Identity,
    State(state): State<AppState>,
    ValidQuery(query): ValidQuery<NameQuery>,
) -> Result<Json<Vec<BookResponse>>, LibraryServiceError> {
    search(&state, BookQuery::AuthorName(query.name)).await
}

pub async fn search_by_category(
    _identity: Identity,
    State(state): State<AppState>,
    ValidQuery(query): ValidQuery<NameQuery>,
) -> Result<Json<Vec<BookResponse>>, LibraryServiceError> {
    search(&state, BookQuery::CategoryName(query.name)).await
}
