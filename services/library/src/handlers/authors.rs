use axum::{Json, extract::State, http::StatusCode};
use serde::{Deserialize, Serialize};
use validator::Validate;

use athenaeum_auth_types::identity::Identity;
use athenaeum_domain::user::UserRole;

use crate::domain::types::{Author, NewAuthor};
use crate::error::LibraryServiceError;
use crate::handlers::{ValidJson, ValidPath, require_role};
use crate::state::AppState;
use crate::usecase::author::{
    AddAuthorUseCase, DeleteAuthorUseCase, GetAuthorUseCase, ListAuthorsUseCase,
    UpdateAuthorUseCase,
};

#[derive(Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct AuthorRequest {
    #[validate(length(min = 1, max = 100))]
    pub first_name: String,
    #[validate(length(min = 1, max = 100))]
    pub last_name: String,
    #[serde(default)]
    #[validate(length(max = 2000))]
    pub biography: String,
}

impl From<AuthorRequest> for NewAuthor {
    fn from(body: AuthorRequest) -> Self {
        Self {
            first_name: body.first_name,
            last_name: body.last_name,
            biography: body.biography,
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthorResponse {
    pub author_id: i32,
    pub first_name: String,
    pub last_name: String,
    pub biography: String,
}

impl From<Author> for AuthorResponse {
    fn from(author: Author) -> Self {
        Self {
            author_id: author.id,
            first_name: author.first_name,
            last_name: author.last_name,
            biography: author.biography,
        }
    }
}

// ── POST /api/authors ────────────────────────────────────────────────────────

pub async fn add_author(
    identity: Identity,
    State(state): State<AppState>,
    ValidJson(body): ValidJson<AuthorRequest>,
) -> Result<(StatusCode, Json<AuthorResponse>), LibraryServiceError> {
    require_role(&identity, UserRole::Moderator)?;
    let usecase = AddAuthorUseCase {
        repo: state.author_repo(),
    };
    let author = usecase.execute(body.into()).await?;
    Ok((StatusCode::CREATED, Json(author.into())))
}

// ── GET /api/authors ─────────────────────────────────────────────────────────

pub async fn list_authors(
    _identity: Identity,
    State(state): State<AppState>,
) -> Result<Json<Vec<AuthorResponse>>, LibraryServiceError> {
    let usecase = ListAuthorsUseCase {
        repo: state.author_repo(),
    };
    let authors = usecase.execute().await?;
    Ok(Json(authors.into_iter().map(AuthorResponse::from).collect()))
}

// ── GET /api/authors/{id} ────────────────────────────────────────────────────

pub async fn get_author(
    _identity: Identity,
    State(state): State<AppState>,
    ValidPath(id): ValidPath<i32>,
) -> Result<Json<AuthorResponse>, LibraryServiceError> {
    let usecase = GetAuthorUseCase {
        repo: state.author_repo(),
    };
    Ok(Json(usecase.execute(id).await?.into()))
}

// ── PUT /api/authors/{id} ────────────────────────────────────────────────────

pub async fn update_author(
    identity: Identity,
    State(state): State<AppState>,
    ValidPath(id): ValidPath<i32>,
    ValidJson(body): ValidJson<AuthorRequest>,
) -> Result<Json<AuthorResponse>, LibraryServiceError> {
    require_role(&identity, UserRole::Moderator)?;
    let usecase = UpdateAuthorUseCase {
        repo: state.author_repo(),
    };
    Ok(Json(usecase.execute(id, body.into()).await?.into()))
}

// ── DELETE /api/authors/{id} ─────────────────────────────────────────────────

pub async fn delete_author(
    identity: Identity,
    State(state): State<AppState>,
    ValidPath(id): ValidPath<i32>,
) -> Result<StatusCode, LibraryServiceError> {
    require_role(&identity, UserRole::Moderator)?;
    let usecase = DeleteAuthorUseCase {
        repo: state.author_repo(),
    };
    usecase.execute(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
