use axum::{Json, extract::State, http::StatusCode};
use serde::{Deserialize, Serialize};
use validator::Validate;

use athenaeum_auth_types::identity::Identity;
use athenaeum_domain::user::UserRole;

use crate::domain::types::User;
use crate::error::LibraryServiceError;
use crate::handlers::{ValidJson, ValidPath, require_role};
use crate::state::AppState;
use crate::usecase::user::{
    AddUserUseCase, DeleteUserUseCase, GetUserUseCase, ListUsersUseCase, UpdateUserUseCase,
    UserInput,
};

#[derive(Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UserRequest {
    #[validate(length(min = 6, max = 50))]
    pub username: String,
    #[validate(email, length(max = 255))]
    pub email: String,
    #[validate(length(min = 6, max = 100))]
    pub password: String,
    pub role: UserRole,
}

impl From<UserRequest> for UserInput {
    fn from(body: UserRequest) -> Self {
        Self {
            username: body.username,
            email: body.email,
            password: body.password,
            role: body.role,
        }
    }
}

/// Account as returned to clients. The password hash never leaves the service.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    pub user_id: i32,
    pub username: String,
    pub email: String,
    pub role: UserRole,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            user_id: user.id,
            username: user.username,
            email: user.email,
            role: user.role,
        }
    }
}

// ── POST /api/users ──────────────────────────────────────────────────────────

pub async fn add_user(
    identity: Identity,
    State(state): State<AppState>,
    ValidJson(body): ValidJson<UserRequest>,
) -> Result<(StatusCode, Json<UserResponse>), LibraryServiceError> {
    require_role(&identity, UserRole::Admin)?;
    let usecase = AddUserUseCase {
        repo: state.user_repo(),
    };
    let user = usecase.execute(body.into()).await?;
    Ok((StatusCode::CREATED, Json(user.into())))
}

// ── GET /api/users ───────────────────────────────────────────────────────────

pub async fn list_users(
    identity: Identity,
    State(state): State<AppState>,
) -> Result<Json<Vec<UserResponse>>, LibraryServiceError> {
    require_role(&identity, UserRole::Admin)?;
    let usecase = ListUsersUseCase {
        repo: state.user_repo(),
    };
    let users = usecase.execute().await?;
    Ok(Json(users.into_iter().map(UserResponse::from).collect()))
}

// ── GET /api/users/{id} ──────────────────────────────────────────────────────

pub async fn get_user(
    identity: Identity,
    State(state): State<AppState>,
    ValidPath(id): ValidPath<i32>,
) -> Result<Json<UserResponse>, LibraryServiceError> {
    require_role(&identity, UserRole::Admin)?;
    let usecase = GetUserUseCase {
        repo: state.user_repo(),
    };
    Ok(Json(usecase.execute(id).await?.into()))
}

// ── PUT /api/users/{id} ──────────────────────────────────────────────────────

pub async fn update_user(
    identity: Identity,
    State(state): State<AppState>,
    ValidPath(id): ValidPath<i32>,
    ValidJson(body): ValidJson<UserRequest>,
) -> Result<Json<UserResponse>, LibraryServiceError> {
    require_role(&identity, UserRole::Admin)?;
    let usecase = UpdateUserUseCase {
        repo: state.user_repo(),
    };
    Ok(Json(usecase.execute(id, body.into()).await?.into()))
}

// ── DELETE /api/users/{id} ───────────────────────────────────────────────────

pub async fn delete_user(
    identity: Identity,
    State(state): State<AppState>,
    ValidPath(id): ValidPath<i32>,
) -> Result<StatusCode, LibraryServiceError> {
    require_role(&identity, UserRole::Admin)?;
    let usecase = DeleteUserUseCase {
        repo: state.user_repo(),
    };
    usecase.execute(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
