use axum::{Json, extract::State, http::StatusCode};
use serde::{Deserialize, Serialize};
use validator::Validate;

use athenaeum_auth_types::identity::Identity;
use athenaeum_domain::user::UserRole;

use crate::domain::types::{Category, NewCategory};
use crate::error::LibraryServiceError;
use crate::handlers::{ValidJson, ValidPath, require_role};
use crate::state::AppState;
use crate::usecase::category::{
    AddCategoryUseCase, DeleteCategoryUseCase, GetCategoryUseCase, ListCategoriesUseCase,
    UpdateCategoryUseCase,
};

#[derive(Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CategoryRequest {
    #[validate(length(min = 1, max = 50))]
    pub category_name: String,
    #[validate(length(min = 1, max = 50))]
    pub description: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryResponse {
    pub category_id: i32,
    pub category_name: String,
    pub description: String,
}

impl From<Category> for CategoryResponse {
    fn from(category: Category) -> Self {
        Self {
            category_id: category.id,
            category_name: category.name,
            description: category.description,
        }
    }
}

fn new_category(body: CategoryRequest) -> NewCategory {
    NewCategory {
        name: body.category_name,
        description: body.description,
    }
}

// ── POST /api/categories ─────────────────────────────────────────────────────

pub async fn add_category(
    identity: Identity,
    State(state): State<AppState>,
    ValidJson(body): ValidJson<CategoryRequest>,
) -> Result<(StatusCode, Json<CategoryResponse>), LibraryServiceError> {
    require_role(&identity, UserRole::Moderator)?;
    let usecase = AddCategoryUseCase {
        repo: state.category_repo(),
    };
    let category = usecase.execute(new_category(body)).await?;
    Ok((StatusCode::CREATED, Json(category.into())))
}

// ── GET /api/categories ──────────────────────────────────────────────────────

pub async fn list_categories(
    _identity: Identity,
    State(state): State<AppState>,
) -> Result<Json<Vec<CategoryResponse>>, LibraryServiceError> {
    let usecase = ListCategoriesUseCase {
        repo: state.category_repo(),
    };
    let categories = usecase.execute().await?;
    Ok(Json(categories.into_iter().map(CategoryResponse::from).collect()))
}

// ── GET /api/categories/{id} ─────────────────────────────────────────────────

pub async fn get_category(
    _identity: Identity,
    State(state): State<AppState>,
    ValidPath(id): ValidPath<i32>,
) -> Result<Json<CategoryResponse>, LibraryServiceError> {
    let usecase = GetCategoryUseCase {
        repo: state.category_repo(),
    };
    Ok(Json(usecase.execute(id).await?.into()))
}

// ── PUT /api/categories/{id} ─────────────────────────────────────────────────

pub async fn update_category(
    identity: Identity,
    State(state): State<AppState>,
    ValidPath(id): ValidPath<i32>,
    ValidJson(body): ValidJson<CategoryRequest>,
) -> Result<Json<CategoryResponse>, LibraryServiceError> {
    require_role(&identity, UserRole::Moderator)?;
    let usecase = UpdateCategoryUseCase {
        repo: state.category_repo(),
    };
    Ok(Json(usecase.execute(id, new_category(body)).await?.into()))
}

// ── DELETE /api/categories/{id} ──────────────────────────────────────────────

pub async fn delete_category(
    identity: Identity,
    State(state): State<AppState>,
    ValidPath(id): ValidPath<i32>,
) -> Result<StatusCode, LibraryServiceError> {
    require_role(&identity, UserRole::Moderator)?;
    let usecase = DeleteCategoryUseCase {
        repo: state.category_repo(),
    };
    usecase.execute(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
