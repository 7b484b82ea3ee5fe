use axum::{Json, extract::State, http::StatusCode};
use serde::{Deserialize, Serialize};
use validator::Validate;

use athenaeum_auth_types::identity::Identity;
use athenaeum_domain::user::UserRole;

use crate::domain::types::{NewUserProfile, UserProfile};
use crate::error::LibraryServiceError;
use crate::handlers::{ValidJson, ValidPath, require_role, require_self_or_moderator};
use crate::state::AppState;
use crate::usecase::user_profile::{
    AddUserProfileUseCase, DeleteUserProfileUseCase, GetUserProfileUseCase,
    ListUserProfilesUseCase, UpdateUserProfileUseCase,
};

#[derive(Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UserProfileRequest {
    #[validate(length(min = 1, max = 50))]
    pub first_name: String,
    #[validate(length(min = 1, max = 50))]
    pub last_name: String,
    #[validate(length(min = 1, max = 20))]
    pub phone: String,
    #[validate(length(min = 1, max = 255))]
    pub address: String,
    pub user_id: i32,
}

impl From<UserProfileRequest> for NewUserProfile {
    fn from(body: UserProfileRequest) -> Self {
        Self {
            first_name: body.first_name,
            last_name: body.last_name,
            phone: body.phone,
            address: body.address,
            user_id: body.user_id,
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfileResponse {
    pub user_profile_id: i32,
    pub first_name: String,
    pub last_name: String,
    pub phone: String,
    pub address: String,
    pub user_id: i32,
}

impl From<UserProfile> for UserProfileResponse {
    fn from(profile: UserProfile) -> Self {
        Self {
            user_profile_id: profile.id,
            first_name: profile.first_name,
            last_name: profile.last_name,
            phone: profile.phone,
            address: profile.address,
            user_id: profile.user_id,
        }
    }
}

// ── POST /api/user-profiles ──────────────────────────────────────────────────

pub async fn add_user_profile(
    identity: Identity,
    State(state): State<AppState>,
    ValidJson(body): ValidJson<UserProfileRequest>,
) -> Result<(StatusCode, Json<UserProfileResponse>), LibraryServiceError> {
    require_self_or_moderator(&identity, body.user_id)?;
    let usecase = AddUserProfileUseCase {
        users: state.user_repo(),
        profiles: state.user_profile_repo(),
    };
    let profile = usecase.execute(body.into()).await?;
    Ok((StatusCode::CREATED, Json(profile.into())))
}

// ── GET /api/user-profiles ───────────────────────────────────────────────────

pub async fn list_user_profiles(
    identity: Identity,
    State(state): State<AppState>,
) -> Result<Json<Vec<UserProfileResponse>>, LibraryServiceError> {
    require_role(&identity, UserRole::Moderator)?;
    let usecase = ListUserProfilesUseCase {
        profiles: state.user_profile_repo(),
    };
    let profiles = usecase.execute().await?;
    Ok(Json(profiles.into_iter().map(UserProfileResponse::from).collect()))
}

// ── GET /api/user-profiles/{id} ──────────────────────────────────────────────

pub async fn get_user_profile(
    identity: Identity,
    State(state): State<AppState>,
    ValidPath(id): ValidPath<i32>,
) -> Result<Json<UserProfileResponse>, LibraryServiceError> {
    let usecase = GetUserProfileUseCase {
        profiles: state.user_profile_repo(),
    };
    let profile = usecase.execute(id).await?;
    require_self_or_moderator(&identity, profile.user_id)?;
    Ok(Json(profile.into()))
}

// ── PUT /api/user-profiles/{id} ──────────────────────────────────────────────

pub async fn update_user_profile(
    identity: Identity,
    State(state): State<AppState>,
    ValidPath(id): ValidPath<i32>,
    ValidJson(body): ValidJson<UserProfileRequest>,
) -> Result<Json<UserProfileResponse>, LibraryServiceError> {
    require_self_or_moderator(&identity, body.user_id)?;
    let current = GetUserProfileUseCase {
        profiles: state.user_profile_repo(),
    }
    .execute(id)
    .await?;
    require_self_or_moderator(&identity, current.user_id)?;

    let usecase = UpdateUserProfileUseCase {
        users: state.user_repo(),
        profiles: state.user_profile_repo(),
    };
    Ok(Json(usecase.execute(id, body.into()).await?.into()))
}

// ── DELETE /api/user-profiles/{id} ───────────────────────────────────────────

pub async fn delete_user_profile(
    identity: Identity,
    State(state): State<AppState>,
    ValidPath(id): ValidPath<i32>,
) -> Result<StatusCode, LibraryServiceError> {
    require_role(&identity, UserRole::Moderator)?;
    let usecase = DeleteUserProfileUseCase {
        profiles: state.user_profile_repo(),
    };
    usecase.execute(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
