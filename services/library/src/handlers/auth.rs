use axum::{Json, extract::State, http::StatusCode};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::error::LibraryServiceError;
use crate::handlers::ValidJson;
use crate::handlers::users::UserResponse;
use crate::state::AppState;
use crate::usecase::auth::{AuthOutput, SignInInput, SignInUseCase, SignUpInput, SignUpUseCase};

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenResponse {
    pub access_token: String,
    pub token_type: &'static str,
    pub expires_at: u64,
    pub user: UserResponse,
}

impl From<AuthOutput> for TokenResponse {
    fn from(output: AuthOutput) -> Self {
        Self {
            access_token: output.access_token,
            token_type: "Bearer",
            expires_at: output.access_token_exp,
            user: output.user.into(),
        }
    }
}

// ── POST /api/auth/sign-up ───────────────────────────────────────────────────

#[derive(Deserialize, Validate)]
pub struct SignUpRequest {
    #[validate(length(min = 6, max = 50))]
    pub username: String,
    #[validate(email, length(max = 255))]
    pub email: String,
    #[validate(length(min = 6, max = 100))]
    pub password: String,
}

pub async fn sign_up(
    State(state): State<AppState>,
    ValidJson(body): ValidJson<SignUpRequest>,
) -> Result<(StatusCode, Json<TokenResponse>), LibraryServiceError> {
    let usecase = SignUpUseCase {
        users: state.user_repo(),
        jwt_secret: state.jwt_secret.as_str().to_owned(),
        token_ttl_secs: state.token_ttl_secs,
    };
    let output = usecase
        .execute(SignUpInput {
            username: body.username,
            email: body.email,
            password: body.password,
        })
        .await?;
    Ok((StatusCode::CREATED, Json(output.into())))
}

// ── POST /api/auth/sign-in ───────────────────────────────────────────────────

#[derive(Deserialize, Validate)]
pub struct SignInRequest {
    #[validate(length(min = 1, max = 50))]
    pub username: String,
    #[validate(length(min = 1, max = 100))]
    pub password: String,
}

pub async fn sign_in(
    State(state): State<AppState>,
    ValidJson(body): ValidJson<SignInRequest>,
) -> Result<Json<TokenResponse>, LibraryServiceError> {
    let usecase = SignInUseCase {
        users: state.user_repo(),
        jwt_secret: state.jwt_secret.as_str().to_owned(),
        token_ttl_secs: state.token_ttl_secs,
    };
    let output = usecase
        .execute(SignInInput {
            username: body.username,
            password: body.password,
        })
        .await?;
    Ok(Json(output.into()))
}
