use anyhow::anyhow;
use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};
use tracing::{info, warn};

use athenaeum_auth_types::token::issue_access_token;
use athenaeum_domain::user::UserRole;

use crate::domain::repository::UserRepository;
use crate::domain::types::{NewUser, User};
use crate::error::LibraryServiceError;

/// Hash a plaintext password into an argon2 PHC string.
pub fn hash_password(password: &str) -> Result<String, LibraryServiceError> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| anyhow!("hash password: {e}"))?;
    Ok(hash.to_string())
}

/// Check a plaintext password against a stored PHC string. A malformed hash never matches.
pub fn verify_password(password: &str, phc: &str) -> bool {
    match PasswordHash::new(phc) {
        Ok(parsed) => Argon2::default()
            .verify_password(password.as_bytes(), &parsed)
            .is_ok(),
        Err(_) => false,
    }
}

/// A signed-in user and their bearer token.
#[derive(Debug)]
pub struct AuthOutput {
    pub user: User,
    pub access_token: String,
    pub access_token_exp: u64,
}

fn issue_for(user: User, secret: &str, ttl_secs: u64) -> Result<AuthOutput, LibraryServiceError> {
    let issued = issue_access_token(user.id, user.role, secret, ttl_secs)
        .map_err(|e| anyhow!("issue access token: {e}"))?;
    Ok(AuthOutput {
        user,
        access_token: issued.token,
        access_token_exp: issued.exp,
    })
}

// ── SignUp ───────────────────────────────────────────────────────────────────

pub struct SignUpInput {
    pub username: String,
    pub email: String,
    pub password: String,
}

/// Self-service registration. New accounts always get `ROLE_USER`.
pub struct SignUpUseCase<R: UserRepository> {
    pub users: R,
    pub jwt_secret: String,
    pub token_ttl_secs: u64,
}

impl<R: UserRepository> SignUpUseCase<R> {
    pub async fn execute(&self, input: SignUpInput) -> Result<AuthOutput, LibraryServiceError> {
        let user = self
            .users
            .create(&NewUser {
                username: input.username,
                email: input.email,
                password_hash: hash_password(&input.password)?,
                role: UserRole::User,
            })
            .await?;
        info!(user_id = user.id, "user signed up");
        issue_for(user, &self.jwt_secret, self.token_ttl_secs)
    }
}

// ── SignIn ───────────────────────────────────────────────────────────────────

pub struct SignInInput {
    pub username: String,
    pub password: String,
}

pub struct SignInUseCase<R: UserRepository> {
    pub users: R,
    pub jwt_secret: String,
    pub token_ttl_secs: u64,
}

impl<R: UserRepository> SignInUseCase<R> {
    pub async fn execute(&self, input: SignInInput) -> Result<AuthOutput, LibraryServiceError> {
        let Some(user) = self.users.find_by_username(&input.username).await? else {
            warn!("sign-in for unknown username");
            return Err(LibraryServiceError::InvalidCredentials);
        };
        if !verify_password(&input.password, &user.password_hash) {
            warn!(user_id = user.id, "sign-in with wrong password");
            return Err(LibraryServiceError::InvalidCredentials);
        }
        info!(user_id = user.id, "user signed in");
        issue_for(user, &self.jwt_secret, self.token_ttl_secs)
    }
}
