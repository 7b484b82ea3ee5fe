use tracing::info;

use athenaeum_domain::user::UserRole;

use crate::domain::repository::UserRepository;
use crate::domain::types::{NewUser, User};
use crate::error::LibraryServiceError;
use crate::usecase::auth::hash_password;

/// Account fields as supplied by an administrator; the password is plaintext.
pub struct UserInput {
    pub username: String,
    pub email: String,
    pub password: String,
    pub role: UserRole,
}

impl UserInput {
    fn into_new_user(self) -> Result<NewUser, LibraryServiceError> {
        Ok(NewUser {
            password_hash: hash_password(&self.password)?,
            username: self.username,
            email: self.email,
            role: self.role,
        })
    }
}

// ── AddUser ──────────────────────────────────────────────────────────────────

pub struct AddUserUseCase<R: UserRepository> {
    pub repo: R,
}

impl<R: UserRepository> AddUserUseCase<R> {
    pub async fn execute(&self, input: UserInput) -> Result<User, LibraryServiceError> {
        let user = self.repo.create(&input.into_new_user()?).await?;
        info!(user_id = user.id, role = %user.role, "user added");
        Ok(user)
    }
}

// ── GetUser ──────────────────────────────────────────────────────────────────

pub struct GetUserUseCase<R: UserRepository> {
    pub repo: R,
}

impl<R: UserRepository> GetUserUseCase<R> {
    pub async fn execute(&self, id: i32) -> Result<User, LibraryServiceError> {
        self.repo
            .find_by_id(id)
            .await?
            .ok_or(LibraryServiceError::UserNotFound)
    }
}

// ── ListUsers ────────────────────────────────────────────────────────────────

pub struct ListUsersUseCase<R: UserRepository> {
    pub repo: R,
}

impl<R: UserRepository> ListUsersUseCase<R> {
    pub async fn execute(&self) -> Result<Vec<User>, LibraryServiceError> {
        self.repo.list().await
    }
}

// ── UpdateUser ───────────────────────────────────────────────────────────────

pub struct UpdateUserUseCase<R: UserRepository> {
    pub repo: R,
}

impl<R: UserRepository> UpdateUserUseCase<R> {
    /// Full replacement, password included; the id is preserved.
    pub async fn execute(&self, id: i32, input: UserInput) -> Result<User, LibraryServiceError> {
        let new_user = input.into_new_user()?;
        if !self.repo.update(id, &new_user).await? {
            return Err(LibraryServiceError::UserNotFound);
        }
        info!(user_id = id, "user updated");
        Ok(User {
            id,
            username: new_user.username,
            email: new_user.email,
            password_hash: new_user.password_hash,
            role: new_user.role,
        })
    }
}

// ── DeleteUser ───────────────────────────────────────────────────────────────

pub struct DeleteUserUseCase<R: UserRepository> {
    pub repo: R,
}

impl<R: UserRepository> DeleteUserUseCase<R> {
    pub async fn execute(&self, id: i32) -> Result<(), LibraryServiceError> {
        if !self.repo.delete(id).await? {
            return Err(LibraryServiceError::UserNotFound);
        }
        info!(user_id = id, "user deleted");
        Ok(())
    }
}
