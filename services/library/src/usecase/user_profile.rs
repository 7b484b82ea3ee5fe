use tracing::info;

use crate::domain::repository::{UserProfileRepository, UserRepository};
use crate::domain::types::{NewUserProfile, UserProfile};
use crate::error::LibraryServiceError;
use crate::usecase::resolve_user;

// ── AddUserProfile ───────────────────────────────────────────────────────────

pub struct AddUserProfileUseCase<U: UserRepository, P: UserProfileRepository> {
    pub users: U,
    pub profiles: P,
}

impl<U: UserRepository, P: UserProfileRepository> AddUserProfileUseCase<U, P> {
    pub async fn execute(&self, input: NewUserProfile) -> Result<UserProfile, LibraryServiceError> {
        resolve_user(&self.users, input.user_id).await?;
        let profile = self.profiles.create(&input).await?;
        info!(
            user_profile_id = profile.id,
            user_id = profile.user_id,
            "user profile added"
        );
        Ok(profile)
    }
}

// ── GetUserProfile ───────────────────────────────────────────────────────────

pub struct GetUserProfileUseCase<P: UserProfileRepository> {
    pub profiles: P,
}

impl<P: UserProfileRepository> GetUserProfileUseCase<P> {
    pub async fn execute(&self, id: i32) -> Result<UserProfile, LibraryServiceError> {
        self.profiles
            .find_by_id(id)
            .await?
            .ok_or(LibraryServiceError::UserProfileNotFound)
    }
}

// ── ListUserProfiles ─────────────────────────────────────────────────────────

pub struct ListUserProfilesUseCase<P: UserProfileRepository> {
    pub profiles: P,
}

impl<P: UserProfileRepository> ListUserProfilesUseCase<P> {
    pub async fn execute(&self) -> Result<Vec<UserProfile>, LibraryServiceError> {
        self.profiles.list().await
    }
}

// ── UpdateUserProfile ────────────────────────────────────────────────────────

pub struct UpdateUserProfileUseCase<U: UserRepository, P: UserProfileRepository> {
    pub users: U,
    pub profiles: P,
}

impl<U: UserRepository, P: UserProfileRepository> UpdateUserProfileUseCase<U, P> {
    pub async fn execute(
        &self,
        id: i32,
        input: NewUserProfile,
    ) -> Result<UserProfile, LibraryServiceError> {
        resolve_user(&self.users, input.user_id).await?;
        if !self.profiles.update(id, &input).await? {
            return Err(LibraryServiceError::UserProfileNotFound);
        }
        info!(user_profile_id = id, "user profile updated");
        Ok(UserProfile {
            id,
            first_name: input.first_name,
            last_name: input.last_name,
            phone: input.phone,
            address: input.address,
            user_id: input.user_id,
        })
    }
}

// ── DeleteUserProfile ────────────────────────────────────────────────────────

pub struct DeleteUserProfileUseCase<P: UserProfileRepository> {
    pub profiles: P,
}

impl<P: UserProfileRepository> DeleteUserProfileUseCase<P> {
    pub async fn execute(&self, id: i32) -> Result<(), LibraryServiceError> {
        if !self.profiles.delete(id).await? {
            return Err(LibraryServiceError::UserProfileNotFound);
        }
        info!(user_profile_id = id, "user profile deleted");
        Ok(())
    }
}
