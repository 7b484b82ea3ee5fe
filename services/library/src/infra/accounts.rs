use anyhow::Context as _;
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter,
    QueryOrder,
};

use athenaeum_domain::user::UserRole;
use athenaeum_library_schema::{user_profiles, users};

use crate::domain::repository::{UserProfileRepository, UserRepository};
use crate::domain::types::{NewUser, NewUserProfile, User, UserProfile};
use crate::error::LibraryServiceError;
use crate::infra::{restrict_violation_as, unique_violation_as};

// ── User repository ──────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbUserRepository {
    pub db: DatabaseConnection,
}

impl UserRepository for DbUserRepository {
    async fn find_by_id(&self, id: i32) -> Result<Option<User>, LibraryServiceError> {
        let model = users::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .context("find user by id")?;
        model.map(user_from_model).transpose()
    }

    async fn find_by_username(
        &self,
        username: &str,
    ) -> Result<Option<User>, LibraryServiceError> {
        let model = users::Entity::find()
            .filter(users::Column::Username.eq(username))
            .one(&self.db)
            .await
            .context("find user by username")?;
        model.map(user_from_model).transpose()
    }

    async fn list(&self) -> Result<Vec<User>, LibraryServiceError> {
        users::Entity::find()
            .order_by_asc(users::Column::Id)
            .all(&self.db)
            .await
            .context("list users")?
            .into_iter()
            .map(user_from_model)
            .collect()
    }

    async fn create(&self, user: &NewUser) -> Result<User, LibraryServiceError> {
        let model = users::ActiveModel {
            username: Set(user.username.clone()),
            email: Set(user.email.clone()),
            password: Set(user.password_hash.clone()),
            role: Set(user.role.as_u8() as i16),
            ..Default::default()
        }
        .insert(&self.db)
        .await
        .map_err(|e| {
            unique_violation_as(e, LibraryServiceError::UserAlreadyExists, "create user")
        })?;
        user_from_model(model)
    }

    async fn update(&self, id: i32, user: &NewUser) -> Result<bool, LibraryServiceError> {
        let result = users::Entity::update_many()
            .set(users::ActiveModel {
                username: Set(user.username.clone()),
                email: Set(user.email.clone()),
                password: Set(user.password_hash.clone()),
                role: Set(user.role.as_u8() as i16),
                ..Default::default()
            })
            .filter(users::Column::Id.eq(id))
            .exec(&self.db)
            .await
            .map_err(|e| {
                unique_violation_as(e, LibraryServiceError::UserAlreadyExists, "update user")
            })?;
        Ok(result.rows_affected > 0)
    }

    async fn delete(&self, id: i32) -> Result<bool, LibraryServiceError> {
        let result = users::Entity::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(|e| restrict_violation_as(e, LibraryServiceError::UserInUse, "delete user"))?;
        Ok(result.rows_affected > 0)
    }
}

fn user_from_model(model: users::Model) -> Result<User, LibraryServiceError> {
    let role = u8::try_from(model.role)
        .ok()
        .and_then(UserRole::from_u8)
        .with_context(|| format!("user {} has unknown role value {}", model.id, model.role))?;
    Ok(User {
        id: model.id,
        username: model.username,
        email: model.email,
        password_hash: model.password,
        role,
    })
}

// ── UserProfile repository ───────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbUserProfileRepository {
    pub db: DatabaseConnection,
}

impl UserProfileRepository for DbUserProfileRepository {
    async fn find_by_id(&self, id: i32) -> Result<Option<UserProfile>, LibraryServiceError> {
        let model = user_profiles::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .context("find user profile by id")?;
        Ok(model.map(profile_from_model))
    }

    async fn list(&self) -> Result<Vec<UserProfile>, LibraryServiceError> {
        let models = user_profiles::Entity::find()
            .order_by_asc(user_profiles::Column::Id)
            .all(&self.db)
            .await
            .context("list user profiles")?;
        Ok(models.into_iter().map(profile_from_model).collect())
    }

    async fn create(&self, profile: &NewUserProfile) -> Result<UserProfile, LibraryServiceError> {
        let model = user_profiles::ActiveModel {
            first_name: Set(profile.first_name.clone()),
            last_name: Set(profile.last_name.clone()),
            phone: Set(profile.phone.clone()),
            address: Set(profile.address.clone()),
            user_id: Set(profile.user_id),
            ..Default::default()
        }
        .insert(&self.db)
        .await
        .context("create user profile")?;
        Ok(profile_from_model(model))
    }

    async fn update(
        &self,
        id: i32,
        profile: &NewUserProfile,
    ) -> Result<bool, LibraryServiceError> {
        let result = user_profiles::Entity::update_many()
            .set(user_profiles::ActiveModel {
                first_name: Set(profile.first_name.clone()),
                last_name: Set(profile.last_name.clone()),
                phone: Set(profile.phone.clone()),
                address: Set(profile.address.clone()),
                user_id: Set(profile.user_id),
                ..Default::default()
            })
            .filter(user_profiles::Column::Id.eq(id))
            .exec(&self.db)
            .await
            .context("update user profile")?;
        Ok(result.rows_affected > 0)
    }

    async fn delete(&self, id: i32) -> Result<bool, LibraryServiceError> {
        let result = user_profiles::Entity::delete_by_id(id)
            .exec(&self.db)
            .await
            .context("delete user profile")?;
        Ok(result.rows_affected > 0)
    }
}

fn profile_from_model(model: user_profiles::Model) -> UserProfile {
    UserProfile {
        id: model.id,
        first_name: model.first_name,
        last_name: model.last_name,
        phone: model.phone,
        address: model.address,
        user_id: model.user_id,
    }
}
