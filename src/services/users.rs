//! User management service

use validator::Validate;

use crate::{
    error::{AppError, AppResult},
    models::user::{CreateUser, UpdateUser, User},
    repository::Repository,
};

#[derive(Clone)]
pub struct UsersService {
    repository: Repository,
}

impl UsersService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// Get user by ID
    pub async fn get_user(&self, id: i64) -> AppResult<User> {
        self.repository.users.get_by_id(id).await
    }

    /// Get all users
    pub async fn get_all_users(&self) -> AppResult<Vec<User>> {
        self.repository.users.find_all().await
    }

    /// Create a new user; email must be unique
    pub async fn create_user(&self, user: CreateUser) -> AppResult<User> {
        user.validate()?;

        if self.repository.users.email_exists(&user.email, None).await? {
            return Err(AppError::Conflict(format!(
                "User with email {} already exists",
                user.email
            )));
        }

        let created = self.repository.users.create(&user).await?;
        tracing::info!("User created: id={}", created.id);
        Ok(created)
    }

    /// Update a user; only supplied fields overwrite
    pub async fn update_user(&self, id: i64, update: UpdateUser) -> AppResult<User> {
        update.validate()?;

        let mut user = self.repository.users.get_by_id(id).await?;

        if let Some(ref email) = update.email {
            if self.repository.users.email_exists(email, Some(id)).await? {
                return Err(AppError::Conflict(format!(
                    "User with email {} already exists",
                    email
                )));
            }
        }

        update.apply(&mut user);
        let updated = self.repository.users.update(&user).await?;
        tracing::info!("User updated: id={}", updated.id);
        Ok(updated)
    }

    /// Delete a user
    pub async fn delete_user(&self, id: i64) -> AppResult<()> {
        self.repository.users.delete(id).await?;
        tracing::info!("User deleted: id={}", id);
        Ok(())
    }
}
