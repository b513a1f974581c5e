//! User model and related types

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

/// User model from database
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct User {
    pub id: i64,
    pub name: String,
    pub email: String,
}

/// Short user representation embedded in booking views
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct UserShort {
    pub id: i64,
    pub name: String,
}

/// Create user request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateUser {
    #[validate(length(min = 1, message = "Name must not be blank"))]
    pub name: String,
    #[validate(email(message = "Invalid email format"))]
    pub email: String,
}

/// Update user request (merge-patch: only supplied fields overwrite)
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateUser {
    #[validate(length(min = 1, message = "Name must not be blank"))]
    pub name: Option<String>,
    #[validate(email(message = "Invalid email format"))]
    pub email: Option<String>,
}

impl UpdateUser {
    /// Apply the non-null fields onto an existing user
    pub fn apply(&self, user: &mut User) {
        if let Some(ref name) = self.name {
            user.name = name.clone();
        }
        if let Some(ref email) = self.email {
            user.email = email.clone();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn update_overwrites_only_supplied_fields() {
        let mut user = User {
            id: 1,
            name: "User1".to_string(),
            email: "user1@mail.ru".to_string(),
        };
        UpdateUser {
            name: Some("User1New".to_string()),
            email: None,
        }
        .apply(&mut user);
        assert_eq!(user.name, "User1New");
        assert_eq!(user.email, "user1@mail.ru");
    }

    #[test]
    fn empty_update_is_a_no_op() {
        let mut user = User {
            id: 1,
            name: "User1".to_string(),
            email: "user1@mail.ru".to_string(),
        };
        UpdateUser {
            name: None,
            email: None,
        }
        .apply(&mut user);
        assert_eq!(user.name, "User1");
        assert_eq!(user.email, "user1@mail.ru");
    }
}
