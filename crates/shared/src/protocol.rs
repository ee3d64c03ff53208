use serde::{Deserialize, Serialize};

use crate::domain::UserId;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub username: String,
    pub email: String,
    /// Server-assigned creation timestamp, kept verbatim.
    pub created_at: String,
}

/// Envelope of `GET /user`. A missing or null `data` means no users.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ListUsersResponse {
    #[serde(default)]
    pub data: Option<Vec<User>>,
}

impl ListUsersResponse {
    pub fn into_users(self) -> Vec<User> {
        self.data.unwrap_or_default()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateUserRequest {
    pub username: String,
    pub email: String,
    pub password: String,
}

/// Body of `PUT /user/{id}`. Passwords are never sent on update.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateUserRequest {
    pub username: String,
    pub email: String,
}
