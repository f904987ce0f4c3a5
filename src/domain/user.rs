//! User domain entity and related types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::config::{ROLE_ADMIN, ROLE_USER};

/// User roles enumeration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "UPPERCASE")]
pub enum UserRole {
    User,
    Admin,
}

impl From<&str> for UserRole {
    fn from(s: &str) -> Self {
        match s {
            ROLE_ADMIN => UserRole::Admin,
            _ => UserRole::User,
        }
    }
}

impl std::fmt::Display for UserRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            UserRole::Admin => write!(f, "{}", ROLE_ADMIN),
            UserRole::User => write!(f, "{}", ROLE_USER),
        }
    }
}

/// User domain entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    /// Stored as given; hashing is out of scope for now
    #[serde(skip_serializing)]
    pub password: String,
    pub role: UserRole,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Construct a new user; both timestamps start at `now`.
    pub fn new(id: Uuid, data: NewUser, now: DateTime<Utc>) -> Self {
        Self {
            id,
            username: data.username,
            email: data.email,
            password: data.password,
            role: data.role,
            created_at: now,
            updated_at: now,
        }
    }
}

/// User creation data, validated at the API boundary
#[derive(Debug, Clone)]
pub struct NewUser {
    pub username: String,
    pub email: String,
    pub password: String,
    pub role: UserRole,
}

/// User response (safe to return to client - no password field)
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    /// Unique user identifier
    #[schema(example = "550e8400-e29b-41d4-a716-446655440000")]
    pub id: Uuid,
    /// Unique username
    #[schema(example = "alice")]
    pub username: String,
    /// User email address
    #[schema(example = "alice@example.com")]
    pub email: String,
    /// User role
    pub role: UserRole,
    /// Account creation timestamp
    pub created_at: DateTime<Utc>,
    /// Last modification timestamp
    pub updated_at: DateTime<Utc>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            username: user.username,
            email: user.email,
            role: user.role,
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn role_round_trips_through_strings() {
        assert_eq!(UserRole::Admin.to_string(), "ADMIN");
        assert_eq!(UserRole::User.to_string(), "USER");
        assert_eq!(UserRole::from("ADMIN"), UserRole::Admin);
        // Unknown values default to User
        assert_eq!(UserRole::from("something-else"), UserRole::User);
    }

    #[test]
    fn response_never_carries_password() {
        let user = User::new(
            Uuid::new_v4(),
            NewUser {
                username: "alice".to_string(),
                email: "a@x.com".to_string(),
                password: "secret1".to_string(),
                role: UserRole::User,
            },
            Utc::now(),
        );

        let json = serde_json::to_value(UserResponse::from(user.clone())).unwrap();
        assert!(json.get("password").is_none());
        assert_eq!(json["username"], "alice");

        // The entity itself also skips the password when serialized
        let entity_json = serde_json::to_value(&user).unwrap();
        assert!(entity_json.get("password").is_none());
    }
}
