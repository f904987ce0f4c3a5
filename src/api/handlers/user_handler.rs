//! User handlers.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
    routing::get,
    Router,
};
use serde::Deserialize;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::api::extractors::ValidatedJson;
use crate::api::AppState;
use crate::domain::{NewUser, UserResponse, UserRole};
use crate::errors::AppResult;

/// User creation request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UserPayload {
    /// Unique username
    #[validate(length(min = 3, max = 50, message = "Username must be between 3 and 50 characters"))]
    #[schema(example = "alice")]
    pub username: String,
    /// Unique email address
    #[validate(email(message = "Email must be a valid address"))]
    #[schema(example = "alice@example.com")]
    pub email: String,
    /// Password (minimum 6 characters; stored as given for now)
    #[validate(length(min = 6, message = "Password must be at least 6 characters"))]
    #[schema(example = "secret1", min_length = 6)]
    pub password: String,
    /// User role
    pub role: UserRole,
}

impl From<UserPayload> for NewUser {
    fn from(payload: UserPayload) -> Self {
        NewUser {
            username: payload.username,
            email: payload.email,
            password: payload.password,
            role: payload.role,
        }
    }
}

/// Create user routes
pub fn user_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_users).post(create_user))
        .route("/:id", get(get_user).delete(delete_user))
        .route("/username/:username", get(get_user_by_username))
        .route("/exists/:username", get(user_exists))
}

/// List all users
#[utoipa::path(
    get,
    path = "/api/users",
    tag = "Users",
    responses(
        (status = 200, description = "List of all users", body = Vec<UserResponse>)
    )
)]
pub async fn list_users(State(state): State<AppState>) -> AppResult<Json<Vec<UserResponse>>> {
    let users = state.user_service.list_users().await?;
    Ok(Json(users.into_iter().map(UserResponse::from).collect()))
}

/// Get user by ID
#[utoipa::path(
    get,
    path = "/api/users/{id}",
    tag = "Users",
    params(
        ("id" = Uuid, Path, description = "User ID")
    ),
    responses(
        (status = 200, description = "User found", body = UserResponse),
        (status = 404, description = "User not found")
    )
)]
pub async fn get_user(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<UserResponse>> {
    let user = state.user_service.get_user(id).await?;
    Ok(Json(UserResponse::from(user)))
}

/// Get user by username
#[utoipa::path(
    get,
    path = "/api/users/username/{username}",
    tag = "Users",
    params(
        ("username" = String, Path, description = "Username")
    ),
    responses(
        (status = 200, description = "User found", body = UserResponse),
        (status = 404, description = "User not found")
    )
)]
pub async fn get_user_by_username(
    State(state): State<AppState>,
    Path(username): Path<String>,
) -> AppResult<Json<UserResponse>> {
    let user = state.user_service.get_user_by_username(&username).await?;
    Ok(Json(UserResponse::from(user)))
}

/// Create a new user
#[utoipa::path(
    post,
    path = "/api/users",
    tag = "Users",
    request_body = UserPayload,
    responses(
        (status = 201, description = "User created successfully", body = UserResponse),
        (status = 400, description = "Validation error"),
        (status = 409, description = "Username or email already exists")
    )
)]
pub async fn create_user(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<UserPayload>,
) -> AppResult<(StatusCode, Json<UserResponse>)> {
    let user = state.user_service.create_user(payload.into()).await?;
    Ok((StatusCode::CREATED, Json(UserResponse::from(user))))
}

/// Delete user by ID
#[utoipa::path(
    delete,
    path = "/api/users/{id}",
    tag = "Users",
    params(
        ("id" = Uuid, Path, description = "User ID")
    ),
    responses(
        (status = 204, description = "User deleted successfully"),
        (status = 404, description = "User not found"),
        (status = 409, description = "User still owns events")
    )
)]
pub async fn delete_user(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<StatusCode> {
    state.user_service.delete_user(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Check whether a username is taken
#[utoipa::path(
    get,
    path = "/api/users/exists/{username}",
    tag = "Users",
    params(
        ("username" = String, Path, description = "Username")
    ),
    responses(
        (status = 200, description = "Whether the username exists", body = bool)
    )
)]
pub async fn user_exists(
    State(state): State<AppState>,
    Path(username): Path<String>,
) -> AppResult<Json<bool>> {
    let exists = state.user_service.username_exists(&username).await?;
    Ok(Json(exists))
}
