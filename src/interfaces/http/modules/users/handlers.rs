//! User API handlers
//!
//! CRUD endpoints under `/api/users`.
//! Delegates to `UserService` from the application layer.

use axum::{
    extract::{Path, State},
    Json,
};

use super::dto::{CreateUserRequest, MessageResponse, UpdateUserRequest, UpdateUserResponse, UserDto};
use crate::application::SharedUserService;
use crate::domain::parse_user_id;
use crate::interfaces::http::common::{ApiError, ErrorResponse, ValidatedJson};

/// User handler state
#[derive(Clone)]
pub struct UserHandlerState {
    pub user_service: SharedUserService,
}

#[utoipa::path(
    post,
    path = "/api/users",
    tag = "Users",
    request_body = CreateUserRequest,
    responses(
        (status = 200, description = "User created", body = UserDto),
        (status = 400, description = "Invalid contact number or duplicate name", body = ErrorResponse),
        (status = 500, description = "Data access failure", body = ErrorResponse)
    )
)]
pub async fn add_user(
    State(state): State<UserHandlerState>,
    ValidatedJson(request): ValidatedJson<CreateUserRequest>,
) -> Result<Json<UserDto>, ApiError> {
    state
        .user_service
        .add_user(request.into())
        .await
        .map(|user| Json(UserDto::from(user)))
        .map_err(|e| ApiError::with_message(e, "Failed to create user"))
}

#[utoipa::path(
    put,
    path = "/api/users/{id}",
    tag = "Users",
    params(("id" = String, Path, description = "User ID")),
    request_body = UpdateUserRequest,
    responses(
        (status = 200, description = "User updated", body = UpdateUserResponse),
        (status = 400, description = "Invalid contact number or id mismatch", body = ErrorResponse),
        (status = 404, description = "Not found", body = ErrorResponse),
        (status = 500, description = "Data access failure", body = ErrorResponse)
    )
)]
pub async fn update_user(
    State(state): State<UserHandlerState>,
    Path(id): Path<String>,
    ValidatedJson(request): ValidatedJson<UpdateUserRequest>,
) -> Result<Json<UpdateUserResponse>, ApiError> {
    let result = match parse_user_id(&id) {
        Ok(user_id) => state.user_service.update_user(user_id, request.into()).await,
        Err(e) => Err(e),
    };

    match result {
        Ok(user) => Ok(Json(UpdateUserResponse {
            message: format!("Successfully updated user with ID {}", id),
            data: UserDto::from(user),
        })),
        Err(e) => Err(ApiError::with_message(
            e,
            format!("Failed to update user with ID '{}'", id),
        )),
    }
}

#[utoipa::path(
    get,
    path = "/api/users/{id}",
    tag = "Users",
    params(("id" = String, Path, description = "User ID")),
    responses(
        (status = 200, description = "User details", body = UserDto),
        (status = 404, description = "Not found", body = ErrorResponse)
    )
)]
pub async fn get_user(
    State(state): State<UserHandlerState>,
    Path(id): Path<String>,
) -> Result<Json<UserDto>, ApiError> {
    let user_id = parse_user_id(&id)?;
    let user = state.user_service.get_user(user_id).await?;
    Ok(Json(UserDto::from(user)))
}

#[utoipa::path(
    delete,
    path = "/api/users/{id}",
    tag = "Users",
    params(("id" = String, Path, description = "User ID")),
    responses(
        (status = 200, description = "User deleted", body = MessageResponse),
        (status = 404, description = "Not found", body = ErrorResponse),
        (status = 500, description = "Data access failure", body = ErrorResponse)
    )
)]
pub async fn delete_user(
    State(state): State<UserHandlerState>,
    Path(id): Path<String>,
) -> Result<Json<MessageResponse>, ApiError> {
    let result = match parse_user_id(&id) {
        Ok(user_id) => state.user_service.delete_user(user_id).await,
        Err(e) => Err(e),
    };

    match result {
        Ok(()) => Ok(Json(MessageResponse {
            message: format!("Successfully deleted user with ID '{}'", id),
        })),
        Err(e) => Err(ApiError::with_message(
            e,
            format!("Failed to delete user with ID '{}'", id),
        )),
    }
}
