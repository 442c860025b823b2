//! User DTOs

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::domain::{User, UserId};

/// User API representation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserDto {
    #[serde(alias = "userId")]
    pub id: Option<UserId>,
    pub first_name: String,
    pub last_name: String,
    pub contact_number: String,
}

impl From<User> for UserDto {
    fn from(u: User) -> Self {
        Self {
            id: u.id,
            first_name: u.first_name,
            last_name: u.last_name,
            contact_number: u.contact_number,
        }
    }
}

/// Create user request
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateUserRequest {
    #[validate(length(max = 255))]
    pub first_name: String,
    #[validate(length(max = 255))]
    pub last_name: String,
    #[validate(length(max = 64))]
    pub contact_number: String,
}

impl From<CreateUserRequest> for User {
    fn from(r: CreateUserRequest) -> Self {
        User::new(r.first_name, r.last_name, r.contact_number)
    }
}

/// Update user request: the full entity. `id` is optional; when present it
/// must equal the path id.
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateUserRequest {
    #[serde(default, alias = "userId")]
    pub id: Option<UserId>,
    #[validate(length(max = 255))]
    pub first_name: String,
    #[validate(length(max = 255))]
    pub last_name: String,
    #[validate(length(max = 64))]
    pub contact_number: String,
}

impl From<UpdateUserRequest> for User {
    fn from(r: UpdateUserRequest) -> Self {
        User {
            id: r.id,
            first_name: r.first_name,
            last_name: r.last_name,
            contact_number: r.contact_number,
        }
    }
}

/// Successful update response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct UpdateUserResponse {
    pub message: String,
    pub data: UserDto,
}

/// Response carrying only a message
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct MessageResponse {
    pub message: String,
}
