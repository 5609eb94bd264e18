use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use uuid::Uuid;

use super::repo::{User, UserStatus};

/// Request body for user registration. Fields default to empty strings;
/// the handler rejects combinations that cannot form a usable record.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RegisterRequest {
    pub name: String,
    pub pin: String,
    pub mobile_number: String,
    pub email: String,
}

/// Request body for login. `identifier` is a mobile number or email.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct LoginRequest {
    pub identifier: String,
    pub pin: String,
}

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

/// Response returned after a successful login.
#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub token: String,
    pub user: PublicUser,
}

/// Client-visible projection of a user record. Built by field, so the pin
/// hash is excluded by construction.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PublicUser {
    pub id: Uuid,
    pub name: String,
    pub mobile_number: String,
    pub email: String,
    pub status: UserStatus,
    pub balance: i64,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

impl From<&User> for PublicUser {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            name: user.name.clone(),
            mobile_number: user.mobile_number.clone(),
            email: user.email.clone(),
            status: user.status,
            balance: user.balance,
            created_at: user.created_at,
        }
    }
}
