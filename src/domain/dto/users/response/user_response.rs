//! 응답 본문 DTO
use serde::Serialize;

use crate::domain::entities::users::user::User;
use crate::domain::models::token::TokenPair;

/// `{"user": {...}}`
#[derive(Debug, Serialize)]
pub struct UserResponse {
    pub user: User,
}

/// `{"tokens": {"idToken": ..., "refreshToken": ...}}`
#[derive(Debug, Serialize)]
pub struct TokensResponse {
    pub tokens: TokenPair,
}

/// `{"message": ...}`
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}
