//! 비즈니스 로직을 담당하는 서비스 계층 모듈
//!
//! 서비스는 리포지토리 trait 과 설정 값을 생성자로 받습니다.
//!
//! # Examples
//!
//! ```rust,ignore
//! use crate::services::{auth::TokenService, users::UserService};
//!
//! let user_service = UserService::new(user_repo, config.password.bcrypt_cost);
//! let token_service = TokenService::new(token_store, &config.token);
//! ```

pub mod auth;
pub mod users;
