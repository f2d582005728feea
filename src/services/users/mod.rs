//! 사용자 관리 서비스 모듈
//!
//! 사용자 등록, 인증, 프로필 관리 등의 핵심 기능을 구현합니다.
//!
//! # Security
//!
//! - bcrypt 비밀번호 해싱
//! - 이메일 중복 방지
//!
//! # Examples
//!
//! ```rust,ignore
//! use crate::services::users::UserService;
//!
//! let user_service = UserService::new(user_repo, config.password.bcrypt_cost);
//! let user = user_service.signup("user@example.com", "secret123").await?;
//! ```

pub mod user_service;

pub use user_service::UserService;
