//! 인증 서비스 모듈
//!
//! JWT 기반 토큰 인증을 담당합니다.
//!
//! # Security
//!
//! - 액세스 토큰: RSA-SHA256 서명, 사용자 스냅샷 포함
//! - 리프레시 토큰: HMAC-SHA256 서명, 저장소 기록과 함께 일회용으로 교체
//!
//! # Examples
//!
//! ```rust,ignore
//! use crate::services::auth::TokenService;
//!
//! let token_service = TokenService::new(store, &config.token);
//! let tokens = token_service.issue_token_pair(&user, None).await?;
//! ```

pub mod token_codec;
pub mod token_service;

pub use token_codec::TokenError;
pub use token_service::TokenService;
