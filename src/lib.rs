//! 계정 서비스 백엔드
//!
//! 회원가입, 로그인, 프로필 관리와 JWT 토큰 수명 주기를 제공하는 HTTP 서비스입니다.
//!
//! # Features
//!
//! - **액세스 토큰**: RS256 서명, 사용자 스냅샷 포함, 서버에 저장하지 않음
//! - **리프레시 토큰**: HS256 서명, Redis 기록과 함께 일회용 교체
//! - **전체 로그아웃**: 사용자의 모든 리프레시 토큰 무효화
//! - **Postgres**: 사용자 데이터 영구 저장
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────┐
//! │   HTTP Routes   │ ← REST API 엔드포인트, 인증/시간 제한 미들웨어
//! └─────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │    Handlers     │ ← 요청 바인딩, 검증, 응답
//! └─────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │    Services     │ ← TokenService, UserService, token_codec
//! └─────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │  Repositories   │ ← RefreshTokenStore, UserRepository
//! └─────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │ Postgres + Redis│ ← 저장소
//! └─────────────────┘
//! ```
//!
//! # Examples
//!
//! ```rust,ignore
//! use account_service::services::auth::TokenService;
//!
//! let token_service = TokenService::new(token_store, &config.token);
//!
//! let pair = token_service.issue_token_pair(&user, None).await?;
//! let refresh = token_service.validate_refresh_token(&pair.refresh_token.signed)?;
//! let rotated = token_service.issue_token_pair(&user, Some(refresh.id)).await?;
//! ```

pub mod caching;
pub mod config;
pub mod core;
pub mod db;
pub mod domain;
pub mod errors;
pub mod handlers;
pub mod middlewares;
pub mod repositories;
pub mod routes;
pub mod services;
