//! 미들웨어 모듈
//!
//! ActixWeb 애플리케이션의 요청 처리 파이프라인에서 사용되는 미들웨어들을 제공합니다.
//!
//! # 제공 미들웨어
//!
//! ### 1. 인증 미들웨어 (AuthMiddleware)
//! - `Authorization: Bearer <idToken>` 추출 및 검증
//! - 사용자 정보를 request extension 에 저장
//!
//! ### 2. 시간 제한 미들웨어 (Timeout)
//! - 제한 시간 초과 시 핸들러를 중단하고 503 응답
//!
//! # 사용 방법
//!
//! ```rust,ignore
//! use actix_web::web;
//!
//! web::scope("/api/account")
//!     .wrap(Timeout::new(config.server.handler_timeout))
//!     .service(
//!         web::resource("/me")
//!             .wrap(AuthMiddleware::required(token_service.clone()))
//!             .route(web::get().to(me)),
//!     )
//! ```

pub mod auth_middleware;
mod auth_inner;
pub mod timeout;

// 미들웨어 재export
pub use auth_middleware::AuthMiddleware;
pub use timeout::Timeout;
