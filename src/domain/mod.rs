//! # Domain Layer Module
//!
//! 도메인 계층을 구성하는 모듈입니다.
//!
//! ```text
//! Domain Layer (이 모듈)
//! ├── Entities  - 저장소에 영속되는 객체 (User)
//! ├── DTOs      - 데이터 전송 객체 (Request/Response)
//! └── Models    - 토큰 클레임, 토큰 쌍
//!      │
//!      ▼
//! Application Layer (Services)
//!      │
//!      ▼
//! Infrastructure Layer (Repositories, DB, Redis)
//! ```

pub mod entities;
pub mod dto;
pub mod models;

pub use entities::User;
pub use models::token::{RefreshToken, TokenPair};
