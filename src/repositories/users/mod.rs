//! 사용자 데이터 액세스 계층을 담당하는 리포지토리 모듈
//!
//! # Examples
//!
//! ```rust,ignore
//! use crate::repositories::users::{PgUserRepository, UserRepository};
//!
//! let user_repo = PgUserRepository::new(database.pool().clone());
//! let user = user_repo.find_by_email("user@example.com").await?;
//! ```

pub mod user_repo;

pub use user_repo::{PgUserRepository, UserRepository};
