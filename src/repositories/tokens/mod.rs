//! 리프레시 토큰 저장소 모듈
//!
//! # Features
//!
//! - **[`RefreshTokenStore`]**: 토큰 서비스가 의존하는 좁은 인터페이스
//! - **[`RedisTokenRepository`]**: Redis TTL 을 이용한 운영 저장소
//! - **[`InMemoryTokenStore`]**: 같은 의미의 프로세스 내부 저장소
//!
//! # Usage
//!
//! ```rust,ignore
//! let store: Arc<dyn RefreshTokenStore> = Arc::new(RedisTokenRepository::new(redis));
//!
//! store.set_refresh_token(uid, token_id, Duration::from_secs(259_200)).await?;
//! store.delete_refresh_token(uid, token_id).await?;
//! ```

pub mod memory_token_store;
pub mod redis_token_repository;
pub mod refresh_token_store;

pub use memory_token_store::InMemoryTokenStore;
pub use redis_token_repository::RedisTokenRepository;
pub use refresh_token_store::*;
