//! 캐싱 계층 모듈
//!
//! Redis 연결과 리프레시 토큰 저장에 필요한 명령만 제공합니다.
//!
//! # 환경 설정
//!
//! ```bash
//! REDIS_URL=redis://localhost:6379  # 기본값
//! ```

pub mod redis;
