//! 데이터 액세스 계층을 담당하는 리포지토리 모듈
//!
//! 서비스는 trait 에만 의존하고, 구체 구현은 `main` 에서 조립되어 생성자로 주입됩니다.
//!
//! - [`tokens`] - 리프레시 토큰 기록 (Redis / 메모리)
//! - [`users`] - 사용자 (Postgres)

pub mod tokens;
pub mod users;
