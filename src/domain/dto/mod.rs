//! 요청/응답 DTO
//!
//! HTTP 계약을 정의하는 구조체들입니다. 요청 DTO 는 `validator` 로 검증됩니다.

pub mod users;

pub use users::*;
