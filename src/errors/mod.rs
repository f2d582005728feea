//! 에러 타입 모듈
//!
//! [`AppError`]와 분류 태그 [`ErrorKind`]를 제공합니다.

pub mod errors;

pub use errors::*;
