//! 도메인 모델
//!
//! 토큰 클레임과 토큰 쌍처럼 저장소에 직접 매핑되지 않는 값 객체들입니다.

pub mod token;
