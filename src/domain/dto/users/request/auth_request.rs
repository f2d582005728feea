//! 인증 요청관련 DTO
//!
//! 회원가입, 로그인, 토큰 갱신 요청 본문을 매핑합니다.
use serde::Deserialize;
use validator::Validate;

/// 회원가입 요청 구조체
#[derive(Debug, Deserialize, Validate)]
pub struct SignupRequest {
    #[validate(email)]
    pub email: String,

    #[validate(length(min = 6, max = 30))]
    pub password: String,
}

/// 로그인 요청 구조체
#[derive(Debug, Deserialize, Validate)]
pub struct SigninRequest {
    #[validate(email)]
    pub email: String,

    #[validate(length(min = 6, max = 30))]
    pub password: String,
}

/// 토큰 갱신 요청 구조체
#[derive(Debug, Deserialize, Validate)]
pub struct TokensRequest {
    #[validate(length(min = 1))]
    pub refresh_token: String,
}
