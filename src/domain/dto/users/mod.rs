//! # Account Data Transfer Objects Module
//!
//! 계정 API의 요청/응답 데이터 구조를 정의하는 모듈입니다.
//!
//! ```text
//! users/
//! ├── request/
//! │   ├── auth_request.rs     # 회원가입, 로그인, 토큰 갱신
//! │   └── details_request.rs  # 프로필 수정
//! └── response/
//!     └── user_response.rs    # {"user"}, {"tokens"}, {"message"}
//! ```
//!
//! ## JSON 응답 예제
//!
//! ```json
//! {
//!   "tokens": {
//!     "idToken": "eyJhbGciOiJSUzI1NiIsImtpZCI6ImFjY291bnQta2V5LTEifQ...",
//!     "refreshToken": "eyJhbGciOiJIUzI1NiJ9..."
//!   }
//! }
//! ```

pub mod request;
pub mod response;

pub use request::*;
pub use response::*;
