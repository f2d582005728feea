//! 애플리케이션 전역에서 사용하는 에러 시스템
//!
//! 모든 실패는 [`AppError`] 하나로 모이고, 각 에러는 [`ErrorKind`] 태그를 가집니다.
//! HTTP 상태 코드와 응답 본문은 이 태그로만 결정되므로 호출자가
//! 에러 타입을 다운캐스팅할 필요가 없습니다.
//!
//! ## 응답 형식
//!
//! ```json
//! { "error": { "type": "AUTHORIZATION", "message": "Provided token is invalid" } }
//! ```
//!
//! 요청 인자 검증 실패의 경우 `invalidArgs` 배열이 함께 내려갑니다.
//!
//! ## 사용 예제
//!
//! ```rust,ignore
//! use crate::errors::AppError;
//!
//! async fn find_user(uid: Uuid) -> Result<User, AppError> {
//!     repo.find_by_id(uid).await
//!         .map_err(|_| AppError::not_found("uid", uid))
//! }
//! ```

use actix_web::http::StatusCode;
use serde::Serialize;
use thiserror::Error;

/// 에러 분류 태그
///
/// 응답 본문의 `type` 필드로 그대로 직렬화됩니다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorKind {
    Authorization,
    BadRequest,
    Conflict,
    Internal,
    NotFound,
    PayloadTooLarge,
    ServiceUnavailable,
    UnsupportedMediaType,
}

impl ErrorKind {
    /// 분류에 대응하는 HTTP 상태 코드
    pub fn status(self) -> StatusCode {
        match self {
            ErrorKind::Authorization => StatusCode::UNAUTHORIZED,
            ErrorKind::BadRequest => StatusCode::BAD_REQUEST,
            ErrorKind::Conflict => StatusCode::CONFLICT,
            ErrorKind::Internal => StatusCode::INTERNAL_SERVER_ERROR,
            ErrorKind::NotFound => StatusCode::NOT_FOUND,
            ErrorKind::PayloadTooLarge => StatusCode::PAYLOAD_TOO_LARGE,
            ErrorKind::ServiceUnavailable => StatusCode::SERVICE_UNAVAILABLE,
            ErrorKind::UnsupportedMediaType => StatusCode::UNSUPPORTED_MEDIA_TYPE,
        }
    }
}

/// 검증에 실패한 요청 필드 하나
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InvalidArgument {
    pub field: String,
    pub value: String,
    pub tag: String,
    pub param: String,
}

/// 애플리케이션 전역 에러 타입
///
/// 메시지는 클라이언트에게 그대로 노출되므로 내부 원인(드라이버 에러,
/// 서명 실패 사유 등)은 넣지 않습니다. 상세 원인은 발생 지점에서 로그로 남깁니다.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AppError {
    /// 인증 실패 (401)
    #[error("{0}")]
    Authorization(String),

    /// 잘못된 요청 (400)
    #[error("{0}")]
    BadRequest(String),

    /// 요청 필드 검증 실패 (400, `invalidArgs` 포함)
    #[error("Invalid request parameters. See invalidArgs")]
    InvalidArguments(Vec<InvalidArgument>),

    /// 리소스 중복 (409)
    #[error("resource: {resource} with value: {value} already exists")]
    Conflict { resource: String, value: String },

    /// 내부 서버 에러 (500)
    #[error("Internal server error.")]
    Internal,

    /// 리소스 없음 (404)
    #[error("resource: {resource} with value: {value} not found")]
    NotFound { resource: String, value: String },

    /// 요청 본문 크기 초과 (413)
    #[error("Max payload size of {max_bytes}B exceeded")]
    PayloadTooLarge { max_bytes: usize },

    /// 처리 시간 초과 또는 서비스 불가 (503)
    #[error("Service unavailable or timed out")]
    ServiceUnavailable,

    /// 지원하지 않는 Content-Type (415)
    #[error("{0}")]
    UnsupportedMediaType(String),
}

impl AppError {
    pub fn authorization(message: impl Into<String>) -> Self {
        AppError::Authorization(message.into())
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        AppError::BadRequest(message.into())
    }

    pub fn conflict(resource: impl Into<String>, value: impl ToString) -> Self {
        AppError::Conflict {
            resource: resource.into(),
            value: value.to_string(),
        }
    }

    pub fn not_found(resource: impl Into<String>, value: impl ToString) -> Self {
        AppError::NotFound {
            resource: resource.into(),
            value: value.to_string(),
        }
    }

    /// 에러 분류 태그를 반환합니다.
    pub fn kind(&self) -> ErrorKind {
        match self {
            AppError::Authorization(_) => ErrorKind::Authorization,
            AppError::BadRequest(_) | AppError::InvalidArguments(_) => ErrorKind::BadRequest,
            AppError::Conflict { .. } => ErrorKind::Conflict,
            AppError::Internal => ErrorKind::Internal,
            AppError::NotFound { .. } => ErrorKind::NotFound,
            AppError::PayloadTooLarge { .. } => ErrorKind::PayloadTooLarge,
            AppError::ServiceUnavailable => ErrorKind::ServiceUnavailable,
            AppError::UnsupportedMediaType(_) => ErrorKind::UnsupportedMediaType,
        }
    }

    /// 응답 본문 JSON
    pub fn to_body(&self) -> serde_json::Value {
        let mut body = serde_json::json!({
            "error": {
                "type": self.kind(),
                "message": self.to_string(),
            }
        });

        if let AppError::InvalidArguments(args) = self {
            body["invalidArgs"] = serde_json::json!(args);
        }

        body
    }
}

impl actix_web::ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        self.kind().status()
    }

    fn error_response(&self) -> actix_web::HttpResponse {
        actix_web::HttpResponse::build(self.status_code()).json(self.to_body())
    }
}

/// 편의성을 위한 Result 타입 별칭
pub type AppResult<T> = Result<T, AppError>;

/// 외부 라이브러리 에러를 로그로 남기고 [`AppError::Internal`]로 축약하는 확장 trait
pub trait ErrorContext<T> {
    /// 컨텍스트 메시지와 함께 원인을 `error` 레벨로 기록합니다.
    fn context(self, msg: &str) -> AppResult<T>;

    /// 지연 평가되는 컨텍스트 메시지
    fn with_context<F>(self, f: F) -> AppResult<T>
    where
        F: FnOnce() -> String;
}

impl<T, E> ErrorContext<T> for Result<T, E>
where
    E: std::fmt::Display,
{
    fn context(self, msg: &str) -> AppResult<T> {
        self.map_err(|e| {
            log::error!("{}: {}", msg, e);
            AppError::Internal
        })
    }

    fn with_context<F>(self, f: F) -> AppResult<T>
    where
        F: FnOnce() -> String,
    {
        self.map_err(|e| {
            log::error!("{}: {}", f(), e);
            AppError::Internal
        })
    }
}
