//! # HTTP Request Handlers Module
//!
//! HTTP 요청을 처리하는 핸들러 함수들을 정의하는 모듈입니다.
//!
//! ## 아키텍처 위치
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//!   Handlers (이 모듈) - 바인딩, 검증, 응답          ← Web Layer
//! ├─────────────────────────────────────────────┤
//!   Services - 비즈니스 로직                        ← Service Layer
//! ├─────────────────────────────────────────────┤
//!   Repositories - 데이터 접근                     ← Repository Layer
//! └─────────────────────────────────────────────┘
//! ```
//!
//! ## 요청 본문 처리
//!
//! JSON 본문은 [`json_config`] 로 크기와 Content-Type 이 제한되고,
//! 역직렬화 후 [`validate_request`] 로 필드 검증을 거칩니다.
//!
//! | 실패 | 응답 |
//! |------|------|
//! | Content-Type 이 JSON 이 아님 | 415 |
//! | 본문 크기 초과 | 413 |
//! | JSON 파싱 실패 | 400 |
//! | 필드 검증 실패 | 400 + `invalidArgs` |

pub mod auth;
pub mod jwks;
pub mod users;

use actix_web::HttpRequest;
use actix_web::error::JsonPayloadError;
use actix_web::web;
use validator::{Validate, ValidationErrors};

use crate::errors::{AppError, AppResult, InvalidArgument};

/// JSON 추출기 설정
pub fn json_config(max_body_bytes: usize) -> web::JsonConfig {
    web::JsonConfig::default()
        .limit(max_body_bytes)
        .error_handler(json_error_handler)
}

fn json_error_handler(err: JsonPayloadError, req: &HttpRequest) -> actix_web::Error {
    let error = match &err {
        JsonPayloadError::ContentType => AppError::UnsupportedMediaType(format!(
            "{} only accepts Content-Type application/json",
            req.path()
        )),
        JsonPayloadError::Overflow { limit }
        | JsonPayloadError::OverflowKnownLength { limit, .. } => {
            AppError::PayloadTooLarge { max_bytes: *limit }
        }
        _ => {
            log::debug!("Unable to bind request body for {}: {}", req.path(), err);
            AppError::bad_request("Unable to parse request body")
        }
    };

    error.into()
}

/// 요청 DTO 를 검증하고 실패한 필드를 `invalidArgs` 로 변환합니다.
pub fn validate_request<T: Validate>(payload: &T) -> AppResult<()> {
    payload
        .validate()
        .map_err(|errors| AppError::InvalidArguments(invalid_arguments(&errors)))
}

fn invalid_arguments(errors: &ValidationErrors) -> Vec<InvalidArgument> {
    let mut args: Vec<InvalidArgument> = errors
        .field_errors()
        .into_iter()
        .flat_map(|(field, field_errors)| {
            field_errors.iter().map(move |e| {
                let value = match e.params.get("value") {
                    Some(serde_json::Value::String(s)) => s.clone(),
                    Some(serde_json::Value::Null) | None => String::new(),
                    Some(other) => other.to_string(),
                };

                let mut params: Vec<String> = e
                    .params
                    .iter()
                    .filter(|(name, _)| name.as_ref() != "value")
                    .map(|(name, v)| format!("{}={}", name, v))
                    .collect();
                params.sort();

                InvalidArgument {
                    field: field.to_string(),
                    value,
                    tag: e.code.to_string(),
                    param: params.join(","),
                }
            })
        })
        .collect();

    args.sort_by(|a, b| a.field.cmp(&b.field));
    args
}
