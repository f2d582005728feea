//! 사용자 프로필 핸들러
//!
//! 두 엔드포인트 모두 [`AuthMiddleware`](crate::middlewares::AuthMiddleware) 뒤에서 동작하며,
//! 토큰에 담긴 사용자를 `web::ReqData<User>` 로 받습니다.
use actix_web::{HttpResponse, web};

use crate::core::AppState;
use crate::domain::User;
use crate::domain::dto::users::{DetailsRequest, UserResponse};
use crate::errors::AppError;
use crate::handlers::validate_request;

/// 현재 사용자 조회 핸들러
///
/// 토큰 속 스냅샷이 아니라 저장소의 최신 사용자 정보를 돌려줍니다.
///
/// # Endpoint
/// `GET /me` → 200 `{"user": {...}}`, 사용자가 삭제되었으면 404
pub async fn me(
    state: web::Data<AppState>,
    user: web::ReqData<User>,
) -> Result<HttpResponse, AppError> {
    let uid = user.uid;

    let user = state.user_service.get(uid).await.map_err(|e| {
        log::warn!("Unable to find user: {}\n{}", uid, e);
        AppError::not_found("user", uid)
    })?;

    Ok(HttpResponse::Ok().json(UserResponse { user }))
}

/// 프로필 수정 핸들러
///
/// # Endpoint
/// `PUT /details` → 200 `{"user": {...}}`
pub async fn details(
    state: web::Data<AppState>,
    user: web::ReqData<User>,
    payload: web::Json<DetailsRequest>,
) -> Result<HttpResponse, AppError> {
    validate_request(&*payload)?;

    let DetailsRequest {
        name,
        email,
        website,
    } = payload.into_inner();

    let changes = User {
        uid: user.uid,
        name,
        email,
        website: website.unwrap_or_default(),
        ..Default::default()
    };

    let updated = state.user_service.update_details(&changes).await?;

    Ok(HttpResponse::Ok().json(UserResponse { user: updated }))
}
