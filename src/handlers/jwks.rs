use actix_web::{HttpResponse, get, web};

use crate::core::AppState;

/// 액세스 토큰 검증용 공개키 (JWKS)
///
/// # Endpoint
/// `GET /.well-known/jwks.json`
#[get("/.well-known/jwks.json")]
pub async fn jwks_handler(state: web::Data<AppState>) -> HttpResponse {
    HttpResponse::Ok()
        .insert_header(("Cache-Control", "public, max-age=3600"))
        .json(state.token_service.jwks())
}
