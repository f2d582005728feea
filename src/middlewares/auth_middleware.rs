//! JWT 인증 미들웨어
//!
//! ActixWeb 요청 파이프라인에서 액세스 토큰을 검증하고 사용자 정보를 추출합니다.

use std::future::{Ready, ready};
use std::rc::Rc;
use std::sync::Arc;

use actix_web::{
    Error, Result,
    body::EitherBody,
    dev::{Service, ServiceRequest, ServiceResponse, Transform},
};

use crate::middlewares::auth_inner::AuthMiddlewareService;
use crate::services::auth::TokenService;

/// JWT 인증 미들웨어
///
/// `Authorization: Bearer <idToken>` 헤더가 필수이며, 검증에 성공하면
/// 토큰에 담긴 [`User`](crate::domain::User) 를 request extensions 에 넣습니다.
/// 핸들러에서는 `web::ReqData<User>` 로 꺼냅니다.
pub struct AuthMiddleware {
    token_service: Arc<TokenService>,
}

impl AuthMiddleware {
    pub fn required(token_service: Arc<TokenService>) -> Self {
        Self { token_service }
    }
}

/// ActixWeb Transform trait 구현
impl<S, B> Transform<S, ServiceRequest> for AuthMiddleware
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Transform = AuthMiddlewareService<S>;
    type InitError = ();
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(AuthMiddlewareService {
            service: Rc::new(service),
            token_service: self.token_service.clone(),
        }))
    }
}
