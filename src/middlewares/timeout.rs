//! 요청 처리 시간 제한 미들웨어
//!
//! 제한 시간이 지나면 처리 중인 핸들러 future 를 버리고
//! [`AppError::ServiceUnavailable`] (503) 을 반환합니다.

use std::future::{Ready, ready};
use std::rc::Rc;
use std::time::Duration;

use actix_web::dev::{Service, ServiceRequest, ServiceResponse, Transform, forward_ready};
use actix_web::Error;
use futures_util::future::LocalBoxFuture;

use crate::errors::AppError;

/// 핸들러 시간 제한 미들웨어
pub struct Timeout {
    duration: Duration,
}

impl Timeout {
    pub fn new(duration: Duration) -> Self {
        Self { duration }
    }
}

impl<S, B> Transform<S, ServiceRequest> for Timeout
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Transform = TimeoutService<S>;
    type InitError = ();
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(TimeoutService {
            service: Rc::new(service),
            duration: self.duration,
        }))
    }
}

pub struct TimeoutService<S> {
    service: Rc<S>,
    duration: Duration,
}

impl<S, B> Service<ServiceRequest> for TimeoutService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = self.service.clone();
        let duration = self.duration;
        // 라우터가 요청을 단독 소유해야 하므로 HttpRequest 는 복제하지 않음
        let method = req.method().clone();
        let path = req.path().to_string();

        Box::pin(async move {
            match actix_web::rt::time::timeout(duration, service.call(req)).await {
                Ok(res) => res,
                Err(_) => {
                    log::warn!("Handler timed out after {:?}: {} {}", duration, method, path);
                    Err(AppError::ServiceUnavailable.into())
                }
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use actix_web::{App, HttpResponse, body, http::StatusCode, test, web};
    use serde_json::Value;

    use super::*;

    async fn slow() -> HttpResponse {
        actix_web::rt::time::sleep(Duration::from_millis(500)).await;
        HttpResponse::Ok().finish()
    }

    async fn fast() -> HttpResponse {
        HttpResponse::Ok().body("done")
    }

    #[actix_web::test]
    async fn test_slow_handler_gets_503() {
        let app = test::init_service(
            App::new()
                .wrap(Timeout::new(Duration::from_millis(50)))
                .route("/slow", web::get().to(slow)),
        )
        .await;

        let err = test::try_call_service(&app, test::TestRequest::get().uri("/slow").to_request())
            .await
            .err()
            .unwrap();

        assert_eq!(err.as_error::<AppError>(), Some(&AppError::ServiceUnavailable));
        let resp = err.error_response();
        assert_eq!(resp.status(), StatusCode::SERVICE_UNAVAILABLE);
        let bytes = body::to_bytes(resp.into_body()).await.unwrap();
        let body: Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["error"]["type"], "SERVICE_UNAVAILABLE");
    }

    #[actix_web::test]
    async fn test_scoped_routes_pass_through() {
        let app = test::init_service(
            App::new().service(
                web::scope("/api")
                    .wrap(Timeout::new(Duration::from_secs(5)))
                    .route("/fast", web::get().to(fast))
                    .route("/items/{id}", web::get().to(fast)),
            ),
        )
        .await;

        for uri in ["/api/fast", "/api/items/42"] {
            let resp = test::call_service(&app, test::TestRequest::get().uri(uri).to_request()).await;
            assert_eq!(resp.status(), StatusCode::OK);
        }
    }
}
