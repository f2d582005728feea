//! Authentication HTTP Handlers
//!
//! 회원가입, 로그인, 토큰 갱신, 로그아웃 엔드포인트입니다.
//!
//! # Token Flow
//!
//! - **회원가입/로그인**: 새 토큰 쌍 발급
//! - **토큰 갱신**: 리프레시 토큰을 검증하고 일회용으로 교체 (`POST /tokens`)
//! - **로그아웃**: 사용자의 모든 리프레시 토큰 무효화
use actix_web::{HttpResponse, post, web};

use crate::core::AppState;
use crate::domain::User;
use crate::domain::dto::users::{
    MessageResponse, SigninRequest, SignupRequest, TokensRequest, TokensResponse,
};
use crate::errors::AppError;
use crate::handlers::validate_request;

/// 회원가입 핸들러
///
/// # Endpoint
/// `POST /signup` → 201 `{"tokens": {...}}`
#[post("/signup")]
pub async fn signup(
    state: web::Data<AppState>,
    payload: web::Json<SignupRequest>,
) -> Result<HttpResponse, AppError> {
    validate_request(&*payload)?;

    let user = state
        .user_service
        .signup(&payload.email, &payload.password)
        .await?;

    let pair = state.token_service.issue_token_pair(&user, None).await?;

    Ok(HttpResponse::Created().json(TokensResponse { tokens: pair }))
}

/// 로컬 로그인 핸들러
///
/// # Endpoint
/// `POST /signin` → 200 `{"tokens": {...}}`
#[post("/signin")]
pub async fn signin(
    state: web::Data<AppState>,
    payload: web::Json<SigninRequest>,
) -> Result<HttpResponse, AppError> {
    validate_request(&*payload)?;

    let user = state
        .user_service
        .signin(&payload.email, &payload.password)
        .await?;

    log::info!("로그인 성공 - uid: {}", user.uid);

    let pair = state.token_service.issue_token_pair(&user, None).await?;

    Ok(HttpResponse::Ok().json(TokensResponse { tokens: pair }))
}

/// 토큰 갱신 핸들러
///
/// 리프레시 토큰을 검증하고, 현재 사용자 정보로 새 토큰 쌍을 발급하면서
/// 사용한 리프레시 토큰은 저장소에서 제거합니다.
///
/// # Endpoint
/// `POST /tokens` → 200 `{"tokens": {...}}`
#[post("/tokens")]
pub async fn refresh_tokens(
    state: web::Data<AppState>,
    payload: web::Json<TokensRequest>,
) -> Result<HttpResponse, AppError> {
    validate_request(&*payload)?;

    let refresh = state
        .token_service
        .validate_refresh_token(&payload.refresh_token)?;

    // 토큰 발급 이후 변경된 프로필을 반영
    let user = state.user_service.get(refresh.uid).await?;

    let pair = state
        .token_service
        .issue_token_pair(&user, Some(refresh.id))
        .await?;

    Ok(HttpResponse::Ok().json(TokensResponse { tokens: pair }))
}

/// 로그아웃 핸들러
///
/// 모든 기기의 리프레시 토큰을 무효화합니다.
/// 이미 발급된 액세스 토큰은 만료 시까지 유효합니다.
///
/// # Endpoint
/// `POST /signout` (인증 필요)
pub async fn signout(
    state: web::Data<AppState>,
    user: web::ReqData<User>,
) -> Result<HttpResponse, AppError> {
    state.token_service.sign_out_all_sessions(user.uid).await?;

    Ok(HttpResponse::Ok().json(MessageResponse::new("user signed out successfully!")))
}

#[cfg(test)]
mod tests {
    use actix_web::{App, http::StatusCode, test};
    use serde_json::{Value, json};

    use crate::core::state::test_support::{BASE_URL, server_config, test_context};
    use crate::routes::configure_all_routes;

    fn url(path: &str) -> String {
        format!("{}{}", BASE_URL, path)
    }

    #[actix_web::test]
    async fn test_signup_then_signin() {
        let ctx = test_context();
        let app = test::init_service(App::new().configure(|cfg| {
            configure_all_routes(cfg, &ctx.state, &server_config())
        }))
        .await;

        let credentials = json!({"email": "alice@example.com", "password": "password1"});

        let req = test::TestRequest::post()
            .uri(&url("/signup"))
            .set_json(&credentials)
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::CREATED);
        let body: Value = test::read_body_json(resp).await;
        assert!(body["tokens"]["idToken"].as_str().is_some());
        assert!(body["tokens"]["refreshToken"].as_str().is_some());

        let req = test::TestRequest::post()
            .uri(&url("/signin"))
            .set_json(&credentials)
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);

        let req = test::TestRequest::post()
            .uri(&url("/signup"))
            .set_json(&credentials)
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::CONFLICT);
    }

    #[actix_web::test]
    async fn test_signin_with_wrong_password() {
        let ctx = test_context();
        ctx.state
            .user_service
            .signup("alice@example.com", "password1")
            .await
            .unwrap();
        let app = test::init_service(App::new().configure(|cfg| {
            configure_all_routes(cfg, &ctx.state, &server_config())
        }))
        .await;

        let req = test::TestRequest::post()
            .uri(&url("/signin"))
            .set_json(json!({"email": "alice@example.com", "password": "password2"}))
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(
            body["error"]["message"],
            "Invalid email and password combination"
        );
    }

    #[actix_web::test]
    async fn test_signup_rejects_invalid_arguments() {
        let ctx = test_context();
        let app = test::init_service(App::new().configure(|cfg| {
            configure_all_routes(cfg, &ctx.state, &server_config())
        }))
        .await;

        let req = test::TestRequest::post()
            .uri(&url("/signup"))
            .set_json(json!({"email": "nope", "password": "123"}))
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(
            body["error"]["message"],
            "Invalid request parameters. See invalidArgs"
        );
        assert_eq!(body["invalidArgs"].as_array().unwrap().len(), 2);
    }

    #[actix_web::test]
    async fn test_non_json_body_is_415() {
        let ctx = test_context();
        let app = test::init_service(App::new().configure(|cfg| {
            configure_all_routes(cfg, &ctx.state, &server_config())
        }))
        .await;

        let req = test::TestRequest::post()
            .uri(&url("/signin"))
            .insert_header(("Content-Type", "text/plain"))
            .set_payload("email=alice")
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::UNSUPPORTED_MEDIA_TYPE);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(
            body["error"]["message"],
            "/api/account/signin only accepts Content-Type application/json"
        );
    }

    #[actix_web::test]
    async fn test_oversized_body_is_413() {
        let ctx = test_context();
        let app = test::init_service(App::new().configure(|cfg| {
            configure_all_routes(cfg, &ctx.state, &server_config())
        }))
        .await;

        let req = test::TestRequest::post()
            .uri(&url("/signin"))
            .set_json(json!({"email": "a@b.com", "password": "x".repeat(2048)}))
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::PAYLOAD_TOO_LARGE);
    }

    #[actix_web::test]
    async fn test_refresh_rotation_is_single_use() {
        let ctx = test_context();
        let user = ctx
            .state
            .user_service
            .signup("alice@example.com", "password1")
            .await
            .unwrap();
        let first = ctx
            .state
            .token_service
            .issue_token_pair(&user, None)
            .await
            .unwrap();
        let app = test::init_service(App::new().configure(|cfg| {
            configure_all_routes(cfg, &ctx.state, &server_config())
        }))
        .await;

        let refresh_body = json!({"refresh_token": first.refresh_token.signed});

        let req = test::TestRequest::post()
            .uri(&url("/tokens"))
            .set_json(&refresh_body)
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
        let body: Value = test::read_body_json(resp).await;
        assert_ne!(body["tokens"]["refreshToken"], json!(first.refresh_token.signed));
        assert!(!ctx.tokens.contains(user.uid, first.refresh_token.id));
        assert_eq!(ctx.tokens.live_count(user.uid), 1);

        let req = test::TestRequest::post()
            .uri(&url("/tokens"))
            .set_json(&refresh_body)
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    }

    #[actix_web::test]
    async fn test_tokens_with_garbage_refresh_token() {
        let ctx = test_context();
        let app = test::init_service(App::new().configure(|cfg| {
            configure_all_routes(cfg, &ctx.state, &server_config())
        }))
        .await;

        let req = test::TestRequest::post()
            .uri(&url("/tokens"))
            .set_json(json!({"refresh_token": "garbage"}))
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(
            body["error"]["message"],
            "Unable to verify user from refresh token"
        );
    }

    #[actix_web::test]
    async fn test_signout_revokes_refresh_tokens() {
        let ctx = test_context();
        let user = ctx
            .state
            .user_service
            .signup("alice@example.com", "password1")
            .await
            .unwrap();
        let pair = ctx
            .state
            .token_service
            .issue_token_pair(&user, None)
            .await
            .unwrap();
        let app = test::init_service(App::new().configure(|cfg| {
            configure_all_routes(cfg, &ctx.state, &server_config())
        }))
        .await;

        let req = test::TestRequest::post()
            .uri(&url("/signout"))
            .insert_header(("Authorization", format!("Bearer {}", pair.id_token)))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body, json!({"message": "user signed out successfully!"}));
        assert_eq!(ctx.tokens.live_count(user.uid), 0);

        let req = test::TestRequest::post()
            .uri(&url("/tokens"))
            .set_json(json!({"refresh_token": pair.refresh_token.signed}))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    }

    #[actix_web::test]
    async fn test_signout_requires_bearer_token() {
        let ctx = test_context();
        let app = test::init_service(App::new().configure(|cfg| {
            configure_all_routes(cfg, &ctx.state, &server_config())
        }))
        .await;

        let req = test::TestRequest::post().uri(&url("/signout")).to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    }
}
