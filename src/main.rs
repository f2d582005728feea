//! 계정 서비스 메인 애플리케이션
//!
//! 설정을 읽고 Postgres, Redis 연결을 만든 뒤 리포지토리와 서비스를 조립하여
//! Actix-web HTTP 서버를 구동합니다.

use std::io;
use std::sync::Arc;

use account_service::caching::redis::RedisClient;
use account_service::config::AppConfig;
use account_service::core::AppState;
use account_service::db::Database;
use account_service::repositories::tokens::{RefreshTokenStore, RedisTokenRepository};
use account_service::repositories::users::{PgUserRepository, UserRepository};
use account_service::routes::configure_all_routes;
use account_service::services::auth::TokenService;
use account_service::services::users::UserService;
use actix_cors::Cors;
use actix_web::http::header;
use actix_web::{App, HttpServer, middleware};
use env_logger::Env;
use log::{error, info};

#[actix_web::main]
async fn main() -> io::Result<()> {
    // 환경 설정 및 로깅 초기화
    let env_file = load_env_file();
    init_logging();
    info!("Current profile: {}", env_file);

    info!("🚀 계정 서비스 시작중...");

    let config = AppConfig::from_env().map_err(|e| {
        error!("설정 로드 실패: {}", e);
        io::Error::other(e)
    })?;

    let state = initialize_services(&config).await?;

    info!("✅ 모든 서비스가 성공적으로 초기화되었습니다!");

    start_http_server(config, state).await
}

/// HTTP 서버를 구성하고 실행합니다
///
/// CORS, 로깅, 경로 정규화 미들웨어를 포함합니다.
///
/// # Errors
///
/// * `std::io::Error` - 포트 바인딩 실패 또는 서버 실행 오류
async fn start_http_server(config: AppConfig, state: AppState) -> io::Result<()> {
    let server = config.server.clone();
    let bind_address = server.bind_address();

    info!("🌐 서버가 http://{} 에서 실행중입니다", bind_address);
    info!("📍 Health check: http://{}{}/health", bind_address, server.base_url);

    let workers = server.workers;

    HttpServer::new(move || {
        // CORS 설정
        let cors = configure_cors();

        App::new()
            .wrap(cors)
            .wrap(middleware::Logger::default())
            .wrap(middleware::NormalizePath::trim())
            // 라우트 설정
            .configure(|cfg| configure_all_routes(cfg, &state, &server))
    })
    .bind(bind_address)?
    .workers(workers)
    .run()
    .await
}

/// 환경별 설정 파일을 로드하고 로드한 파일 이름을 반환합니다
///
/// 로거 초기화 전에 호출되므로 결과는 호출자가 기록합니다.
///
/// # Environment Variables
///
/// * `PROFILE=dev` - .env.dev 파일 로드 (기본값)
/// * `PROFILE=prod` - .env.prod 파일 로드
/// * 기타 - 기본 .env 파일 로드
///
/// ```bash
/// PROFILE=prod cargo run
/// ```
fn load_env_file() -> String {
    let profile = std::env::var("PROFILE").unwrap_or_else(|_| "dev".to_string());

    let filename = match profile.as_str() {
        "prod" => ".env.prod",
        "dev" => ".env.dev",
        _ => ".env",
    };

    match dotenv::from_filename(filename) {
        Ok(_) => format!("{} ({} 로드 됨)", profile, filename),
        Err(e) => format!("{} ({} 로드 실패: {})", profile, filename, e),
    }
}

/// 로깅 시스템을 초기화합니다
///
/// # Environment Variables
///
/// * `RUST_LOG` - 로깅 레벨 설정 (기본값: "info,actix_web=info")
///
/// ```bash
/// RUST_LOG=account_service::services=debug cargo run
/// ```
fn init_logging() {
    env_logger::init_from_env(Env::default().default_filter_or("info,actix_web=info"));
}

/// 데이터 스토어에 연결하고 리포지토리와 서비스를 조립합니다
///
/// # Errors
///
/// * Postgres 또는 Redis 연결 실패
async fn initialize_services(config: &AppConfig) -> io::Result<AppState> {
    info!("📡 데이터베이스 연결 중...");

    let database = Database::connect(&config.data_source.database_url)
        .await
        .map_err(|e| {
            error!("Postgres 연결 실패: {}", e);
            io::Error::other(e)
        })?;

    let redis_client = Arc::new(
        RedisClient::new(&config.data_source.redis_url)
            .await
            .map_err(|e| {
                error!("Redis 연결 실패: {}", e);
                io::Error::other(e)
            })?,
    );

    let user_repo: Arc<dyn UserRepository> =
        Arc::new(PgUserRepository::new(database.pool().clone()));
    let token_store: Arc<dyn RefreshTokenStore> =
        Arc::new(RedisTokenRepository::new(redis_client));

    let user_service = Arc::new(UserService::new(user_repo, config.password.bcrypt_cost));
    let token_service = Arc::new(TokenService::new(token_store, &config.token));

    Ok(AppState::new(user_service, token_service))
}

/// CORS 설정을 구성합니다
///
/// # Allowed Origins
///
/// * `http://localhost:3000` - 프론트엔드 개발 서버
/// * `http://localhost:8080` - 자체 서버
/// * `127.0.0.1` 동등한 주소들
fn configure_cors() -> Cors {
    Cors::default()
        .allowed_origin("http://localhost:3000")
        .allowed_origin("http://127.0.0.1:3000")
        .allowed_origin("http://localhost:8080")
        .allowed_origin("http://127.0.0.1:8080")
        .allowed_methods(vec!["GET", "POST", "PUT", "OPTIONS"])
        .allowed_headers(vec![
            header::AUTHORIZATION,
            header::ACCEPT,
            header::CONTENT_TYPE,
        ])
        .supports_credentials()
        // Preflight 요청 캐시 시간 (초)
        .max_age(3600)
}
