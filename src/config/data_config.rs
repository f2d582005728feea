//! 데이터 및 서버 설정 관리 모듈
//!
//! 실행 환경, 서버 바인딩, 데이터 소스(Postgres/Redis), 패스워드 해싱 설정을 관리합니다.
//! 모든 값은 시작 시 한 번 환경 변수에서 읽혀 구조체로 고정됩니다.

use std::env;
use std::str::FromStr;
use std::time::Duration;

/// 애플리케이션 실행 환경
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Environment {
    /// 개발 환경 - 키 자동 생성 허용
    Development,
    /// 테스트 환경 - 자동화된 테스트용 설정
    Test,
    /// 스테이징 환경 - 프로덕션 유사 환경
    Staging,
    /// 프로덕션 환경
    Production,
}

impl Environment {
    /// 현재 실행 환경을 감지합니다.
    ///
    /// `ENVIRONMENT` 환경 변수를 확인하며, 설정되지 않은 경우 `Development`를 사용합니다.
    pub fn current() -> Self {
        env::var("ENVIRONMENT")
            .map(|value| Self::from_name(&value))
            .unwrap_or(Environment::Development)
    }

    /// 문자열에서 Environment를 생성합니다. 알 수 없는 값은 `Production`으로 취급합니다.
    pub fn from_name(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "development" | "dev" => Environment::Development,
            "test" | "testing" => Environment::Test,
            "staging" | "stage" => Environment::Staging,
            _ => Environment::Production,
        }
    }

    pub fn is_development(self) -> bool {
        self == Environment::Development
    }
}

/// 패스워드 해싱 설정
#[derive(Debug, Clone, Copy)]
pub struct PasswordConfig {
    /// bcrypt cost (4-15)
    pub bcrypt_cost: u32,
}

impl PasswordConfig {
    /// `BCRYPT_COST`가 유효 범위(4-15)면 그 값을, 아니면 환경별 기본값을 사용합니다.
    pub fn from_env(environment: Environment) -> Self {
        let bcrypt_cost = env::var("BCRYPT_COST")
            .ok()
            .and_then(|value| value.parse::<u32>().ok())
            .filter(|cost| (4..=15).contains(cost))
            .unwrap_or_else(|| Self::bcrypt_cost_for_env(environment));

        Self { bcrypt_cost }
    }

    /// 특정 환경에 대한 bcrypt cost를 반환합니다.
    ///
    /// - Development/Test: 4 (빠른 처리)
    /// - Staging: 10
    /// - Production: 12
    pub fn bcrypt_cost_for_env(environment: Environment) -> u32 {
        match environment {
            Environment::Development | Environment::Test => 4,
            Environment::Staging => 10,
            Environment::Production => 12,
        }
    }
}

/// HTTP 서버 설정
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// 계정 API 라우트의 기본 경로 (`ACCOUNT_API_URL`)
    pub base_url: String,
    /// 요청 처리 제한 시간 (`HANDLER_TIMEOUT`, 초)
    pub handler_timeout: Duration,
    /// JSON 본문 최대 크기 (`MAX_BODY_BYTES`)
    pub max_body_bytes: usize,
    pub workers: usize,
}

impl ServerConfig {
    pub fn from_env() -> Self {
        Self {
            host: env_or("HOST", "127.0.0.1"),
            port: env_parse_or("PORT", 8080),
            base_url: env_or("ACCOUNT_API_URL", "/api/account"),
            handler_timeout: Duration::from_secs(env_parse_or("HANDLER_TIMEOUT", 5)),
            max_body_bytes: env_parse_or("MAX_BODY_BYTES", 4 * 1024 * 1024),
            workers: env_parse_or("WORKERS", 4),
        }
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// 데이터 소스 연결 설정
#[derive(Debug, Clone)]
pub struct DataSourceConfig {
    pub database_url: String,
    pub redis_url: String,
}

impl DataSourceConfig {
    /// `DATABASE_URL` / `REDIS_URL`이 있으면 그대로 쓰고,
    /// 없으면 `PG_*` / `REDIS_HOST`, `REDIS_PORT` 조합으로 만듭니다.
    pub fn from_env() -> Self {
        let database_url = env::var("DATABASE_URL").unwrap_or_else(|_| {
            format!(
                "postgres://{}:{}@{}:{}/{}",
                env_or("PG_USER", "postgres"),
                env_or("PG_PASSWORD", "password"),
                env_or("PG_HOST", "localhost"),
                env_or("PG_PORT", "5432"),
                env_or("PG_DB", "postgres"),
            )
        });

        let redis_url = env::var("REDIS_URL").unwrap_or_else(|_| {
            format!(
                "redis://{}:{}",
                env_or("REDIS_HOST", "localhost"),
                env_or("REDIS_PORT", "6379"),
            )
        });

        Self {
            database_url,
            redis_url,
        }
    }
}

/// 환경 변수를 읽고 없으면 기본값을 사용합니다.
pub(crate) fn env_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}

/// 환경 변수를 파싱합니다. 값이 없으면 기본값, 파싱에 실패하면 경고 후 기본값을 사용합니다.
pub(crate) fn env_parse_or<T>(key: &str, default: T) -> T
where
    T: FromStr + std::fmt::Display,
    T::Err: std::fmt::Display,
{
    match env::var(key) {
        Ok(raw) => parse_or(key, &raw, default),
        Err(_) => default,
    }
}

fn parse_or<T>(key: &str, raw: &str, default: T) -> T
where
    T: FromStr + std::fmt::Display,
    T::Err: std::fmt::Display,
{
    raw.trim().parse().unwrap_or_else(|e| {
        log::warn!("{} 파싱 실패: {}. 기본값 {} 사용", key, e, default);
        default
    })
}
