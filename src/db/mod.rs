//! Database Connection Management Module
//!
//! Postgres 연결 풀 관리를 담당하는 모듈입니다.
//!
//! # 기본 사용법
//!
//! ```rust,ignore
//! use crate::db::Database;
//!
//! let database = Database::connect(&config.data_source.database_url).await?;
//! let user_repo = PgUserRepository::new(database.pool().clone());
//! ```

use std::time::Duration;

use log::info;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;

/// Postgres 연결 풀 래퍼
#[derive(Clone)]
pub struct Database {
    pool: PgPool,
}

impl Database {
    /// 연결 풀을 만들고 `SELECT 1` 로 연결을 검증합니다.
    ///
    /// # Errors
    ///
    /// * 잘못된 URL 또는 연결 실패 시 `sqlx::Error`
    pub async fn connect(database_url: &str) -> Result<Self, sqlx::Error> {
        let pool = PgPoolOptions::new()
            .max_connections(10)
            .acquire_timeout(Duration::from_secs(5))
            .connect(database_url)
            .await?;

        sqlx::query("SELECT 1").execute(&pool).await?;
        info!("✅ Postgres ping 성공");

        Ok(Self { pool })
    }

    /// 내부 연결 풀
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}
