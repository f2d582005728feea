//! # 사용자 리포지토리 구현
//!
//! 사용자 엔티티의 데이터 액세스 계층을 담당합니다.
//! Postgres 의 기존 `users` 테이블을 그대로 사용합니다.
//!
//! ## 에러 처리
//!
//! 드라이버 에러는 이 경계에서 로그로 남기고 [`AppError`] 로 축약합니다.
//!
//! | 상황 | 결과 |
//! |------|------|
//! | 이메일 유니크 제약 위반 | `Conflict("email", email)` |
//! | 행 없음 | `NotFound(resource, value)` |
//! | 그 외 | `Internal` |

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::entities::users::user::User;
use crate::errors::{AppError, AppResult};

/// 사용자 저장소 인터페이스
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// 새 사용자를 만들고 저장된 행을 반환합니다.
    async fn create(&self, email: &str, password_hash: &str) -> AppResult<User>;

    async fn find_by_id(&self, uid: Uuid) -> AppResult<User>;

    async fn find_by_email(&self, email: &str) -> AppResult<User>;

    /// 이름, 이메일, 웹사이트를 갱신하고 저장된 행을 반환합니다.
    async fn update(&self, user: &User) -> AppResult<User>;
}

/// Postgres 사용자 리포지토리
///
/// ## 사용 예제
///
/// ```rust,ignore
/// let repo = PgUserRepository::new(database.pool().clone());
///
/// let created = repo.create("john@example.com", &hash).await?;
/// let found = repo.find_by_email("john@example.com").await?;
/// ```
pub struct PgUserRepository {
    pool: PgPool,
}

impl PgUserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserRepository for PgUserRepository {
    async fn create(&self, email: &str, password_hash: &str) -> AppResult<User> {
        sqlx::query_as::<_, User>(
            "INSERT INTO users (email, password) VALUES ($1, $2) RETURNING *",
        )
        .bind(email)
        .bind(password_hash)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| classify_write_error(e, email))
    }

    async fn find_by_id(&self, uid: Uuid) -> AppResult<User> {
        sqlx::query_as::<_, User>("SELECT * FROM users WHERE uid = $1")
            .bind(uid)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| classify_lookup_error(e, "uid", uid))
    }

    async fn find_by_email(&self, email: &str) -> AppResult<User> {
        sqlx::query_as::<_, User>("SELECT * FROM users WHERE email = $1")
            .bind(email)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| classify_lookup_error(e, "email", email))
    }

    async fn update(&self, user: &User) -> AppResult<User> {
        sqlx::query_as::<_, User>(
            "UPDATE users SET name = $1, email = $2, website = $3 WHERE uid = $4 RETURNING *",
        )
        .bind(&user.name)
        .bind(&user.email)
        .bind(&user.website)
        .bind(user.uid)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| match e {
            sqlx::Error::RowNotFound => AppError::not_found("uid", user.uid),
            other => classify_write_error(other, &user.email),
        })
    }
}

fn classify_write_error(error: sqlx::Error, email: &str) -> AppError {
    if let sqlx::Error::Database(db_err) = &error {
        if db_err.is_unique_violation() {
            log::warn!("Email already in use: {}", email);
            return AppError::conflict("email", email);
        }
    }

    log::error!("Could not write user with email {}: {}", email, error);
    AppError::Internal
}

fn classify_lookup_error(error: sqlx::Error, resource: &str, value: impl ToString) -> AppError {
    let value = value.to_string();

    match error {
        sqlx::Error::RowNotFound => AppError::not_found(resource, value),
        other => {
            log::error!("Unable to query user by {} {}: {}", resource, value, other);
            AppError::Internal
        }
    }
}
