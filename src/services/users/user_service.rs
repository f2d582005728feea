//! # 사용자 서비스 구현
//!
//! 회원가입, 로그인, 프로필 조회/수정에 대한 비즈니스 로직을 담당합니다.
//!
//! ## 보안
//!
//! - **bcrypt 해싱**: 환경별 cost 로 비밀번호를 해싱
//! - **동일한 실패 메시지**: 존재하지 않는 이메일과 잘못된 비밀번호를 구분하지 않음

use std::sync::Arc;
use std::time::Instant;

use uuid::Uuid;

use crate::domain::entities::users::user::User;
use crate::errors::{AppError, AppResult};
use crate::repositories::users::UserRepository;

const INVALID_CREDENTIALS: &str = "Invalid email and password combination";

/// 사용자 관리 서비스
pub struct UserService {
    user_repo: Arc<dyn UserRepository>,
    bcrypt_cost: u32,
}

impl UserService {
    pub fn new(user_repo: Arc<dyn UserRepository>, bcrypt_cost: u32) -> Self {
        Self {
            user_repo,
            bcrypt_cost,
        }
    }

    /// ID로 사용자를 조회합니다.
    ///
    /// # Errors
    ///
    /// * `AppError::NotFound` - 사용자 없음
    pub async fn get(&self, uid: Uuid) -> AppResult<User> {
        self.user_repo.find_by_id(uid).await
    }

    /// 새 사용자를 등록합니다.
    ///
    /// # Errors
    ///
    /// * `AppError::Conflict` - 이미 사용 중인 이메일
    /// * `AppError::Internal` - 해싱 또는 저장 실패
    pub async fn signup(&self, email: &str, password: &str) -> AppResult<User> {
        let start_time = Instant::now();

        let password_hash = bcrypt::hash(password, self.bcrypt_cost).map_err(|e| {
            log::error!("Unable to hash password for email {}: {}", email, e);
            AppError::Internal
        })?;
        log::debug!("Password hashing took: {:?}", start_time.elapsed());

        let user = self.user_repo.create(email, &password_hash).await?;

        log::info!("User created: {} ({:?})", user.uid, start_time.elapsed());
        Ok(user)
    }

    /// 이메일과 비밀번호로 사용자를 인증합니다.
    ///
    /// # Errors
    ///
    /// * `AppError::Authorization` - 이메일이 없거나 비밀번호 불일치
    /// * `AppError::Internal` - 조회 또는 bcrypt 검증 실패
    pub async fn signin(&self, email: &str, password: &str) -> AppResult<User> {
        let user = match self.user_repo.find_by_email(email).await {
            Ok(user) => user,
            Err(AppError::NotFound { .. }) => {
                log::debug!("Signin attempt for unknown email: {}", email);
                return Err(AppError::authorization(INVALID_CREDENTIALS));
            }
            Err(e) => return Err(e),
        };

        let verify_start = Instant::now();
        let is_valid = bcrypt::verify(password, &user.password).map_err(|e| {
            log::error!("Unable to verify password for uid {}: {}", user.uid, e);
            AppError::Internal
        })?;
        log::debug!("Password verification took: {:?}", verify_start.elapsed());

        if !is_valid {
            log::debug!("Wrong password for uid: {}", user.uid);
            return Err(AppError::authorization(INVALID_CREDENTIALS));
        }

        Ok(user)
    }

    /// 이름, 이메일, 웹사이트를 갱신하고 저장된 사용자를 반환합니다.
    ///
    /// # Errors
    ///
    /// * `AppError::Conflict` - 다른 사용자가 쓰는 이메일
    /// * `AppError::NotFound` - 사용자 없음
    pub async fn update_details(&self, user: &User) -> AppResult<User> {
        let updated = self.user_repo.update(user).await?;

        log::info!("User details updated: {}", updated.uid);
        Ok(updated)
    }
}
