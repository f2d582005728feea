//! JWT 토큰 관리 서비스 구현
//!
//! 토큰 코덱과 리프레시 토큰 저장소를 조합하여 토큰 쌍 발급, 검증,
//! 일회용 리프레시 토큰 교체(rotation), 전체 세션 로그아웃을 담당합니다.
//!
//! ## 리프레시 토큰 ID 상태
//!
//! ```text
//! Issued ──► Rotated-away
//!        ├─► Revoked-by-signout
//!        └─► Expired-by-TTL
//! ```
//!
//! 세 상태 모두 종료 상태이며 `Issued` 로 되돌아가지 않습니다.

use std::sync::Arc;

use uuid::Uuid;

use super::token_codec;
use crate::config::token_config::{AccessKeys, TokenConfig};
use crate::domain::entities::users::user::User;
use crate::domain::models::token::{RefreshToken, TokenPair};
use crate::errors::{AppError, AppResult};
use crate::repositories::tokens::RefreshTokenStore;

const INVALID_ID_TOKEN_MESSAGE: &str = "Unable to verify user from idToken";
const INVALID_REFRESH_TOKEN_MESSAGE: &str = "Unable to verify user from refresh token";

/// JWT 토큰 관리 서비스
///
/// 키와 TTL 은 생성 시점에 [`TokenConfig`] 에서 복사되며 이후 변하지 않습니다.
/// 공유 가변 상태는 주입된 저장소뿐이므로 여러 요청이 동시에 호출해도 됩니다.
pub struct TokenService {
    store: Arc<dyn RefreshTokenStore>,
    access_keys: AccessKeys,
    refresh_secret: String,
    access_token_ttl: i64,
    refresh_token_ttl: i64,
}

impl TokenService {
    pub fn new(store: Arc<dyn RefreshTokenStore>, config: &TokenConfig) -> Self {
        Self {
            store,
            access_keys: config.access_keys.clone(),
            refresh_secret: config.refresh_secret.clone(),
            access_token_ttl: config.access_token_ttl,
            refresh_token_ttl: config.refresh_token_ttl,
        }
    }

    /// 새 토큰 쌍을 발급합니다.
    ///
    /// 순서:
    /// 1. `previous_token_id` 가 있으면 저장소에서 먼저 삭제
    /// 2. 액세스 토큰 생성
    /// 3. 리프레시 토큰 생성
    /// 4. 새 리프레시 토큰 ID를 TTL 과 함께 저장
    ///
    /// # Errors
    ///
    /// * 1단계 실패 - 저장소 에러를 그대로 반환 (이미 사용된 토큰이면 `Authorization`)
    /// * 2~4단계 실패 - `AppError::Internal`
    ///
    /// # Examples
    ///
    /// ```rust,ignore
    /// // 로그인
    /// let pair = token_service.issue_token_pair(&user, None).await?;
    ///
    /// // 리프레시 토큰 교체
    /// let pair = token_service.issue_token_pair(&user, Some(refresh.id)).await?;
    /// ```
    pub async fn issue_token_pair(
        &self,
        user: &User,
        previous_token_id: Option<Uuid>,
    ) -> AppResult<TokenPair> {
        if let Some(previous) = previous_token_id {
            self.store.delete_refresh_token(user.uid, previous).await?;
        }

        let id_token = token_codec::generate_access_token(
            user,
            self.access_keys.encoding_key(),
            self.access_keys.key_id(),
            self.access_token_ttl,
        )
        .map_err(|e| {
            log::error!("Error generating idToken for uid: {}. Error: {}", user.uid, e);
            AppError::Internal
        })?;

        let refresh = token_codec::generate_refresh_token(
            user.uid,
            &self.refresh_secret,
            self.refresh_token_ttl,
        )
        .map_err(|e| {
            log::error!("Error generating refreshToken for uid: {}. Error: {}", user.uid, e);
            AppError::Internal
        })?;

        self.store
            .set_refresh_token(user.uid, refresh.id, refresh.expires_in)
            .await
            .map_err(|e| {
                log::error!("Error storing tokenID for uid: {}. Error: {}", user.uid, e);
                AppError::Internal
            })?;

        log::debug!("Issued token pair for uid: {}", user.uid);

        Ok(TokenPair {
            id_token,
            refresh_token: RefreshToken {
                signed: refresh.signed,
                id: refresh.id,
                uid: user.uid,
            },
        })
    }

    /// 액세스 토큰을 검증하고 안에 담긴 사용자를 반환합니다.
    ///
    /// # Errors
    ///
    /// * `AppError::Authorization` - 어떤 이유로든 검증 실패
    pub fn validate_access_token(&self, token: &str) -> AppResult<User> {
        let claims = token_codec::validate_access_token(token, self.access_keys.decoding_key())
            .map_err(|e| {
                log::warn!("Unable to validate or parse idToken - Error: {}", e);
                AppError::authorization(INVALID_ID_TOKEN_MESSAGE)
            })?;

        Ok(claims.user)
    }

    /// 리프레시 토큰을 검증하고 사용자 ID와 토큰 ID를 반환합니다.
    ///
    /// 저장소 존재 여부는 확인하지 않습니다. 이미 사용된 토큰은 이어지는
    /// [`issue_token_pair`](Self::issue_token_pair) 의 삭제 단계에서 걸러집니다.
    ///
    /// # Errors
    ///
    /// * `AppError::Authorization` - 어떤 이유로든 검증 실패
    pub fn validate_refresh_token(&self, token: &str) -> AppResult<RefreshToken> {
        let claims = token_codec::validate_refresh_token(token, &self.refresh_secret)
            .map_err(|e| {
                log::warn!("Unable to validate or parse refreshToken - Error: {}", e);
                AppError::authorization(INVALID_REFRESH_TOKEN_MESSAGE)
            })?;

        let id = Uuid::parse_str(&claims.jti).map_err(|e| {
            log::warn!("Claims jti could not be parsed as UUID: {}. Error: {}", claims.jti, e);
            AppError::authorization(INVALID_REFRESH_TOKEN_MESSAGE)
        })?;

        Ok(RefreshToken {
            signed: token.to_string(),
            id,
            uid: claims.uid,
        })
    }

    /// 사용자의 모든 리프레시 토큰을 무효화합니다.
    ///
    /// 이미 발급된 액세스 토큰은 만료될 때까지 유효합니다.
    ///
    /// # Errors
    ///
    /// * `AppError::Internal` - 저장소 실패
    pub async fn sign_out_all_sessions(&self, uid: Uuid) -> AppResult<()> {
        self.store.delete_user_refresh_tokens(uid).await.map_err(|e| {
            log::error!("Error signing out uid: {}. Error: {}", uid, e);
            AppError::Internal
        })?;

        log::info!("Signed out all sessions for uid: {}", uid);
        Ok(())
    }

    /// 액세스 토큰 검증용 공개키 JWKS 문서
    pub fn jwks(&self) -> serde_json::Value {
        self.access_keys.jwks()
    }
}
