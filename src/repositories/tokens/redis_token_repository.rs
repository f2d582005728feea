use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use uuid::Uuid;

use super::refresh_token_store::{
    INVALID_REFRESH_TOKEN, RefreshTokenStore, refresh_token_key, user_refresh_token_pattern,
};
use crate::caching::redis::RedisClient;
use crate::errors::{AppError, AppResult, ErrorContext};

/// Redis 기반 리프레시 토큰 저장소
///
/// - 키: `{uid}:{token_id}`
/// - 값: `0` (존재 여부만 의미가 있음)
/// - TTL: 리프레시 토큰의 남은 수명
pub struct RedisTokenRepository {
    redis: Arc<RedisClient>,
}

impl RedisTokenRepository {
    pub fn new(redis: Arc<RedisClient>) -> Self {
        Self { redis }
    }
}

#[async_trait]
impl RefreshTokenStore for RedisTokenRepository {
    async fn set_refresh_token(
        &self,
        uid: Uuid,
        token_id: Uuid,
        expires_in: Duration,
    ) -> AppResult<()> {
        let key = refresh_token_key(uid, token_id);

        // SET EX 는 0초를 거부한다
        let seconds = expires_in.as_secs().max(1);

        self.redis
            .set_with_expiry(&key, "0", seconds)
            .await
            .with_context(|| format!("Could not SET refresh token to redis for uid {}", uid))?;

        log::debug!("Refresh token 저장 완료 - uid: {}, ttl: {}초", uid, seconds);
        Ok(())
    }

    async fn delete_refresh_token(&self, uid: Uuid, token_id: Uuid) -> AppResult<()> {
        let key = refresh_token_key(uid, token_id);

        let removed = self
            .redis
            .del(&key)
            .await
            .with_context(|| format!("Could not delete refresh token for uid {}", uid))?;

        if removed < 1 {
            log::warn!(
                "Refresh token to delete does not exist - uid: {}, token_id: {}",
                uid,
                token_id
            );
            return Err(AppError::authorization(INVALID_REFRESH_TOKEN));
        }

        Ok(())
    }

    async fn delete_user_refresh_tokens(&self, uid: Uuid) -> AppResult<()> {
        let pattern = user_refresh_token_pattern(uid);

        let removed = self
            .redis
            .delete_matching(&pattern)
            .await
            .with_context(|| format!("Could not delete refresh tokens for uid {}", uid))?;

        log::info!("사용자 세션 삭제 완료 - uid: {}, {}개 키 삭제됨", uid, removed);
        Ok(())
    }
}
