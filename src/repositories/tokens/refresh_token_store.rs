//! 리프레시 토큰 저장소 인터페이스
//!
//! "이 토큰 ID는 이 사용자에게 아직 유효하다"는 기록을 TTL 과 함께 보관합니다.
//! 토큰 서비스는 이 trait 에만 의존하며 구체적인 백엔드는 생성 시점에 주입됩니다.

use std::time::Duration;

use async_trait::async_trait;
use uuid::Uuid;

use crate::errors::AppResult;

/// 리프레시 토큰 기록 저장소
///
/// 모든 연산은 키 단위로 원자적이어야 하며, 호출 사이의 트랜잭션은 가정하지 않습니다.
#[async_trait]
pub trait RefreshTokenStore: Send + Sync {
    /// `(uid, token_id)` 기록을 `expires_in` 동안 유지되도록 저장합니다.
    async fn set_refresh_token(
        &self,
        uid: Uuid,
        token_id: Uuid,
        expires_in: Duration,
    ) -> AppResult<()>;

    /// `(uid, token_id)` 기록 하나를 삭제합니다.
    ///
    /// 기록이 없으면 `AppError::Authorization` 으로 실패합니다.
    /// 이미 사용된 토큰으로 재발급을 시도하는 경우가 여기에 해당합니다.
    async fn delete_refresh_token(&self, uid: Uuid, token_id: Uuid) -> AppResult<()>;

    /// 사용자의 모든 리프레시 토큰 기록을 삭제합니다.
    async fn delete_user_refresh_tokens(&self, uid: Uuid) -> AppResult<()>;
}

/// 저장소 키 `{uid}:{token_id}`
pub fn refresh_token_key(uid: Uuid, token_id: Uuid) -> String {
    format!("{}:{}", uid, token_id)
}

/// 한 사용자의 모든 키와 일치하는 패턴 `{uid}:*`
pub fn user_refresh_token_pattern(uid: Uuid) -> String {
    format!("{}:*", uid)
}

pub(crate) const INVALID_REFRESH_TOKEN: &str = "Invalid refresh token";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_layout() {
        let uid = Uuid::parse_str("11111111-1111-1111-1111-111111111111").unwrap();
        let token_id = Uuid::parse_str("22222222-2222-4222-8222-222222222222").unwrap();

        assert_eq!(
            refresh_token_key(uid, token_id),
            "11111111-1111-1111-1111-111111111111:22222222-2222-4222-8222-222222222222"
        );
        assert_eq!(
            user_refresh_token_pattern(uid),
            "11111111-1111-1111-1111-111111111111:*"
        );
    }
}
