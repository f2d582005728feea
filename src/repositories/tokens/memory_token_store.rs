use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::{Duration, Instant};

use async_trait::async_trait;
use uuid::Uuid;

use super::refresh_token_store::{INVALID_REFRESH_TOKEN, RefreshTokenStore};
use crate::errors::{AppError, AppResult};

/// 프로세스 내부 리프레시 토큰 저장소
///
/// Redis 저장소와 같은 의미를 가지며 만료는 접근 시점에 판정합니다.
/// 로컬 실행과 테스트에서 사용합니다.
#[derive(Default)]
pub struct InMemoryTokenStore {
    records: Mutex<HashMap<(Uuid, Uuid), Instant>>,
}

impl InMemoryTokenStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// 아직 만료되지 않은 사용자 기록 수
    pub fn live_count(&self, uid: Uuid) -> usize {
        let now = Instant::now();
        self.records()
            .iter()
            .filter(|((owner, _), expires_at)| *owner == uid && **expires_at > now)
            .count()
    }

    /// 기록이 살아 있는지 확인합니다.
    pub fn contains(&self, uid: Uuid, token_id: Uuid) -> bool {
        self.records()
            .get(&(uid, token_id))
            .is_some_and(|expires_at| *expires_at > Instant::now())
    }

    fn records(&self) -> MutexGuard<'_, HashMap<(Uuid, Uuid), Instant>> {
        self.records.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[async_trait]
impl RefreshTokenStore for InMemoryTokenStore {
    async fn set_refresh_token(
        &self,
        uid: Uuid,
        token_id: Uuid,
        expires_in: Duration,
    ) -> AppResult<()> {
        let now = Instant::now();
        let Some(deadline) = now.checked_add(expires_in) else {
            log::error!(
                "Refresh token lifetime out of range - uid: {}, expires_in: {:?}",
                uid,
                expires_in
            );
            return Err(AppError::Internal);
        };

        let mut records = self.records();
        records.retain(|_, expires_at| *expires_at > now);
        records.insert((uid, token_id), deadline);
        Ok(())
    }

    async fn delete_refresh_token(&self, uid: Uuid, token_id: Uuid) -> AppResult<()> {
        match self.records().remove(&(uid, token_id)) {
            Some(expires_at) if expires_at > Instant::now() => Ok(()),
            _ => {
                log::warn!(
                    "Refresh token to delete does not exist - uid: {}, token_id: {}",
                    uid,
                    token_id
                );
                Err(AppError::authorization(INVALID_REFRESH_TOKEN))
            }
        }
    }

    async fn delete_user_refresh_tokens(&self, uid: Uuid) -> AppResult<()> {
        self.records().retain(|(owner, _), _| *owner != uid);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[actix_web::test]
    async fn test_set_then_delete_once() {
        let store = InMemoryTokenStore::new();
        let uid = Uuid::new_v4();
        let token_id = Uuid::new_v4();

        store
            .set_refresh_token(uid, token_id, Duration::from_secs(60))
            .await
            .unwrap();
        assert!(store.contains(uid, token_id));

        store.delete_refresh_token(uid, token_id).await.unwrap();
        let second = store.delete_refresh_token(uid, token_id).await;

        assert_eq!(
            second,
            Err(AppError::authorization("Invalid refresh token"))
        );
    }

    #[actix_web::test]
    async fn test_expired_record_is_gone() {
        let store = InMemoryTokenStore::new();
        let uid = Uuid::new_v4();
        let token_id = Uuid::new_v4();

        store
            .set_refresh_token(uid, token_id, Duration::ZERO)
            .await
            .unwrap();

        assert!(!store.contains(uid, token_id));
        assert!(store.delete_refresh_token(uid, token_id).await.is_err());
    }

    #[actix_web::test]
    async fn test_delete_all_only_touches_one_user() {
        let store = InMemoryTokenStore::new();
        let alice = Uuid::new_v4();
        let bob = Uuid::new_v4();
        let ttl = Duration::from_secs(60);

        store.set_refresh_token(alice, Uuid::new_v4(), ttl).await.unwrap();
        store.set_refresh_token(alice, Uuid::new_v4(), ttl).await.unwrap();
        store.set_refresh_token(bob, Uuid::new_v4(), ttl).await.unwrap();

        store.delete_user_refresh_tokens(alice).await.unwrap();

        assert_eq!(store.live_count(alice), 0);
        assert_eq!(store.live_count(bob), 1);
    }

    #[actix_web::test]
    async fn test_unrepresentable_lifetime_is_internal() {
        let store = InMemoryTokenStore::new();
        let uid = Uuid::new_v4();
        let token_id = Uuid::new_v4();

        let result = store.set_refresh_token(uid, token_id, Duration::MAX).await;

        assert_eq!(result, Err(AppError::Internal));
        assert!(!store.contains(uid, token_id));
    }
}
