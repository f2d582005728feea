//! # Redis 클라이언트
//!
//! 리프레시 토큰 화이트리스트가 사용하는 최소한의 Redis 명령 래퍼입니다.
//! 연결은 멀티플렉싱을 사용하여 단일 TCP 연결에서 여러 동시 요청을 처리합니다.

use log::info;
use redis::aio::ConnectionManager;
use redis::{AsyncCommands, Client, Cmd};

/// `SCAN` 한 번에 요청하는 키 개수 힌트
const SCAN_BATCH: usize = 100;

/// Redis 클라이언트 래퍼
///
/// 연결은 생성 시 한 번 맺은 [`ConnectionManager`] 를 복제해서 씁니다.
/// 복제본은 같은 멀티플렉싱 연결을 공유하며, 연결이 끊기면 자동으로 재연결합니다.
///
/// ## 사용 예제
///
/// ```rust,ignore
/// let redis = RedisClient::new("redis://localhost:6379").await?;
///
/// redis.set_with_expiry("uid:token-id", "0", 259_200).await?;
/// let removed = redis.del("uid:token-id").await?;
/// ```
#[derive(Clone)]
pub struct RedisClient {
    conn: ConnectionManager,
}

impl RedisClient {
    /// 새로운 Redis 클라이언트를 생성합니다.
    ///
    /// 생성 직후 `PING` 으로 서버 가용성을 확인합니다.
    ///
    /// # Errors
    ///
    /// * 잘못된 URL 또는 서버 연결 실패 시 `RedisError`
    pub async fn new(redis_url: &str) -> Result<Self, redis::RedisError> {
        let client = Client::open(redis_url)?;

        let mut conn = ConnectionManager::new(client).await?;
        redis::cmd("PING").query_async::<()>(&mut conn).await?;

        info!("✅ Redis 연결 성공");

        Ok(Self { conn })
    }

    /// 만료 시간(초)과 함께 값을 저장합니다. (`SET key value EX seconds`)
    pub async fn set_with_expiry(
        &self,
        key: &str,
        value: &str,
        seconds: u64,
    ) -> Result<(), redis::RedisError> {
        let mut conn = self.conn.clone();
        conn.set_ex(key, value, seconds).await
    }

    /// 키를 삭제하고 실제로 삭제된 키의 개수를 반환합니다.
    ///
    /// 키가 없었다면 `0` 입니다.
    pub async fn del(&self, key: &str) -> Result<i64, redis::RedisError> {
        let mut conn = self.conn.clone();
        conn.del(key).await
    }

    /// 패턴과 일치하는 키를 `SCAN` 으로 찾아 배치 단위로 삭제합니다.
    ///
    /// `KEYS` 와 달리 서버를 블로킹하지 않습니다. 삭제된 키 개수를 반환합니다.
    pub async fn delete_matching(&self, pattern: &str) -> Result<i64, redis::RedisError> {
        let mut conn = self.conn.clone();
        let mut cursor = 0u64;
        let mut removed = 0;

        loop {
            let (next, keys): (u64, Vec<String>) =
                scan_command(cursor, pattern).query_async(&mut conn).await?;

            if !keys.is_empty() {
                let n: i64 = conn.del(&keys).await?;
                removed += n;
            }

            if next == 0 {
                return Ok(removed);
            }
            cursor = next;
        }
    }
}

/// `SCAN cursor MATCH pattern COUNT n`
fn scan_command(cursor: u64, pattern: &str) -> Cmd {
    let mut cmd = redis::cmd("SCAN");
    cmd.arg(cursor)
        .arg("MATCH")
        .arg(pattern)
        .arg("COUNT")
        .arg(SCAN_BATCH);
    cmd
}
