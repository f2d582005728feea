//! 사용자 엔티티
//!
//! `users` 테이블의 한 행이자 액세스 토큰에 실리는 사용자 스냅샷입니다.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// 사용자 엔티티
///
/// `password` 는 bcrypt 해시이며 어떤 직렬화 경로로도 밖으로 나가지 않습니다.
/// 따라서 토큰 클레임이나 API 응답에서 복원된 `User` 의 `password` 는 항상 비어 있습니다.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize, sqlx::FromRow)]
pub struct User {
    pub uid: Uuid,
    pub email: String,
    #[serde(skip)]
    pub password: String,
    pub name: String,
    pub image_url: String,
    pub website: String,
}

impl User {
    /// 비밀번호 해시를 제외한 사본
    pub fn without_password(&self) -> Self {
        Self {
            password: String::new(),
            ..self.clone()
        }
    }
}
