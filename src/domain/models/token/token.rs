//! JWT 클레임 구조체와 토큰 쌍
//!
//! 액세스 토큰(RS256)은 사용자 스냅샷 전체를, 리프레시 토큰(HS256)은
//! 사용자 ID와 토큰 ID(`jti`)만 담습니다.

use std::time::Duration;

use serde::{Deserialize, Serialize, Serializer};
use uuid::Uuid;

use crate::domain::entities::users::user::User;

/// 액세스 토큰 클레임
///
/// - `user`: 발급 시점의 사용자 스냅샷 (비밀번호 제외)
/// - `iat`: 발급 시간 (Unix timestamp)
/// - `exp`: 만료 시간 (Unix timestamp)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessTokenClaims {
    pub user: User,
    pub iat: i64,
    pub exp: i64,
}

/// 리프레시 토큰 클레임
///
/// `jti` 는 표준 JWT ID 클레임이며 UUID v4 문자열입니다.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RefreshTokenClaims {
    pub uid: Uuid,
    pub iat: i64,
    pub exp: i64,
    pub jti: String,
}

/// 새로 서명된 리프레시 토큰과 저장소 등록에 필요한 값
///
/// 토큰 ID를 서명 문자열에서 다시 파싱하지 않고 바로 저장소에 넣을 수 있도록 분리해 둡니다.
#[derive(Debug, Clone)]
pub struct RefreshTokenData {
    pub signed: String,
    pub id: Uuid,
    pub expires_in: Duration,
}

/// 검증을 통과한 리프레시 토큰
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RefreshToken {
    pub signed: String,
    pub id: Uuid,
    pub uid: Uuid,
}

impl Serialize for RefreshToken {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.signed)
    }
}

/// 클라이언트에게 전달되는 토큰 쌍
///
/// ```json
/// { "idToken": "eyJ...", "refreshToken": "eyJ..." }
/// ```
#[derive(Debug, Clone, Serialize)]
pub struct TokenPair {
    #[serde(rename = "idToken")]
    pub id_token: String,
    #[serde(rename = "refreshToken")]
    pub refresh_token: RefreshToken,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_pair_wire_format() {
        let pair = TokenPair {
            id_token: "access.jwt.value".into(),
            refresh_token: RefreshToken {
                signed: "refresh.jwt.value".into(),
                id: Uuid::new_v4(),
                uid: Uuid::new_v4(),
            },
        };

        let json = serde_json::to_value(&pair).unwrap();

        assert_eq!(
            json,
            serde_json::json!({
                "idToken": "access.jwt.value",
                "refreshToken": "refresh.jwt.value",
            })
        );
    }
}
