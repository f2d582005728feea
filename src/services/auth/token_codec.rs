//! JWT 인코딩/검증 함수
//!
//! 상태 없는 순수 함수들입니다. 키와 TTL 은 모두 인자로 받습니다.
//!
//! | 토큰 | 알고리즘 | 클레임 |
//! |------|----------|--------|
//! | 액세스 | RS256 (RSA 개인키 서명, 공개키 검증) | `user`, `iat`, `exp` |
//! | 리프레시 | HS256 (공유 비밀키) | `uid`, `iat`, `exp`, `jti` |
//!
//! 만료 판정에는 유예 시간(leeway)을 두지 않으며 `exp <= now` 이면 만료된 토큰입니다.
//! 따라서 TTL 이 0 이하인 토큰은 발급 즉시 만료 상태입니다.

use std::time::Duration;

use chrono::Utc;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use rand::RngCore;
use thiserror::Error;
use uuid::Uuid;

use crate::domain::entities::users::user::User;
use crate::domain::models::token::{AccessTokenClaims, RefreshTokenClaims, RefreshTokenData};

/// 토큰 코덱 에러
#[derive(Error, Debug)]
pub enum TokenError {
    /// 서명 실패 (잘못된 키 등)
    #[error("failed to sign token: {0}")]
    Signing(#[source] jsonwebtoken::errors::Error),

    /// 토큰 ID 생성용 난수를 얻지 못함
    #[error("failed to generate token id: {0}")]
    IdGeneration(#[source] rand::Error),

    /// 서명 불일치, 만료, 형식 오류 등 검증 실패
    #[error("invalid token: {0}")]
    InvalidToken(String),

    /// `now + ttl` 을 표현할 수 없는 TTL
    #[error("token lifetime out of range: {0}s")]
    LifetimeOutOfRange(i64),
}

impl From<jsonwebtoken::errors::Error> for TokenError {
    fn from(e: jsonwebtoken::errors::Error) -> Self {
        TokenError::InvalidToken(e.to_string())
    }
}

/// 액세스 토큰을 생성합니다.
///
/// # Arguments
///
/// * `user` - 토큰에 실을 사용자 (비밀번호 해시는 포함되지 않음)
/// * `key` - RSA 개인키
/// * `key_id` - 헤더의 `kid`
/// * `ttl_secs` - 유효 기간 (초)
///
/// # Errors
///
/// * `TokenError::Signing` - 서명 실패
/// * `TokenError::LifetimeOutOfRange` - 만료 시각 계산 오버플로
pub fn generate_access_token(
    user: &User,
    key: &EncodingKey,
    key_id: &str,
    ttl_secs: i64,
) -> Result<String, TokenError> {
    let now = Utc::now().timestamp();
    let claims = AccessTokenClaims {
        user: user.without_password(),
        iat: now,
        exp: expires_at(now, ttl_secs)?,
    };

    let mut header = Header::new(Algorithm::RS256);
    header.kid = Some(key_id.to_string());

    encode(&header, &claims, key).map_err(TokenError::Signing)
}

/// 리프레시 토큰을 생성합니다.
///
/// 새 UUID v4 토큰 ID를 `jti` 에 넣고 HS256 으로 서명합니다.
/// 토큰 ID와 남은 수명은 서명 문자열과 별도로 돌려줍니다.
///
/// # Errors
///
/// * `TokenError::IdGeneration` - OS 난수원 사용 불가
/// * `TokenError::Signing` - 서명 실패
/// * `TokenError::LifetimeOutOfRange` - 만료 시각 계산 오버플로
pub fn generate_refresh_token(
    uid: uuid::Uuid,
    secret: &str,
    ttl_secs: i64,
) -> Result<RefreshTokenData, TokenError> {
    let now = Utc::now().timestamp();
    let exp = expires_at(now, ttl_secs)?;
    let token_id = new_token_id()?;

    let claims = RefreshTokenClaims {
        uid,
        iat: now,
        exp,
        jti: token_id.to_string(),
    };

    let signed = encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(TokenError::Signing)?;

    Ok(RefreshTokenData {
        signed,
        id: token_id,
        expires_in: Duration::from_secs(ttl_secs.max(0) as u64),
    })
}

/// 액세스 토큰을 검증하고 클레임을 반환합니다.
///
/// # Errors
///
/// * `TokenError::InvalidToken` - 서명 불일치, 만료, 형식 오류
pub fn validate_access_token(
    token: &str,
    key: &DecodingKey,
) -> Result<AccessTokenClaims, TokenError> {
    let claims = decode::<AccessTokenClaims>(token, key, &strict_validation(Algorithm::RS256))?
        .claims;

    ensure_not_expired(claims.exp)?;
    Ok(claims)
}

/// 리프레시 토큰을 검증하고 클레임을 반환합니다.
///
/// 서명과 만료 외에 `jti` 가 UUID 로 파싱되는지도 확인합니다.
///
/// # Errors
///
/// * `TokenError::InvalidToken` - 서명 불일치, 만료, 형식 오류, UUID 가 아닌 `jti`
pub fn validate_refresh_token(
    token: &str,
    secret: &str,
) -> Result<RefreshTokenClaims, TokenError> {
    let claims = decode::<RefreshTokenClaims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &strict_validation(Algorithm::HS256),
    )?
    .claims;

    ensure_not_expired(claims.exp)?;

    Uuid::parse_str(&claims.jti).map_err(|e| {
        TokenError::InvalidToken(format!("token id '{}' is not a UUID: {}", claims.jti, e))
    })?;

    Ok(claims)
}

fn expires_at(now: i64, ttl_secs: i64) -> Result<i64, TokenError> {
    now.checked_add(ttl_secs)
        .ok_or(TokenError::LifetimeOutOfRange(ttl_secs))
}

fn strict_validation(algorithm: Algorithm) -> Validation {
    let mut validation = Validation::new(algorithm);
    validation.leeway = 0;
    validation
}

// jsonwebtoken 은 exp == now 를 유효로 본다
fn ensure_not_expired(exp: i64) -> Result<(), TokenError> {
    if exp <= Utc::now().timestamp() {
        return Err(TokenError::InvalidToken("token has expired".to_string()));
    }
    Ok(())
}

fn new_token_id() -> Result<Uuid, TokenError> {
    let mut bytes = [0u8; 16];
    rand::rngs::OsRng
        .try_fill_bytes(&mut bytes)
        .map_err(TokenError::IdGeneration)?;

    Ok(uuid::Builder::from_random_bytes(bytes).into_uuid())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::token_config::test_support::{access_keys, other_access_keys};

    const SECRET: &str = "refresh-secret";

    fn sample_user() -> User {
        User {
            uid: Uuid::parse_str("11111111-1111-1111-1111-111111111111").unwrap(),
            email: "u@example.com".into(),
            password: "$2b$04$should-never-leave".into(),
            name: "User U".into(),
            image_url: "https://img.example.com/u.png".into(),
            website: "https://u.example.com".into(),
        }
    }

    #[test]
    fn test_access_token_round_trip() {
        let keys = access_keys();
        let user = sample_user();
        let before = Utc::now().timestamp();

        let token = generate_access_token(&user, keys.encoding_key(), keys.key_id(), 900).unwrap();
        let claims = validate_access_token(&token, keys.decoding_key()).unwrap();

        assert_eq!(claims.user, user.without_password());
        assert!(claims.user.password.is_empty());
        assert!((claims.exp - (before + 900)).abs() <= 5);
        assert!((claims.iat - before).abs() <= 5);

        let header = jsonwebtoken::decode_header(&token).unwrap();
        assert_eq!(header.alg, Algorithm::RS256);
        assert_eq!(header.kid.as_deref(), Some("test-key"));
    }

    #[test]
    fn test_access_token_payload_has_no_password() {
        let keys = access_keys();
        let token =
            generate_access_token(&sample_user(), keys.encoding_key(), keys.key_id(), 60).unwrap();

        let payload = token.split('.').nth(1).unwrap();
        let decoded = base64::Engine::decode(
            &base64::engine::general_purpose::URL_SAFE_NO_PAD,
            payload,
        )
        .unwrap();
        let text = String::from_utf8(decoded).unwrap();

        assert!(!text.contains("should-never-leave"));
        assert!(!text.contains("password"));
    }

    #[test]
    fn test_expired_access_token_is_rejected() {
        let keys = access_keys();

        for ttl in [0, -1, -3600] {
            let token =
                generate_access_token(&sample_user(), keys.encoding_key(), keys.key_id(), ttl)
                    .unwrap();
            let result = validate_access_token(&token, keys.decoding_key());
            assert!(matches!(result, Err(TokenError::InvalidToken(_))), "ttl {}", ttl);
        }
    }

    #[test]
    fn test_access_token_signed_with_other_key_is_rejected() {
        let keys = access_keys();
        let other = other_access_keys();

        let token =
            generate_access_token(&sample_user(), other.encoding_key(), other.key_id(), 900)
                .unwrap();
        let result = validate_access_token(&token, keys.decoding_key());

        assert!(matches!(result, Err(TokenError::InvalidToken(_))));
    }

    #[test]
    fn test_garbage_access_token_is_rejected() {
        let keys = access_keys();

        assert!(matches!(
            validate_access_token("not.a.jwt", keys.decoding_key()),
            Err(TokenError::InvalidToken(_))
        ));
    }

    #[test]
    fn test_refresh_token_is_not_an_access_token() {
        let keys = access_keys();
        let refresh = generate_refresh_token(Uuid::new_v4(), SECRET, 900).unwrap();

        assert!(validate_access_token(&refresh.signed, keys.decoding_key()).is_err());
    }

    #[test]
    fn test_refresh_token_round_trip() {
        let uid = Uuid::new_v4();

        let data = generate_refresh_token(uid, SECRET, 3600).unwrap();
        let claims = validate_refresh_token(&data.signed, SECRET).unwrap();

        assert_eq!(claims.uid, uid);
        assert_eq!(Uuid::parse_str(&claims.jti).unwrap(), data.id);
        assert_eq!(data.id.get_version_num(), 4);
        assert_eq!(data.expires_in, Duration::from_secs(3600));
    }

    #[test]
    fn test_refresh_token_ids_are_unique() {
        let uid = Uuid::new_v4();

        let first = generate_refresh_token(uid, SECRET, 3600).unwrap();
        let second = generate_refresh_token(uid, SECRET, 3600).unwrap();

        assert_ne!(first.id, second.id);
    }

    #[test]
    fn test_refresh_token_wrong_secret_is_rejected() {
        let data = generate_refresh_token(Uuid::new_v4(), SECRET, 3600).unwrap();

        assert!(matches!(
            validate_refresh_token(&data.signed, "another-secret"),
            Err(TokenError::InvalidToken(_))
        ));
    }

    #[test]
    fn test_expired_refresh_token_is_rejected() {
        let data = generate_refresh_token(Uuid::new_v4(), SECRET, 0).unwrap();

        assert_eq!(data.expires_in, Duration::ZERO);
        assert!(matches!(
            validate_refresh_token(&data.signed, SECRET),
            Err(TokenError::InvalidToken(_))
        ));
    }

    #[test]
    fn test_refresh_token_with_non_uuid_id_is_rejected() {
        let now = Utc::now().timestamp();
        let claims = RefreshTokenClaims {
            uid: Uuid::new_v4(),
            iat: now,
            exp: now + 3600,
            jti: "legacy-token-id".into(),
        };
        let forged = encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(SECRET.as_bytes()),
        )
        .unwrap();

        let result = validate_refresh_token(&forged, SECRET);

        match result {
            Err(TokenError::InvalidToken(reason)) => assert!(reason.contains("legacy-token-id")),
            other => panic!("expected InvalidToken, got {:?}", other),
        }
    }

    #[test]
    fn test_unrepresentable_ttl_is_an_error() {
        let keys = access_keys();

        for ttl in [i64::MAX, i64::MIN] {
            assert!(matches!(
                generate_access_token(&sample_user(), keys.encoding_key(), keys.key_id(), ttl),
                Err(TokenError::LifetimeOutOfRange(t)) if t == ttl
            ));
            assert!(matches!(
                generate_refresh_token(Uuid::new_v4(), SECRET, ttl),
                Err(TokenError::LifetimeOutOfRange(t)) if t == ttl
            ));
        }
    }
}
