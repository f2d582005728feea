//! # Token Key Material
//!
//! 액세스 토큰(RS256)용 RSA 키 쌍과 리프레시 토큰(HS256)용 비밀키, 두 TTL 을 담는
//! [`TokenConfig`] 를 제공합니다. 값은 시작 시 한 번 로드되고 이후 읽기 전용입니다.
//!
//! ## 키 파일
//!
//! ```bash
//! # 개인키 생성 (PKCS#1)
//! openssl genrsa -traditional -out rsa_private.pem 2048
//! # 공개키 추출 (SPKI)
//! openssl rsa -in rsa_private.pem -pubout -out rsa_public.pem
//! ```
//!
//! 개발 환경에서는 키 파일이 없으면 자동으로 생성합니다.

use std::fs;
use std::path::Path;

use base64::{Engine as _, engine::general_purpose};
use jsonwebtoken::{DecodingKey, EncodingKey};
use rsa::pkcs1::{DecodeRsaPrivateKey, DecodeRsaPublicKey, EncodeRsaPrivateKey};
use rsa::pkcs8::{DecodePrivateKey, DecodePublicKey, EncodePublicKey, LineEnding};
use rsa::traits::PublicKeyParts;
use rsa::{RsaPrivateKey, RsaPublicKey};
use serde::Serialize;

use super::data_config::{Environment, env_or, env_parse_or};
use super::ConfigError;

const DEFAULT_KEY_ID: &str = "account-key-1";
const GENERATED_KEY_BITS: usize = 2048;
/// 토큰 TTL 상한 (1년)
pub const MAX_TOKEN_TTL_SECS: i64 = 365 * 24 * 60 * 60;

/// JWKS 문서에 실리는 공개키 하나
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Jwk {
    pub kty: &'static str,
    #[serde(rename = "use")]
    pub key_use: &'static str,
    pub alg: &'static str,
    pub kid: String,
    pub n: String,
    pub e: String,
}

/// 액세스 토큰 서명/검증용 RSA 키 쌍
#[derive(Clone)]
pub struct AccessKeys {
    encoding: EncodingKey,
    decoding: DecodingKey,
    jwk: Jwk,
}

impl AccessKeys {
    /// PEM 문자열에서 키 쌍을 만듭니다.
    ///
    /// 개인키는 PKCS#1 / PKCS#8, 공개키는 SPKI / PKCS#1 형식을 받습니다.
    /// 두 키가 서로 짝이 맞지 않으면 실패합니다.
    ///
    /// # Errors
    ///
    /// * `ConfigError::Key` - PEM 파싱 실패 또는 키 쌍 불일치
    pub fn from_pem(private_pem: &str, public_pem: &str, kid: &str) -> Result<Self, ConfigError> {
        let private_key = RsaPrivateKey::from_pkcs1_pem(private_pem)
            .or_else(|_| RsaPrivateKey::from_pkcs8_pem(private_pem))
            .map_err(|e| ConfigError::Key(format!("invalid RSA private key: {}", e)))?;
        let public_key = RsaPublicKey::from_public_key_pem(public_pem)
            .or_else(|_| RsaPublicKey::from_pkcs1_pem(public_pem))
            .map_err(|e| ConfigError::Key(format!("invalid RSA public key: {}", e)))?;

        if private_key.to_public_key() != public_key {
            return Err(ConfigError::Key(
                "RSA public key does not match the private key".to_string(),
            ));
        }

        let encoding = EncodingKey::from_rsa_pem(private_pem.as_bytes())
            .map_err(|e| ConfigError::Key(format!("unusable RSA private key: {}", e)))?;
        let decoding = DecodingKey::from_rsa_pem(public_pem.as_bytes())
            .map_err(|e| ConfigError::Key(format!("unusable RSA public key: {}", e)))?;

        let jwk = Jwk {
            kty: "RSA",
            key_use: "sig",
            alg: "RS256",
            kid: kid.to_string(),
            n: general_purpose::URL_SAFE_NO_PAD.encode(public_key.n().to_bytes_be()),
            e: general_purpose::URL_SAFE_NO_PAD.encode(public_key.e().to_bytes_be()),
        };

        Ok(Self {
            encoding,
            decoding,
            jwk,
        })
    }

    /// 파일에서 키 쌍을 로드합니다.
    ///
    /// 둘 중 하나라도 없고 `generate_if_missing` 이면 새 키 쌍을 만들어 저장한 뒤 로드합니다.
    pub fn load(
        private_key_path: &str,
        public_key_path: &str,
        kid: &str,
        generate_if_missing: bool,
    ) -> Result<Self, ConfigError> {
        let missing =
            !Path::new(private_key_path).exists() || !Path::new(public_key_path).exists();

        if missing {
            if !generate_if_missing {
                return Err(ConfigError::Key(format!(
                    "RSA key files not found: {} / {}",
                    private_key_path, public_key_path
                )));
            }

            log::info!("🔑 RSA keys not found. Generating new key pair...");
            generate_rsa_keys(private_key_path, public_key_path)?;
            log::info!("✅ RSA keys generated successfully");
        } else {
            log::info!("🔑 Loading existing RSA keys");
        }

        let private_pem = fs::read_to_string(private_key_path).map_err(|e| {
            ConfigError::Key(format!("failed to read private key '{}': {}", private_key_path, e))
        })?;
        let public_pem = fs::read_to_string(public_key_path).map_err(|e| {
            ConfigError::Key(format!("failed to read public key '{}': {}", public_key_path, e))
        })?;

        Self::from_pem(&private_pem, &public_pem, kid)
    }

    pub fn encoding_key(&self) -> &EncodingKey {
        &self.encoding
    }

    pub fn decoding_key(&self) -> &DecodingKey {
        &self.decoding
    }

    pub fn key_id(&self) -> &str {
        &self.jwk.kid
    }

    /// JWKS(JSON Web Key Set) 문서
    ///
    /// 다른 서비스가 액세스 토큰을 직접 검증할 수 있도록 공개키를 노출합니다.
    pub fn jwks(&self) -> serde_json::Value {
        serde_json::json!({ "keys": [self.jwk] })
    }
}

/// 토큰 발급/검증에 필요한 키와 TTL
///
/// `TokenService` 생성자에 참조로 전달됩니다. 런타임 키 교체는 지원하지 않습니다.
#[derive(Clone)]
pub struct TokenConfig {
    pub access_keys: AccessKeys,
    /// 리프레시 토큰 HS256 비밀키
    pub refresh_secret: String,
    /// 액세스 토큰 TTL (초)
    pub access_token_ttl: i64,
    /// 리프레시 토큰 TTL (초)
    pub refresh_token_ttl: i64,
}

impl TokenConfig {
    /// 환경 변수에서 토큰 설정을 로드합니다.
    ///
    /// | 변수 | 기본값 |
    /// |------|--------|
    /// | `PRIVATE_KEY_FILE` | `./secrets/rsa_private.pem` |
    /// | `PUBLIC_KEY_FILE` | `./secrets/rsa_public.pem` |
    /// | `JWT_KEY_ID` | `account-key-1` |
    /// | `REFRESH_SECRET` | 개발 환경에서만 임시값 |
    /// | `ID_TOKEN_EXP` | `900` |
    /// | `REFRESH_TOKEN_EXP` | `259200` |
    ///
    /// # Errors
    ///
    /// * 키 파일이 없거나 잘못된 경우 (개발 환경은 자동 생성)
    /// * 개발 환경이 아닌데 `REFRESH_SECRET` 이 없는 경우
    pub fn from_env(environment: Environment) -> Result<Self, ConfigError> {
        let private_key_path = env_or("PRIVATE_KEY_FILE", "./secrets/rsa_private.pem");
        let public_key_path = env_or("PUBLIC_KEY_FILE", "./secrets/rsa_public.pem");
        let kid = env_or("JWT_KEY_ID", DEFAULT_KEY_ID);

        let access_keys = AccessKeys::load(
            &private_key_path,
            &public_key_path,
            &kid,
            environment.is_development(),
        )?;

        let refresh_secret = match std::env::var("REFRESH_SECRET") {
            Ok(secret) if !secret.is_empty() => secret,
            _ if environment.is_development() => {
                log::warn!("REFRESH_SECRET not set, using development default (not secure for production!)");
                "development-refresh-secret".to_string()
            }
            _ => return Err(ConfigError::Missing("REFRESH_SECRET")),
        };

        Ok(Self {
            access_keys,
            refresh_secret,
            access_token_ttl: checked_ttl("ID_TOKEN_EXP", env_parse_or("ID_TOKEN_EXP", 900))?,
            refresh_token_ttl: checked_ttl(
                "REFRESH_TOKEN_EXP",
                env_parse_or("REFRESH_TOKEN_EXP", 259_200),
            )?,
        })
    }
}

/// TTL 은 1초 이상 [`MAX_TOKEN_TTL_SECS`] 이하여야 합니다.
fn checked_ttl(key: &'static str, ttl: i64) -> Result<i64, ConfigError> {
    if (1..=MAX_TOKEN_TTL_SECS).contains(&ttl) {
        Ok(ttl)
    } else {
        Err(ConfigError::Invalid(
            key,
            format!("{} is outside 1..={} seconds", ttl, MAX_TOKEN_TTL_SECS),
        ))
    }
}

/// RSA 키 쌍을 생성해 파일로 저장합니다.
fn generate_rsa_keys(private_key_path: &str, public_key_path: &str) -> Result<(), ConfigError> {
    if let Some(parent) = Path::new(private_key_path).parent() {
        fs::create_dir_all(parent)?;
    }
    if let Some(parent) = Path::new(public_key_path).parent() {
        fs::create_dir_all(parent)?;
    }

    let private_key = RsaPrivateKey::new(&mut rand::rngs::OsRng, GENERATED_KEY_BITS)
        .map_err(|e| ConfigError::Key(format!("RSA key generation failed: {}", e)))?;
    let public_key = private_key.to_public_key();

    // 개인키 PKCS#1, 공개키 SPKI
    let private_key_pem = private_key
        .to_pkcs1_pem(LineEnding::LF)
        .map_err(|e| ConfigError::Key(e.to_string()))?;
    fs::write(private_key_path, private_key_pem.as_bytes())?;

    let public_key_pem = public_key
        .to_public_key_pem(LineEnding::LF)
        .map_err(|e| ConfigError::Key(e.to_string()))?;
    fs::write(public_key_path, public_key_pem.as_bytes())?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        fs::set_permissions(private_key_path, fs::Permissions::from_mode(0o600))?;
        fs::set_permissions(public_key_path, fs::Permissions::from_mode(0o644))?;
    }

    log::info!("📁 Private key saved: {}", private_key_path);
    log::info!("📁 Public key saved: {}", public_key_path);

    Ok(())
}
