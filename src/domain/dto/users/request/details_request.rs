//! 프로필 수정 요청 DTO
use serde::{Deserialize, Deserializer};
use validator::Validate;

/// 사용자 상세 정보 수정 요청
///
/// `website` 는 생략하거나 빈 문자열로 지울 수 있고, 값이 있으면 URL 이어야 합니다.
#[derive(Debug, Deserialize, Validate)]
pub struct DetailsRequest {
    #[serde(default)]
    #[validate(length(max = 50))]
    pub name: String,

    #[validate(email)]
    pub email: String,

    #[serde(default, deserialize_with = "empty_as_none")]
    #[validate(url)]
    pub website: Option<String>,
}

/// `""` 는 값이 없는 것으로 취급
fn empty_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<String>::deserialize(deserializer)?;
    Ok(value.filter(|s| !s.is_empty()))
}
