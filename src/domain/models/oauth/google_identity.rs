//! Google ID 토큰 검증 모델

use serde::Deserialize;
use serde_json::Value;

/// `tokeninfo` 엔드포인트 응답
///
/// Google 은 `email_verified` 를 문자열 `"true"` 로 내려주기도 하고
/// 불리언으로 내려주기도 해서 `Value` 로 받습니다.
#[derive(Debug, Clone, Deserialize)]
pub struct GoogleTokenInfo {
    #[serde(default)]
    pub iss: String,
    #[serde(default)]
    pub aud: String,
    #[serde(default)]
    pub sub: String,
    pub email: Option<String>,
    #[serde(default)]
    pub email_verified: Value,
    pub name: Option<String>,
    pub picture: Option<String>,
}

impl GoogleTokenInfo {
    pub fn is_email_verified(&self) -> bool {
        match &self.email_verified {
            Value::Bool(flag) => *flag,
            Value::String(flag) => flag.eq_ignore_ascii_case("true"),
            _ => false,
        }
    }
}

/// 검증을 통과한 Google 사용자
#[derive(Debug, Clone, PartialEq)]
pub struct GoogleIdentity {
    pub subject: String,
    pub email: String,
    pub name: String,
    pub picture: Option<String>,
}
