//! # Authentication Configuration Module
//!
//! JWT 세션 토큰과 Google 로그인 관련 설정을 관리하는 모듈입니다.
//!
//! ## 환경 변수
//!
//! ```bash
//! export JWT_SECRET="your-super-secret-jwt-key"
//! export JWT_EXPIRATION_DAYS="30"
//!
//! export GOOGLE_CLIENT_ID="123456789-abc.apps.googleusercontent.com"
//! export GOOGLE_TOKENINFO_URI="https://oauth2.googleapis.com/tokeninfo"
//! ```

use std::env;

/// Google Sign-In 설정
///
/// 클라이언트가 전달한 ID 토큰의 `aud` 값은 반드시 `client_id()`와 일치해야 합니다.
pub struct GoogleOAuthConfig;

impl GoogleOAuthConfig {
    /// Google OAuth Client ID.
    ///
    /// 설정되지 않은 경우 `None`이며, 이때 Google 로그인은 500으로 거부됩니다.
    pub fn client_id() -> Option<String> {
        env::var("GOOGLE_CLIENT_ID").ok().filter(|id| !id.trim().is_empty())
    }

    /// ID 토큰 검증 엔드포인트
    pub fn tokeninfo_uri() -> String {
        env::var("GOOGLE_TOKENINFO_URI")
            .unwrap_or_else(|_| "https://oauth2.googleapis.com/tokeninfo".to_string())
    }
}

/// JWT 설정
///
/// HS256 대칭키 서명을 사용합니다. 서명 키는 `JWT_SECRET`에서 읽습니다.
///
/// ```bash
/// # 안전한 키 생성
/// openssl rand -base64 32
/// ```
pub struct JwtConfig;

impl JwtConfig {
    pub fn secret() -> String {
        env::var("JWT_SECRET").unwrap_or_else(|_| {
            log::warn!("JWT_SECRET not set, using default (not secure for production!)");
            "your-secret-key".to_string()
        })
    }

    /// 세션 토큰 유효 기간 (일). 기본값: 30일
    pub fn expiration_days() -> i64 {
        env::var("JWT_EXPIRATION_DAYS")
            .unwrap_or_else(|_| "30".to_string())
            .parse()
            .unwrap_or(30)
    }
}

/// 계정이 생성된 인증 경로
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AuthProvider {
    /// 이메일/비밀번호 가입
    Local,
    /// Google Sign-In
    Google,
}

impl AuthProvider {
    pub fn from_str(s: &str) -> Result<Self, String> {
        match s.to_lowercase().as_str() {
            "local" => Ok(AuthProvider::Local),
            "google" => Ok(AuthProvider::Google),
            _ => Err(format!("Unsupported auth provider: {}", s)),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            AuthProvider::Local => "local",
            AuthProvider::Google => "google",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_auth_provider_from_string() {
        assert_eq!(AuthProvider::from_str("local").unwrap(), AuthProvider::Local);
        assert_eq!(AuthProvider::from_str("GOOGLE").unwrap(), AuthProvider::Google);
        assert!(AuthProvider::from_str("twitter").is_err());
    }

    #[test]
    fn test_auth_provider_serializes_lowercase() {
        let json = serde_json::to_string(&AuthProvider::Google).unwrap();
        assert_eq!(json, "\"google\"");

        let parsed: AuthProvider = serde_json::from_str("\"local\"").unwrap();
        assert_eq!(parsed, AuthProvider::Local);
    }

    #[test]
    fn test_jwt_expiration_default() {
        if env::var("JWT_EXPIRATION_DAYS").is_err() {
            assert_eq!(JwtConfig::expiration_days(), 30);
        }
    }
}
