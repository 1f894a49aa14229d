//! 세션 JWT 관리 서비스
//!
//! HS256 대칭키 서명 토큰을 발급하고 검증합니다.
//! 토큰에는 사용자 ID만 담기며 기본 유효 기간은 30일입니다.

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};

use crate::config::JwtConfig;
use crate::domain::models::token::SessionClaims;
use crate::errors::{AppError, AppResult};

pub const MSG_MISSING_TOKEN: &str = "인증 토큰이 없습니다";
pub const MSG_MALFORMED_HEADER: &str = "유효하지 않은 인증 헤더 형식입니다";
pub const MSG_EXPIRED_TOKEN: &str = "토큰이 만료되었습니다";
pub const MSG_INVALID_TOKEN: &str = "유효하지 않은 토큰입니다";

/// JWT 토큰 관리 서비스
#[derive(Clone)]
pub struct TokenService {
    secret: String,
    ttl_days: i64,
}

impl TokenService {
    pub fn new(secret: impl Into<String>, ttl_days: i64) -> Self {
        Self {
            secret: secret.into(),
            ttl_days,
        }
    }

    /// `JWT_SECRET`, `JWT_EXPIRATION_DAYS`
    pub fn from_env() -> Self {
        Self::new(JwtConfig::secret(), JwtConfig::expiration_days())
    }

    /// 사용자 ID로 세션 토큰을 발급합니다.
    ///
    /// # Errors
    ///
    /// * `AppError::InternalError` - 서명 실패
    pub fn issue(&self, user_id: &str) -> AppResult<String> {
        self.issue_at(user_id, Utc::now())
    }

    pub(crate) fn issue_at(&self, user_id: &str, now: DateTime<Utc>) -> AppResult<String> {
        let expiration = now + Duration::days(self.ttl_days);

        let claims = SessionClaims {
            sub: user_id.to_string(),
            user_id: user_id.to_string(),
            iat: now.timestamp(),
            exp: expiration.timestamp(),
        };

        let encoding_key = EncodingKey::from_secret(self.secret.as_bytes());

        encode(&Header::new(Algorithm::HS256), &claims, &encoding_key)
            .map_err(|e| AppError::InternalError(format!("JWT 토큰 생성 실패: {}", e)))
    }

    /// 토큰을 검증하고 사용자 ID를 돌려줍니다.
    ///
    /// # Errors
    ///
    /// * `AppError::AuthenticationError` - 만료(전용 메시지) 또는 서명/형식 오류
    pub fn verify(&self, token: &str) -> AppResult<String> {
        let decoding_key = DecodingKey::from_secret(self.secret.as_bytes());
        let validation = Validation::new(Algorithm::HS256);

        decode::<SessionClaims>(token, &decoding_key, &validation)
            .map(|token_data| token_data.claims.sub)
            .map_err(|e| match e.kind() {
                ErrorKind::ExpiredSignature => {
                    AppError::AuthenticationError(MSG_EXPIRED_TOKEN.to_string())
                }
                _ => {
                    log::debug!("토큰 검증 실패: {}", e);
                    AppError::AuthenticationError(MSG_INVALID_TOKEN.to_string())
                }
            })
    }

    /// `Authorization` 헤더에서 Bearer 토큰 부분을 꺼냅니다.
    ///
    /// 헤더가 없을 때와 형식이 틀렸을 때의 메시지가 다릅니다.
    pub fn extract_bearer_token(auth_header: Option<&str>) -> AppResult<&str> {
        let header = auth_header
            .ok_or_else(|| AppError::AuthenticationError(MSG_MISSING_TOKEN.to_string()))?;

        match header.strip_prefix("Bearer ") {
            Some(token) if !token.trim().is_empty() => Ok(token.trim()),
            _ => Err(AppError::AuthenticationError(MSG_MALFORMED_HEADER.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn service() -> TokenService {
        TokenService::new("test-secret", 30)
    }

    #[test]
    fn test_issue_and_verify_round_trip() {
        let token = service().issue("65f0c0ffee0000000000abcd").unwrap();
        assert_eq!(service().verify(&token).unwrap(), "65f0c0ffee0000000000abcd");
    }

    #[test]
    fn test_claims_carry_user_id_and_thirty_day_expiry() {
        let now = Utc::now();
        let token = service().issue_at("abc", now).unwrap();

        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = false;
        let claims = decode::<SessionClaims>(
            &token,
            &DecodingKey::from_secret(b"test-secret"),
            &validation,
        )
        .unwrap()
        .claims;

        assert_eq!(claims.user_id, "abc");
        assert_eq!(claims.exp - claims.iat, 30 * 24 * 60 * 60);
    }

    #[test]
    fn test_expired_and_invalid_tokens_have_distinct_messages() {
        let expired = service()
            .issue_at("abc", Utc::now() - Duration::days(31))
            .unwrap();
        assert_eq!(
            service().verify(&expired),
            Err(AppError::AuthenticationError(MSG_EXPIRED_TOKEN.to_string()))
        );

        let foreign = TokenService::new("other-secret", 30).issue("abc").unwrap();
        assert_eq!(
            service().verify(&foreign),
            Err(AppError::AuthenticationError(MSG_INVALID_TOKEN.to_string()))
        );
        assert_eq!(
            service().verify("garbage"),
            Err(AppError::AuthenticationError(MSG_INVALID_TOKEN.to_string()))
        );
    }

    #[test]
    fn test_extract_bearer_token() {
        assert_eq!(TokenService::extract_bearer_token(Some("Bearer abc.def")), Ok("abc.def"));
        assert_eq!(
            TokenService::extract_bearer_token(None),
            Err(AppError::AuthenticationError(MSG_MISSING_TOKEN.to_string()))
        );
        assert_eq!(
            TokenService::extract_bearer_token(Some("Token abc")),
            Err(AppError::AuthenticationError(MSG_MALFORMED_HEADER.to_string()))
        );
        assert_eq!(
            TokenService::extract_bearer_token(Some("Bearer ")),
            Err(AppError::AuthenticationError(MSG_MALFORMED_HEADER.to_string()))
        );
    }
}
