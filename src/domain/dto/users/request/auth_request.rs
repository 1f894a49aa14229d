//! 인증 관련 요청 DTO
//!
//! 누락된 필드는 `#[serde(default)]`로 빈 문자열이 되고,
//! 이후 `validate()` 단계에서 400 응답으로 바뀝니다.

use serde::Deserialize;
use validator::Validate;

#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    #[serde(default)]
    #[validate(length(min = 1, message = "이메일과 비밀번호를 모두 입력해주세요"))]
    pub email: String,

    #[serde(default)]
    #[validate(length(min = 1, message = "이메일과 비밀번호를 모두 입력해주세요"))]
    pub password: String,
}

#[derive(Debug, Deserialize, Validate)]
pub struct GoogleLoginRequest {
    #[serde(default)]
    #[validate(length(min = 1, message = "Google ID 토큰이 필요합니다"))]
    pub token: String,
}

#[derive(Debug, Deserialize, Validate)]
pub struct ForgotPasswordRequest {
    #[serde(default)]
    #[validate(length(min = 1, message = "이메일을 입력해주세요"))]
    pub email: String,
}

#[derive(Debug, Deserialize, Validate)]
pub struct VerifyResetTokenRequest {
    #[serde(default)]
    #[validate(length(min = 1, message = "재설정 토큰이 필요합니다"))]
    pub token: String,
}

#[derive(Debug, Deserialize, Validate)]
pub struct ResetPasswordRequest {
    #[serde(default)]
    #[validate(length(min = 1, message = "재설정 토큰과 새 비밀번호가 필요합니다"))]
    pub token: String,

    #[serde(default)]
    #[validate(length(min = 1, message = "재설정 토큰과 새 비밀번호가 필요합니다"))]
    pub password: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_login_fields_fail_validation() {
        let request: LoginRequest = serde_json::from_str(r#"{"email": "ana@example.com"}"#).unwrap();
        assert!(request.validate().is_err());

        let request: LoginRequest =
            serde_json::from_str(r#"{"email": "ana@example.com", "password": "x"}"#).unwrap();
        assert!(request.validate().is_ok());
    }

    #[test]
    fn test_reset_password_requires_both_fields() {
        let request: ResetPasswordRequest = serde_json::from_str(r#"{"token": "abc"}"#).unwrap();
        assert!(request.validate().is_err());
    }
}
