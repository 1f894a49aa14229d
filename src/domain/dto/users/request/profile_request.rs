use serde::Deserialize;
use validator::Validate;

/// 비밀번호 변경 요청 (`PUT /profile/password`)
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ChangePasswordRequest {
    #[serde(default)]
    #[validate(length(min = 1, message = "현재 비밀번호와 새 비밀번호가 필요합니다"))]
    pub current_password: String,

    #[serde(default)]
    #[validate(length(min = 1, message = "현재 비밀번호와 새 비밀번호가 필요합니다"))]
    pub new_password: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_change_password_reads_camel_case() {
        let request: ChangePasswordRequest =
            serde_json::from_str(r#"{"currentPassword": "Old123", "newPassword": "New123"}"#).unwrap();

        assert_eq!(request.current_password, "Old123");
        assert!(request.validate().is_ok());
    }
}
