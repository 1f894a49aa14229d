use mongodb::bson::DateTime;
use serde::{Deserialize, Serialize};

use crate::config::AuthProvider;
use crate::domain::entities::users::{Gender, User};

/// 클라이언트에 노출되는 사용자 정보
///
/// 비밀번호 해시는 포함하지 않으며, 시각은 RFC 3339 문자열로 내보냅니다.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    pub id: String,
    pub full_name: String,
    pub email: String,
    pub username: Option<String>,
    pub gender: Option<Gender>,
    pub address: Option<String>,
    pub phone_number: Option<String>,
    pub profile_picture: Option<String>,
    pub auth_provider: AuthProvider,
    pub created_at: String,
    pub updated_at: String,
}

fn rfc3339(value: DateTime) -> String {
    value.try_to_rfc3339_string().unwrap_or_default()
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        let User {
            id,
            full_name,
            email,
            username,
            gender,
            address,
            phone_number,
            profile_picture,
            auth_provider,
            created_at,
            updated_at,
            ..
        } = user;

        Self {
            id: id.map(|id| id.to_hex()).unwrap_or_default(),
            full_name,
            email,
            username,
            gender,
            address,
            phone_number,
            profile_picture,
            auth_provider,
            created_at: rfc3339(created_at),
            updated_at: rfc3339(updated_at),
        }
    }
}

/// 가입/로그인 성공 응답
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthResponse {
    pub user: UserResponse,
    pub token: String,
}

impl AuthResponse {
    pub fn new(user: User, token: String) -> Self {
        Self {
            user: UserResponse::from(user),
            token,
        }
    }
}

/// 프로필 조회 응답
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileResponse {
    #[serde(flatten)]
    pub user: UserResponse,
    pub has_password: bool,
}

impl From<User> for ProfileResponse {
    fn from(user: User) -> Self {
        let has_password = user.has_password();
        Self {
            user: UserResponse::from(user),
            has_password,
        }
    }
}

/// 프로필 수정 응답
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileUpdateResponse {
    pub message: String,
    pub profile: ProfileResponse,
    pub updated_fields: Vec<String>,
}

/// 단순 안내 메시지 응답
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}
