//! User Entity Implementation
//!
//! 사용자 엔티티와 프로필 부분 수정(patch) 모델입니다.
//! 이메일 가입과 Google 로그인 계정을 하나의 모델로 표현합니다.

use mongodb::bson::{doc, oid::ObjectId, DateTime, Document};
use serde::{Deserialize, Serialize};

use crate::config::AuthProvider;

/// 성별
///
/// 저장 시에는 항상 소문자(`prefer_not_to_say` 포함)로 정규화합니다.
/// 입력값은 대소문자를 구분하지 않고 해석합니다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Gender {
    Male,
    Female,
    Other,
    PreferNotToSay,
}

impl Gender {
    pub const ALLOWED: [&'static str; 4] = ["male", "female", "other", "prefer_not_to_say"];

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "male" => Some(Gender::Male),
            "female" => Some(Gender::Female),
            "other" => Some(Gender::Other),
            "prefer_not_to_say" => Some(Gender::PreferNotToSay),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Gender::Male => "male",
            Gender::Female => "female",
            Gender::Other => "other",
            Gender::PreferNotToSay => "prefer_not_to_say",
        }
    }
}

/// 사용자 엔티티
///
/// `users` 컬렉션의 문서 구조입니다. 선택 필드는 값이 없으면 문서에서 아예 빠지며,
/// 덕분에 `username` sparse unique 인덱스가 미설정 사용자들끼리 충돌하지 않습니다.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub full_name: String,
    /// 소문자로 정규화된 이메일 (unique)
    pub email: String,
    /// bcrypt 해시 (Google 계정은 None)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password_hash: Option<String>,
    pub auth_provider: AuthProvider,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gender: Option<Gender>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone_number: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile_picture: Option<String>,
    pub created_at: DateTime,
    pub updated_at: DateTime,
}

impl User {
    /// 이메일/비밀번호 가입 사용자
    pub fn new_local(full_name: String, email: &str, password_hash: String) -> Self {
        let now = DateTime::now();

        Self {
            id: None,
            full_name,
            email: email.to_lowercase(),
            password_hash: Some(password_hash),
            auth_provider: AuthProvider::Local,
            username: None,
            gender: None,
            address: None,
            phone_number: None,
            profile_picture: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Google Sign-In 으로 처음 들어온 사용자
    pub fn new_google(full_name: String, email: &str, picture: Option<String>) -> Self {
        let now = DateTime::now();

        Self {
            id: None,
            full_name,
            email: email.to_lowercase(),
            password_hash: None,
            auth_provider: AuthProvider::Google,
            username: None,
            gender: None,
            address: None,
            phone_number: None,
            profile_picture: picture,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn id_string(&self) -> Option<String> {
        self.id.as_ref().map(|id| id.to_hex())
    }

    pub fn has_password(&self) -> bool {
        self.password_hash.is_some()
    }
}

/// 프로필 부분 수정 내용
///
/// 바깥 `Option`은 "요청에 포함되었는가", 안쪽 `Option`은 "값을 지우는가"를 뜻합니다.
/// 필수 필드(`full_name`, `email`)는 지울 수 없으므로 한 겹입니다.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProfileChanges {
    pub full_name: Option<String>,
    pub email: Option<String>,
    pub username: Option<Option<String>>,
    pub profile_picture: Option<Option<String>>,
    pub gender: Option<Option<Gender>>,
    pub address: Option<Option<String>>,
    pub phone_number: Option<Option<String>>,
}

impl ProfileChanges {
    pub fn is_empty(&self) -> bool {
        self.changed_fields().is_empty()
    }

    /// 요청에 포함된 필드의 API 이름 목록
    pub fn changed_fields(&self) -> Vec<&'static str> {
        let mut fields = Vec::new();
        if self.full_name.is_some() {
            fields.push("fullName");
        }
        if self.email.is_some() {
            fields.push("email");
        }
        if self.username.is_some() {
            fields.push("username");
        }
        if self.profile_picture.is_some() {
            fields.push("profilePicture");
        }
        if self.gender.is_some() {
            fields.push("gender");
        }
        if self.address.is_some() {
            fields.push("address");
        }
        if self.phone_number.is_some() {
            fields.push("phoneNumber");
        }
        fields
    }

    /// 엔티티에 직접 반영합니다. `updated_at`도 함께 갱신됩니다.
    pub fn apply_to(&self, user: &mut User, now: DateTime) {
        if let Some(full_name) = &self.full_name {
            user.full_name = full_name.clone();
        }
        if let Some(email) = &self.email {
            user.email = email.clone();
        }
        if let Some(username) = &self.username {
            user.username = username.clone();
        }
        if let Some(picture) = &self.profile_picture {
            user.profile_picture = picture.clone();
        }
        if let Some(gender) = &self.gender {
            user.gender = *gender;
        }
        if let Some(address) = &self.address {
            user.address = address.clone();
        }
        if let Some(phone) = &self.phone_number {
            user.phone_number = phone.clone();
        }
        user.updated_at = now;
    }

    /// MongoDB `$set` / `$unset` 업데이트 문서
    pub fn to_update_document(&self, now: DateTime) -> Document {
        let mut set = doc! { "updated_at": now };
        let mut unset = Document::new();

        if let Some(full_name) = &self.full_name {
            set.insert("full_name", full_name.as_str());
        }
        if let Some(email) = &self.email {
            set.insert("email", email.as_str());
        }

        let optional_text = [
            ("username", &self.username),
            ("profile_picture", &self.profile_picture),
            ("address", &self.address),
            ("phone_number", &self.phone_number),
        ];
        for (key, change) in optional_text {
            match change {
                Some(Some(value)) => {
                    set.insert(key, value.as_str());
                }
                Some(None) => {
                    unset.insert(key, "");
                }
                None => {}
            }
        }

        match &self.gender {
            Some(Some(gender)) => {
                set.insert("gender", gender.as_str());
            }
            Some(None) => {
                unset.insert("gender", "");
            }
            None => {}
        }

        let mut update = doc! { "$set": set };
        if !unset.is_empty() {
            update.insert("$unset", unset);
        }
        update
    }
}
