//! 프로필 수정 검증 체인
//!
//! 각 검증기는 자기 필드 하나만 봅니다. 필드가 없으면 통과입니다.
//! 선택 필드(`username`, `gender`, `address`, `phoneNumber`, `profilePicture`)는
//! `null` 이나 빈 문자열이면 "값 지우기"로 해석합니다.
//!
//! 체인 실행 전에 [`screen_fields`]가 허용 목록 밖의 키와 빈 요청을 걸러냅니다.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;

use crate::config::UploadConfig;
use crate::domain::entities::users::{Gender, ProfileChanges};
use crate::errors::{AppError, AppResult};
use crate::repositories::UserStore;
use crate::validation::chain::{FieldMap, ValidationChain, Validator, Verdict};
use crate::validation::rules::{self, *};

pub const ALLOWED_FIELDS: [&str; 7] = [
    "fullName",
    "email",
    "username",
    "profilePicture",
    "gender",
    "address",
    "phoneNumber",
];

pub const MSG_NO_FIELDS: &str = "수정할 필드를 하나 이상 입력해주세요";

/// 프로필 수정 검증 컨텍스트
#[derive(Debug, Clone)]
pub struct ProfileContext {
    pub fields: FieldMap,
    /// 수정 대상(요청자) 사용자 ID
    pub user_id: String,
}

/// 허용 목록 검사
///
/// 허용되지 않은 키가 하나라도 있으면 그 키 이름들을 담아 거부하고,
/// 허용된 키가 하나도 없으면 빈 요청으로 거부합니다.
pub fn screen_fields(fields: &FieldMap) -> AppResult<()> {
    let mut rejected: Vec<&str> = fields
        .keys()
        .map(String::as_str)
        .filter(|key| !ALLOWED_FIELDS.contains(key))
        .collect();

    if !rejected.is_empty() {
        rejected.sort_unstable();
        return Err(AppError::ValidationError(format!(
            "허용되지 않은 필드입니다: {}",
            rejected.join(", ")
        )));
    }

    if fields.is_empty() {
        return Err(AppError::ValidationError(MSG_NO_FIELDS.to_string()));
    }

    Ok(())
}

enum FieldValue<'a> {
    Absent,
    /// `null` 또는 공백 문자열
    Clear,
    Text(&'a str),
    NotText,
}

fn field<'a>(fields: &'a FieldMap, key: &str) -> FieldValue<'a> {
    match fields.get(key) {
        None => FieldValue::Absent,
        Some(Value::Null) => FieldValue::Clear,
        Some(Value::String(text)) if text.trim().is_empty() => FieldValue::Clear,
        Some(Value::String(text)) => FieldValue::Text(text.trim()),
        Some(_) => FieldValue::NotText,
    }
}

fn not_text(key: &str) -> Verdict {
    Verdict::reject(format!("{} 값은 문자열이어야 합니다", key))
}

pub struct FullNameField;

#[async_trait]
impl Validator<ProfileContext> for FullNameField {
    fn name(&self) -> &'static str {
        "profile_full_name"
    }

    async fn check(&self, ctx: &ProfileContext) -> Verdict {
        match field(&ctx.fields, "fullName") {
            FieldValue::Absent => Verdict::Accepted,
            FieldValue::Text(name) if rules::is_valid_full_name(name) => Verdict::Accepted,
            FieldValue::NotText => not_text("fullName"),
            _ => Verdict::reject(MSG_NAME_TOO_SHORT),
        }
    }
}

/// 형식 검사 후, 다른 사용자가 쓰고 있는 이메일인지 확인
pub struct EmailField {
    users: Arc<dyn UserStore>,
}

impl EmailField {
    pub fn new(users: Arc<dyn UserStore>) -> Self {
        Self { users }
    }
}

#[async_trait]
impl Validator<ProfileContext> for EmailField {
    fn name(&self) -> &'static str {
        "profile_email"
    }

    async fn check(&self, ctx: &ProfileContext) -> Verdict {
        let email = match field(&ctx.fields, "email") {
            FieldValue::Absent => return Verdict::Accepted,
            FieldValue::NotText => return not_text("email"),
            FieldValue::Clear => return Verdict::reject(MSG_INVALID_EMAIL),
            FieldValue::Text(email) => email.to_lowercase(),
        };

        if !rules::is_valid_email(&email) {
            return Verdict::reject(MSG_INVALID_EMAIL);
        }

        match self.users.find_by_email(&email).await {
            Ok(Some(owner)) if owner.id_string().as_deref() != Some(ctx.user_id.as_str()) => {
                Verdict::reject(MSG_EMAIL_TAKEN)
            }
            Ok(_) => Verdict::Accepted,
            Err(error) => Verdict::Rejected(error),
        }
    }
}

/// 형식 검사 후, 다른 사용자가 쓰고 있는 사용자명인지 확인
pub struct UsernameField {
    users: Arc<dyn UserStore>,
}

impl UsernameField {
    pub fn new(users: Arc<dyn UserStore>) -> Self {
        Self { users }
    }
}

#[async_trait]
impl Validator<ProfileContext> for UsernameField {
    fn name(&self) -> &'static str {
        "profile_username"
    }

    async fn check(&self, ctx: &ProfileContext) -> Verdict {
        let username = match field(&ctx.fields, "username") {
            FieldValue::Absent | FieldValue::Clear => return Verdict::Accepted,
            FieldValue::NotText => return not_text("username"),
            FieldValue::Text(username) => username,
        };

        if !rules::is_valid_username(username) {
            return Verdict::reject(MSG_INVALID_USERNAME);
        }

        match self.users.find_by_username(username).await {
            Ok(Some(owner)) if owner.id_string().as_deref() != Some(ctx.user_id.as_str()) => {
                Verdict::reject(MSG_USERNAME_TAKEN)
            }
            Ok(_) => Verdict::Accepted,
            Err(error) => Verdict::Rejected(error),
        }
    }
}

pub struct GenderField;

#[async_trait]
impl Validator<ProfileContext> for GenderField {
    fn name(&self) -> &'static str {
        "profile_gender"
    }

    async fn check(&self, ctx: &ProfileContext) -> Verdict {
        match field(&ctx.fields, "gender") {
            FieldValue::Absent | FieldValue::Clear => Verdict::Accepted,
            FieldValue::Text(gender) if Gender::parse(gender).is_some() => Verdict::Accepted,
            FieldValue::NotText => not_text("gender"),
            FieldValue::Text(_) => Verdict::reject(MSG_INVALID_GENDER),
        }
    }
}

pub struct PhoneField;

#[async_trait]
impl Validator<ProfileContext> for PhoneField {
    fn name(&self) -> &'static str {
        "profile_phone"
    }

    async fn check(&self, ctx: &ProfileContext) -> Verdict {
        match field(&ctx.fields, "phoneNumber") {
            FieldValue::Absent | FieldValue::Clear => Verdict::Accepted,
            FieldValue::Text(phone) if rules::is_valid_phone(phone) => Verdict::Accepted,
            FieldValue::NotText => not_text("phoneNumber"),
            FieldValue::Text(_) => Verdict::reject(MSG_INVALID_PHONE),
        }
    }
}

pub struct AddressField;

#[async_trait]
impl Validator<ProfileContext> for AddressField {
    fn name(&self) -> &'static str {
        "profile_address"
    }

    async fn check(&self, ctx: &ProfileContext) -> Verdict {
        match field(&ctx.fields, "address") {
            FieldValue::Absent | FieldValue::Clear => Verdict::Accepted,
            FieldValue::Text(address) if rules::is_valid_address(address) => Verdict::Accepted,
            FieldValue::NotText => not_text("address"),
            FieldValue::Text(_) => Verdict::reject(MSG_INVALID_ADDRESS),
        }
    }
}

/// 사진 참조는 외부 http(s) URL 이거나, 업로드 경로라면 요청자 본인이 올린 파일이어야 합니다.
pub struct ProfilePictureField {
    uploads: UploadConfig,
}

impl ProfilePictureField {
    pub fn new(uploads: UploadConfig) -> Self {
        Self { uploads }
    }
}

#[async_trait]
impl Validator<ProfileContext> for ProfilePictureField {
    fn name(&self) -> &'static str {
        "profile_picture"
    }

    async fn check(&self, ctx: &ProfileContext) -> Verdict {
        match field(&ctx.fields, "profilePicture") {
            FieldValue::Absent | FieldValue::Clear => Verdict::Accepted,
            FieldValue::NotText => not_text("profilePicture"),
            FieldValue::Text(url) if self.uploads.is_local_url(url) => {
                if self.uploads.owned_path_for_url(url, &ctx.user_id).is_some() {
                    Verdict::Accepted
                } else {
                    Verdict::reject(MSG_PICTURE_NOT_OWNED)
                }
            }
            FieldValue::Text(url) if rules::is_valid_picture_url(url) => Verdict::Accepted,
            FieldValue::Text(_) => Verdict::reject(MSG_INVALID_PICTURE),
        }
    }
}

/// 프로필 수정 체인을 조립합니다.
pub fn profile_chain(users: Arc<dyn UserStore>, uploads: &UploadConfig) -> ValidationChain<ProfileContext> {
    ValidationChain::new()
        .link(FullNameField)
        .link(EmailField::new(users.clone()))
        .link(UsernameField::new(users))
        .link(GenderField)
        .link(PhoneField)
        .link(AddressField)
        .link(ProfilePictureField::new(uploads.clone()))
}

/// 검증을 통과한 필드 맵을 정규화된 변경 내용으로 바꿉니다.
///
/// 이메일은 소문자, 성별은 소문자 enum, 문자열은 앞뒤 공백 제거.
pub fn to_changes(fields: &FieldMap) -> ProfileChanges {
    let optional_text = |key: &str| match field(fields, key) {
        FieldValue::Absent | FieldValue::NotText => None,
        FieldValue::Clear => Some(None),
        FieldValue::Text(text) => Some(Some(text.to_string())),
    };

    ProfileChanges {
        full_name: fields.non_blank("fullName").map(str::to_string),
        email: fields.non_blank("email").map(str::to_lowercase),
        username: optional_text("username"),
        profile_picture: optional_text("profilePicture"),
        gender: optional_text("gender").map(|g| g.and_then(|value| Gender::parse(&value))),
        address: optional_text("address"),
        phone_number: optional_text("phoneNumber"),
    }
}
