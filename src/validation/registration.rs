//! 회원가입 검증 체인
//!
//! | 순서 | 검증기 | 실패 |
//! |------|--------|------|
//! | 1 | [`RequiredFields`] | 400 모든 필드 필수 |
//! | 2 | [`FullNameLength`] | 400 |
//! | 3 | [`EmailFormat`] | 400 |
//! | 4 | [`PasswordLength`] | 400 |
//! | 5 | [`PasswordStrength`] | 400 |
//! | 6 | [`EmailNotRegistered`] | 400, 저장소 장애는 500 |

use std::sync::Arc;

use async_trait::async_trait;

use crate::repositories::UserStore;
use crate::validation::chain::{FieldMap, ValidationChain, Validator, Verdict};
use crate::validation::rules::{self, *};

pub const FULL_NAME: &str = "fullName";
pub const EMAIL: &str = "email";
pub const PASSWORD: &str = "password";

/// 가입 요청의 정규화된 값 (체인 통과 후 사용)
#[derive(Debug, Clone, PartialEq)]
pub struct Registration {
    pub full_name: String,
    pub email: String,
    pub password: String,
}

impl Registration {
    /// 체인을 통과한 필드 맵에서 값을 꺼냅니다. 필수 필드가 없으면 `None`.
    pub fn from_fields(fields: &FieldMap) -> Option<Self> {
        Some(Self {
            full_name: fields.non_blank(FULL_NAME)?.to_string(),
            email: fields.non_blank(EMAIL)?.to_lowercase(),
            password: fields.text(PASSWORD).filter(|p| !p.is_empty())?.to_string(),
        })
    }
}

pub struct RequiredFields;

#[async_trait]
impl Validator<FieldMap> for RequiredFields {
    fn name(&self) -> &'static str {
        "required_fields"
    }

    async fn check(&self, fields: &FieldMap) -> Verdict {
        if Registration::from_fields(fields).is_some() {
            Verdict::Accepted
        } else {
            Verdict::reject(MSG_ALL_FIELDS_REQUIRED)
        }
    }
}

pub struct FullNameLength;

#[async_trait]
impl Validator<FieldMap> for FullNameLength {
    fn name(&self) -> &'static str {
        "full_name_length"
    }

    async fn check(&self, fields: &FieldMap) -> Verdict {
        match fields.text(FULL_NAME) {
            Some(name) if rules::is_valid_full_name(name) => Verdict::Accepted,
            _ => Verdict::reject(MSG_NAME_TOO_SHORT),
        }
    }
}

pub struct EmailFormat;

#[async_trait]
impl Validator<FieldMap> for EmailFormat {
    fn name(&self) -> &'static str {
        "email_format"
    }

    async fn check(&self, fields: &FieldMap) -> Verdict {
        let email = fields.non_blank(EMAIL).unwrap_or_default();
        Verdict::from_result(rules::check_email_format(email))
    }
}

pub struct PasswordLength;

#[async_trait]
impl Validator<FieldMap> for PasswordLength {
    fn name(&self) -> &'static str {
        "password_length"
    }

    async fn check(&self, fields: &FieldMap) -> Verdict {
        let password = fields.text(PASSWORD).unwrap_or_default();
        if password.chars().count() >= MIN_PASSWORD_LEN {
            Verdict::Accepted
        } else {
            Verdict::reject(MSG_PASSWORD_TOO_SHORT)
        }
    }
}

pub struct PasswordStrength;

#[async_trait]
impl Validator<FieldMap> for PasswordStrength {
    fn name(&self) -> &'static str {
        "password_strength"
    }

    async fn check(&self, fields: &FieldMap) -> Verdict {
        if rules::is_strong_password(fields.text(PASSWORD).unwrap_or_default()) {
            Verdict::Accepted
        } else {
            Verdict::reject(MSG_PASSWORD_WEAK)
        }
    }
}

/// 저장소에 같은 이메일(소문자 기준)이 없어야 통과
pub struct EmailNotRegistered {
    users: Arc<dyn UserStore>,
}

impl EmailNotRegistered {
    pub fn new(users: Arc<dyn UserStore>) -> Self {
        Self { users }
    }
}

#[async_trait]
impl Validator<FieldMap> for EmailNotRegistered {
    fn name(&self) -> &'static str {
        "email_not_registered"
    }

    async fn check(&self, fields: &FieldMap) -> Verdict {
        let email = fields.non_blank(EMAIL).unwrap_or_default().to_lowercase();

        match self.users.find_by_email(&email).await {
            Ok(None) => Verdict::Accepted,
            Ok(Some(_)) => Verdict::reject(MSG_EMAIL_REGISTERED),
            Err(error) => Verdict::Rejected(error),
        }
    }
}

/// 가입 체인을 조립합니다.
pub fn registration_chain(users: Arc<dyn UserStore>) -> ValidationChain<FieldMap> {
    ValidationChain::new()
        .link(RequiredFields)
        .link(FullNameLength)
        .link(EmailFormat)
        .link(PasswordLength)
        .link(PasswordStrength)
        .link(EmailNotRegistered::new(users))
}
