//! 필드 단위 검증 규칙과 사용자 메시지
//!
//! 회원가입, 프로필 수정, 비밀번호 변경/재설정이 같은 규칙을 공유합니다.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::errors::{AppError, AppResult};

pub const MSG_ALL_FIELDS_REQUIRED: &str = "모든 필드를 입력해주세요";
pub const MSG_NAME_TOO_SHORT: &str = "이름은 최소 2자 이상이어야 합니다";
pub const MSG_INVALID_EMAIL: &str = "유효한 이메일 주소를 입력해주세요";
pub const MSG_PASSWORD_TOO_SHORT: &str = "비밀번호는 최소 6자 이상이어야 합니다";
pub const MSG_PASSWORD_WEAK: &str = "비밀번호는 대문자, 소문자, 숫자를 각각 하나 이상 포함해야 합니다";
pub const MSG_EMAIL_REGISTERED: &str = "이미 등록된 이메일입니다";
pub const MSG_EMAIL_TAKEN: &str = "이미 다른 계정에서 사용 중인 이메일입니다";
pub const MSG_INVALID_USERNAME: &str = "사용자명은 3-20자의 영문, 숫자, 밑줄(_)만 사용할 수 있습니다";
pub const MSG_USERNAME_TAKEN: &str = "이미 사용 중인 사용자명입니다";
pub const MSG_INVALID_GENDER: &str = "성별은 male, female, other, prefer_not_to_say 중 하나여야 합니다";
pub const MSG_INVALID_PHONE: &str = "전화번호는 7-20자의 숫자와 + - ( ) 공백만 사용할 수 있습니다";
pub const MSG_INVALID_ADDRESS: &str = "주소는 5자 이상 200자 이하여야 합니다";
pub const MSG_INVALID_PICTURE: &str = "프로필 사진은 500자 이하의 http(s) URL이어야 합니다";
pub const MSG_PICTURE_NOT_OWNED: &str = "본인이 업로드한 사진만 지정할 수 있습니다";

pub const MIN_NAME_LEN: usize = 2;
pub const MIN_PASSWORD_LEN: usize = 6;
pub const ADDRESS_LEN: (usize, usize) = (5, 200);
pub const MAX_PICTURE_URL_LEN: usize = 500;

static EMAIL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$").expect("email pattern")
});

static USERNAME_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[a-zA-Z0-9_]{3,20}$").expect("username pattern"));

static PICTURE_URL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^https?://[^\s/?#]+[^\s]*$").expect("picture url pattern"));

static PHONE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[0-9+\-() ]{7,20}$").expect("phone pattern"));

pub fn is_valid_email(email: &str) -> bool {
    EMAIL_RE.is_match(email)
}

pub fn is_valid_username(username: &str) -> bool {
    USERNAME_RE.is_match(username)
}

pub fn is_valid_phone(phone: &str) -> bool {
    PHONE_RE.is_match(phone)
}

/// 외부 사진 URL: http(s) 스킴, 공백 없음, 최대 500자
pub fn is_valid_picture_url(url: &str) -> bool {
    url.chars().count() <= MAX_PICTURE_URL_LEN && PICTURE_URL_RE.is_match(url)
}

pub fn is_valid_full_name(name: &str) -> bool {
    name.trim().chars().count() >= MIN_NAME_LEN
}

pub fn is_valid_address(address: &str) -> bool {
    let len = address.trim().chars().count();
    (ADDRESS_LEN.0..=ADDRESS_LEN.1).contains(&len)
}

/// 소문자, 대문자, 숫자(ASCII)를 각각 하나 이상 포함
pub fn is_strong_password(password: &str) -> bool {
    password.chars().any(|c| c.is_ascii_lowercase())
        && password.chars().any(|c| c.is_ascii_uppercase())
        && password.chars().any(|c| c.is_ascii_digit())
}

/// 길이 검사 후 강도 검사. 실패 메시지가 서로 다릅니다.
pub fn check_password_policy(password: &str) -> AppResult<()> {
    if password.chars().count() < MIN_PASSWORD_LEN {
        return Err(AppError::ValidationError(MSG_PASSWORD_TOO_SHORT.to_string()));
    }
    if !is_strong_password(password) {
        return Err(AppError::ValidationError(MSG_PASSWORD_WEAK.to_string()));
    }
    Ok(())
}

pub fn check_email_format(email: &str) -> AppResult<()> {
    if is_valid_email(email) {
        Ok(())
    } else {
        Err(AppError::ValidationError(MSG_INVALID_EMAIL.to_string()))
    }
}
