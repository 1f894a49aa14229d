//! SMTP 메일 발송 설정

use std::env;

/// SMTP 접속 정보
///
/// `SMTP_USERNAME`과 `SMTP_PASSWORD`가 모두 있어야 실제 발송이 활성화됩니다.
/// 둘 중 하나라도 없으면 `from_env()`가 `None`을 반환하고,
/// 서버는 콘솔 발송기로 대체하여 메일 내용을 로그로만 남깁니다.
#[derive(Debug, Clone)]
pub struct SmtpConfig {
    pub server: String,
    pub port: u16,
    pub username: String,
    pub password: String,
    pub from_email: String,
}

impl SmtpConfig {
    pub fn from_env() -> Option<Self> {
        let username = env::var("SMTP_USERNAME").ok().filter(|v| !v.is_empty())?;
        let password = env::var("SMTP_PASSWORD").ok().filter(|v| !v.is_empty())?;

        let server = env::var("SMTP_SERVER").unwrap_or_else(|_| "smtp.gmail.com".to_string());
        let port = env::var("SMTP_PORT")
            .ok()
            .and_then(|p| p.parse().ok())
            .unwrap_or(587);
        let from_email = env::var("FROM_EMAIL").unwrap_or_else(|_| username.clone());

        Some(Self {
            server,
            port,
            username,
            password,
            from_email,
        })
    }
}

/// 메일 본문에 들어가는 서비스 표시 이름
pub fn app_display_name() -> String {
    env::var("APP_NAME").unwrap_or_else(|_| "Account Service".to_string())
}
