//! 보안 감사 로그
//!
//! `audit` 타깃으로 한 줄짜리 key=value 로그를 남깁니다.
//! `RUST_LOG=audit=info` 로 따로 걸러 볼 수 있습니다.

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuditAction {
    ProfileViewed,
    ProfileUpdated,
    PasswordChanged,
    PictureUploaded,
    PasswordResetRequested,
    PasswordResetCompleted,
    AuthenticationFailed,
}

impl AuditAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            AuditAction::ProfileViewed => "profile_viewed",
            AuditAction::ProfileUpdated => "profile_updated",
            AuditAction::PasswordChanged => "password_changed",
            AuditAction::PictureUploaded => "picture_uploaded",
            AuditAction::PasswordResetRequested => "password_reset_requested",
            AuditAction::PasswordResetCompleted => "password_reset_completed",
            AuditAction::AuthenticationFailed => "authentication_failed",
        }
    }
}

/// 감사 로그 한 건
#[derive(Debug, Clone, PartialEq)]
pub struct AuditEvent {
    pub action: AuditAction,
    /// 사용자 ID 또는 (미인증 요청이면) 이메일
    pub subject: String,
    pub success: bool,
    pub detail: Option<String>,
    pub client_ip: Option<String>,
}

impl AuditEvent {
    pub fn new(action: AuditAction, subject: impl Into<String>) -> Self {
        Self {
            action,
            subject: subject.into(),
            success: true,
            detail: None,
            client_ip: None,
        }
    }

    pub fn failed(mut self, reason: impl Into<String>) -> Self {
        self.success = false;
        self.detail = Some(reason.into());
        self
    }

    pub fn detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = Some(detail.into());
        self
    }

    pub fn ip(mut self, client_ip: Option<String>) -> Self {
        self.client_ip = client_ip;
        self
    }
}

impl fmt::Display for AuditEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "action={} subject={} result={} ip={}",
            self.action.as_str(),
            self.subject,
            if self.success { "success" } else { "failure" },
            self.client_ip.as_deref().unwrap_or("-"),
        )?;
        if let Some(detail) = &self.detail {
            write!(f, " detail=\"{}\"", detail.replace('"', "'"))?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct AuditLogger;

impl AuditLogger {
    pub fn record(&self, event: &AuditEvent) {
        if event.success {
            log::info!(target: "audit", "{}", event);
        } else {
            log::warn!(target: "audit", "{}", event);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_line_format() {
        let event = AuditEvent::new(AuditAction::ProfileUpdated, "65f0")
            .detail("fields=fullName,email")
            .ip(Some("10.0.0.7".to_string()));

        assert_eq!(
            event.to_string(),
            "action=profile_updated subject=65f0 result=success ip=10.0.0.7 detail=\"fields=fullName,email\""
        );
    }

    #[test]
    fn test_failed_event_without_ip() {
        let event = AuditEvent::new(AuditAction::PasswordChanged, "65f0").failed("현재 비밀번호 불일치");

        assert!(!event.success);
        assert_eq!(
            event.to_string(),
            "action=password_changed subject=65f0 result=failure ip=- detail=\"현재 비밀번호 불일치\""
        );
    }
}
