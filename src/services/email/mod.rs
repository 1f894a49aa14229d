//! 메일 발송 모듈
//!
//! 서비스는 [`EmailSender`] trait 에만 의존합니다.
//! SMTP 자격 증명이 설정되어 있으면 [`SmtpEmailSender`],
//! 아니면 [`ConsoleEmailSender`]가 주입됩니다.

pub mod console_sender;
pub mod smtp_sender;
pub mod templates;

use std::sync::Arc;

use async_trait::async_trait;

use crate::config::SmtpConfig;
use crate::errors::AppResult;

pub use console_sender::ConsoleEmailSender;
pub use smtp_sender::SmtpEmailSender;

/// 발송할 메일 한 통
#[derive(Debug, Clone, PartialEq)]
pub struct EmailMessage {
    pub to: String,
    pub subject: String,
    pub html_body: String,
    pub text_body: String,
}

#[async_trait]
pub trait EmailSender: Send + Sync {
    async fn send(&self, message: EmailMessage) -> AppResult<()>;
}

/// 환경 설정에 맞는 발송기를 만듭니다.
pub fn sender_from_env() -> Arc<dyn EmailSender> {
    match SmtpConfig::from_env() {
        Some(config) => {
            log::info!("📧 SMTP 메일 발송 활성화: {}:{}", config.server, config.port);
            Arc::new(SmtpEmailSender::new(config))
        }
        None => {
            log::warn!("SMTP_USERNAME/SMTP_PASSWORD 미설정: 메일 내용을 콘솔 로그로 대신 출력합니다");
            Arc::new(ConsoleEmailSender)
        }
    }
}
