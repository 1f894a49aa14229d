//! SMTP 메일 발송기 (lettre)

use std::time::Duration;

use async_trait::async_trait;
use actix_web::web;
use lettre::message::{header, Mailbox, MultiPart, SinglePart};
use lettre::transport::smtp::authentication::Credentials;
use lettre::{Message, SmtpTransport, Transport};

use crate::config::{app_display_name, SmtpConfig};
use crate::errors::{AppError, AppResult};
use crate::services::email::{EmailMessage, EmailSender};

const SMTP_TIMEOUT: Duration = Duration::from_secs(10);

pub struct SmtpEmailSender {
    config: SmtpConfig,
}

impl SmtpEmailSender {
    pub fn new(config: SmtpConfig) -> Self {
        Self { config }
    }

    fn build_transport(&self) -> AppResult<SmtpTransport> {
        let credentials = Credentials::new(self.config.username.clone(), self.config.password.clone());

        let transport = SmtpTransport::starttls_relay(&self.config.server)
            .map_err(|e| AppError::ExternalServiceError(format!("SMTP 연결 설정 실패: {}", e)))?
            .port(self.config.port)
            .credentials(credentials)
            .timeout(Some(SMTP_TIMEOUT))
            .build();

        Ok(transport)
    }

    fn build_message(&self, message: &EmailMessage) -> AppResult<Message> {
        let from: Mailbox = format!("{} <{}>", app_display_name(), self.config.from_email)
            .parse()
            .map_err(|e| AppError::InternalError(format!("발신 주소 오류: {}", e)))?;

        let to: Mailbox = message
            .to
            .parse()
            .map_err(|e| AppError::ValidationError(format!("수신 주소 오류: {}", e)))?;

        let body = MultiPart::alternative()
            .singlepart(
                SinglePart::builder()
                    .header(header::ContentType::TEXT_PLAIN)
                    .body(message.text_body.clone()),
            )
            .singlepart(
                SinglePart::builder()
                    .header(header::ContentType::TEXT_HTML)
                    .body(message.html_body.clone()),
            );

        Message::builder()
            .from(from)
            .to(to)
            .subject(&message.subject)
            .multipart(body)
            .map_err(|e| AppError::InternalError(format!("메일 생성 실패: {}", e)))
    }
}

#[async_trait]
impl EmailSender for SmtpEmailSender {
    async fn send(&self, message: EmailMessage) -> AppResult<()> {
        let email = self.build_message(&message)?;
        let transport = self.build_transport()?;

        // lettre 의 SmtpTransport 는 동기 API 라 blocking 풀에서 실행
        web::block(move || transport.send(&email))
            .await
            .map_err(|e| AppError::InternalError(format!("메일 발송 작업 실패: {}", e)))?
            .map_err(|e| AppError::ExternalServiceError(format!("메일 발송 실패: {}", e)))?;

        log::info!("📧 메일 발송 완료: {} ({})", message.to, message.subject);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sender() -> SmtpEmailSender {
        SmtpEmailSender::new(SmtpConfig {
            server: "smtp.example.com".to_string(),
            port: 587,
            username: "mailer@example.com".to_string(),
            password: "app-password".to_string(),
            from_email: "no-reply@example.com".to_string(),
        })
    }

    #[test]
    fn test_builds_multipart_message() {
        let message = EmailMessage {
            to: "ana@example.com".to_string(),
            subject: "Hello".to_string(),
            html_body: "<p>Hi</p>".to_string(),
            text_body: "Hi".to_string(),
        };

        let formatted = String::from_utf8(sender().build_message(&message).unwrap().formatted()).unwrap();

        assert!(formatted.contains("To: ana@example.com"));
        assert!(formatted.contains("multipart/alternative"));
    }

    #[test]
    fn test_invalid_recipient_is_rejected() {
        let message = EmailMessage {
            to: "not an address".to_string(),
            subject: "Hello".to_string(),
            html_body: String::new(),
            text_body: String::new(),
        };

        assert!(matches!(
            sender().build_message(&message),
            Err(AppError::ValidationError(_))
        ));
    }
}
