//! 개발용 콘솔 발송기
//!
//! SMTP 설정이 없을 때 메일 본문을 로그로 출력하고 성공으로 처리합니다.
//! 재설정 토큰이 로그에 남으므로 운영 환경에서는 SMTP 를 설정해야 합니다.

use async_trait::async_trait;

use crate::errors::AppResult;
use crate::services::email::{EmailMessage, EmailSender};

pub struct ConsoleEmailSender;

#[async_trait]
impl EmailSender for ConsoleEmailSender {
    async fn send(&self, message: EmailMessage) -> AppResult<()> {
        log::info!(
            "📧 [console] to={} subject={}\n{}",
            message.to,
            message.subject,
            message.text_body
        );
        Ok(())
    }
}
