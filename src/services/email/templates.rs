//! 메일 본문 템플릿

use crate::config::app_display_name;
use crate::domain::entities::tokens::RESET_TOKEN_TTL_MS;
use crate::services::email::EmailMessage;

fn escape_html(value: &str) -> String {
    value
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

/// 비밀번호 재설정 안내 메일
///
/// 평문 토큰은 이 메일에만 실립니다.
pub fn password_reset_email(to: &str, secret: &str) -> EmailMessage {
    let app_name = app_display_name();
    let minutes = RESET_TOKEN_TTL_MS / 60_000;

    let text_body = format!(
        "{app_name} 비밀번호 재설정 요청을 받았습니다.\n\n\
         재설정 토큰: {secret}\n\n\
         이 토큰은 {minutes}분 동안 한 번만 사용할 수 있습니다.\n\
         본인이 요청하지 않았다면 이 메일을 무시하세요."
    );

    let html_body = format!(
        "<h2>{name} 비밀번호 재설정</h2>\
         <p>비밀번호 재설정 요청을 받았습니다. 아래 토큰을 입력해주세요.</p>\
         <p style=\"font-family:monospace;font-size:18px\"><strong>{secret}</strong></p>\
         <p>이 토큰은 {minutes}분 동안 한 번만 사용할 수 있습니다.</p>\
         <p>본인이 요청하지 않았다면 이 메일을 무시하세요.</p>",
        name = escape_html(&app_name),
        secret = escape_html(secret),
    );

    EmailMessage {
        to: to.to_string(),
        subject: format!("[{}] 비밀번호 재설정 안내", app_name),
        html_body,
        text_body,
    }
}

/// 가입 환영 메일
pub fn welcome_email(to: &str, full_name: &str) -> EmailMessage {
    let app_name = app_display_name();

    EmailMessage {
        to: to.to_string(),
        subject: format!("[{}] 가입을 환영합니다", app_name),
        html_body: format!(
            "<h2>{}님, 환영합니다!</h2><p>{} 계정이 생성되었습니다.</p>",
            escape_html(full_name),
            escape_html(&app_name)
        ),
        text_body: format!("{}님, 환영합니다!\n{} 계정이 생성되었습니다.", full_name, app_name),
    }
}
