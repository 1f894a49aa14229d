//! 비밀번호 재설정 핸들러
//!
//! 세 엔드포인트 모두 인증 없이 호출됩니다. 토큰 관련 실패는
//! 사유를 구분하지 않고 같은 400 메시지를 돌려줍니다.

use actix_web::{post, web, HttpRequest, HttpResponse};
use serde_json::json;
use validator::Validate;

use crate::domain::dto::users::request::{
    ForgotPasswordRequest, ResetPasswordRequest, VerifyResetTokenRequest,
};
use crate::domain::dto::users::response::MessageResponse;
use crate::errors::AppError;
use crate::services::audit::{AuditAction, AuditEvent, AuditLogger};
use crate::services::auth::PasswordResetService;
use crate::utils::request_utils::client_ip;

pub const MSG_TOKEN_VALID: &str = "유효한 토큰입니다";
pub const MSG_PASSWORD_RESET: &str = "비밀번호가 재설정되었습니다";

/// 재설정 메일 요청
///
/// 계정이 없어도 같은 200 응답을 돌려줍니다.
#[post("/forgot-password")]
pub async fn forgot_password(
    req: HttpRequest,
    resets: web::Data<PasswordResetService>,
    audit: web::Data<AuditLogger>,
    payload: web::Json<ForgotPasswordRequest>,
) -> Result<HttpResponse, AppError> {
    payload.validate()?;

    let message = resets.request_reset(&payload.email).await?;

    audit.record(
        &AuditEvent::new(AuditAction::PasswordResetRequested, payload.email.trim().to_lowercase())
            .ip(client_ip(&req)),
    );

    Ok(HttpResponse::Ok().json(MessageResponse::new(message)))
}

#[post("/verify-token")]
pub async fn verify_token(
    resets: web::Data<PasswordResetService>,
    payload: web::Json<VerifyResetTokenRequest>,
) -> Result<HttpResponse, AppError> {
    payload.validate()?;

    resets.verify_token(&payload.token).await?;

    Ok(HttpResponse::Ok().json(json!({
        "valid": true,
        "message": MSG_TOKEN_VALID
    })))
}

/// 토큰을 소비해 새 비밀번호를 저장합니다.
///
/// ```bash
/// curl -X POST http://localhost:8080/auth/reset-password \
///   -H "Content-Type: application/json" \
///   -d '{"token":"<메일로 받은 토큰>","password":"NewPass1"}'
/// ```
#[post("/reset-password")]
pub async fn reset_password(
    req: HttpRequest,
    resets: web::Data<PasswordResetService>,
    audit: web::Data<AuditLogger>,
    payload: web::Json<ResetPasswordRequest>,
) -> Result<HttpResponse, AppError> {
    payload.validate()?;

    let user_id = resets.reset_password(&payload.token, &payload.password).await?;

    audit.record(&AuditEvent::new(AuditAction::PasswordResetCompleted, user_id).ip(client_ip(&req)));

    Ok(HttpResponse::Ok().json(MessageResponse::new(MSG_PASSWORD_RESET)))
}
