//! 프로필 핸들러
//!
//! 모든 라우트는 `AuthMiddleware::required()` 로 보호되며,
//! 핸들러는 [`AuthenticatedUser`] 추출기로 호출자 ID를 얻습니다.
//!
//! | 메서드 | 경로 | 설명 |
//! |--------|------|------|
//! | GET | `/profile` | 내 프로필 |
//! | PUT | `/profile` | 부분 수정 (허용 필드만) |
//! | PUT | `/profile/password` | 비밀번호 변경 |
//! | POST | `/profile/upload-picture` | multipart `file` 사진 교체 |

use actix_multipart::{Field, Multipart, MultipartError};
use actix_web::{get, post, put, web, HttpRequest, HttpResponse};
use futures_util::StreamExt;
use serde_json::{json, Map, Value};
use validator::Validate;

use crate::config::UploadConfig;
use crate::domain::dto::users::request::ChangePasswordRequest;
use crate::domain::dto::users::response::MessageResponse;
use crate::domain::models::auth::AuthenticatedUser;
use crate::errors::{AppError, AppResult};
use crate::services::audit::{AuditAction, AuditEvent, AuditLogger};
use crate::services::users::upload_service::{check_extension, MSG_NO_FILE, MSG_TOO_LARGE};
use crate::services::users::ProfileService;
use crate::utils::request_utils::client_ip;
use crate::validation::FieldMap;

pub const MSG_PASSWORD_CHANGED: &str = "비밀번호가 변경되었습니다";
pub const MSG_PICTURE_UPDATED: &str = "프로필 사진이 변경되었습니다";

/// 업로드 폼에서 사진을 담는 필드 이름
const FILE_FIELD: &str = "file";

#[get("")]
pub async fn get_profile(
    req: HttpRequest,
    user: AuthenticatedUser,
    profiles: web::Data<ProfileService>,
    audit: web::Data<AuditLogger>,
) -> Result<HttpResponse, AppError> {
    let profile = profiles.get_profile(&user.user_id).await?;

    audit.record(&AuditEvent::new(AuditAction::ProfileViewed, &user.user_id).ip(client_ip(&req)));

    Ok(HttpResponse::Ok().json(json!({ "profile": profile })))
}

/// 프로필 부분 수정
///
/// ```bash
/// curl -X PUT http://localhost:8080/profile \
///   -H "Authorization: Bearer <token>" \
///   -H "Content-Type: application/json" \
///   -d '{"username":"ana_99","phoneNumber":null}'
/// ```
#[put("")]
pub async fn update_profile(
    req: HttpRequest,
    user: AuthenticatedUser,
    profiles: web::Data<ProfileService>,
    audit: web::Data<AuditLogger>,
    payload: web::Json<Map<String, Value>>,
) -> Result<HttpResponse, AppError> {
    let response = profiles
        .update_profile(&user.user_id, FieldMap::from(payload.into_inner()))
        .await?;

    audit.record(
        &AuditEvent::new(AuditAction::ProfileUpdated, &user.user_id)
            .detail(format!("fields={}", response.updated_fields.join(",")))
            .ip(client_ip(&req)),
    );

    Ok(HttpResponse::Ok().json(response))
}

#[put("/password")]
pub async fn change_password(
    req: HttpRequest,
    user: AuthenticatedUser,
    profiles: web::Data<ProfileService>,
    audit: web::Data<AuditLogger>,
    payload: web::Json<ChangePasswordRequest>,
) -> Result<HttpResponse, AppError> {
    let result = match payload.validate() {
        Ok(()) => profiles.change_password(&user.user_id, &payload).await,
        Err(e) => Err(AppError::from(e)),
    };

    let event = AuditEvent::new(AuditAction::PasswordChanged, &user.user_id).ip(client_ip(&req));
    match result {
        Ok(()) => {
            audit.record(&event);
            Ok(HttpResponse::Ok().json(MessageResponse::new(MSG_PASSWORD_CHANGED)))
        }
        Err(e) => {
            audit.record(&event.failed(e.detail()));
            Err(e)
        }
    }
}

/// multipart `file` 필드로 프로필 사진을 교체합니다.
///
/// 확장자는 본문을 읽기 전에 검사하고, 읽는 도중 크기 상한을 넘으면
/// 즉시 413으로 끊습니다.
#[post("/upload-picture")]
pub async fn upload_picture(
    req: HttpRequest,
    user: AuthenticatedUser,
    profiles: web::Data<ProfileService>,
    upload_config: web::Data<UploadConfig>,
    audit: web::Data<AuditLogger>,
    payload: Multipart,
) -> Result<HttpResponse, AppError> {
    let mut size = 0;
    let result = match read_picture(payload, upload_config.max_bytes).await {
        Ok((file_name, bytes)) => {
            size = bytes.len();
            profiles.upload_picture(&user.user_id, &file_name, bytes).await
        }
        Err(e) => Err(e),
    };

    let event = AuditEvent::new(AuditAction::PictureUploaded, &user.user_id).ip(client_ip(&req));
    match result {
        Ok(url) => {
            audit.record(&event.detail(format!("bytes={}", size)));
            Ok(HttpResponse::Ok().json(json!({
                "message": MSG_PICTURE_UPDATED,
                "profilePicture": url
            })))
        }
        Err(e) => {
            audit.record(&event.failed(e.detail()));
            Err(e)
        }
    }
}

/// `file` 필드를 찾아 (원본 파일명, 내용)을 돌려줍니다.
async fn read_picture(mut payload: Multipart, max_bytes: usize) -> AppResult<(String, Vec<u8>)> {
    while let Some(item) = payload.next().await {
        let mut field = item.map_err(multipart_error)?;

        if field.name() != Some(FILE_FIELD) {
            drain(&mut field).await?;
            continue;
        }

        let file_name = field
            .content_disposition()
            .and_then(|cd| cd.get_filename())
            .map(str::to_string)
            .filter(|name| !name.trim().is_empty())
            .ok_or_else(|| AppError::UploadError(MSG_NO_FILE.to_string()))?;

        check_extension(&file_name)?;

        let mut bytes = Vec::new();
        while let Some(chunk) = field.next().await {
            let chunk = chunk.map_err(multipart_error)?;
            if bytes.len() + chunk.len() > max_bytes {
                return Err(AppError::PayloadTooLarge(MSG_TOO_LARGE.to_string()));
            }
            bytes.extend_from_slice(&chunk);
        }

        return Ok((file_name, bytes));
    }

    Err(AppError::UploadError(MSG_NO_FILE.to_string()))
}

async fn drain(field: &mut Field) -> AppResult<()> {
    while let Some(chunk) = field.next().await {
        chunk.map_err(multipart_error)?;
    }
    Ok(())
}

fn multipart_error(e: MultipartError) -> AppError {
    AppError::UploadError(format!("업로드 본문을 읽을 수 없습니다: {}", e))
}
