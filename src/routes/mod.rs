//! API 라우트 설정 모듈
//!
//! 엔드포인트를 기능별로 묶어 등록합니다.
//!
//! ## 인증 불필요 (Public 라우트)
//! - `GET /health`
//! - `/auth/*` - 가입, 로그인, Google 로그인, 비밀번호 재설정
//!
//! ## 인증 필요
//! - `/profile/*` - `AuthMiddleware::required()` 로 감싼 scope
//!
//! # Examples
//!
//! ```rust,ignore
//! use actix_web::{web, App};
//!
//! let app = App::new()
//!     .configure(|cfg| state.configure(cfg))
//!     .configure(configure_all_routes);
//! ```

use actix_web::{error, web, HttpResponse};
use serde_json::json;

use crate::errors::AppError;
use crate::handlers;
use crate::middlewares::AuthMiddleware;

/// JSON 본문 최대 크기
const JSON_LIMIT_BYTES: usize = 64 * 1024;

/// 모든 라우트를 설정합니다
pub fn configure_all_routes(cfg: &mut web::ServiceConfig) {
    cfg.app_data(json_config());

    // Health check endpoint
    cfg.service(health_check);

    configure_auth_routes(cfg);
    configure_profile_routes(cfg);
}

/// 잘못된 JSON 본문을 `AppError` 형식의 400으로 돌려줍니다.
fn json_config() -> web::JsonConfig {
    web::JsonConfig::default()
        .limit(JSON_LIMIT_BYTES)
        .error_handler(|err, _req| {
            let message = match &err {
                error::JsonPayloadError::ContentType => "Content-Type은 application/json 이어야 합니다".to_string(),
                other => format!("잘못된 JSON 요청입니다: {}", other),
            };
            AppError::ValidationError(message).into()
        })
}

/// 인증 관련 라우트를 설정합니다
///
/// 모든 인증 라우트는 Public 접근이 가능합니다.
///
/// ```bash
/// curl -X POST http://localhost:8080/auth/login \
///   -H "Content-Type: application/json" \
///   -d '{"email":"ana@example.com","password":"Abcde1"}'
/// ```
fn configure_auth_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/auth")
            .service(handlers::auth::register)
            .service(handlers::auth::login)
            .service(handlers::auth::google_login)
            // 비밀번호 재설정
            .service(handlers::password_reset::forgot_password)
            .service(handlers::password_reset::verify_token)
            .service(handlers::password_reset::reset_password),
    );
}

/// 프로필 라우트 (Bearer 토큰 필요)
fn configure_profile_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/profile")
            .wrap(AuthMiddleware::required())
            .service(handlers::profile::get_profile)
            .service(handlers::profile::update_profile)
            .service(handlers::profile::change_password)
            .service(handlers::profile::upload_picture),
    );
}

/// 서비스 상태를 확인하는 헬스체크 엔드포인트
///
/// ```json
/// {
///   "status": "healthy",
///   "service": "account_service",
///   "version": "0.1.0",
///   "timestamp": "2026-01-01T00:00:00Z"
/// }
/// ```
#[actix_web::get("/health")]
async fn health_check() -> HttpResponse {
    HttpResponse::Ok().json(json!({
        "status": "healthy",
        "service": "account_service",
        "version": env!("CARGO_PKG_VERSION"),
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
}
