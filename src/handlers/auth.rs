//! Authentication HTTP Handlers
//!
//! - `POST /auth/register` - 이메일 가입 (201)
//! - `POST /auth/login` - 이메일 로그인
//! - `POST /auth/google_login` - Google ID 토큰 로그인
//!
//! 성공 응답은 모두 `{ "user": {...}, "token": "<jwt>" }` 형태입니다.

use actix_web::{post, web, HttpResponse};
use serde_json::{Map, Value};
use validator::Validate;

use crate::domain::dto::users::request::{GoogleLoginRequest, LoginRequest};
use crate::errors::AppError;
use crate::services::auth::AuthService;
use crate::validation::FieldMap;

/// 회원가입
///
/// 본문은 평평한 JSON 객체여야 하며, 필드 검증은 가입 검증 체인이 담당합니다.
///
/// ```bash
/// curl -X POST http://localhost:8080/auth/register \
///   -H "Content-Type: application/json" \
///   -d '{"fullName":"Ana Perez","email":"ana@example.com","password":"Abcde1"}'
/// ```
#[post("/register")]
pub async fn register(
    auth: web::Data<AuthService>,
    payload: web::Json<Map<String, Value>>,
) -> Result<HttpResponse, AppError> {
    let response = auth.register(FieldMap::from(payload.into_inner())).await?;
    Ok(HttpResponse::Created().json(response))
}

#[post("/login")]
pub async fn login(
    auth: web::Data<AuthService>,
    payload: web::Json<LoginRequest>,
) -> Result<HttpResponse, AppError> {
    payload.validate()?;

    let response = auth.login(&payload.email, &payload.password).await?;
    Ok(HttpResponse::Ok().json(response))
}

/// Google Sign-In ID 토큰으로 로그인
///
/// 처음 보는 이메일이면 비밀번호 없는 google 계정을 만듭니다.
#[post("/google_login")]
pub async fn google_login(
    auth: web::Data<AuthService>,
    payload: web::Json<GoogleLoginRequest>,
) -> Result<HttpResponse, AppError> {
    payload.validate()?;

    let response = auth.google_login(&payload.token).await?;
    Ok(HttpResponse::Ok().json(response))
}

#[cfg(test)]
mod tests {
    use crate::services::auth::MSG_INVALID_CREDENTIALS;
    use crate::testing::{init_app, test_tokens, StaticIdentityVerifier, TestHarness};
    use crate::validation::rules::{MSG_ALL_FIELDS_REQUIRED, MSG_EMAIL_REGISTERED};
    use actix_web::http::StatusCode;
    use actix_web::test;
    use serde_json::{json, Value};

    fn register_request(body: Value) -> test::TestRequest {
        test::TestRequest::post().uri("/auth/register").set_json(body)
    }

    #[actix_web::test]
    async fn test_register_returns_201_with_user_and_token() {
        let harness = TestHarness::new();
        let app = init_app!(harness);

        let response = test::call_service(
            &app,
            register_request(json!({"fullName": "Ana Perez", "email": "ana@example.com", "password": "Abcde1"})).to_request(),
        )
        .await;
        assert_eq!(response.status(), StatusCode::CREATED);

        let body: Value = test::read_body_json(response).await;
        assert_eq!(body["user"]["email"], "ana@example.com");
        assert_eq!(body["user"]["fullName"], "Ana Perez");
        assert!(body["user"].get("passwordHash").is_none());

        let user_id = body["user"]["id"].as_str().unwrap();
        assert_eq!(test_tokens().verify(body["token"].as_str().unwrap()).unwrap(), user_id);
    }

    #[actix_web::test]
    async fn test_register_missing_field_is_400_and_persists_nothing() {
        let harness = TestHarness::new();
        let app = init_app!(harness);

        let response = test::call_service(
            &app,
            register_request(json!({"email": "ana@example.com", "password": "Abcde1"})).to_request(),
        )
        .await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body: Value = test::read_body_json(response).await;
        assert_eq!(body["message"], MSG_ALL_FIELDS_REQUIRED);
        assert_eq!(harness.users.len(), 0);
    }

    #[actix_web::test]
    async fn test_duplicate_registration_is_rejected() {
        let harness = TestHarness::new();
        let app = init_app!(harness);
        let payload = json!({"fullName": "Ana", "email": "ana@example.com", "password": "Abcde1"});

        let first = test::call_service(&app, register_request(payload.clone()).to_request()).await;
        assert_eq!(first.status(), StatusCode::CREATED);

        let second = test::call_service(&app, register_request(payload).to_request()).await;
        assert_eq!(second.status(), StatusCode::BAD_REQUEST);
        let body: Value = test::read_body_json(second).await;
        assert_eq!(body["message"], MSG_EMAIL_REGISTERED);
        assert_eq!(harness.users.len(), 1);
    }

    #[actix_web::test]
    async fn test_malformed_json_is_400() {
        let harness = TestHarness::new();
        let app = init_app!(harness);

        let request = test::TestRequest::post()
            .uri("/auth/register")
            .insert_header(("Content-Type", "application/json"))
            .set_payload("{not json")
            .to_request();
        let response = test::call_service(&app, request).await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[actix_web::test]
    async fn test_login_flow() {
        let harness = TestHarness::new();
        let app = init_app!(harness);
        test::call_service(
            &app,
            register_request(json!({"fullName": "Ana", "email": "ana@example.com", "password": "Abcde1"})).to_request(),
        )
        .await;

        let ok = test::TestRequest::post()
            .uri("/auth/login")
            .set_json(json!({"email": "ana@example.com", "password": "Abcde1"}))
            .to_request();
        let response = test::call_service(&app, ok).await;
        assert_eq!(response.status(), StatusCode::OK);

        let bad = test::TestRequest::post()
            .uri("/auth/login")
            .set_json(json!({"email": "ana@example.com", "password": "wrong"}))
            .to_request();
        let response = test::call_service(&app, bad).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body: Value = test::read_body_json(response).await;
        assert_eq!(body["message"], MSG_INVALID_CREDENTIALS);

        let missing = test::TestRequest::post()
            .uri("/auth/login")
            .set_json(json!({"email": "ana@example.com"}))
            .to_request();
        assert_eq!(test::call_service(&app, missing).await.status(), StatusCode::BAD_REQUEST);
    }

    #[actix_web::test]
    async fn test_google_login_statuses() {
        let harness = TestHarness::new();
        let app = init_app!(harness);

        let request = test::TestRequest::post()
            .uri("/auth/google_login")
            .set_json(json!({"token": "google-id-token"}))
            .to_request();
        let response = test::call_service(&app, request).await;
        assert_eq!(response.status(), StatusCode::OK);
        let body: Value = test::read_body_json(response).await;
        assert_eq!(body["user"]["authProvider"], "google");

        let missing = test::TestRequest::post()
            .uri("/auth/google_login")
            .set_json(json!({}))
            .to_request();
        assert_eq!(test::call_service(&app, missing).await.status(), StatusCode::BAD_REQUEST);

        let rejecting = TestHarness::with_identity(StaticIdentityVerifier::rejecting());
        let app = init_app!(rejecting);
        let forged = test::TestRequest::post()
            .uri("/auth/google_login")
            .set_json(json!({"token": "forged"}))
            .to_request();
        assert_eq!(test::call_service(&app, forged).await.status(), StatusCode::UNAUTHORIZED);
    }
}
