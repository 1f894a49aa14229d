//! 테스트 지원 도구
//!
//! 메일/신원 검증 대역과 메모리 저장소로 구성된 서비스 묶음을 제공합니다.

use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use crate::config::UploadConfig;
use crate::domain::models::oauth::GoogleIdentity;
use crate::errors::{AppError, AppResult};
use crate::repositories::memory::{InMemoryResetTokenStore, InMemoryUserStore};
use crate::services::auth::{IdentityVerifier, PasswordService, TokenService, MSG_INVALID_GOOGLE_TOKEN};
use crate::services::email::{EmailMessage, EmailSender};
use crate::state::AppState;

pub const TEST_JWT_SECRET: &str = "test-secret";

pub fn test_passwords() -> PasswordService {
    PasswordService::new(4)
}

pub fn test_tokens() -> TokenService {
    TokenService::new(TEST_JWT_SECRET, 30)
}

pub fn google_identity(email: &str) -> GoogleIdentity {
    GoogleIdentity {
        subject: "google-sub-1".to_string(),
        email: email.to_string(),
        name: "Google User".to_string(),
        picture: Some("https://lh3.googleusercontent.com/a/photo".to_string()),
    }
}

/// 보낸 메일을 기억하는 발송기
#[derive(Default)]
pub struct RecordingEmailSender {
    sent: Mutex<Vec<EmailMessage>>,
}

impl RecordingEmailSender {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn sent(&self) -> Vec<EmailMessage> {
        self.sent.lock().unwrap().clone()
    }

    /// 마지막 재설정 메일 본문에서 비밀값을 꺼냅니다.
    pub fn last_reset_secret(&self) -> Option<String> {
        self.sent
            .lock()
            .unwrap()
            .iter()
            .rev()
            .find_map(|message| {
                message
                    .text_body
                    .lines()
                    .find_map(|line| line.strip_prefix("재설정 토큰: "))
                    .map(|secret| secret.trim().to_string())
            })
    }
}

#[async_trait]
impl EmailSender for RecordingEmailSender {
    async fn send(&self, message: EmailMessage) -> AppResult<()> {
        self.sent.lock().unwrap().push(message);
        Ok(())
    }
}

pub struct FailingEmailSender;

#[async_trait]
impl EmailSender for FailingEmailSender {
    async fn send(&self, _message: EmailMessage) -> AppResult<()> {
        Err(AppError::ExternalServiceError("smtp unavailable".to_string()))
    }
}

/// 미리 정한 신원을 돌려주거나 항상 거부하는 검증기
pub struct StaticIdentityVerifier {
    identity: Option<GoogleIdentity>,
}

impl StaticIdentityVerifier {
    pub fn accepting(identity: GoogleIdentity) -> Self {
        Self {
            identity: Some(identity),
        }
    }

    pub fn rejecting() -> Self {
        Self { identity: None }
    }
}

#[async_trait]
impl IdentityVerifier for StaticIdentityVerifier {
    async fn verify(&self, _id_token: &str) -> AppResult<GoogleIdentity> {
        self.identity
            .clone()
            .ok_or_else(|| AppError::AuthenticationError(MSG_INVALID_GOOGLE_TOKEN.to_string()))
    }
}

/// 테스트마다 새로 만드는 임시 업로드 루트
pub fn temp_static_root() -> PathBuf {
    std::env::temp_dir().join(format!("account-service-test-{}", uuid::Uuid::new_v4().simple()))
}

/// 메모리 저장소 위에 조립한 애플리케이션 상태
pub struct TestHarness {
    pub users: Arc<InMemoryUserStore>,
    pub reset_tokens: Arc<InMemoryResetTokenStore>,
    pub mailer: Arc<RecordingEmailSender>,
    pub upload_config: UploadConfig,
    pub state: AppState,
}

impl TestHarness {
    pub fn new() -> Self {
        Self::with_identity(StaticIdentityVerifier::accepting(google_identity("google.user@gmail.com")))
    }

    pub fn with_identity(identity: StaticIdentityVerifier) -> Self {
        let users = Arc::new(InMemoryUserStore::new());
        let reset_tokens = Arc::new(InMemoryResetTokenStore::new());
        let mailer = Arc::new(RecordingEmailSender::new());
        let upload_config = UploadConfig::with_root(temp_static_root());

        let state = AppState::build(
            users.clone(),
            reset_tokens.clone(),
            test_passwords(),
            test_tokens(),
            Arc::new(identity),
            mailer.clone(),
            upload_config.clone(),
        );

        Self {
            users,
            reset_tokens,
            mailer,
            upload_config,
            state,
        }
    }
}

impl Drop for TestHarness {
    fn drop(&mut self) {
        let _ = std::fs::remove_dir_all(&self.upload_config.static_root);
    }
}

/// 하네스 상태와 전체 라우트로 테스트 서비스를 만듭니다.
macro_rules! init_app {
    ($harness:expr) => {{
        let state = $harness.state.clone();
        actix_web::test::init_service(
            actix_web::App::new()
                .configure(move |cfg| state.configure(cfg))
                .configure(crate::routes::configure_all_routes),
        )
        .await
    }};
}

pub(crate) use init_app;
