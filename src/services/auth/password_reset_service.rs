//! 비밀번호 재설정 토큰 수명 주기
//!
//! ```text
//!            request_reset                 reset_password
//!   (없음) ───────────────► ISSUED ─────────────────────────► CONSUMED (used)
//!                             │  다음 request_reset / 다른 토큰 사용
//!                             ├─────────────────────────────► SUPERSEDED (used)
//!                             │  1시간 경과
//!                             └─────────────────────────────► EXPIRED (TTL 인덱스가 삭제)
//! ```
//!
//! 비밀값은 32바이트 난수의 base64url(패딩 없음) 문자열이며,
//! 저장소에는 SHA-256 hex 만 남습니다. 실패 사유는 클라이언트에 구분해서 알리지 않습니다.

use std::sync::Arc;

use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine as _};
use mongodb::bson::DateTime;
use rand::RngCore;
use sha2::{Digest, Sha256};

use crate::domain::entities::tokens::PasswordResetToken;
use crate::errors::{AppError, AppResult};
use crate::repositories::{ResetTokenStore, UserStore};
use crate::services::auth::PasswordService;
use crate::services::email::{templates, EmailSender};
use crate::validation::rules;

pub const MSG_RESET_REQUESTED: &str =
    "해당 이메일로 가입된 계정이 있다면 비밀번호 재설정 안내 메일을 보냈습니다";
pub const MSG_INVALID_RESET_TOKEN: &str = "유효하지 않거나 만료된 토큰입니다";
pub const MSG_RESET_FIELDS_REQUIRED: &str = "재설정 토큰과 새 비밀번호가 필요합니다";
pub const MSG_EMAIL_REQUIRED: &str = "이메일을 입력해주세요";

const SECRET_BYTES: usize = 32;

/// URL-safe 재설정 비밀값 생성
pub fn generate_secret() -> String {
    let mut bytes = [0u8; SECRET_BYTES];
    rand::thread_rng().fill_bytes(&mut bytes);
    URL_SAFE_NO_PAD.encode(bytes)
}

/// 비밀값의 SHA-256 (소문자 hex)
pub fn hash_secret(secret: &str) -> String {
    Sha256::digest(secret.as_bytes())
        .iter()
        .map(|byte| format!("{:02x}", byte))
        .collect()
}

fn invalid_token() -> AppError {
    AppError::ValidationError(MSG_INVALID_RESET_TOKEN.to_string())
}

pub struct PasswordResetService {
    users: Arc<dyn UserStore>,
    tokens: Arc<dyn ResetTokenStore>,
    passwords: PasswordService,
    mailer: Arc<dyn EmailSender>,
}

impl PasswordResetService {
    pub fn new(
        users: Arc<dyn UserStore>,
        tokens: Arc<dyn ResetTokenStore>,
        passwords: PasswordService,
        mailer: Arc<dyn EmailSender>,
    ) -> Self {
        Self {
            users,
            tokens,
            passwords,
            mailer,
        }
    }

    /// 재설정 메일 요청
    ///
    /// 계정 존재 여부와 관계없이 같은 메시지를 돌려줍니다.
    /// 계정이 있으면 기존 유효 토큰을 모두 무효화하고 새 토큰을 메일로 보냅니다.
    ///
    /// # Errors
    ///
    /// * `ValidationError` - 이메일 누락/형식 오류
    /// * `ExternalServiceError` - 메일 발송 실패
    pub async fn request_reset(&self, email: &str) -> AppResult<&'static str> {
        let email = email.trim().to_lowercase();
        if email.is_empty() {
            return Err(AppError::ValidationError(MSG_EMAIL_REQUIRED.to_string()));
        }
        rules::check_email_format(&email)?;

        let Some(user) = self.users.find_by_email(&email).await? else {
            log::info!("재설정 요청: 등록되지 않은 이메일");
            return Ok(MSG_RESET_REQUESTED);
        };

        let user_id = user
            .id
            .ok_or_else(|| AppError::InternalError("사용자 ID가 없습니다".to_string()))?;

        let now = DateTime::now();
        let superseded = self.tokens.invalidate_for_user(&user_id, now).await?;
        if superseded > 0 {
            log::info!("기존 재설정 토큰 {}개 무효화: {}", superseded, user_id);
        }

        let secret = generate_secret();
        self.tokens
            .insert(PasswordResetToken::issue(user_id, hash_secret(&secret), now))
            .await?;

        self.mailer
            .send(templates::password_reset_email(&user.email, &secret))
            .await
            .map_err(|e| {
                AppError::ExternalServiceError(format!("재설정 메일 발송 실패: {}", e.detail()))
            })?;

        log::info!("재설정 토큰 발급: {}", user_id);
        Ok(MSG_RESET_REQUESTED)
    }

    /// 토큰이 지금 사용 가능한지 확인합니다.
    pub async fn verify_token(&self, secret: &str) -> AppResult<()> {
        if secret.trim().is_empty() {
            return Err(invalid_token());
        }

        self.tokens
            .find_valid_by_hash(&hash_secret(secret.trim()), DateTime::now())
            .await?
            .map(|_| ())
            .ok_or_else(invalid_token)
    }

    /// 토큰을 소비하고 비밀번호를 바꿉니다. 성공 시 사용자 ID를 돌려줍니다.
    ///
    /// 토큰을 먼저 `used` 로 선점한 뒤 비밀번호를 저장하므로,
    /// 같은 토큰으로 동시에 들어온 요청 중 하나만 비밀번호를 바꿉니다.
    pub async fn reset_password(&self, secret: &str, new_password: &str) -> AppResult<String> {
        let secret = secret.trim();
        if secret.is_empty() || new_password.is_empty() {
            return Err(AppError::ValidationError(MSG_RESET_FIELDS_REQUIRED.to_string()));
        }
        rules::check_password_policy(new_password)?;

        let now = DateTime::now();
        let record = self
            .tokens
            .find_valid_by_hash(&hash_secret(secret), now)
            .await?
            .ok_or_else(invalid_token)?;

        let token_id = record
            .id
            .ok_or_else(|| AppError::InternalError("토큰 ID가 없습니다".to_string()))?;
        let user_id = record.user_id.to_hex();

        if self.users.find_by_id(&user_id).await?.is_none() {
            log::warn!("재설정 토큰의 사용자가 없습니다: {}", user_id);
            return Err(invalid_token());
        }

        let password_hash = self.passwords.hash(new_password)?;

        if !self.tokens.mark_used(&token_id).await? {
            return Err(invalid_token());
        }

        // 토큰은 이미 소비됨. 여기서 실패하면 사용자는 새 토큰을 요청해야 합니다.
        match self.users.update_password(&user_id, &password_hash).await {
            Ok(true) => {}
            Ok(false) => {
                log::warn!("재설정 토큰 소비 후 사용자를 찾지 못했습니다: {}", user_id);
                return Err(invalid_token());
            }
            Err(e) => {
                log::warn!("재설정 토큰 소비 후 비밀번호 저장 실패 ({}): {}", user_id, e);
                return Err(e);
            }
        }

        self.tokens.invalidate_for_user(&record.user_id, now).await?;

        log::info!("비밀번호 재설정 완료: {}", user_id);
        Ok(user_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::tokens::RESET_TOKEN_TTL_MS;
    use crate::domain::entities::users::{ProfileChanges, User};
    use crate::repositories::memory::{InMemoryResetTokenStore, InMemoryUserStore};
    use async_trait::async_trait;
    use crate::testing::{test_passwords, FailingEmailSender, RecordingEmailSender};
    use crate::validation::rules::MSG_PASSWORD_TOO_SHORT;

    struct Fixture {
        users: Arc<InMemoryUserStore>,
        tokens: Arc<InMemoryResetTokenStore>,
        mailer: Arc<RecordingEmailSender>,
        service: PasswordResetService,
        user_id: String,
    }

    async fn fixture() -> Fixture {
        let users = Arc::new(InMemoryUserStore::new());
        let tokens = Arc::new(InMemoryResetTokenStore::new());
        let mailer = Arc::new(RecordingEmailSender::new());

        let hash = test_passwords().hash("OldPass1").unwrap();
        let user = users
            .insert(User::new_local("Ana".to_string(), "ana@example.com", hash))
            .await
            .unwrap();

        let service = PasswordResetService::new(users.clone(), tokens.clone(), test_passwords(), mailer.clone());

        Fixture {
            users,
            tokens,
            mailer,
            service,
            user_id: user.id_string().unwrap(),
        }
    }

    #[test]
    fn test_secret_is_url_safe_and_hash_is_hex() {
        let secret = generate_secret();

        assert_eq!(secret.len(), 43);
        assert!(secret.chars().all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_'));
        assert_ne!(generate_secret(), secret);

        let hash = hash_secret("abc");
        assert_eq!(hash, "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad");
    }

    #[actix_web::test]
    async fn test_full_reset_round_trip() {
        let f = fixture().await;

        let message = f.service.request_reset("Ana@Example.com").await.unwrap();
        assert_eq!(message, MSG_RESET_REQUESTED);

        let stored = f.tokens.all();
        assert_eq!(stored.len(), 1);
        assert!(!stored[0].used);
        let lifetime = stored[0].expires_at.timestamp_millis() - stored[0].created_at.timestamp_millis();
        assert_eq!(lifetime, RESET_TOKEN_TTL_MS);

        let secret = f.mailer.last_reset_secret().unwrap();
        assert_eq!(stored[0].token_hash, hash_secret(&secret));
        assert_ne!(stored[0].token_hash, secret);

        f.service.verify_token(&secret).await.unwrap();

        let user_id = f.service.reset_password(&secret, "NewPass1").await.unwrap();
        assert_eq!(user_id, f.user_id);
        assert!(f.tokens.all()[0].used);

        let new_hash = f.users.get(&f.user_id).unwrap().password_hash.unwrap();
        assert!(test_passwords().verify("NewPass1", &new_hash).unwrap());
        assert!(!test_passwords().verify("OldPass1", &new_hash).unwrap());

        assert_eq!(
            f.service.reset_password(&secret, "Another1").await.unwrap_err(),
            invalid_token()
        );
        assert_eq!(f.service.verify_token(&secret).await.unwrap_err(), invalid_token());
    }

    #[actix_web::test]
    async fn test_unknown_email_gets_identical_response() {
        let f = fixture().await;

        let known = f.service.request_reset("ana@example.com").await.unwrap();
        let unknown = f.service.request_reset("ghost@example.com").await.unwrap();

        assert_eq!(known, unknown);
        assert_eq!(f.tokens.all().len(), 1);
        assert_eq!(f.mailer.sent().len(), 1);
    }

    #[actix_web::test]
    async fn test_new_request_supersedes_previous_token() {
        let f = fixture().await;

        f.service.request_reset("ana@example.com").await.unwrap();
        let first = f.mailer.last_reset_secret().unwrap();
        f.service.request_reset("ana@example.com").await.unwrap();
        let second = f.mailer.last_reset_secret().unwrap();

        assert_eq!(f.service.verify_token(&first).await.unwrap_err(), invalid_token());
        assert!(f.service.verify_token(&second).await.is_ok());
    }

    #[actix_web::test]
    async fn test_reset_validates_input_before_touching_tokens() {
        let f = fixture().await;
        f.service.request_reset("ana@example.com").await.unwrap();
        let secret = f.mailer.last_reset_secret().unwrap();

        assert_eq!(
            f.service.reset_password(&secret, "").await.unwrap_err(),
            AppError::ValidationError(MSG_RESET_FIELDS_REQUIRED.to_string())
        );
        assert_eq!(
            f.service.reset_password(&secret, "Ab1").await.unwrap_err(),
            AppError::ValidationError(MSG_PASSWORD_TOO_SHORT.to_string())
        );
        assert!(!f.tokens.all()[0].used);
    }

    #[actix_web::test]
    async fn test_expired_token_is_rejected_generically() {
        let f = fixture().await;
        let secret = generate_secret();
        let issued_at = DateTime::from_millis(DateTime::now().timestamp_millis() - RESET_TOKEN_TTL_MS - 1);
        let user_id = mongodb::bson::oid::ObjectId::parse_str(&f.user_id).unwrap();

        f.tokens
            .insert(PasswordResetToken::issue(user_id, hash_secret(&secret), issued_at))
            .await
            .unwrap();

        assert_eq!(f.service.verify_token(&secret).await.unwrap_err(), invalid_token());
        assert_eq!(
            f.service.reset_password(&secret, "NewPass1").await.unwrap_err(),
            invalid_token()
        );
    }

    #[actix_web::test]
    async fn test_malformed_email_and_mail_failure() {
        let f = fixture().await;
        assert!(matches!(
            f.service.request_reset("not-an-email").await,
            Err(AppError::ValidationError(_))
        ));
        assert_eq!(
            f.service.request_reset("  ").await.unwrap_err(),
            AppError::ValidationError(MSG_EMAIL_REQUIRED.to_string())
        );

        let failing = PasswordResetService::new(
            f.users.clone(),
            f.tokens.clone(),
            test_passwords(),
            Arc::new(FailingEmailSender),
        );
        assert!(matches!(
            failing.request_reset("ana@example.com").await,
            Err(AppError::ExternalServiceError(_))
        ));
    }

    /// 비밀번호 저장만 실패하는 저장소
    struct PasswordWriteFailingStore(InMemoryUserStore);

    #[async_trait]
    impl UserStore for PasswordWriteFailingStore {
        async fn find_by_id(&self, id: &str) -> AppResult<Option<User>> {
            self.0.find_by_id(id).await
        }

        async fn find_by_email(&self, email: &str) -> AppResult<Option<User>> {
            self.0.find_by_email(email).await
        }

        async fn find_by_username(&self, username: &str) -> AppResult<Option<User>> {
            self.0.find_by_username(username).await
        }

        async fn insert(&self, user: User) -> AppResult<User> {
            self.0.insert(user).await
        }

        async fn apply_changes(&self, id: &str, changes: &ProfileChanges) -> AppResult<Option<User>> {
            self.0.apply_changes(id, changes).await
        }

        async fn update_password(&self, _id: &str, _password_hash: &str) -> AppResult<bool> {
            Err(AppError::DatabaseError("write concern timeout".to_string()))
        }
    }

    #[actix_web::test]
    async fn test_failed_password_write_surfaces_error_and_burns_token() {
        let users = Arc::new(PasswordWriteFailingStore(InMemoryUserStore::new()));
        let tokens = Arc::new(InMemoryResetTokenStore::new());
        let mailer = Arc::new(RecordingEmailSender::new());
        let hash = test_passwords().hash("OldPass1").unwrap();
        let user = users
            .insert(User::new_local("Ana".to_string(), "ana@example.com", hash.clone()))
            .await
            .unwrap();
        let service = PasswordResetService::new(users.clone(), tokens.clone(), test_passwords(), mailer.clone());

        service.request_reset("ana@example.com").await.unwrap();
        let secret = mailer.last_reset_secret().unwrap();

        let err = service.reset_password(&secret, "NewPass1").await.unwrap_err();

        assert_eq!(err, AppError::DatabaseError("write concern timeout".to_string()));
        assert!(tokens.all()[0].used);
        let stored = users.find_by_id(&user.id_string().unwrap()).await.unwrap().unwrap();
        assert_eq!(stored.password_hash, Some(hash));
        assert_eq!(service.verify_token(&secret).await.unwrap_err(), invalid_token());
    }
}
