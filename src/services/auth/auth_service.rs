//! 가입/로그인 서비스
//!
//! - 이메일 가입: 검증 체인 → bcrypt → 저장 → 환영 메일(실패 무시) → 세션 토큰
//! - 이메일 로그인: 계정 없음/비밀번호 불일치/비밀번호 없는 계정 모두 같은 400
//! - Google 로그인: 검증된 이메일로 기존 계정에 로그인하거나 google 계정 생성

use std::sync::Arc;

use crate::domain::dto::users::response::AuthResponse;
use crate::domain::entities::users::User;
use crate::errors::{AppError, AppResult};
use crate::repositories::UserStore;
use crate::services::auth::{IdentityVerifier, PasswordService, TokenService};
use crate::services::email::{templates, EmailSender};
use crate::validation::rules::MSG_ALL_FIELDS_REQUIRED;
use crate::validation::{registration_chain, FieldMap, Registration, ValidationChain};

pub const MSG_INVALID_CREDENTIALS: &str = "이메일 또는 비밀번호가 올바르지 않습니다";

pub struct AuthService {
    users: Arc<dyn UserStore>,
    passwords: PasswordService,
    tokens: TokenService,
    identity: Arc<dyn IdentityVerifier>,
    mailer: Arc<dyn EmailSender>,
    registration: ValidationChain<FieldMap>,
}

impl AuthService {
    pub fn new(
        users: Arc<dyn UserStore>,
        passwords: PasswordService,
        tokens: TokenService,
        identity: Arc<dyn IdentityVerifier>,
        mailer: Arc<dyn EmailSender>,
    ) -> Self {
        let registration = registration_chain(users.clone());
        log::debug!("가입 검증 체인: {:?}", registration.names());

        Self {
            users,
            passwords,
            tokens,
            identity,
            mailer,
            registration,
        }
    }

    /// 이메일/비밀번호 가입
    ///
    /// # Errors
    ///
    /// * `ValidationError` - 체인 거부 (중복 이메일 포함)
    /// * `ConflictError` - 체인 통과 후 저장 시점의 unique 충돌
    /// * `DatabaseError` - 저장소 장애
    pub async fn register(&self, fields: FieldMap) -> AppResult<AuthResponse> {
        self.registration.run(&fields).await.into_result()?;

        let registration = Registration::from_fields(&fields)
            .ok_or_else(|| AppError::ValidationError(MSG_ALL_FIELDS_REQUIRED.to_string()))?;

        let password_hash = self.passwords.hash(&registration.password)?;
        let user = User::new_local(registration.full_name, &registration.email, password_hash);
        let created = self.users.insert(user).await?;

        log::info!("✅ 신규 가입: {} ({})", created.email, created.id_string().unwrap_or_default());

        let welcome = templates::welcome_email(&created.email, &created.full_name);
        if let Err(e) = self.mailer.send(welcome).await {
            log::warn!("환영 메일 발송 실패 ({}): {}", created.email, e);
        }

        self.session_for(created)
    }

    /// 이메일/비밀번호 로그인
    pub async fn login(&self, email: &str, password: &str) -> AppResult<AuthResponse> {
        let email = email.trim().to_lowercase();
        if email.is_empty() || password.is_empty() {
            return Err(AppError::ValidationError(MSG_ALL_FIELDS_REQUIRED.to_string()));
        }

        let invalid = || AppError::ValidationError(MSG_INVALID_CREDENTIALS.to_string());

        let user = self.users.find_by_email(&email).await?.ok_or_else(invalid)?;
        let password_hash = user.password_hash.as_deref().ok_or_else(invalid)?;

        if !self.passwords.verify(password, password_hash)? {
            log::info!("로그인 실패 (비밀번호 불일치): {}", email);
            return Err(invalid());
        }

        log::info!("로그인 성공: {}", email);
        self.session_for(user)
    }

    /// Google ID 토큰 로그인
    pub async fn google_login(&self, id_token: &str) -> AppResult<AuthResponse> {
        let identity = self.identity.verify(id_token).await?;

        if let Some(existing) = self.users.find_by_email(&identity.email).await? {
            log::info!(
                "Google 로그인: {} (provider={})",
                existing.email,
                existing.auth_provider.as_str()
            );
            return self.session_for(existing);
        }

        let user = User::new_google(identity.name, &identity.email, identity.picture);
        let created = self.users.insert(user).await?;
        log::info!("새 Google 사용자 등록: {}", created.email);

        self.session_for(created)
    }

    fn session_for(&self, user: User) -> AppResult<AuthResponse> {
        let user_id = user
            .id_string()
            .ok_or_else(|| AppError::InternalError("사용자 ID가 없습니다".to_string()))?;
        let token = self.tokens.issue(&user_id)?;

        Ok(AuthResponse::new(user, token))
    }
}
