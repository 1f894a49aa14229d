//! 애플리케이션 상태 조립
//!
//! 저장소, 메일 발송기, 신원 검증기를 받아 서비스를 한 번 생성하고
//! `web::Data`로 감싸 워커마다 공유합니다.
//!
//! ```rust,ignore
//! let state = AppState::build(users, reset_tokens, passwords, tokens, identity, mailer, uploads);
//! HttpServer::new(move || {
//!     let state = state.clone();
//!     App::new().configure(move |cfg| state.configure(cfg)).configure(configure_all_routes)
//! })
//! ```

use std::sync::Arc;

use actix_web::web;

use crate::config::UploadConfig;
use crate::repositories::{ResetTokenStore, UserStore};
use crate::services::audit::AuditLogger;
use crate::services::auth::{
    AuthService, IdentityVerifier, PasswordResetService, PasswordService, TokenService,
};
use crate::services::email::EmailSender;
use crate::services::users::{ProfileService, UploadService};

#[derive(Clone)]
pub struct AppState {
    pub auth: web::Data<AuthService>,
    pub password_reset: web::Data<PasswordResetService>,
    pub profile: web::Data<ProfileService>,
    pub tokens: web::Data<TokenService>,
    pub upload_config: web::Data<UploadConfig>,
    pub audit: web::Data<AuditLogger>,
}

impl AppState {
    pub fn build(
        users: Arc<dyn UserStore>,
        reset_tokens: Arc<dyn ResetTokenStore>,
        passwords: PasswordService,
        tokens: TokenService,
        identity: Arc<dyn IdentityVerifier>,
        mailer: Arc<dyn EmailSender>,
        upload_config: UploadConfig,
    ) -> Self {
        let auth = AuthService::new(
            users.clone(),
            passwords.clone(),
            tokens.clone(),
            identity,
            mailer.clone(),
        );
        let password_reset =
            PasswordResetService::new(users.clone(), reset_tokens, passwords.clone(), mailer);
        let profile = ProfileService::new(users, passwords, UploadService::new(upload_config.clone()));

        Self {
            auth: web::Data::new(auth),
            password_reset: web::Data::new(password_reset),
            profile: web::Data::new(profile),
            tokens: web::Data::new(tokens),
            upload_config: web::Data::new(upload_config),
            audit: web::Data::new(AuditLogger),
        }
    }

    /// 앱 데이터 등록
    pub fn configure(&self, cfg: &mut web::ServiceConfig) {
        cfg.app_data(self.auth.clone())
            .app_data(self.password_reset.clone())
            .app_data(self.profile.clone())
            .app_data(self.tokens.clone())
            .app_data(self.upload_config.clone())
            .app_data(self.audit.clone());
    }
}
